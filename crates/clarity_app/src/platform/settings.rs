use std::fs;
use std::path::Path;
use std::time::Duration;

use clarity_engine::{UploadSettings, DEFAULT_ENDPOINT};
use serde::Deserialize;
use thiserror::Error;

use super::logging::{LogDestination, LOG_FILENAME};

pub(crate) const SETTINGS_FILENAME: &str = "clarity.ron";

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(String),
}

/// Optional overrides read from `clarity.ron`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub endpoint: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_to_file: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log_to_file: true,
        }
    }
}

impl AppSettings {
    pub(crate) fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub(crate) fn log_destination(&self, dir: &Path) -> LogDestination {
        if self.log_to_file {
            LogDestination::File(dir.join(LOG_FILENAME))
        } else {
            LogDestination::Disabled
        }
    }
}

/// Loads settings from `dir`, falling back to defaults.
///
/// Runs before logging is up, so a failure is handed back for the caller to log.
pub(crate) fn load_settings(dir: &Path) -> (AppSettings, Option<SettingsError>) {
    match read_settings(&dir.join(SETTINGS_FILENAME)) {
        Ok(Some(settings)) => (settings, None),
        Ok(None) => (AppSettings::default(), None),
        Err(err) => (AppSettings::default(), Some(err)),
    }
}

fn read_settings(path: &Path) -> Result<Option<AppSettings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|err| SettingsError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let (settings, err) = load_settings(temp.path());
        assert_eq!(settings, AppSettings::default());
        assert!(err.is_none());
        assert_eq!(settings.upload_settings().endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn partial_file_overrides_given_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILENAME),
            r#"(endpoint: "http://192.168.1.100:5000/upload", request_timeout_secs: Some(90))"#,
        )
        .unwrap();

        let (settings, err) = load_settings(temp.path());
        assert!(err.is_none());
        assert_eq!(settings.endpoint, "http://192.168.1.100:5000/upload");
        assert!(settings.log_to_file);

        let upload = settings.upload_settings();
        assert_eq!(upload.request_timeout, Some(Duration::from_secs(90)));
        assert_eq!(upload.connect_timeout, None);
    }

    #[test]
    fn malformed_file_falls_back_with_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILENAME), "(endpoint: 42").unwrap();

        let (settings, err) = load_settings(temp.path());
        assert_eq!(settings, AppSettings::default());
        assert!(matches!(err, Some(SettingsError::Parse(_))));
    }

    #[test]
    fn disabled_logging_has_no_destination() {
        let settings = AppSettings {
            log_to_file: false,
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.log_destination(Path::new(".")),
            LogDestination::Disabled
        ));
    }
}
