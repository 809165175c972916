use std::path::Path;

use clarity_logging::clarity_debug;
use thiserror::Error;

use crate::{DocumentRef, DEFAULT_MIME_TYPE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("picked path has no file name: {0}")]
    NoFileName(String),
    #[error("picked path is not a regular file: {0}")]
    NotAFile(String),
    #[error("picked file is not readable: {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("file picker unavailable: {0}")]
    Unavailable(String),
}

/// Restricts a picker to a set of document MIME types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    pub name: String,
    pub mime_types: Vec<String>,
}

impl DocumentFilter {
    pub fn from_mime_types(name: impl Into<String>, mime_types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            mime_types,
        }
    }

    /// Plain text, PDF and Word documents.
    pub fn documents() -> Self {
        Self::from_mime_types(
            "Documents",
            vec![
                "text/plain".to_string(),
                "application/pdf".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            ],
        )
    }

    /// File extensions registered for the filter's MIME types, without duplicates.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = Vec::new();
        for mime in &self.mime_types {
            for ext in mime_guess::get_mime_extensions_str(mime).unwrap_or_default() {
                if !extensions.contains(ext) {
                    extensions.push(*ext);
                }
            }
        }
        extensions
    }
}

/// Builds a document handle for a path without copying the file.
pub async fn describe_document(path: &Path) -> Result<DocumentRef, PickError> {
    let display = path.display().to_string();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PickError::NoFileName(display.clone()))?;

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|err| PickError::Unreadable {
            path: display.clone(),
            reason: err.to_string(),
        })?;
    if !metadata.is_file() {
        return Err(PickError::NotAFile(display));
    }

    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string();

    Ok(DocumentRef {
        name,
        path: path.to_path_buf(),
        mime_type,
    })
}

#[async_trait::async_trait]
pub trait FilePicker: Send + Sync {
    /// Returns `Ok(None)` when the user cancels.
    async fn pick(&self, filter: &DocumentFilter) -> Result<Option<DocumentRef>, PickError>;
}

/// Native file dialog via the desktop portal.
/// Native file dialog.
///
/// Through the xdg portal, rfd reports a failed dialog the same way as a
/// cancel (`None`), so this picker only returns `Err` when the chosen path
/// itself is unusable (see [`describe_document`]).
#[derive(Debug, Clone)]
pub struct DialogPicker {
    title: String,
}

impl Default for DialogPicker {
    fn default() -> Self {
        Self {
            title: "Choose a document".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl FilePicker for DialogPicker {
    async fn pick(&self, filter: &DocumentFilter) -> Result<Option<DocumentRef>, PickError> {
        let extensions = filter.extensions();
        clarity_debug!("Opening file dialog for extensions {:?}", extensions);

        let handle = rfd::AsyncFileDialog::new()
            .set_title(self.title.as_str())
            .add_filter(filter.name.as_str(), extensions.as_slice())
            .pick_file()
            .await;

        match handle {
            Some(handle) => describe_document(handle.path()).await.map(Some),
            None => Ok(None),
        }
    }
}
