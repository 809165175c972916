use std::time::Duration;

use clarity_logging::{clarity_debug, clarity_warn};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::{
    EngineEvent, FailureKind, RequestId, Stage, UploadError, UploadOutcome, UploadProgress,
    UploadRequest, DEFAULT_MIME_TYPE,
};

/// Endpoint used when no settings override it. Edit per deployment.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/upload";

pub const BACKEND_DEFAULT_ERROR: &str =
    "Processing failed with no specific error message from backend.";

/// Connection settings. Timeouts are unset by default, leaving the platform defaults.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        request_id: RequestId,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<UploadOutcome, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }

    /// Builds the `document` part, streaming the file from its original location.
    async fn document_part(&self, request: &UploadRequest) -> Result<Part, UploadError> {
        let document = &request.document;
        let read_error = |err: std::io::Error| {
            UploadError::new(
                FailureKind::Read,
                format!("Could not read {}: {err}", document.path.display()),
            )
        };

        let file = tokio::fs::File::open(&document.path)
            .await
            .map_err(read_error)?;
        let len = file.metadata().await.map_err(read_error)?.len();

        let mime_type = match document.mime_type.parse::<mime_guess::Mime>() {
            Ok(mime) => mime.to_string(),
            Err(_) => {
                clarity_warn!(
                    "Invalid MIME type {:?} for {}, sending as {}",
                    document.mime_type,
                    document.name,
                    DEFAULT_MIME_TYPE
                );
                DEFAULT_MIME_TYPE.to_string()
            }
        };

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        Part::stream_with_length(body, len)
            .file_name(document.name.clone())
            .mime_str(&mime_type)
            .map_err(|err| UploadError::new(FailureKind::Read, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request_id: RequestId,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<UploadOutcome, UploadError> {
        let client = self.build_client()?;

        sink.emit(EngineEvent::Progress(UploadProgress {
            request_id,
            stage: Stage::Reading,
        }));
        let part = self.document_part(request).await?;
        let form = Form::new()
            .part("document", part)
            .text("action", request.action.clone());

        sink.emit(EngineEvent::Progress(UploadProgress {
            request_id,
            stage: Stage::Sending,
        }));
        clarity_debug!(
            "POST {} request_id={} action={} file={}",
            self.settings.endpoint,
            request_id,
            request.action,
            request.document.name
        );
        let response = client
            .post(&self.settings.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        sink.emit(EngineEvent::Progress(UploadProgress {
            request_id,
            stage: Stage::Decoding,
        }));
        interpret_response(status.as_u16(), &body)
    }
}

/// Applies the backend's response contract to a status code and raw body.
///
/// Non-2xx statuses fail with the status and body. A 2xx body must be JSON with a
/// truthy `success`; otherwise the `error` field (or a default) is reported. On
/// success `extracted_text` is returned as-is.
pub fn interpret_response(status: u16, body: &str) -> Result<UploadOutcome, UploadError> {
    if !(200..300).contains(&status) {
        return Err(UploadError::new(
            FailureKind::HttpStatus(status),
            format!("HTTP error! Status: {status}, Body: {body}"),
        ));
    }

    let value: Value = serde_json::from_str(body).map_err(|err| {
        UploadError::new(
            FailureKind::InvalidResponse,
            format!("Invalid JSON response: {err}"),
        )
    })?;

    if !is_truthy(value.get("success")) {
        let message = match value.get("error") {
            Some(error) if is_truthy(Some(error)) => text_of(error),
            _ => BACKEND_DEFAULT_ERROR.to_string(),
        };
        return Err(UploadError::new(FailureKind::Rejected, message));
    }

    let text = match value.get("extracted_text") {
        None | Some(Value::Null) => String::new(),
        Some(text) => text_of(text),
    };
    let filename = value
        .get("filename")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    Ok(UploadOutcome { text, filename })
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
