use std::fmt;
use std::path::PathBuf;

use crate::PickError;

/// Same representation as `clarity_core::RequestId`; the engine does not depend on the core.
pub type RequestId = u64;

/// Matches `clarity_core::DEFAULT_MIME_TYPE`.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Sending,
    Decoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    pub request_id: RequestId,
    pub stage: Stage,
}

/// A document on disk, referenced in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub name: String,
    pub path: PathBuf,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub document: DocumentRef,
    /// Passed through unchanged as the `action` form field.
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub text: String,
    /// Filename echoed back by the backend, when it sends one.
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(UploadProgress),
    UploadCompleted {
        request_id: RequestId,
        result: Result<UploadOutcome, UploadError>,
    },
    PickCompleted(Result<Option<DocumentRef>, PickError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Read,
    Network,
    Timeout,
    HttpStatus(u16),
    InvalidResponse,
    /// The backend answered with a falsy `success`.
    Rejected,
    Aborted,
}

impl FailureKind {
    /// True when the server processed the request and refused it.
    pub fn is_backend(&self) -> bool {
        matches!(self, FailureKind::Rejected)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Read => write!(f, "file read error"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Rejected => write!(f, "rejected by backend"),
            FailureKind::Aborted => write!(f, "aborted"),
        }
    }
}
