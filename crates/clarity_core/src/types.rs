use std::fmt;
use std::path::PathBuf;

pub type RequestId = u64;

/// MIME type used when the platform cannot tell what a file is.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// The user's chosen document. Only the location is kept; bytes are read at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub location: PathBuf,
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>, mime_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            mime_type: mime_type
                .filter(|mime| !mime.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestAction {
    Summarize,
    Simplify,
    ExtractInstructions,
    Analyze,
}

impl RequestAction {
    pub const ALL: [RequestAction; 4] = [
        RequestAction::Summarize,
        RequestAction::Simplify,
        RequestAction::ExtractInstructions,
        RequestAction::Analyze,
    ];

    /// Wire value sent in the `action` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestAction::Summarize => "summarize",
            RequestAction::Simplify => "simplify",
            RequestAction::ExtractInstructions => "extract-instructions",
            RequestAction::Analyze => "analyze",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestAction::Summarize => "Summarize",
            RequestAction::Simplify => "Simplify",
            RequestAction::ExtractInstructions => "Extract Instructions",
            RequestAction::Analyze => "Analyze File",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow-up actions on processed content. None of them is implemented yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    ReadAloud,
    Share,
    Save,
}

impl PostAction {
    pub const ALL: [PostAction; 3] = [PostAction::ReadAloud, PostAction::Share, PostAction::Save];

    pub fn label(self) -> &'static str {
        match self {
            PostAction::ReadAloud => "Read Aloud",
            PostAction::Share => "Share",
            PostAction::Save => "Save",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Reading,
    Sending,
    Decoding,
}

/// Where a failed request went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// File read, network, HTTP status or response parsing.
    Transport,
    /// The backend answered but reported `success: false`.
    Backend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    Success(String),
    Failure {
        message: String,
        origin: FailureOrigin,
    },
}
