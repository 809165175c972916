use crate::UploadStage;

pub const NO_FILE_LABEL: &str = "No file chosen";
pub const NOTICE_CHOOSE_FILE: &str = "Please choose a file first.";
pub const NOTICE_PICK_FAILED: &str = "Error picking document.";
pub const NOTICE_UPLOAD_FAILED: &str = "Error processing file. Check the log for details.";
pub const NOTICE_NO_VALID_CONTENT: &str =
    "No valid processed content available to perform this action.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView {
    Content(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub file_label: String,
    pub picker_enabled: bool,
    pub actions_enabled: bool,
    pub status: Option<String>,
    pub stage: Option<UploadStage>,
    pub output: Option<OutputView>,
    pub post_actions_enabled: bool,
    pub notice: Option<String>,
    pub spinner_frame: u8,
    pub dirty: bool,
}
