//! ClarityAssist core: pure screen state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::{DocumentKinds, Effect};
pub use msg::Msg;
pub use state::{AppState, Phase};
pub use types::{
    FailureOrigin, PostAction, ProcessingResult, RequestAction, RequestId, SelectedFile,
    UploadStage, DEFAULT_MIME_TYPE,
};
pub use update::update;
pub use view_model::{
    AppViewModel, OutputView, NO_FILE_LABEL, NOTICE_CHOOSE_FILE, NOTICE_NO_VALID_CONTENT,
    NOTICE_PICK_FAILED, NOTICE_UPLOAD_FAILED,
};
