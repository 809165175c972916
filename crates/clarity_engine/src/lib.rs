//! ClarityAssist engine: document picking, upload IO and effect execution.
mod engine;
mod picker;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use picker::{describe_document, DialogPicker, DocumentFilter, FilePicker, PickError};
pub use types::{
    DocumentRef, EngineEvent, FailureKind, RequestId, Stage, UploadError, UploadOutcome,
    UploadProgress, UploadRequest, DEFAULT_MIME_TYPE,
};
pub use upload::{
    interpret_response, ChannelProgressSink, ProgressSink, ReqwestUploader, Uploader,
    UploadSettings, BACKEND_DEFAULT_ERROR, DEFAULT_ENDPOINT,
};
