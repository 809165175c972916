#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed "Choose File".
    PickClicked,
    /// The picker returned a document.
    FilePicked(crate::SelectedFile),
    /// The picker was dismissed without a choice.
    PickCanceled,
    /// The picker failed; the reason is logged, not shown.
    PickFailed(String),
    /// User triggered one of the processing actions.
    ActionClicked(crate::RequestAction),
    /// Engine progress for the in-flight request.
    UploadProgress {
        request_id: crate::RequestId,
        stage: crate::UploadStage,
    },
    /// Engine settlement for a request, success or failure.
    UploadFinished {
        request_id: crate::RequestId,
        result: crate::ProcessingResult,
    },
    /// User triggered Read Aloud, Share or Save.
    PostActionClicked(crate::PostAction),
    /// User acknowledged the popup.
    NoticeDismissed,
    /// UI/render tick; drives the loading indicator.
    Tick,
}
