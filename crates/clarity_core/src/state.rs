use crate::view_model::{AppViewModel, OutputView, NO_FILE_LABEL};
use crate::{FailureOrigin, ProcessingResult, RequestAction, RequestId, SelectedFile, UploadStage};

/// Where the screen is in the pick/upload cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FileSelected,
    Uploading {
        request_id: RequestId,
        action: RequestAction,
        stage: Option<UploadStage>,
    },
    Succeeded {
        text: String,
    },
    Failed {
        message: String,
        origin: FailureOrigin,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    selected_file: Option<SelectedFile>,
    picking: bool,
    notice: Option<String>,
    last_request_id: RequestId,
    spinner_frame: u8,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_picking(&self) -> bool {
        self.picking
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, Phase::Uploading { .. })
    }

    /// Id of the request currently awaiting settlement, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Uploading { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_uploading() || self.picking;
        let file_label = self
            .selected_file
            .as_ref()
            .map(|file| file.name.clone())
            .unwrap_or_else(|| NO_FILE_LABEL.to_string());

        let (status, stage) = match &self.phase {
            Phase::Uploading { action, stage, .. } => {
                let name = self
                    .selected_file
                    .as_ref()
                    .map(|file| file.name.as_str())
                    .unwrap_or_default();
                (
                    Some(format!("Processing \"{name}\" with action: {action}...")),
                    *stage,
                )
            }
            _ => (None, None),
        };

        let output = match &self.phase {
            Phase::Succeeded { text } => Some(OutputView::Content(text.clone())),
            Phase::Failed { message, origin } => Some(OutputView::Error(match origin {
                FailureOrigin::Transport => format!("Could not process file. {message}"),
                FailureOrigin::Backend => message.clone(),
            })),
            Phase::Idle | Phase::FileSelected | Phase::Uploading { .. } => None,
        };

        AppViewModel {
            file_label,
            picker_enabled: !busy,
            actions_enabled: !busy && self.selected_file.is_some(),
            status,
            stage,
            output,
            post_actions_enabled: !busy && self.has_valid_content(),
            notice: self.notice.clone(),
            spinner_frame: self.spinner_frame,
            dirty: self.dirty,
        }
    }

    pub(crate) fn has_valid_content(&self) -> bool {
        match &self.phase {
            Phase::Succeeded { text } => !text.is_empty() && !text.starts_with("Error:"),
            _ => false,
        }
    }

    pub(crate) fn begin_pick(&mut self) {
        self.picking = true;
        self.dirty = true;
    }

    pub(crate) fn end_pick(&mut self) {
        if self.picking {
            self.picking = false;
            self.dirty = true;
        }
    }

    /// Replaces the selection wholesale and drops any displayed result.
    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.phase = Phase::FileSelected;
        self.dirty = true;
    }

    /// Enters `Uploading` for a fresh request id. Callers check for a selection first.
    pub(crate) fn begin_upload(&mut self, action: RequestAction) -> Option<(RequestId, SelectedFile)> {
        let file = self.selected_file.clone()?;
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.phase = Phase::Uploading {
            request_id,
            action,
            stage: None,
        };
        self.spinner_frame = 0;
        self.dirty = true;
        Some((request_id, file))
    }

    pub(crate) fn set_stage(&mut self, id: RequestId, next: UploadStage) {
        if let Phase::Uploading {
            request_id, stage, ..
        } = &mut self.phase
        {
            if *request_id == id && *stage != Some(next) {
                *stage = Some(next);
                self.dirty = true;
            }
        }
    }

    /// Leaves `Uploading` with the request's result. Stale ids are rejected.
    pub(crate) fn settle(&mut self, id: RequestId, result: ProcessingResult) -> bool {
        if self.in_flight() != Some(id) {
            return false;
        }
        self.phase = match result {
            ProcessingResult::Success(text) => Phase::Succeeded { text },
            ProcessingResult::Failure { message, origin } => Phase::Failed { message, origin },
        };
        self.dirty = true;
        true
    }

    pub(crate) fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.dirty = true;
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn advance_spinner(&mut self) {
        if self.is_uploading() {
            self.spinner_frame = (self.spinner_frame + 1) % 4;
            self.dirty = true;
        }
    }
}
