use crate::view_model::{
    NOTICE_CHOOSE_FILE, NOTICE_NO_VALID_CONTENT, NOTICE_PICK_FAILED, NOTICE_UPLOAD_FAILED,
};
use crate::{AppState, DocumentKinds, Effect, FailureOrigin, Msg, ProcessingResult};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PickClicked => {
            // Triggers are inert while a request or a picker dialog is outstanding.
            if state.is_uploading() || state.is_picking() {
                return (state, Vec::new());
            }
            state.begin_pick();
            vec![Effect::OpenPicker {
                kinds: DocumentKinds::default(),
            }]
        }
        Msg::FilePicked(file) => {
            state.end_pick();
            if state.is_uploading() {
                return (state, Vec::new());
            }
            state.select_file(file);
            Vec::new()
        }
        Msg::PickCanceled => {
            state.end_pick();
            Vec::new()
        }
        Msg::PickFailed(_reason) => {
            state.end_pick();
            state.show_notice(NOTICE_PICK_FAILED);
            Vec::new()
        }
        Msg::ActionClicked(action) => {
            if state.is_uploading() || state.is_picking() {
                return (state, Vec::new());
            }
            match state.begin_upload(action) {
                Some((request_id, file)) => vec![Effect::Upload {
                    request_id,
                    file,
                    action,
                }],
                None => {
                    state.show_notice(NOTICE_CHOOSE_FILE);
                    Vec::new()
                }
            }
        }
        Msg::UploadProgress { request_id, stage } => {
            state.set_stage(request_id, stage);
            Vec::new()
        }
        Msg::UploadFinished { request_id, result } => {
            let raise_notice = matches!(
                result,
                ProcessingResult::Failure {
                    origin: FailureOrigin::Transport,
                    ..
                }
            );
            if state.settle(request_id, result) && raise_notice {
                state.show_notice(NOTICE_UPLOAD_FAILED);
            }
            Vec::new()
        }
        Msg::PostActionClicked(action) => {
            if state.is_uploading() {
                return (state, Vec::new());
            }
            if state.has_valid_content() {
                state.show_notice(format!(
                    "{} feature not yet implemented for the processed content.",
                    action.label()
                ));
            } else {
                state.show_notice(NOTICE_NO_VALID_CONTENT);
            }
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::Tick => {
            state.advance_spinner();
            Vec::new()
        }
    };

    (state, effects)
}
