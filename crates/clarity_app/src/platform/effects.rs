use clarity_core::{
    Effect, FailureOrigin, Msg, ProcessingResult, RequestAction, SelectedFile, UploadStage,
};
use clarity_engine::{
    DocumentFilter, DocumentRef, EngineEvent, EngineHandle, Stage, UploadRequest, UploadSettings,
};
use clarity_logging::{clarity_info, clarity_warn};

pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(settings: UploadSettings) -> Self {
        Self {
            engine: EngineHandle::new(settings),
        }
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenPicker { kinds } => {
                    clarity_info!("OpenPicker mime_types={:?}", kinds.mime_types);
                    self.engine
                        .pick(DocumentFilter::from_mime_types("Documents", kinds.mime_types));
                }
                Effect::Upload {
                    request_id,
                    file,
                    action,
                } => {
                    clarity_info!(
                        "Upload request_id={} action={} file={} mime={}",
                        request_id,
                        action,
                        file.name,
                        file.mime_type
                    );
                    self.engine
                        .upload(request_id, upload_request(file, action));
                }
            }
        }
    }

    /// Drains engine events that arrived since the last call.
    pub(crate) fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn upload_request(file: SelectedFile, action: RequestAction) -> UploadRequest {
    UploadRequest {
        document: DocumentRef {
            name: file.name,
            path: file.location,
            mime_type: file.mime_type,
        },
        action: action.as_str().to_string(),
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::UploadProgress {
            request_id: progress.request_id,
            stage: map_stage(progress.stage),
        },
        EngineEvent::UploadCompleted { request_id, result } => {
            let result = match result {
                Ok(outcome) => ProcessingResult::Success(outcome.text),
                Err(err) => {
                    let origin = if err.kind.is_backend() {
                        FailureOrigin::Backend
                    } else {
                        FailureOrigin::Transport
                    };
                    ProcessingResult::Failure {
                        message: err.message,
                        origin,
                    }
                }
            };
            Msg::UploadFinished { request_id, result }
        }
        EngineEvent::PickCompleted(Ok(Some(document))) => Msg::FilePicked(SelectedFile::new(
            document.name,
            document.path,
            Some(document.mime_type),
        )),
        EngineEvent::PickCompleted(Ok(None)) => Msg::PickCanceled,
        EngineEvent::PickCompleted(Err(err)) => {
            clarity_warn!("Error picking document: {}", err);
            Msg::PickFailed(err.to_string())
        }
    }
}

fn map_stage(stage: Stage) -> UploadStage {
    match stage {
        Stage::Reading => UploadStage::Reading,
        Stage::Sending => UploadStage::Sending,
        Stage::Decoding => UploadStage::Decoding,
    }
}
