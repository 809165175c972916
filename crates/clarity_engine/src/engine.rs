use std::sync::{mpsc, Arc};
use std::thread;

use clarity_logging::{clarity_error, clarity_info, clarity_warn};

use crate::upload::{ChannelProgressSink, ReqwestUploader, UploadSettings, Uploader};
use crate::{
    DialogPicker, DocumentFilter, EngineEvent, FailureKind, FilePicker, PickError, RequestId,
    UploadError, UploadRequest,
};

enum EngineCommand {
    Upload {
        request_id: RequestId,
        request: UploadRequest,
    },
    Pick {
        filter: DocumentFilter,
    },
}

/// Runs picks and uploads on a background tokio runtime and reports back as events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Self {
        Self::with_components(
            Arc::new(ReqwestUploader::new(settings)),
            Arc::new(DialogPicker::default()),
        )
    }

    pub fn with_components(uploader: Arc<dyn Uploader>, picker: Arc<dyn FilePicker>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    clarity_error!("Failed to start engine runtime: {}", err);
                    reject_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let picker = picker.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(uploader, picker, command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn upload(&self, request_id: RequestId, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            request_id,
            request,
        });
    }

    pub fn pick(&self, filter: DocumentFilter) {
        let _ = self.cmd_tx.send(EngineCommand::Pick { filter });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    uploader: Arc<dyn Uploader>,
    picker: Arc<dyn FilePicker>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload {
            request_id,
            request,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            // The inner task keeps a panicking upload from swallowing its completion event.
            let task = tokio::spawn(async move { uploader.upload(request_id, &request, &sink).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(UploadError::new(
                    FailureKind::Aborted,
                    format!("upload task failed: {err}"),
                )),
            };
            match &result {
                Ok(outcome) => clarity_info!(
                    "Upload {} succeeded: {} chars, backend filename {:?}",
                    request_id,
                    outcome.text.len(),
                    outcome.filename
                ),
                Err(err) => clarity_warn!("Upload {} failed: {}", request_id, err),
            }
            let _ = event_tx.send(EngineEvent::UploadCompleted { request_id, result });
        }
        EngineCommand::Pick { filter } => {
            let result = picker.pick(&filter).await;
            match &result {
                Ok(Some(document)) => clarity_info!(
                    "Picked {} ({}) at {:?}",
                    document.name,
                    document.mime_type,
                    document.path
                ),
                Ok(None) => clarity_info!("Document picking canceled"),
                Err(err) => clarity_warn!("Document picking failed: {}", err),
            }
            let _ = event_tx.send(EngineEvent::PickCompleted(result));
        }
    }
}

/// Settles every command with a failure when no runtime is available.
fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        let event = match command {
            EngineCommand::Upload { request_id, .. } => EngineEvent::UploadCompleted {
                request_id,
                result: Err(UploadError::new(
                    FailureKind::Aborted,
                    format!("engine unavailable: {reason}"),
                )),
            },
            EngineCommand::Pick { .. } => {
                EngineEvent::PickCompleted(Err(PickError::Unavailable(reason.to_string())))
            }
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
}
