use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use wizard_logging::{wizard_error, wizard_info, wizard_warn};

use crate::encode::{DataUrlEncoder, EncodeSettings, FileEncoder};
use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EncodeError, EngineEvent, FailureKind, SubmitError, UploadId};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub encode: EncodeSettings,
    pub submit: SubmitSettings,
}

enum EngineCommand {
    Encode {
        upload_id: UploadId,
        path: PathBuf,
    },
    Submit {
        action: String,
        entries: Vec<(String, String)>,
    },
}

/// Runs encodes and submissions on a background tokio runtime and reports
/// their completions as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_workers(
            Arc::new(DataUrlEncoder::new(settings.encode)),
            Arc::new(ReqwestSubmitter::new(settings.submit)),
        )
    }

    pub fn with_workers(encoder: Arc<dyn FileEncoder>, submitter: Arc<dyn Submitter>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    wizard_error!("Failed to start engine runtime: {}", err);
                    // Answer every command so callers waiting on a completion are released.
                    let reason = err.to_string();
                    while let Ok(command) = cmd_rx.recv() {
                        if event_tx.send(unavailable(command, &reason)).is_err() {
                            break;
                        }
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let encoder = encoder.clone();
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(encoder.as_ref(), submitter.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn encode(&self, upload_id: UploadId, path: impl Into<PathBuf>) {
        self.send(EngineCommand::Encode {
            upload_id,
            path: path.into(),
        });
    }

    pub fn submit(&self, action: impl Into<String>, entries: Vec<(String, String)>) {
        self.send(EngineCommand::Submit {
            action: action.into(),
            entries,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            wizard_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    encoder: &dyn FileEncoder,
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Encode { upload_id, path } => {
            wizard_info!("Encoding upload {}", upload_id);
            let result = encoder.encode(&path).await;
            if let Err(err) = &result {
                wizard_warn!("Upload {} failed: {}", upload_id, err);
            }
            EngineEvent::EncodeCompleted { upload_id, result }
        }
        EngineCommand::Submit { action, entries } => {
            let result = submitter.submit(&action, &entries).await;
            if let Err(err) = &result {
                wizard_warn!("Submission failed: {}", err);
            }
            EngineEvent::SubmitCompleted { result }
        }
    };
    let _ = event_tx.send(event);
}

fn unavailable(command: EngineCommand, reason: &str) -> EngineEvent {
    match command {
        EngineCommand::Encode { upload_id, .. } => EngineEvent::EncodeCompleted {
            upload_id,
            result: Err(EncodeError::Unavailable(reason.to_string())),
        },
        EngineCommand::Submit { .. } => EngineEvent::SubmitCompleted {
            result: Err(SubmitError::new(
                FailureKind::Network,
                format!("engine unavailable: {reason}"),
            )),
        },
    }
}
