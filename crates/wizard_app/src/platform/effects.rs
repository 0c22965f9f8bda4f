use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use wizard_core::{Effect, Msg, SubmissionOutcome, TransportFailure};
use wizard_engine::{
    EngineEvent, EngineHandle, EngineSettings, FailureKind, ServerReply, SubmitError,
};
use wizard_logging::{wizard_info, wizard_warn};

use super::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let engine = EngineHandle::new(settings);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::EncodeFile { upload_id, path } => {
                    wizard_info!("EncodeFile upload_id={}", upload_id);
                    self.engine.encode(upload_id, path);
                }
                Effect::Submit { action, payload } => {
                    let entries = payload.into_entries();
                    wizard_info!("Submit fields={} action={}", entries.len(), action);
                    self.engine.submit(action, entries);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if event_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::EncodeCompleted { upload_id, result } => match result {
            Ok(data_url) => Msg::FileEncoded {
                upload_id,
                data_url,
            },
            Err(err) => {
                wizard_warn!("Encode {} failed: {}", upload_id, err);
                Msg::FileEncodeFailed {
                    upload_id,
                    reason: err.to_string(),
                }
            }
        },
        EngineEvent::SubmitCompleted { result } => match result {
            Ok(ServerReply::Accepted { message }) => {
                Msg::SubmissionCompleted(SubmissionOutcome::Success { message })
            }
            Ok(ServerReply::Rejected { status, message }) => {
                wizard_info!("Submission rejected with status {}", status);
                Msg::SubmissionCompleted(SubmissionOutcome::Failure { message })
            }
            Err(err) => {
                wizard_warn!("Submission failed: {}", err);
                Msg::SubmissionFailed(map_failure(&err))
            }
        },
    }
}

fn map_failure(err: &SubmitError) -> TransportFailure {
    match err.kind {
        FailureKind::Timeout => TransportFailure::Timeout,
        FailureKind::MalformedResponse { status } | FailureKind::TooLarge { status, .. } => {
            TransportFailure::MalformedResponse { status }
        }
        FailureKind::InvalidUrl | FailureKind::Network => TransportFailure::Unreachable,
    }
}

#[cfg(test)]
mod tests {
    use wizard_engine::EncodeError;

    use super::*;

    fn submit_error(kind: FailureKind) -> EngineEvent {
        EngineEvent::SubmitCompleted {
            result: Err(SubmitError {
                kind,
                message: "boom".to_string(),
            }),
        }
    }

    #[test]
    fn encode_results_map_to_file_messages() {
        assert_eq!(
            map_event(EngineEvent::EncodeCompleted {
                upload_id: 3,
                result: Ok("data:image/png;base64,AA==".to_string()),
            }),
            Msg::FileEncoded {
                upload_id: 3,
                data_url: "data:image/png;base64,AA==".to_string(),
            }
        );

        let msg = map_event(EngineEvent::EncodeCompleted {
            upload_id: 4,
            result: Err(EncodeError::TooLarge {
                max_bytes: 10,
                actual: 20,
            }),
        });
        assert_eq!(
            msg,
            Msg::FileEncodeFailed {
                upload_id: 4,
                reason: "file too large (max 10 bytes, actual 20)".to_string(),
            }
        );
    }

    #[test]
    fn server_replies_become_outcomes() {
        assert_eq!(
            map_event(EngineEvent::SubmitCompleted {
                result: Ok(ServerReply::Accepted {
                    message: "Welcome aboard!".to_string(),
                }),
            }),
            Msg::SubmissionCompleted(SubmissionOutcome::Success {
                message: "Welcome aboard!".to_string(),
            })
        );
        assert_eq!(
            map_event(EngineEvent::SubmitCompleted {
                result: Ok(ServerReply::Rejected {
                    status: 400,
                    message: "SSN already registered.".to_string(),
                }),
            }),
            Msg::SubmissionCompleted(SubmissionOutcome::Failure {
                message: "SSN already registered.".to_string(),
            })
        );
    }

    #[test]
    fn transport_errors_become_failures() {
        assert_eq!(
            map_event(submit_error(FailureKind::Timeout)),
            Msg::SubmissionFailed(TransportFailure::Timeout)
        );
        assert_eq!(
            map_event(submit_error(FailureKind::Network)),
            Msg::SubmissionFailed(TransportFailure::Unreachable)
        );
        assert_eq!(
            map_event(submit_error(FailureKind::InvalidUrl)),
            Msg::SubmissionFailed(TransportFailure::Unreachable)
        );
        assert_eq!(
            map_event(submit_error(FailureKind::MalformedResponse { status: 502 })),
            Msg::SubmissionFailed(TransportFailure::MalformedResponse { status: 502 })
        );
        assert_eq!(
            map_event(submit_error(FailureKind::TooLarge {
                max_bytes: 16,
                status: 200,
            })),
            Msg::SubmissionFailed(TransportFailure::MalformedResponse { status: 200 })
        );
    }
}
