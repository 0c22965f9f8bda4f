use std::path::Path;

use crate::address::resolve_address;
use crate::payload::build_payload;
use crate::{
    AddressRecord, Effect, EncodedFile, Field, Msg, SubmissionOutcome, SubmissionState,
    WizardSession,
};

pub const PENDING_TEXT: &str = "Please wait...";

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut state: WizardSession, msg: Msg) -> (WizardSession, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            state.set_value(field, value);
            Vec::new()
        }
        Msg::FileSelected { path } => {
            state.set_value(Field::GovtId, file_label(&path));
            let upload_id = state.begin_upload();
            vec![Effect::EncodeFile { upload_id, path }]
        }
        Msg::FileEncoded {
            upload_id,
            data_url,
        } => {
            let applied = state.complete_upload(upload_id, Some(EncodedFile::new(data_url)));
            if applied && state.submission() == SubmissionState::AwaitingUpload {
                // Fields may have changed while the upload was pending.
                submit_validated(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::FileEncodeFailed { upload_id, reason } => {
            if state.complete_upload(upload_id, None) {
                if state.submission() == SubmissionState::AwaitingUpload {
                    state.set_submission(SubmissionState::Idle);
                }
                state.mark_invalid(Field::GovtId);
                state
                    .alert_mut()
                    .show_errors(vec![format!("Photo ID image could not be read: {reason}")]);
            }
            Vec::new()
        }
        Msg::PlaceSelected(place) => {
            fill_address(&mut state, &resolve_address(&place));
            state.set_place(place);
            Vec::new()
        }
        Msg::NextClicked => {
            state.alert_mut().clear();
            let active = state.active_step();
            let result = state.validate_steps([active]);
            if result.is_valid() {
                if !state.is_last_step() {
                    state.move_to(active + 1);
                }
            } else {
                state.alert_mut().show_errors(result.into_errors());
            }
            Vec::new()
        }
        Msg::BackClicked => {
            state.alert_mut().clear();
            cancel_queued_submission(&mut state);
            let active = state.active_step();
            if active > 0 {
                state.move_to(active - 1);
            }
            Vec::new()
        }
        Msg::EditClicked { step } => {
            state.alert_mut().clear();
            cancel_queued_submission(&mut state);
            if step < state.layout().step_count() {
                state.move_to(step);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One submission at a time; the pending alert stays up.
            if state.submission() != SubmissionState::Idle || !state.is_last_step() {
                return (state, Vec::new());
            }
            state.alert_mut().clear();
            submit_validated(&mut state)
        }
        Msg::SubmissionCompleted(outcome) => {
            if state.submission() == SubmissionState::InFlight {
                state.set_submission(SubmissionState::Idle);
                match outcome {
                    SubmissionOutcome::Success { message } => {
                        state.alert_mut().show_success(message)
                    }
                    SubmissionOutcome::Failure { message } => {
                        state.alert_mut().show_errors(vec![message])
                    }
                }
            }
            Vec::new()
        }
        Msg::SubmissionFailed(failure) => {
            if state.submission() == SubmissionState::InFlight {
                state.set_submission(SubmissionState::Idle);
                state.alert_mut().show_errors(vec![failure.user_message()]);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Validates every step, then submits or queues behind the pending upload.
/// Earlier steps are re-checked too: edits can reach the last step without
/// passing through them again.
fn submit_validated(state: &mut WizardSession) -> Vec<Effect> {
    if !state.is_last_step() {
        state.set_submission(SubmissionState::Idle);
        return Vec::new();
    }
    let result = state.validate_steps(0..state.layout().step_count());
    if !result.is_valid() {
        state.set_submission(SubmissionState::Idle);
        state.alert_mut().show_errors(result.into_errors());
        return Vec::new();
    }
    if state.is_encoding() {
        state.set_submission(SubmissionState::AwaitingUpload);
        state.alert_mut().show_pending(PENDING_TEXT);
        return Vec::new();
    }
    start_submission(state)
}

/// Leaving the last step abandons a submission still waiting for its upload.
fn cancel_queued_submission(state: &mut WizardSession) {
    if state.submission() == SubmissionState::AwaitingUpload {
        state.set_submission(SubmissionState::Idle);
    }
}

/// Assembles the payload and hands it to the transport. Without an encoded file
/// the submission is refused instead of sending an empty upload.
fn start_submission(state: &mut WizardSession) -> Vec<Effect> {
    let Some(file) = state.encoded_file().cloned() else {
        state.set_submission(SubmissionState::Idle);
        state.mark_invalid(Field::GovtId);
        state
            .alert_mut()
            .show_errors(vec!["Photo ID image required.".to_string()]);
        return Vec::new();
    };

    let address = state.place().map(resolve_address);
    let payload = build_payload(state.layout(), state.values(), address.as_ref(), &file);
    state.set_submission(SubmissionState::InFlight);
    state.alert_mut().show_pending(PENDING_TEXT);
    vec![Effect::Submit {
        action: state.action().to_string(),
        payload,
    }]
}

fn fill_address(state: &mut WizardSession, address: &AddressRecord) {
    let layout = state.layout();
    let targets = [
        (Field::AddressStreet, address.street.clone()),
        (Field::AddressCity, address.city.clone()),
        (Field::AddressState, address.state.clone()),
        (Field::AddressZip, address.zip.clone()),
        (Field::Address, address.one_line()),
    ]
    .into_iter()
    .filter(|(field, _)| layout.contains(*field))
    .collect::<Vec<_>>();

    for (field, value) in targets {
        state.set_value(field, value);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
