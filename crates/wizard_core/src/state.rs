use std::collections::BTreeSet;

use url::Url;

use crate::validate::validate_step;
use crate::view_model::{FieldView, ReviewEntry, ReviewSection, StepView, WizardViewModel};
use crate::{Alert, EncodedFile, Field, FieldSet, FormLayout, Place, ValidationResult};

pub type UploadId = u64;

/// Server verdict on a submission, decoded from the response body's `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { message: String },
    Failure { message: String },
}

/// Submission attempts that produced no usable server verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Unreachable,
    Timeout,
    /// The body was not the expected JSON, on either a 2xx or an error status.
    MalformedResponse { status: u16 },
}

impl TransportFailure {
    pub fn user_message(&self) -> String {
        match self {
            TransportFailure::Unreachable => {
                "Could not reach the registration server. Please try again.".to_string()
            }
            TransportFailure::Timeout => {
                "The registration server took too long to respond. Please try again.".to_string()
            }
            TransportFailure::MalformedResponse { status } => {
                format!("The server returned an unexpected response (HTTP {status}).")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Submit was accepted but the ID document is still being encoded.
    AwaitingUpload,
    InFlight,
}

/// Tracks the newest file selection and its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadState {
    next_id: UploadId,
    current: Option<UploadId>,
    encoding: bool,
    encoded: Option<EncodedFile>,
}

impl UploadState {
    fn begin(&mut self) -> UploadId {
        self.next_id += 1;
        self.current = Some(self.next_id);
        self.encoding = true;
        self.encoded = None;
        self.next_id
    }

    /// Applies a completion; returns false for a superseded selection.
    fn complete(&mut self, id: UploadId, encoded: Option<EncodedFile>) -> bool {
        if self.current != Some(id) {
            return false;
        }
        self.encoding = false;
        self.encoded = encoded;
        true
    }
}

/// One wizard instance: the active step, form values and everything pending on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    layout: FormLayout,
    action: Url,
    active_step: usize,
    values: FieldSet,
    invalid: BTreeSet<Field>,
    alert: Alert,
    review: Option<Vec<ReviewSection>>,
    place: Option<Place>,
    upload: UploadState,
    submission: SubmissionState,
    dirty: bool,
}

impl WizardSession {
    /// `action` is the endpoint the form posts to.
    pub fn new(layout: FormLayout, action: Url) -> Self {
        Self {
            layout,
            action,
            active_step: 0,
            values: FieldSet::new(),
            invalid: BTreeSet::new(),
            alert: Alert::default(),
            review: None,
            place: None,
            upload: UploadState::default(),
            submission: SubmissionState::Idle,
            dirty: true,
        }
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn action(&self) -> &Url {
        &self.action
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn values(&self) -> &FieldSet {
        &self.values
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    pub fn encoded_file(&self) -> Option<&EncodedFile> {
        self.upload.encoded.as_ref()
    }

    pub fn is_encoding(&self) -> bool {
        self.upload.encoding
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step == self.layout.last_index()
    }

    /// True when every field of the active step holds a value.
    pub fn active_step_filled(&self) -> bool {
        self.layout
            .step(self.active_step)
            .map(|step| step.fields.iter().all(|&field| self.values.is_filled(field)))
            .unwrap_or(true)
    }

    pub fn view(&self) -> WizardViewModel {
        let last = self.is_last_step();
        let steps = self
            .layout
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| StepView {
                index,
                title: step.title.clone(),
                active: index == self.active_step,
                fields: step
                    .fields
                    .iter()
                    .map(|&field| FieldView {
                        field,
                        label: field.label(),
                        value: self.values.get(field).to_string(),
                        invalid: self.invalid.contains(&field),
                    })
                    .collect(),
            })
            .collect();

        WizardViewModel {
            steps,
            active_step: self.active_step,
            step_count: self.layout.step_count(),
            back_enabled: self.active_step > 0,
            next_visible: !last,
            next_enabled: !last && self.active_step_filled(),
            submit_visible: last,
            submit_enabled: last && self.submission == SubmissionState::Idle,
            alert_status: self.alert.status(),
            alert_messages: self.alert.messages().to_vec(),
            review: self.review.clone(),
            file_encoding: self.upload.encoding,
            file_ready: self.upload.encoded.is_some(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn alert_mut(&mut self) -> &mut Alert {
        self.dirty = true;
        &mut self.alert
    }

    pub(crate) fn set_value(&mut self, field: Field, value: String) {
        self.values.set(field, value);
        self.dirty = true;
    }

    pub(crate) fn set_place(&mut self, place: Place) {
        self.place = Some(place);
        self.dirty = true;
    }

    pub(crate) fn set_submission(&mut self, submission: SubmissionState) {
        self.submission = submission;
        self.dirty = true;
    }

    pub(crate) fn mark_invalid(&mut self, field: Field) {
        self.invalid.insert(field);
        self.dirty = true;
    }

    pub(crate) fn begin_upload(&mut self) -> UploadId {
        self.dirty = true;
        self.upload.begin()
    }

    pub(crate) fn complete_upload(&mut self, id: UploadId, encoded: Option<EncodedFile>) -> bool {
        let applied = self.upload.complete(id, encoded);
        if applied {
            self.dirty = true;
        }
        applied
    }

    /// Moves to `index`, snapshotting the review when it is the last step.
    /// Callers pass an index already checked against the layout.
    pub(crate) fn move_to(&mut self, index: usize) {
        debug_assert!(index < self.layout.step_count());
        self.active_step = index;
        self.review = self.is_last_step().then(|| self.review_sections());
        self.dirty = true;
    }

    /// Validates the given steps, replacing their invalid markers with the new result.
    pub(crate) fn validate_steps(&mut self, steps: impl IntoIterator<Item = usize>) -> ValidationResult {
        let mut result = ValidationResult::default();
        for step in steps {
            if let Some(layout) = self.layout.step(step) {
                for field in &layout.fields {
                    self.invalid.remove(field);
                }
            }
            result.merge(validate_step(&self.layout, step, &self.values));
        }
        self.invalid.extend(result.invalid_fields().iter().copied());
        self.dirty = true;
        result
    }

    fn review_sections(&self) -> Vec<ReviewSection> {
        self.layout
            .steps()
            .iter()
            .enumerate()
            .take(self.layout.last_index())
            .map(|(index, step)| ReviewSection {
                step: index,
                title: step.title.clone(),
                entries: step
                    .fields
                    .iter()
                    .map(|&field| ReviewEntry {
                        label: field.label(),
                        value: self.values.get(field).to_string(),
                    })
                    .collect(),
            })
            .collect()
    }
}
