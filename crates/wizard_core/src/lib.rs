//! Registration wizard core: pure state machine, validation and view-model helpers.
mod address;
mod alert;
mod effect;
mod field;
mod msg;
mod payload;
mod state;
mod update;
mod validate;
mod view_model;

pub use address::{resolve_address, AddressComponent, AddressRecord, Place};
pub use alert::{Alert, AlertStatus};
pub use effect::Effect;
pub use field::{AddressMode, Field, FieldSet, FormLayout, StepLayout};
pub use msg::Msg;
pub use payload::{build_payload, EncodedFile, SubmissionPayload, FILE_KEY};
pub use state::{SubmissionOutcome, SubmissionState, TransportFailure, UploadId, WizardSession};
pub use update::{update, PENDING_TEXT};
pub use validate::{check_field, validate_step, ValidationResult};
pub use view_model::{FieldView, ReviewEntry, ReviewSection, StepView, WizardViewModel};
