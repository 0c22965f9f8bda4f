//! Registration wizard engine: file encoding, submission transport and effect execution.
mod encode;
mod engine;
mod submit;
mod types;

pub use encode::{data_url, DataUrlEncoder, EncodeSettings, FileEncoder};
pub use engine::{EngineHandle, EngineSettings};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter};
pub use types::{EncodeError, EngineEvent, FailureKind, ServerReply, SubmitError, UploadId};
