use std::fmt;

pub type UploadId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    EncodeCompleted {
        upload_id: UploadId,
        result: Result<String, EncodeError>,
    },
    SubmitCompleted {
        result: Result<ServerReply, SubmitError>,
    },
}

/// Decoded `message` of a submission response, split by status class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    Accepted { message: String },
    Rejected { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("could not read {path}: {message}")]
    Io { path: String, message: String },
    #[error("file too large (max {max_bytes} bytes, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    /// The engine worker could not run the encode at all.
    #[error("encoder unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    Network,
    TooLarge { max_bytes: u64, status: u16 },
    /// Body was not JSON carrying a `message` string.
    MalformedResponse { status: u16 },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, status } => {
                write!(f, "response too large (max {max_bytes}, http status {status})")
            }
            FailureKind::MalformedResponse { status } => {
                write!(f, "malformed response (http status {status})")
            }
        }
    }
}
