use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    EncodeFile {
        upload_id: crate::UploadId,
        path: PathBuf,
    },
    Submit {
        action: String,
        payload: crate::SubmissionPayload,
    },
}
