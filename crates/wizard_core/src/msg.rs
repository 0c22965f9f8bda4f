use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a form input.
    FieldChanged { field: crate::Field, value: String },
    /// User picked an ID document in the file input.
    FileSelected { path: PathBuf },
    /// Engine finished encoding a selected file.
    FileEncoded {
        upload_id: crate::UploadId,
        data_url: String,
    },
    /// Engine could not read or encode a selected file.
    FileEncodeFailed {
        upload_id: crate::UploadId,
        reason: String,
    },
    /// User chose a place in the address autocomplete widget.
    PlaceSelected(crate::Place),
    NextClicked,
    BackClicked,
    /// User clicked the edit link of a step in the review.
    EditClicked { step: usize },
    SubmitClicked,
    /// Server answered with a decodable verdict.
    SubmissionCompleted(crate::SubmissionOutcome),
    /// Submission ended without a decodable verdict.
    SubmissionFailed(crate::TransportFailure),
    /// Fallback for placeholder wiring.
    NoOp,
}
