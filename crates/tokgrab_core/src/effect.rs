#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post `url` to the conversion service and report back with `submission_id`.
    Convert {
        submission_id: crate::SubmissionId,
        url: String,
    },
}
