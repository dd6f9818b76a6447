#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input for conversion.
    Submitted,
    /// The conversion service settled a submission.
    ConversionDone {
        submission_id: crate::SubmissionId,
        outcome: Result<crate::Conversion, crate::Failure>,
    },
}
