//! Tokgrab core: pure submission state machine and view-model helpers.
mod conversion;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use conversion::{Author, Conversion, MediaKind, MediaLink};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Failure, Submission, SubmissionId, REQUEST_FAILED_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, LinkRowView, Phase, ResultView};
