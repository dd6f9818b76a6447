use crate::view_model::{AppViewModel, LinkRowView, Phase, ResultView};
use crate::{Conversion, MediaKind};

pub type SubmissionId = u64;

/// Shown for every failure the service did not explain itself.
pub const REQUEST_FAILED_MESSAGE: &str =
    "Failed to fetch video. Please check the URL and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Transport error, non-success status or unreadable body.
    RequestFailed,
    /// The service answered but reported that it could not convert the URL.
    Rejected { message: String },
}

impl Failure {
    pub fn user_message(&self) -> String {
        match self {
            Failure::RequestFailed => REQUEST_FAILED_MESSAGE.to_string(),
            Failure::Rejected { message } if message.trim().is_empty() => {
                REQUEST_FAILED_MESSAGE.to_string()
            }
            Failure::Rejected { message } => message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Pending {
        id: SubmissionId,
        url: String,
    },
    Succeeded(Conversion),
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    submission: Submission,
    last_submission_id: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.submission, Submission::Pending { .. })
    }

    pub fn view(&self) -> AppViewModel {
        let pending = self.is_pending();
        let (phase, error, result) = match &self.submission {
            Submission::Idle => (Phase::Idle, None, None),
            Submission::Pending { .. } => (Phase::Pending, None, None),
            Submission::Succeeded(conversion) => {
                (Phase::Succeeded, None, Some(result_view(conversion)))
            }
            Submission::Failed(failure) => (Phase::Failed, Some(failure.user_message()), None),
        };

        AppViewModel {
            input: self.input.clone(),
            can_submit: !pending && !self.input.is_empty(),
            submit_label: if pending { "Processing..." } else { "Download" },
            phase,
            error,
            result,
        }
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    /// Moves to `Pending`, dropping any previous result or error.
    pub(crate) fn begin_submission(&mut self, url: String) -> SubmissionId {
        self.last_submission_id += 1;
        let id = self.last_submission_id;
        self.submission = Submission::Pending { id, url };
        self.dirty = true;
        id
    }

    /// Settles the pending submission. Completions for any other id are dropped.
    pub(crate) fn settle(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<Conversion, Failure>,
    ) {
        match self.submission {
            Submission::Pending { id, .. } if id == submission_id => {}
            _ => return,
        }
        self.submission = match outcome {
            Ok(conversion) => Submission::Succeeded(conversion),
            Err(failure) => Submission::Failed(failure),
        };
        self.dirty = true;
    }
}

fn result_view(conversion: &Conversion) -> ResultView {
    ResultView {
        author_name: conversion.author.name.clone(),
        author_handle: conversion.author.handle.clone(),
        avatar_url: conversion.author.avatar_url.clone(),
        description: conversion.description.clone(),
        cover_url: conversion.cover_url.clone(),
        links: conversion
            .links
            .iter()
            .map(|link| match link.kind {
                MediaKind::Audio => LinkRowView {
                    kind: MediaKind::Audio,
                    title: "Audio (MP3)".to_string(),
                    detail: "Audio Only".to_string(),
                    url: link.url.clone(),
                },
                MediaKind::Video => LinkRowView {
                    kind: MediaKind::Video,
                    title: format!("Video {}", link.quality).trim_end().to_string(),
                    detail: "MP4".to_string(),
                    url: link.url.clone(),
                },
            })
            .collect(),
    }
}
