use crate::MediaKind;

/// Coarse submission phase for renderers that only need to pick a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub can_submit: bool,
    pub submit_label: &'static str,
    pub phase: Phase,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub author_name: String,
    pub author_handle: String,
    pub avatar_url: String,
    pub description: String,
    pub cover_url: String,
    pub links: Vec<LinkRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRowView {
    pub kind: MediaKind,
    pub title: String,
    pub detail: String,
    pub url: String,
}
