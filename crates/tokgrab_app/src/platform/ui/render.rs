use tokgrab_core::{AppViewModel, LinkRowView, MediaKind, Phase, ResultView};

/// Renders the view model as terminal lines. Idle renders nothing.
pub fn render(view: &AppViewModel) -> Vec<String> {
    match view.phase {
        Phase::Idle => Vec::new(),
        Phase::Pending => vec![format!("{} {}", view.submit_label, view.input.trim())],
        Phase::Failed => vec![format!(
            "[!] {}",
            view.error.as_deref().unwrap_or_default()
        )],
        Phase::Succeeded => view.result.as_ref().map(render_result).unwrap_or_default(),
    }
}

fn render_result(result: &ResultView) -> Vec<String> {
    let mut lines = Vec::new();

    let heading = match (result.author_name.is_empty(), result.author_handle.is_empty()) {
        (false, false) => format!("{} (@{})", result.author_name, result.author_handle),
        (false, true) => result.author_name.clone(),
        (true, false) => format!("@{}", result.author_handle),
        (true, true) => "Unknown author".to_string(),
    };
    lines.push(heading);
    if !result.description.is_empty() {
        lines.push(format!("  {}", result.description));
    }
    if !result.avatar_url.is_empty() {
        lines.push(format!("  avatar: {}", result.avatar_url));
    }
    if !result.cover_url.is_empty() {
        lines.push(format!("  cover:  {}", result.cover_url));
    }

    lines.push("Download Options".to_string());
    if result.links.is_empty() {
        lines.push("  (none returned)".to_string());
    }
    for (index, link) in result.links.iter().enumerate() {
        lines.extend(render_link(index + 1, link));
    }
    lines
}

fn render_link(number: usize, link: &LinkRowView) -> [String; 2] {
    let tag = match link.kind {
        MediaKind::Audio => "audio",
        MediaKind::Video => "video",
    };
    [
        format!("  {number}. [{tag}] {} | {}", link.title, link.detail),
        format!("     {}", link.url),
    ]
}
