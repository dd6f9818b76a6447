use std::sync::Once;

use tokgrab_core::{update, AppState, Effect, Msg, Phase, Submission};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tokgrab_logging::initialize_for_tests);
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

#[test]
fn fresh_state_is_idle_with_nothing_to_show() {
    init_logging();
    let view = AppState::new().view();

    assert_eq!(view.phase, Phase::Idle);
    assert!(view.input.is_empty());
    assert!(!view.can_submit);
    assert!(view.error.is_none());
    assert!(view.result.is_none());
    assert_eq!(view.submit_label, "Download");
}

#[test]
fn empty_input_submit_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::Submitted);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn cleared_input_submit_is_noop() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("https://a".to_string()));
    let (mut state, effects) = submit_url(state, "");

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &Submission::Idle);
    assert!(!state.view().can_submit);
    // Only the edits marked the state dirty.
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn input_is_sent_exactly_as_typed() {
    init_logging();
    let (_, effects) = submit_url(AppState::new(), "  https://www.tiktok.com/@someone/video/123 ");
    assert_eq!(
        effects,
        vec![Effect::Convert {
            submission_id: 1,
            url: "  https://www.tiktok.com/@someone/video/123 ".to_string(),
        }]
    );

    let (_, effects) = submit_url(AppState::new(), " ");
    assert_eq!(
        effects,
        vec![Effect::Convert {
            submission_id: 1,
            url: " ".to_string(),
        }]
    );
}

#[test]
fn submit_moves_to_pending_and_emits_one_convert() {
    init_logging();
    let (mut state, effects) = submit_url(
        AppState::new(),
        "https://www.tiktok.com/@someone/video/123",
    );

    assert_eq!(
        effects,
        vec![Effect::Convert {
            submission_id: 1,
            url: "https://www.tiktok.com/@someone/video/123".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Pending);
    assert!(!view.can_submit);
    assert_eq!(view.submit_label, "Processing...");
    assert!(view.error.is_none());
    assert!(view.result.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn submit_while_pending_is_ignored() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://a.example.com");
    let (state, effects) = submit_url(state, "https://b.example.com");

    assert!(effects.is_empty());
    match state.submission() {
        Submission::Pending { id, url } => {
            assert_eq!(*id, 1);
            assert_eq!(url, "https://a.example.com");
        }
        other => panic!("expected pending, got {other:?}"),
    }
    // Editing is still allowed while pending.
    assert_eq!(state.view().input, "https://b.example.com");
}

#[test]
fn editing_input_keeps_previous_outcome() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://a.example.com");
    let (state, _) = update(
        state,
        Msg::ConversionDone {
            submission_id: 1,
            outcome: Ok(Default::default()),
        },
    );
    let (state, effects) = update(state, Msg::InputChanged("https://b".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().phase, Phase::Succeeded);
    assert!(state.view().can_submit);
}
