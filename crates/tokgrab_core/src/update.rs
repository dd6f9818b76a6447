use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => {
            // The submit control is disabled while pending and for empty input.
            let url = state.input().to_string();
            if url.is_empty() || state.is_pending() {
                return (state, Vec::new());
            }
            let submission_id = state.begin_submission(url.clone());
            vec![Effect::Convert { submission_id, url }]
        }
        Msg::ConversionDone {
            submission_id,
            outcome,
        } => {
            state.settle(submission_id, outcome);
            Vec::new()
        }
    };

    (state, effects)
}
