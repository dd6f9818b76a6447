use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use tokgrab_core::{update, AppState, Effect, Msg, Phase};
use tokgrab_engine::{ConvertSettings, EngineError};
use tokgrab_logging::{grab_debug, grab_warn};

use super::effects::EffectRunner;
use super::ui;

#[derive(Debug)]
pub enum AppEvent {
    /// One line typed or piped on stdin.
    LineEntered(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message for the core, e.g. a settled conversion.
    Core(Msg),
}

pub struct App {
    runner: EffectRunner,
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: mpsc::Receiver<AppEvent>,
}

impl App {
    pub fn new(settings: ConvertSettings) -> Result<Self, EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let runner = EffectRunner::new(settings, event_tx.clone())?;
        Ok(Self {
            runner,
            event_tx,
            event_rx,
        })
    }

    /// Converts `urls` one at a time, or reads URLs from stdin when empty.
    pub fn run(self, urls: Vec<String>) -> Result<ExitCode> {
        let interactive = urls.is_empty();
        let mut session = Session::new(urls);
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if interactive {
            writeln!(out, "{}", ui::INTRO).context("failed to write to stdout")?;
            spawn_stdin_reader(self.event_tx.clone());
        } else {
            session.close_input();
        }

        let effects = session.start_next(&mut out)?;
        self.runner.enqueue(effects);
        while !session.is_finished() {
            let Ok(event) = self.event_rx.recv() else {
                break;
            };
            let effects = session.handle(event, &mut out)?;
            self.runner.enqueue(effects);
        }

        if !interactive && session.failed > 0 {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::LineEntered(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    grab_warn!("Stopped reading stdin: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Drives the core state machine from terminal input, one submission at a time.
struct Session {
    state: AppState,
    queued: VecDeque<String>,
    input_closed: bool,
    succeeded: usize,
    failed: usize,
}

impl Session {
    fn new(urls: Vec<String>) -> Self {
        Self {
            state: AppState::new(),
            queued: urls.into(),
            input_closed: false,
            succeeded: 0,
            failed: 0,
        }
    }

    fn close_input(&mut self) {
        self.input_closed = true;
    }

    fn is_finished(&self) -> bool {
        self.input_closed && self.queued.is_empty() && !self.state.is_pending()
    }

    fn handle(&mut self, event: AppEvent, out: &mut impl Write) -> Result<Vec<Effect>> {
        match event {
            AppEvent::LineEntered(line) => self.queued.push_back(line),
            AppEvent::InputClosed => self.close_input(),
            AppEvent::Core(msg) => {
                let mut effects = self.dispatch(msg, out)?;
                effects.extend(self.start_next(out)?);
                return Ok(effects);
            }
        }
        self.start_next(out)
    }

    /// Submits queued lines until one starts a conversion. Lines that arrive
    /// while a conversion is pending wait their turn.
    fn start_next(&mut self, out: &mut impl Write) -> Result<Vec<Effect>> {
        while !self.state.is_pending() {
            let Some(line) = self.queued.pop_front() else {
                break;
            };
            self.dispatch(Msg::InputChanged(line), out)?;
            if !self.state.view().can_submit {
                continue;
            }
            let effects = self.dispatch(Msg::Submitted, out)?;
            if !effects.is_empty() {
                return Ok(effects);
            }
        }
        Ok(Vec::new())
    }

    fn dispatch(&mut self, msg: Msg, out: &mut impl Write) -> Result<Vec<Effect>> {
        let was_pending = self.state.is_pending();
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        if state.consume_dirty() {
            let view = state.view();
            if was_pending && !state.is_pending() {
                match view.phase {
                    Phase::Succeeded => self.succeeded += 1,
                    Phase::Failed => self.failed += 1,
                    Phase::Idle | Phase::Pending => {}
                }
                grab_debug!(
                    "settled: {} succeeded, {} failed so far",
                    self.succeeded,
                    self.failed
                );
            }
            for line in ui::render::render(&view) {
                writeln!(out, "{line}").context("failed to write to stdout")?;
            }
            out.flush().context("failed to flush stdout")?;
        }

        self.state = state;
        Ok(effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokgrab_core::{Conversion, Failure, MediaKind, MediaLink, REQUEST_FAILED_MESSAGE};

    fn done(submission_id: u64, outcome: Result<Conversion, Failure>) -> AppEvent {
        AppEvent::Core(Msg::ConversionDone {
            submission_id,
            outcome,
        })
    }

    fn printed(out: &[u8]) -> String {
        String::from_utf8(out.to_vec()).unwrap()
    }

    #[test]
    fn one_shot_urls_are_converted_in_turn() {
        let mut out = Vec::new();
        let mut session = Session::new(vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string(),
        ]);
        session.close_input();

        let effects = session.start_next(&mut out).unwrap();
        assert_eq!(
            effects,
            vec![Effect::Convert {
                submission_id: 1,
                url: "https://a.example.com".to_string(),
            }]
        );
        assert!(!session.is_finished());

        let conversion = Conversion {
            links: vec![MediaLink {
                type_tag: "mp3".to_string(),
                kind: MediaKind::Audio,
                quality: String::new(),
                url: "https://dl/a.mp3".to_string(),
            }],
            ..Conversion::default()
        };
        let effects = session.handle(done(1, Ok(conversion)), &mut out).unwrap();
        assert_eq!(
            effects,
            vec![Effect::Convert {
                submission_id: 2,
                url: "https://b.example.com".to_string(),
            }]
        );

        let effects = session
            .handle(done(2, Err(Failure::RequestFailed)), &mut out)
            .unwrap();
        assert!(effects.is_empty());
        assert!(session.is_finished());
        assert_eq!((session.succeeded, session.failed), (1, 1));

        let text = printed(&out);
        assert!(text.contains("Processing... https://a.example.com"));
        assert!(text.contains("[audio] Audio (MP3) | Audio Only"));
        assert!(text.contains(&format!("[!] {REQUEST_FAILED_MESSAGE}")));
    }

    #[test]
    fn lines_entered_while_pending_wait_their_turn() {
        let mut out = Vec::new();
        let mut session = Session::new(Vec::new());

        let effects = session
            .handle(AppEvent::LineEntered("https://a".to_string()), &mut out)
            .unwrap();
        assert_eq!(effects.len(), 1);

        let effects = session
            .handle(AppEvent::LineEntered("https://b".to_string()), &mut out)
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(session.queued.len(), 1);

        let effects = session
            .handle(done(1, Ok(Conversion::default())), &mut out)
            .unwrap();
        assert_eq!(
            effects,
            vec![Effect::Convert {
                submission_id: 2,
                url: "https://b".to_string(),
            }]
        );
    }

    #[test]
    fn empty_lines_are_skipped_and_close_finishes() {
        let mut out = Vec::new();
        let mut session = Session::new(Vec::new());

        let effects = session
            .handle(AppEvent::LineEntered(String::new()), &mut out)
            .unwrap();
        assert!(effects.is_empty());
        assert!(!session.is_finished());

        session.handle(AppEvent::InputClosed, &mut out).unwrap();
        assert!(session.is_finished());
        assert!(out.is_empty());
    }

    #[test]
    fn entered_line_is_submitted_verbatim() {
        let mut out = Vec::new();
        let mut session = Session::new(Vec::new());

        let effects = session
            .handle(AppEvent::LineEntered(" https://a ".to_string()), &mut out)
            .unwrap();
        assert_eq!(
            effects,
            vec![Effect::Convert {
                submission_id: 1,
                url: " https://a ".to_string(),
            }]
        );
    }
}
