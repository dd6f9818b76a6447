use std::sync::{mpsc, Arc};
use std::thread;

use tokgrab_core::{Author, Conversion, Effect, Failure, MediaKind, MediaLink, Msg};
use tokgrab_engine::{
    ConvertError, ConvertOutput, ConvertSettings, EngineError, EngineEvent, EngineHandle,
    FailureKind, MediaFormat,
};
use tokgrab_logging::grab_info;

use super::app::AppEvent;

/// Failure detail stays out of the default (warn) terminal output; `-v` shows it.
const FAILURE_DETAIL_LEVEL: log::Level = log::Level::Info;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        settings: ConvertSettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = Arc::new(EngineHandle::new(settings)?);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Convert { submission_id, url } => {
                    grab_info!(
                        "Convert submission_id={} url_len={} url={}",
                        submission_id,
                        url.len(),
                        url
                    );
                    self.engine.submit(submission_id, url);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                if event_tx.send(AppEvent::Core(msg_for_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn msg_for_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ConversionCompleted { request_id, result } => Msg::ConversionDone {
            submission_id: request_id,
            outcome: match result {
                Ok(output) => Ok(map_conversion(output)),
                Err(err) => {
                    log::log!(
                        FAILURE_DETAIL_LEVEL,
                        "Submission {} failed: {}",
                        request_id,
                        err
                    );
                    Err(map_failure(err))
                }
            },
        },
    }
}

fn map_conversion(output: ConvertOutput) -> Conversion {
    Conversion {
        author: Author {
            name: output.author.name,
            handle: output.author.handle,
            avatar_url: output.author.avatar_url,
        },
        description: output.description,
        cover_url: output.cover_url,
        links: output
            .links
            .into_iter()
            .map(|link| MediaLink {
                type_tag: link.type_tag,
                kind: map_format(link.format),
                quality: link.quality,
                url: link.url,
            })
            .collect(),
    }
}

fn map_format(format: MediaFormat) -> MediaKind {
    match format {
        MediaFormat::Audio => MediaKind::Audio,
        MediaFormat::Video => MediaKind::Video,
    }
}

/// Only a service-reported rejection keeps its detail; everything else
/// collapses into the generic failure.
fn map_failure(err: ConvertError) -> Failure {
    match err.kind {
        FailureKind::Rejected { message } => Failure::Rejected { message },
        FailureKind::InvalidEndpoint
        | FailureKind::HttpStatus(_)
        | FailureKind::Timeout
        | FailureKind::TooLarge { .. }
        | FailureKind::MalformedBody
        | FailureKind::Network => Failure::RequestFailed,
    }
}
