use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tokgrab_logging::grab_trace;

use crate::convert::{ConvertSettings, Converter, ReqwestConverter};
use crate::{ConvertError, EngineEvent, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ConvertError),
}

enum EngineCommand {
    Convert { request_id: RequestId, url: String },
}

/// Owns the conversion worker. The handle is `Sync`, so one thread can block
/// in [`EngineHandle::recv`] while another submits.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: ConvertSettings) -> Result<Self, EngineError> {
        let converter = Arc::new(ReqwestConverter::new(settings)?);
        Self::with_converter(converter)
    }

    /// Runs conversions with any [`Converter`], e.g. a canned one in tests.
    pub fn with_converter(converter: Arc<dyn Converter>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let converter = converter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(converter.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn submit(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Convert {
            request_id,
            url: url.into(),
        });
    }

    /// Blocks until the next event; `None` once the worker has gone away.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    converter: &dyn Converter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Convert { request_id, url } => {
            grab_trace!("conversion {} started", request_id);
            let result = converter.convert(&url).await;
            let _ = event_tx.send(EngineEvent::ConversionCompleted { request_id, result });
        }
    }
}
