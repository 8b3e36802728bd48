use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use newsdesk_core::Record;
use newsdesk_logging::{desk_debug, desk_error, desk_info, desk_warn};

use crate::api::{ApiSettings, Backend, ReqwestBackend};
use crate::download::DownloadWriter;
use crate::tail::{ChannelEventSink, LogTailer};
use crate::{ApiError, EngineEvent, FailureKind};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub downloads: DownloadWriter,
}

enum EngineCommand {
    Run { api_key: String },
    Export { records: Vec<Record> },
    OpenLogStream,
}

/// Sends work to the background engine. Commands are fire-and-forget:
/// there is no cancellation and no timeout; each one ends in exactly one
/// completion event (the log stream never completes).
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine's event channel.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

struct EngineContext {
    backend: Arc<dyn Backend>,
    tailer: Option<LogTailer>,
    downloads: DownloadWriter,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> (Self, EngineEvents) {
        Self::spawn(config, None)
    }

    /// Like [`EngineHandle::new`] but with a caller-supplied backend for run/export.
    pub fn with_backend(config: EngineConfig, backend: Arc<dyn Backend>) -> (Self, EngineEvents) {
        Self::spawn(config, Some(backend))
    }

    fn spawn(config: EngineConfig, backend: Option<Arc<dyn Backend>>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let setup = tokio::runtime::Runtime::new()
                .map_err(|err| {
                    ApiError::new(FailureKind::Network, format!("async runtime unavailable: {err}"))
                })
                .and_then(|runtime| {
                    build_context(config, backend).map(|context| (runtime, Arc::new(context)))
                });

            match setup {
                Ok((runtime, context)) => {
                    while let Ok(command) = cmd_rx.recv() {
                        let context = context.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_command(&context, command, event_tx).await;
                        });
                    }
                }
                Err(err) => {
                    desk_error!("Engine failed to start: {}", err);
                    while let Ok(command) = cmd_rx.recv() {
                        reject_command(command, &err, &event_tx);
                    }
                }
            }
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn run(&self, api_key: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Run {
            api_key: api_key.into(),
        });
    }

    pub fn export(&self, records: Vec<Record>) {
        let _ = self.cmd_tx.send(EngineCommand::Export { records });
    }

    pub fn open_log_stream(&self) {
        let _ = self.cmd_tx.send(EngineCommand::OpenLogStream);
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

fn build_context(
    config: EngineConfig,
    backend: Option<Arc<dyn Backend>>,
) -> Result<EngineContext, ApiError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

    let tailer = match LogTailer::new(&config.api, client.clone()) {
        Ok(tailer) => Some(tailer),
        Err(err) => {
            desk_warn!("Log stream disabled: {}", err);
            None
        }
    };
    let backend = backend
        .unwrap_or_else(|| Arc::new(ReqwestBackend::new(config.api.clone(), client)));

    Ok(EngineContext {
        backend,
        tailer,
        downloads: config.downloads,
    })
}

async fn handle_command(
    context: &EngineContext,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Run { api_key } => {
            desk_info!("Run requested (api_key {})", newsdesk_logging::redacted(&api_key));
            let result = context.backend.run(&api_key).await;
            if let Err(err) = &result {
                desk_warn!("Run failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::RunCompleted(result));
        }
        EngineCommand::Export { records } => {
            desk_info!("Export requested for {} records", records.len());
            let result = match context.backend.export(&records).await {
                Ok(payload) => context
                    .downloads
                    .save(&payload)
                    .map_err(|err| ApiError::new(FailureKind::Persist, err.to_string())),
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                desk_warn!("Export failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::ExportCompleted(result));
        }
        EngineCommand::OpenLogStream => match &context.tailer {
            Some(tailer) => {
                let sink = ChannelEventSink::new(event_tx);
                let reason = tailer.run(&sink).await;
                desk_debug!("Log tailing stopped: {}", reason);
            }
            None => desk_debug!("Log stream unavailable; ignoring open request"),
        },
    }
}

fn reject_command(command: EngineCommand, err: &ApiError, event_tx: &mpsc::Sender<EngineEvent>) {
    let event = match command {
        EngineCommand::Run { .. } => EngineEvent::RunCompleted(Err(err.clone())),
        EngineCommand::Export { .. } => EngineEvent::ExportCompleted(Err(err.clone())),
        EngineCommand::OpenLogStream => return,
    };
    let _ = event_tx.send(event);
}
