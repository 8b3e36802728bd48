use std::path::Path;
use std::sync::mpsc;
use std::thread;

use newsdesk_core::{Effect, Msg};
use newsdesk_engine::{EngineEvent, EngineEvents, EngineHandle};
use newsdesk_logging::{desk_debug, desk_info, redacted};

use super::persistence::CredentialStore;

pub struct EffectRunner {
    engine: EngineHandle,
    credentials: CredentialStore,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        credentials: CredentialStore,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        spawn_event_forwarder(events, msg_tx);
        Self {
            engine,
            credentials,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenLogStream => {
                    desk_info!("Opening server log stream");
                    self.engine.open_log_stream();
                }
                Effect::PersistCredential { token } => {
                    desk_info!("Saving access key {}", redacted(&token));
                    self.credentials.save(&token);
                }
                Effect::StartRun { api_key } => {
                    self.engine.run(api_key);
                }
                Effect::SubmitExport { records } => {
                    self.engine.export(records);
                }
            }
        }
    }
}

fn spawn_event_forwarder(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
        desk_debug!("Engine event channel closed");
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RunCompleted(result) => Msg::RunFinished(result.map_err(|err| err.to_string())),
        EngineEvent::ExportCompleted(result) => Msg::ExportFinished(
            result
                .map(|path| display_name(&path))
                .map_err(|err| err.message),
        ),
        EngineEvent::LogLine(line) => Msg::LogLineReceived(line),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
