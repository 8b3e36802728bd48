use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use newsdesk_core::{update, AppState, Msg};
use newsdesk_engine::{DownloadWriter, EngineConfig, EngineHandle};
use newsdesk_logging::{desk_info, desk_warn};

use super::config::Cli;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence::CredentialStore;
use super::ui;
use super::ui::input::{parse_command, UiCommand};

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Input-layer signals that never reach the core state machine.
enum UiSignal {
    Redraw,
    Help,
    Quit,
    Notice(String),
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    if cli.log_to_terminal {
        logging::initialize(LogDestination::Terminal);
    } else {
        logging::initialize(LogDestination::File(&cli.log_file));
    }

    let api = cli.api_settings().context("invalid configuration")?;
    desk_info!("Starting newsdesk against {}", api.base_url);

    let (engine, events) = EngineHandle::new(EngineConfig {
        api,
        downloads: DownloadWriter::new(cli.download_dir.clone()),
    });
    let credentials = CredentialStore::new(cli.state_dir.clone());
    let initial_credential = credentials.load();

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (ui_tx, ui_rx) = mpsc::channel::<UiSignal>();
    let runner = EffectRunner::new(engine, events, credentials, msg_tx.clone());

    spawn_ticker(msg_tx.clone());
    spawn_stdin_reader(msg_tx, ui_tx);

    let mut app = App::new(AppState::with_log_height(cli.log_lines), runner);
    app.dispatch(Msg::PageLoaded {
        credential: initial_credential,
    });

    while let Ok(msg) = msg_rx.recv() {
        let is_tick = matches!(msg, Msg::Tick);
        app.dispatch(msg);

        while let Ok(signal) = ui_rx.try_recv() {
            match signal {
                UiSignal::Quit => {
                    desk_info!("Quit requested");
                    return Ok(());
                }
                UiSignal::Redraw => app.set_notice(None),
                UiSignal::Help => app.set_notice(Some(ui::constants::HELP_TEXT.to_string())),
                UiSignal::Notice(text) => app.set_notice(Some(text)),
            }
        }

        if is_tick {
            app.draw_if_dirty().context("failed to draw the page")?;
        }
    }
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    notice: Option<String>,
    force_redraw: bool,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            notice: None,
            force_redraw: true,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
        self.force_redraw = true;
    }

    fn draw_if_dirty(&mut self) -> io::Result<()> {
        let was_dirty = self.state.consume_dirty();
        if !(was_dirty || std::mem::take(&mut self.force_redraw)) {
            return Ok(());
        }
        let page = ui::render::render(&self.state.view(), self.notice.as_deref());
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}{}", ui::constants::CLEAR_SCREEN, page)?;
        stdout.flush()
    }
}

fn spawn_ticker(msg_tx: mpsc::Sender<Msg>) {
    // Background tick to throttle rendering.
    thread::spawn(move || {
        while msg_tx.send(Msg::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>, ui_tx: mpsc::Sender<UiSignal>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    desk_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let sent = match parse_command(&line) {
                Ok(UiCommand::Send(msg)) => msg_tx.send(msg).is_ok(),
                Ok(UiCommand::Redraw) => ui_tx.send(UiSignal::Redraw).is_ok(),
                Ok(UiCommand::Help) => ui_tx.send(UiSignal::Help).is_ok(),
                Ok(UiCommand::Quit) => {
                    let _ = ui_tx.send(UiSignal::Quit);
                    break;
                }
                Err(err) => ui_tx.send(UiSignal::Notice(err.to_string())).is_ok(),
            };
            if !sent {
                break;
            }
        }
        // End of input behaves like quitting.
        let _ = ui_tx.send(UiSignal::Quit);
    });
}
