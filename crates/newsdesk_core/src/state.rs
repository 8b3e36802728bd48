use std::collections::VecDeque;

use crate::card::{render_card, render_detail, CardView, DetailView};
use crate::log_view::LogViewport;
use crate::view_model::{AppViewModel, ControlsView, LogView};
use crate::Record;

pub const RUN_FAILED_ALERT: &str = "Błąd podczas generowania. Sprawdź logi serwera.";
pub const EXPORT_NO_DATA_ALERT: &str = "Brak danych do eksportu. Najpierw uruchom generowanie.";
pub const EXPORT_FAILED_PREFIX: &str = "Błąd eksportu: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    RunFailed,
    ExportNoData,
    ExportFailed,
}

/// A blocking, user-facing message. Must be dismissed before other controls react.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn run_failed() -> Self {
        Self {
            kind: AlertKind::RunFailed,
            message: RUN_FAILED_ALERT.to_string(),
        }
    }

    pub fn export_no_data() -> Self {
        Self {
            kind: AlertKind::ExportNoData,
            message: EXPORT_NO_DATA_ALERT.to_string(),
        }
    }

    pub fn export_failed(reason: &str) -> Self {
        Self {
            kind: AlertKind::ExportFailed,
            message: format!("{EXPORT_FAILED_PREFIX}{reason}"),
        }
    }
}

/// The whole client session: one slot for the latest result set plus the
/// state of every control on the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    credential_input: String,
    result_set: Vec<Record>,
    cards: Vec<CardView>,
    detail: Option<DetailView>,
    alerts: VecDeque<Alert>,
    status: Option<String>,
    run_in_flight: bool,
    export_in_flight: bool,
    log_stream_opened: bool,
    log: LogViewport,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`AppState::new`] with a log viewport of `height` visible lines.
    pub fn with_log_height(height: usize) -> Self {
        Self {
            log: LogViewport::new(height),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            controls: ControlsView {
                run_enabled: !self.run_in_flight,
                export_enabled: !self.export_in_flight,
                busy: self.run_in_flight,
            },
            credential: self.credential_input.clone(),
            cards: self.cards.clone(),
            detail: self.detail.clone(),
            alert: self.alerts.front().cloned(),
            status: self.status.clone(),
            result_count: self.result_set.len(),
            log: LogView {
                visible_lines: self.log.visible_lines(),
                line_count: self.log.line_count(),
                scroll_top: self.log.scroll_top(),
            },
            dirty: self.dirty,
        }
    }

    /// The records of the most recent successful run, in server order.
    pub fn result_set(&self) -> &[Record] {
        &self.result_set
    }

    pub fn credential_input(&self) -> &str {
        &self.credential_input
    }

    pub fn log(&self) -> &LogViewport {
        &self.log
    }

    /// The alert currently shown; later ones wait behind it.
    pub fn alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn pending_alerts(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_run_in_flight(&self) -> bool {
        self.run_in_flight
    }

    pub fn is_export_in_flight(&self) -> bool {
        self.export_in_flight
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_credential_input(&mut self, text: String) {
        self.credential_input = text;
        self.mark_dirty();
    }

    /// Returns true only the first time; the log stream is opened once per page.
    pub(crate) fn claim_log_stream(&mut self) -> bool {
        !std::mem::replace(&mut self.log_stream_opened, true)
    }

    pub(crate) fn begin_run(&mut self) {
        self.run_in_flight = true;
        self.cards.clear();
        self.detail = None;
        self.status = None;
        self.mark_dirty();
    }

    pub(crate) fn finish_run(&mut self, result: Result<Vec<Record>, String>) {
        match result {
            Ok(mut records) => {
                for record in &mut records {
                    record.discard_legacy_title();
                }
                self.cards = records.iter().map(render_card).collect();
                self.result_set = records;
            }
            Err(_) => {
                self.alerts.push_back(Alert::run_failed());
            }
        }
        self.run_in_flight = false;
        self.mark_dirty();
    }

    pub(crate) fn begin_export(&mut self) -> Option<Vec<Record>> {
        if self.result_set.is_empty() {
            self.alerts.push_back(Alert::export_no_data());
            self.mark_dirty();
            return None;
        }
        self.export_in_flight = true;
        self.status = None;
        self.mark_dirty();
        Some(self.result_set.clone())
    }

    pub(crate) fn finish_export(&mut self, result: Result<String, String>) {
        match result {
            Ok(file_name) => self.status = Some(format!("Pobrano plik {file_name}")),
            Err(reason) => self.alerts.push_back(Alert::export_failed(&reason)),
        }
        self.export_in_flight = false;
        self.mark_dirty();
    }

    pub(crate) fn open_detail(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        let Some(record) = self.result_set.get(index) else {
            return false;
        };
        self.detail = Some(render_detail(record));
        self.mark_dirty();
        true
    }

    pub(crate) fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn dismiss_alert(&mut self) {
        if self.alerts.pop_front().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn append_log_line(&mut self, line: &str) {
        self.log.append(line);
        self.mark_dirty();
    }
}
