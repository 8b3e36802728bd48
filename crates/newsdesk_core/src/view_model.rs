use crate::card::{CardView, DetailView};
use crate::Alert;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub controls: ControlsView,
    pub credential: String,
    pub cards: Vec<CardView>,
    /// Detail overlay, when open.
    pub detail: Option<DetailView>,
    pub alert: Option<Alert>,
    pub status: Option<String>,
    /// Size of the held result set; may differ from `cards.len()` after a failed run.
    pub result_count: usize,
    pub log: LogView,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsView {
    pub run_enabled: bool,
    pub export_enabled: bool,
    /// Busy indicator next to the run trigger.
    pub busy: bool,
}

impl Default for ControlsView {
    fn default() -> Self {
        Self {
            run_enabled: true,
            export_enabled: true,
            busy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogView {
    pub visible_lines: Vec<String>,
    pub line_count: usize,
    pub scroll_top: usize,
}
