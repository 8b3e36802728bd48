//! Newsdesk core: record schema, card rendering and the pure client state machine.
mod card;
mod effect;
mod log_view;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use card::{
    render_card, render_detail, CardView, DetailRow, DetailValue, DetailView, EXCERPT_CHARS,
    EXCERPT_SUFFIX, MISSING_FIELD, MISSING_TITLE,
};
pub use effect::Effect;
pub use log_view::{LogViewport, DEFAULT_LOG_HEIGHT};
pub use msg::{ClickTarget, Msg};
pub use record::{parse_records, Record};
pub use state::{
    Alert, AlertKind, AppState, EXPORT_FAILED_PREFIX, EXPORT_NO_DATA_ALERT, RUN_FAILED_ALERT,
};
pub use update::update;
pub use view_model::{AppViewModel, ControlsView, LogView};
