use crate::Record;

/// Where a click on the detail overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed region around the content.
    Backdrop,
    /// The content box itself, or anything inside it.
    Content,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Page initialised; carries the persisted credential (empty if none).
    PageLoaded { credential: String },
    /// User committed an edit of the credential input.
    CredentialEdited(String),
    /// User clicked the run trigger.
    RunClicked,
    /// Backend answered the run request, or it failed.
    RunFinished(Result<Vec<Record>, String>),
    /// User clicked the export trigger.
    ExportClicked,
    /// Export download saved under the given file name, or the export failed.
    ExportFinished(Result<String, String>),
    /// User clicked a card (0-based position in the card list).
    CardClicked { index: usize },
    /// User clicked the overlay close control.
    ModalCloseClicked,
    /// User clicked somewhere on the overlay.
    ModalClicked { target: ClickTarget },
    /// User acknowledged the blocking alert.
    AlertDismissed,
    /// One line arrived on the log stream.
    LogLineReceived(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
