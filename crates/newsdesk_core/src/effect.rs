use crate::Record;

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open the long-lived log stream. Requested once per page lifetime.
    OpenLogStream,
    /// Persist a trimmed, non-empty credential.
    PersistCredential { token: String },
    /// Issue one `/api/run` request.
    StartRun { api_key: String },
    /// Send the held result set to `/api/export`.
    SubmitExport { records: Vec<Record> },
}
