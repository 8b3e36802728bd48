use std::fs;
use std::path::PathBuf;

use newsdesk_engine::save_atomically;
use newsdesk_logging::{desk_error, desk_info, desk_warn, redacted};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".newsdesk_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    #[serde(default)]
    api_key: Option<String>,
}

/// Durable home of the access key, surviving restarts.
///
/// Best effort: read and write failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub(crate) struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The saved key, or an empty string when none was ever saved.
    pub(crate) fn load(&self) -> String {
        let path = self.dir.join(STATE_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return String::new();
            }
            Err(err) => {
                desk_warn!("Failed to read saved key from {:?}: {}", path, err);
                return String::new();
            }
        };

        match ron::from_str::<PersistedState>(&content) {
            Ok(state) => {
                let key = state.api_key.unwrap_or_default();
                desk_info!("Loaded saved key {} from {:?}", redacted(&key), path);
                key
            }
            Err(err) => {
                desk_warn!("Failed to parse saved key from {:?}: {}", path, err);
                String::new()
            }
        }
    }

    /// Saves the trimmed key; blank input leaves the stored key untouched.
    pub(crate) fn save(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }

        let state = PersistedState {
            api_key: Some(token.to_string()),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&state, pretty) {
            Ok(text) => text,
            Err(err) => {
                desk_error!("Failed to serialize saved key: {}", err);
                return;
            }
        };

        if let Err(err) = save_atomically(&self.dir, STATE_FILENAME, content.as_bytes()) {
            desk_error!("Failed to write saved key to {:?}: {}", self.dir, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        assert_eq!(CredentialStore::new(temp.path().into()).load(), "");
    }

    #[test]
    fn saved_key_survives_reload() {
        let temp = TempDir::new().unwrap();
        CredentialStore::new(temp.path().into()).save("  AIza-123  ");

        let reloaded = CredentialStore::new(temp.path().into());
        assert_eq!(reloaded.load(), "AIza-123");
    }

    #[test]
    fn blank_save_keeps_previous_key() {
        let temp = TempDir::new().unwrap();
        let store = CredentialStore::new(temp.path().into());
        store.save("first");
        store.save("   ");

        assert_eq!(store.load(), "first");
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(STATE_FILENAME), "not ron at all (").unwrap();

        assert_eq!(CredentialStore::new(temp.path().into()).load(), "");
    }
}
