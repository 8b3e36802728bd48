use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One gathered news item as exchanged with the server.
///
/// The field names are the wire protocol of `/api/run` and `/api/export` and
/// must not be renamed. Values are kept as raw JSON: a key that was present
/// (even as `null` or a non-string) is written back unchanged, and keys this
/// client does not know about are kept in `extra`, so an export echoes the
/// record exactly as it was received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Value>,
    #[serde(
        rename = "data",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<Value>,
    #[serde(
        rename = "tytuł",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_title: Option<Value>,
    #[serde(
        rename = "treść",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_body: Option<Value>,
    #[serde(
        rename = "gemini_tresc",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_body: Option<Value>,
    /// Deprecated alternate title. Dropped on ingestion, see [`Record::discard_legacy_title`].
    #[serde(
        rename = "gemini_tytul",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_title: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that is on the wire is `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text of a field; absent keys, `null` and non-string values read as `""`.
fn text(field: &Option<Value>) -> &str {
    field.as_ref().and_then(Value::as_str).unwrap_or("")
}

impl Record {
    pub fn link(&self) -> &str {
        text(&self.link)
    }

    pub fn date(&self) -> &str {
        text(&self.date)
    }

    pub fn original_title(&self) -> &str {
        text(&self.original_title)
    }

    pub fn original_body(&self) -> &str {
        text(&self.original_body)
    }

    pub fn ai_body(&self) -> &str {
        text(&self.ai_body)
    }

    /// Removes the deprecated alternate title so only `tytuł` drives rendering.
    pub fn discard_legacy_title(&mut self) {
        self.legacy_title = None;
    }
}

/// Parses a `/api/run` response body into the ordered result set.
///
/// Only a body that is not a JSON array of objects is an error; field values
/// of any JSON type are accepted.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_slice(body)
}
