//! Payload types for the lookup API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Contact record returned by the lookup API.
///
/// Every field is optional; the API returns an arbitrary subset. Values may
/// arrive as strings or numbers and are normalized to trimmed strings.
/// Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub father_name: Option<String>,

    #[serde(default, rename = "mobile", deserialize_with = "lenient_text")]
    pub primary_mobile: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub alt_mobile: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,

    #[serde(default, rename = "circle", deserialize_with = "lenient_text")]
    pub network_circle: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub id_number: Option<String>,

    #[serde(default, rename = "id", deserialize_with = "lenient_text")]
    pub database_id: Option<String>,

    /// Raw body of a 200 response that was not JSON.
    #[serde(default, rename = "response", deserialize_with = "lenient_text")]
    pub raw_response: Option<String>,
}

impl ContactRecord {
    /// Record wrapping a non-JSON response body.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw_response: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Decoded shape of a successful lookup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupPayload {
    /// Nothing came back: null, `[]`, `{}` or an empty body.
    Empty,
    /// A field mapping, possibly taken from the first element of a list.
    Record(ContactRecord),
    /// Something that is neither empty nor a field mapping.
    Malformed,
}

impl LookupPayload {
    /// Decode a response body. Non-JSON text becomes a raw record.
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return LookupPayload::Empty;
        }

        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => LookupPayload::Record(ContactRecord::raw(body.trim())),
        }
    }

    /// Decode an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => LookupPayload::Empty,
            Value::String(s) if s.trim().is_empty() => LookupPayload::Empty,
            Value::Array(items) => match items.into_iter().next() {
                None => LookupPayload::Empty,
                Some(Value::Object(map)) if !map.is_empty() => Self::record(Value::Object(map)),
                Some(_) => LookupPayload::Malformed,
            },
            Value::Object(map) if map.is_empty() => LookupPayload::Empty,
            value @ Value::Object(_) => Self::record(value),
            _ => LookupPayload::Malformed,
        }
    }

    fn record(value: Value) -> Self {
        serde_json::from_value(value)
            .map(LookupPayload::Record)
            .unwrap_or(LookupPayload::Malformed)
    }
}

/// Client configuration summary, safe to expose.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiInfo {
    pub base_url: String,
    pub has_api_key: bool,
    pub timeout_secs: u64,
    pub status: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
