//! Drag-source payload delivered by the asset library at drop time.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::Deserialize;

use crate::doc::SealKind;
use crate::error::ErrorCode;

/// Error returned by [`DropPayload::parse`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload is not valid JSON of the expected shape.
    #[error("malformed drop payload: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A required field is present but empty.
    #[error("drop payload field is empty: {0}")]
    MissingField(&'static str),
}

impl ErrorCode for PayloadError {
    fn error_code(&self) -> &'static str {
        "E_MALFORMED_PAYLOAD"
    }
}

/// Asset descriptor carried by a drag from the asset library.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DropPayload {
    /// Library asset id. Accepts a JSON string or number.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub url: String,
    pub name: String,
    /// Missing or unknown kinds read as [`SealKind::Other`].
    #[serde(default, alias = "type")]
    pub kind: SealKind,
}

impl DropPayload {
    /// Parse and validate a raw payload string.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Malformed`] when the JSON does not parse or a field
    /// is missing, and [`PayloadError::MissingField`] when `id` or `url` is empty.
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        let payload: Self = serde_json::from_str(raw)?;
        if payload.id.trim().is_empty() {
            return Err(PayloadError::MissingField("id"));
        }
        if payload.url.trim().is_empty() {
            return Err(PayloadError::MissingField("url"));
        }
        Ok(payload)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
