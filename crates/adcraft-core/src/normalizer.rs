//! Normalization of raw library query responses.
//!
//! Storage backends answer a library query with JSON whose outer shape is not
//! guaranteed: some return the rows directly, some wrap them in `{ "data": ... }`,
//! and a misbehaving backend can return anything. [`ListResponse`] classifies
//! the shape once; [`normalize`] turns it into the canonical record list and
//! never fails.

use crate::creative::CreativeRecord;
use serde_json::Value;

/// Classified shape of a raw query response.
#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse {
    /// A bare JSON array of rows.
    Sequence(Vec<Value>),
    /// An object carrying the rows under `data`. The payload is whatever was
    /// found there, array or not.
    Wrapped(Value),
    /// Null, scalars, and objects without a `data` field.
    Unrecognized,
}

impl From<Value> for ListResponse {
    fn from(raw: Value) -> Self {
        match raw {
            Value::Array(rows) => Self::Sequence(rows),
            Value::Object(mut map) => match map.remove("data") {
                Some(data) => Self::Wrapped(data),
                None => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }
}

impl ListResponse {
    /// Resolves the response into records, keeping the backend's order.
    ///
    /// Rows that do not deserialize as a [`CreativeRecord`] are skipped and
    /// logged; a `data` payload that is not an array yields an empty list.
    pub fn into_records(self) -> Vec<CreativeRecord> {
        let rows = match self {
            Self::Sequence(rows) => rows,
            Self::Wrapped(Value::Array(rows)) => rows,
            Self::Wrapped(other) => {
                tracing::warn!(
                    target: "library",
                    "Query response 'data' is not a list ({}), treating as empty",
                    json_kind(&other)
                );
                return Vec::new();
            }
            Self::Unrecognized => {
                tracing::warn!(target: "library", "Unrecognized query response shape, treating as empty");
                return Vec::new();
            }
        };

        rows.into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value::<CreativeRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(target: "library", "Skipping malformed row {}: {}", index, e);
                    None
                }
            })
            .collect()
    }
}

/// Converts a raw query response into the canonical newest-first list.
pub fn normalize(raw: Value) -> Vec<CreativeRecord> {
    ListResponse::from(raw).into_records()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
