//! Serialised form of the task collection.
//!
//! The collection is stored as one JSON array of flat records:
//!
//! ```text
//! [{"id":"…","text":"…","completed":false,"createdAt":"2024-01-02T03:04:05.678Z"}]
//! ```
//!
//! Decoding is lenient. A blank, unparseable or non-array value decodes to
//! an empty collection, and each record is checked on its own so one bad
//! entry never hides the others. When several records share an `id`, only
//! the first is kept, so every task is addressable by its identifier.

use crate::task::domain::{PersistedTaskData, Task, TaskId};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashSet;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Stored record layout for a single task.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredTaskRecord<'a> {
    id: &'a str,
    text: &'a str,
    completed: bool,
    created_at: String,
}

impl<'a> From<&'a Task> for StoredTaskRecord<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id().as_str(),
            text: task.text(),
            completed: task.is_completed(),
            created_at: format_timestamp(task.created_at()),
        }
    }
}

/// Reasons a stored record is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordShapeError {
    /// The record is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// A field holds a value of the wrong type.
    #[error("field '{field}' must be a {expected}")]
    WrongType {
        /// Field name as stored.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// A string field is empty.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// The creation timestamp does not parse to an instant.
    #[error("unparseable createdAt '{0}'")]
    InvalidTimestamp(String),
}

/// Renders a timestamp as ISO-8601 UTC with millisecond precision.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialises the collection in order.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if serialisation fails.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let records: Vec<StoredTaskRecord<'_>> = tasks.iter().map(StoredTaskRecord::from).collect();
    serde_json::to_string(&records)
}

/// Deserialises a stored collection, skipping records that fail validation.
#[must_use]
pub fn decode_tasks(raw: &str) -> Vec<Task> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "stored task collection is not valid JSON; ignoring it");
            return Vec::new();
        }
    };

    let records = match parsed {
        Value::Array(records) => records,
        Value::Null => return Vec::new(),
        other => {
            warn!(
                found = json_type(&other),
                "stored task collection is not an array; ignoring it"
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match decode_record(record) {
            Ok(task) if seen.insert(task.id().clone()) => Some(task),
            Ok(task) => {
                warn!(index, task_id = %task.id(), "dropping stored task with duplicate id");
                None
            }
            Err(err) => {
                warn!(index, reason = %err, "dropping malformed stored task");
                None
            }
        })
        .collect()
}

/// Validates and converts a single stored record.
///
/// # Errors
///
/// Returns a [`RecordShapeError`] naming the first field that fails.
pub fn decode_record(record: &Value) -> Result<Task, RecordShapeError> {
    let fields = record.as_object().ok_or(RecordShapeError::NotAnObject)?;

    let id = non_empty_str(fields, "id")?;
    let text = non_empty_str(fields, "text")?;
    let completed = match fields.get("completed") {
        None => return Err(RecordShapeError::MissingField("completed")),
        Some(value) => value.as_bool().ok_or(RecordShapeError::WrongType {
            field: "completed",
            expected: "boolean",
        })?,
    };
    let created_at_raw = non_empty_str(fields, "createdAt")?;
    let created_at = DateTime::parse_from_rfc3339(created_at_raw)
        .map_err(|_| RecordShapeError::InvalidTimestamp(created_at_raw.to_owned()))?
        .with_timezone(&Utc);

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        text: text.to_owned(),
        completed,
        created_at,
    }))
}

fn non_empty_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, RecordShapeError> {
    let value = fields
        .get(field)
        .ok_or(RecordShapeError::MissingField(field))?
        .as_str()
        .ok_or(RecordShapeError::WrongType {
            field,
            expected: "string",
        })?;
    if value.is_empty() {
        return Err(RecordShapeError::EmptyField(field));
    }
    Ok(value)
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
