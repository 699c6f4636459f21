//! Movie document adapter
//!
//! Turns one movie document, shaped like the upstream collection
//! (`movie_id`, `vote_average`, `runtime`, `vote_count`, `year_released`,
//! plus display fields such as `movie_title` and `genres`), into an engine
//! [`Record`]. The numeric slider fields become typed record fields;
//! everything else rides along as opaque metadata for the table and hover
//! tooltips.

use serde_json::{Map, Value};

use mde_core::{FieldValue, Record};

use crate::DataError;

/// Field names the explorer filters on
pub mod fields {
    /// Average vote, 0–10
    pub const VOTE_AVERAGE: &str = "vote_average";
    /// Runtime in minutes
    pub const RUNTIME: &str = "runtime";
    /// Number of votes cast
    pub const VOTE_COUNT: &str = "vote_count";
    /// Release year, categorical
    pub const YEAR_RELEASED: &str = "year_released";
}

/// The document key carrying the record identifier
const ID_FIELD: &str = "movie_id";

/// Convert one movie document into a record
///
/// Requires `movie_id` and the three numeric slider fields; `year_released`
/// is kept as a text field when present. All remaining keys become the
/// record's metadata.
pub fn record_from_document(document: Value) -> Result<Record, DataError> {
    let Value::Object(mut map) = document else {
        return Err(DataError::NotAnObject);
    };

    let id = take_number(&mut map, ID_FIELD)? as u64;

    let mut record_fields = vec![
        (
            fields::VOTE_AVERAGE.to_string(),
            FieldValue::Number(take_number(&mut map, fields::VOTE_AVERAGE)?),
        ),
        (
            fields::RUNTIME.to_string(),
            FieldValue::Number(take_number(&mut map, fields::RUNTIME)?),
        ),
        (
            fields::VOTE_COUNT.to_string(),
            FieldValue::Number(take_number(&mut map, fields::VOTE_COUNT)?),
        ),
    ];

    if let Some(year) = take_optional_text(&mut map, fields::YEAR_RELEASED)? {
        record_fields.push((fields::YEAR_RELEASED.to_string(), FieldValue::Text(year)));
    }

    Ok(Record::new(id, record_fields, Value::Object(map)))
}

fn take_number(map: &mut Map<String, Value>, field: &'static str) -> Result<f64, DataError> {
    let value = map.remove(field).ok_or(DataError::MissingField(field))?;
    value.as_f64().ok_or_else(|| DataError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn take_optional_text(
    map: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DataError> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        // Years arrive as numbers in some exports
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(DataError::InvalidField {
            field,
            value: other.to_string(),
        }),
    }
}
