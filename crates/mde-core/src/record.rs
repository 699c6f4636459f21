//! Immutable dataset records

use ahash::AHashMap;

/// Identifier of a record, unique within one store
pub type RecordId = u64;

/// A typed attribute value that filters can see
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric attribute (vote average, runtime, ...)
    Number(f64),
    /// Discrete text attribute (release year, ...)
    Text(String),
}

impl FieldValue {
    /// The numeric value, if this is a number field
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// The text value, if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Number(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One dataset entry (a movie), immutable once constructed
///
/// Filterable attributes live in the field map; everything that exists only
/// for display (title, genres, poster URL) is carried as opaque metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: AHashMap<String, FieldValue>,
    metadata: serde_json::Value,
}

impl Record {
    /// Create a record from its filterable fields and display metadata
    pub fn new(
        id: RecordId,
        fields: impl IntoIterator<Item = (String, FieldValue)>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id,
            fields: fields.into_iter().collect(),
            metadata,
        }
    }

    /// The record's unique identifier
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Look up a filterable field by name
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up a numeric field, `None` if absent or not numeric
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_number)
    }

    /// Look up a text field, `None` if absent or not text
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_text)
    }

    /// Names of the filterable fields, in no particular order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Display-only metadata, opaque to the engine
    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }
}
