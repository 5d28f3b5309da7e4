use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One extracted single-field result.
///
/// Serialized as a JSON object with exactly one entry, e.g. `{"Span": "$10"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct ScrapedRecord {
    field: String,
    value: String,
}

impl ScrapedRecord {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ScrapedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record must have exactly one field, found {0}")]
    FieldCount(usize),
}

impl TryFrom<BTreeMap<String, String>> for ScrapedRecord {
    type Error = RecordError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(RecordError::FieldCount(map.len()));
        }
        let (field, value) = map
            .into_iter()
            .next()
            .ok_or(RecordError::FieldCount(0))?;
        Ok(Self { field, value })
    }
}

impl From<ScrapedRecord> for BTreeMap<String, String> {
    fn from(record: ScrapedRecord) -> Self {
        BTreeMap::from([(record.field, record.value)])
    }
}

/// Uppercase the first character and leave the rest untouched: `span` -> `Span`.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Distinct field names in first-seen order.
pub fn distinct_fields(records: &[ScrapedRecord]) -> Vec<&str> {
    let mut fields: Vec<&str> = Vec::new();
    for record in records {
        if !fields.contains(&record.field()) {
            fields.push(record.field());
        }
    }
    fields
}
