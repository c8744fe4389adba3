//! Record model and row extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{resolver::ResolvedMapping, workbook::SourceTable};

/// One output object. Fields keep their insertion order, which is the field-table
/// order, so the serialized JSON lists columns the same way for every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), Value::String(value.into()));
    }

    pub fn set_number(&mut self, field: &str, value: u64) {
        self.0.insert(field.to_string(), Value::from(value));
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// String form of a field; numbers render in decimal, anything absent is empty.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.0.insert(field.into(), Value::String(value.into()));
        }
        record
    }
}

/// Builds one record from a row; every bound field is present, unresolved fields and
/// missing cells extract as `""`.
pub fn extract_record(row: &[Option<String>], mapping: &ResolvedMapping) -> Record {
    let mut record = Record::new();
    for binding in mapping.bindings() {
        let value = binding
            .column
            .as_ref()
            .and_then(|column| SourceTable::cell(row, column.index))
            .unwrap_or("");
        record.set_text(&binding.field, value);
    }
    record
}

pub fn extract_records(table: &SourceTable, mapping: &ResolvedMapping) -> Vec<Record> {
    table
        .rows
        .iter()
        .map(|row| extract_record(row, mapping))
        .collect()
}
