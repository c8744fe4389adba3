//! Binding of logical fields to physical columns.
//!
//! Resolution runs once per input table and is a pure function of the header row and
//! the [`FieldTable`]:
//!
//! 1. the field's exact candidates are tried in order against the headers verbatim;
//! 2. otherwise every header is lower-cased and the field's keywords are tried in
//!    order, each against the headers in table order, accepting the first header that
//!    contains the keyword;
//! 3. otherwise the field is unresolved and extracts as an empty string.
//!
//! Only step 2 is case-insensitive. With duplicate headers the first one wins.

use std::fmt;

use crate::fields::{FieldSpec, FieldTable};

/// Physical column chosen for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    pub index: usize,
    pub header: String,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Keyword(String),
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Keyword(keyword) => write!(f, "keyword '{keyword}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: String,
    pub column: Option<ColumnMatch>,
}

/// Per-table binding of every logical field, in field-table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMapping {
    bindings: Vec<FieldBinding>,
}

impl ResolvedMapping {
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    pub fn column(&self, field: &str) -> Option<&ColumnMatch> {
        self.bindings
            .iter()
            .find(|binding| binding.field == field)
            .and_then(|binding| binding.column.as_ref())
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|binding| binding.column.is_none())
            .map(|binding| binding.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

pub fn resolve(headers: &[String], table: &FieldTable) -> ResolvedMapping {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let bindings = table
        .fields
        .iter()
        .map(|spec| FieldBinding {
            field: spec.name.clone(),
            column: resolve_field(headers, &lowered, spec),
        })
        .collect();
    ResolvedMapping { bindings }
}

fn resolve_field(headers: &[String], lowered: &[String], spec: &FieldSpec) -> Option<ColumnMatch> {
    for candidate in &spec.exact {
        if let Some(index) = headers.iter().position(|h| h == candidate) {
            return Some(ColumnMatch {
                index,
                header: headers[index].clone(),
                kind: MatchKind::Exact,
            });
        }
    }
    for keyword in &spec.keywords {
        if keyword.is_empty() {
            continue;
        }
        if let Some(index) = lowered.iter().position(|h| h.contains(keyword.as_str())) {
            return Some(ColumnMatch {
                index,
                header: headers[index].clone(),
                kind: MatchKind::Keyword(keyword.clone()),
            });
        }
    }
    None
}
