//! Validation-error formatting and nested pointer remapping.
//!
//! Attribute validation happens upstream; this module only turns its output
//! into JSON:API error entries and fixes up the JSON pointers of errors that
//! surfaced inside a nested sub-schema, so `/data/attributes/zip` under the
//! `address` field becomes `/data/attributes/address/data/attributes/zip`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::document::ErrorDocument;

/// The `source` object of an error entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer to the offending document location.
    pub pointer: String,
}

/// One formatted validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Human-readable message.
    pub detail: String,
    /// Where in the document the error applies.
    pub source: ErrorSource,
}

impl ErrorEntry {
    /// An error on a top-level attribute: pointer `/data/attributes/{field}`.
    pub fn attribute(field: &str, message: impl Into<String>) -> Self {
        Self {
            detail: message.into(),
            source: ErrorSource {
                pointer: format!("/data/attributes/{field}"),
            },
        }
    }

    /// An error on an attribute of row `index` in a many-document:
    /// pointer `/data/{index}/attributes/{field}`.
    pub fn indexed_attribute(index: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            detail: message.into(),
            source: ErrorSource {
                pointer: format!("/data/{index}/attributes/{field}"),
            },
        }
    }
}

/// Prepend a nested field's own segment to every entry's pointer.
///
/// Entries produced by a nested sub-schema address locations inside the
/// nested document; this rebases them onto the parent.
pub fn remap_nested(field: &str, mut entries: Vec<ErrorEntry>) -> Vec<ErrorEntry> {
    for entry in &mut entries {
        entry.source.pointer = format!("/data/attributes/{field}{}", entry.source.pointer);
    }
    entries
}

/// Validation output for one field of a non-many document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrors {
    /// Plain messages for the field itself.
    Messages(Vec<String>),
    /// Entries a nested sub-schema already formatted; remapped as-is.
    Formatted(Vec<ErrorEntry>),
    /// A nested field-to-errors mapping, formatted recursively then remapped.
    Nested(IndexMap<SmolStr, FieldErrors>),
}

/// The shapes of upstream validation output this module accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrors {
    /// Already-formatted entries; wrapped unchanged.
    Flat(Vec<ErrorEntry>),
    /// Field-keyed errors of a single-resource document.
    ByField(IndexMap<SmolStr, FieldErrors>),
    /// Row-index-keyed errors of a many-resource document. Nested schemas
    /// do not occur in this branch.
    ByIndex(IndexMap<usize, IndexMap<SmolStr, Vec<String>>>),
}

/// Format upstream validation output into an error document.
///
/// Returns `None` for empty input. Entry order follows input order, with
/// nested entries flattened in place of their field.
pub fn format_errors(errors: ValidationErrors) -> Option<ErrorDocument> {
    match errors {
        ValidationErrors::Flat(entries) => {
            if entries.is_empty() {
                return None;
            }
            Some(ErrorDocument::new(entries))
        }
        ValidationErrors::ByField(fields) => {
            if fields.is_empty() {
                return None;
            }
            Some(ErrorDocument::new(format_fields(fields)))
        }
        ValidationErrors::ByIndex(rows) => {
            if rows.is_empty() {
                return None;
            }
            let mut entries = Vec::new();
            for (index, fields) in rows {
                for (field, messages) in fields {
                    entries.extend(
                        messages
                            .into_iter()
                            .map(|message| ErrorEntry::indexed_attribute(index, &field, message)),
                    );
                }
            }
            Some(ErrorDocument::new(entries))
        }
    }
}

fn format_fields(fields: IndexMap<SmolStr, FieldErrors>) -> Vec<ErrorEntry> {
    let mut entries = Vec::new();
    for (field, value) in fields {
        match value {
            FieldErrors::Messages(messages) => {
                entries.extend(
                    messages
                        .into_iter()
                        .map(|message| ErrorEntry::attribute(&field, message)),
                );
            }
            FieldErrors::Formatted(nested) => {
                entries.extend(remap_nested(&field, nested));
            }
            FieldErrors::Nested(inner) => {
                // Not yet formatted; happens when a required nested
                // attribute is missing from the data entirely
                let nested = format_fields(inner);
                entries.extend(remap_nested(&field, nested));
            }
        }
    }
    entries
}
