//! JSON encoding of a columnar schema document.
//!
//! A document is a JSON array of tables in the warehouse schema shape:
//! `[{"name": "Employee", "type": "RECORD", "fields": [...]}]`.

use std::fmt;

use crate::types::TableDescriptor;

/// A columnar schema document could not be decoded or encoded.
#[derive(Debug)]
pub struct DocumentError(serde_json::Error);

impl DocumentError {
    /// 1-based line of the failure within the input, if known.
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// 1-based column of the failure within the input, if known.
    pub fn column(&self) -> usize {
        self.0.column()
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid columnar schema document: {}", self.0)
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Decodes a columnar schema document.
///
/// Identifier grammar violations in table or field names are rejected here.
pub fn from_json(text: &str) -> Result<Vec<TableDescriptor>, DocumentError> {
    serde_json::from_str(text).map_err(DocumentError)
}

/// Encodes tables as a pretty-printed document with 2-space indentation.
pub fn to_json(tables: &[TableDescriptor]) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(tables).map_err(DocumentError)
}
