use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedSchemaError;

use super::identifier::is_identifier;

/// A columnar (warehouse) type name such as `STRING` or `INTEGER`.
///
/// Column types are case-insensitive, so the name is stored upper-cased:
/// `ColumnType::new("string")` and `ColumnType::new("STRING")` are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnType(String);

impl ColumnType {
    /// The type name that marks a record (nested structure).
    pub const RECORD: &'static str = "RECORD";
    /// Alternate spelling of [`ColumnType::RECORD`] accepted on input.
    pub const STRUCT: &'static str = "STRUCT";
    /// The unconstrained column type, used as the fallback for unknown DSL types.
    pub const ANY: &'static str = "ANY";

    /// Creates a new `ColumnType`, normalizing to upper case.
    pub fn new(s: impl Into<String>) -> Result<Self, MalformedSchemaError> {
        let s = s.into();
        if !is_identifier(&s) {
            return Err(MalformedSchemaError::InvalidIdentifier { name: s });
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Wraps an upper-case column type name known at compile time.
    pub(crate) fn known(s: &'static str) -> Self {
        debug_assert!(is_identifier(s) && s == s.to_ascii_uppercase());
        Self(s.to_string())
    }

    /// The `RECORD` column type.
    pub fn record() -> Self {
        Self(Self::RECORD.to_string())
    }

    /// The `ANY` column type.
    pub fn any() -> Self {
        Self(Self::ANY.to_string())
    }

    /// Returns true for `RECORD` and its alias `STRUCT`.
    pub fn is_record(&self) -> bool {
        self.0 == Self::RECORD || self.0 == Self::STRUCT
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ColumnType> for String {
    fn from(t: ColumnType) -> String {
        t.0
    }
}

impl TryFrom<String> for ColumnType {
    type Error = MalformedSchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for ColumnType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case() {
        assert_eq!(
            ColumnType::new("string").unwrap(),
            ColumnType::new("STRING").unwrap()
        );
        assert_eq!(ColumnType::new("Float64").unwrap().as_str(), "FLOAT64");
    }

    #[test]
    fn rejects_invalid() {
        for name in ["", "ARRAY<STRING>", "9X", "two words"] {
            assert!(ColumnType::new(name).is_err(), "expected invalid: {name}");
        }
    }

    #[test]
    fn record_detection() {
        assert!(ColumnType::record().is_record());
        assert!(ColumnType::new("struct").unwrap().is_record());
        assert!(!ColumnType::new("STRING").unwrap().is_record());
    }

    #[test]
    fn serde_roundtrip() {
        let t = ColumnType::new("timestamp").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"TIMESTAMP\"");
        let back: ColumnType = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
