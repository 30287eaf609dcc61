use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedSchemaError;

/// A validated identifier matching `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Used for class names, attribute names, DSL type names, and the names of
/// table and field descriptors on the columnar side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

/// A DSL primitive type name, e.g. `String` or `Integer`.
pub type TypeName = Identifier;

impl Identifier {
    /// Creates a new `Identifier`, validating the identifier grammar.
    pub fn new(s: impl Into<String>) -> Result<Self, MalformedSchemaError> {
        let s = s.into();
        if !is_identifier(&s) {
            return Err(MalformedSchemaError::InvalidIdentifier { name: s });
        }
        Ok(Self(s))
    }

    /// Wraps a name known at compile time to be a valid identifier.
    pub(crate) fn known(s: &'static str) -> Self {
        debug_assert!(is_identifier(s), "not an identifier: {s}");
        Self(s.to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns true if `s` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Identifier> for String {
    fn from(n: Identifier) -> String {
        n.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = MalformedSchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = MalformedSchemaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers() {
        for name in ["Employee", "name", "_private", "first_name", "A1", "x"] {
            assert!(Identifier::new(name).is_ok(), "expected valid: {name}");
        }
    }

    #[test]
    fn invalid_identifiers() {
        for name in ["", "1st", "has-dash", "has space", "a.b", "naïve", "x;"] {
            assert!(Identifier::new(name).is_err(), "expected invalid: {name}");
        }
    }

    #[test]
    fn invalid_identifier_is_not_truncated() {
        let err = Identifier::new("name[1]").unwrap_err();
        assert_eq!(
            err,
            MalformedSchemaError::InvalidIdentifier {
                name: "name[1]".into()
            }
        );
    }

    #[test]
    fn display_roundtrip() {
        let name = Identifier::new("Employee").unwrap();
        assert_eq!(name.to_string(), "Employee");
        assert_eq!(name.as_str(), "Employee");
    }

    #[test]
    fn serde_roundtrip() {
        let name = Identifier::new("age").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"age\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(name, back);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result = serde_json::from_str::<Identifier>("\"9lives\"");
        assert!(result.is_err());
    }
}
