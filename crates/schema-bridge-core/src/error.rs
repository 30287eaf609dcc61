use std::fmt;

/// Input that cannot be translated: an identifier grammar violation, a
/// duplicate attribute, or a columnar structure outside the supported subset.
///
/// Always recoverable by the caller; the offending names are carried so the
/// failure can be logged or reported against the right class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedSchemaError {
    /// A name does not match `[A-Za-z_][A-Za-z0-9_]*`.
    InvalidIdentifier { name: String },
    /// An attribute name occurs twice within one class.
    DuplicateAttribute { class: String, attribute: String },
    /// A top-level table descriptor is not a record.
    UnsupportedTableKind { table: String, kind: String },
    /// A field inside a table is itself a record.
    NestedRecord { table: String, field: String },
}

impl MalformedSchemaError {
    /// The class (or table) the error refers to, if known.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::InvalidIdentifier { .. } => None,
            Self::DuplicateAttribute { class, .. } => Some(class),
            Self::UnsupportedTableKind { table, .. } | Self::NestedRecord { table, .. } => {
                Some(table)
            }
        }
    }

    /// The attribute (or field) the error refers to, if any.
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateAttribute { attribute, .. } => Some(attribute),
            Self::NestedRecord { field, .. } => Some(field),
            Self::InvalidIdentifier { .. } | Self::UnsupportedTableKind { .. } => None,
        }
    }
}

impl fmt::Display for MalformedSchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier { name } => {
                write!(
                    f,
                    "invalid identifier '{name}': must match [A-Za-z_][A-Za-z0-9_]*"
                )
            }
            Self::DuplicateAttribute { class, attribute } => {
                write!(f, "duplicate attribute '{attribute}' in class '{class}'")
            }
            Self::UnsupportedTableKind { table, kind } => {
                write!(
                    f,
                    "table '{table}' has kind '{kind}': only record tables are supported"
                )
            }
            Self::NestedRecord { table, field } => {
                write!(
                    f,
                    "field '{field}' in table '{table}' is a nested record, which is not supported"
                )
            }
        }
    }
}

impl std::error::Error for MalformedSchemaError {}

/// A type name that had no mapping and was replaced by a sentinel.
///
/// Non-fatal: the translation still succeeds, but callers should surface
/// these for schema review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedTypeWarning {
    /// Class (or table) containing the attribute.
    pub class: String,
    /// Attribute (or field) whose type was not recognized.
    pub attribute: String,
    /// The type name as it appeared in the input.
    pub found: String,
    /// The sentinel that replaced it.
    pub fallback: String,
}

impl fmt::Display for UnsupportedTypeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported type '{}' for '{}.{}', using '{}'",
            self.found, self.class, self.attribute, self.fallback
        )
    }
}
