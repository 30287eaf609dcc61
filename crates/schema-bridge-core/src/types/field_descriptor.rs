use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;
use super::identifier::Identifier;

/// Structural kind of a columnar field or table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Record,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Record => write!(f, "record"),
        }
    }
}

/// A named, typed column inside a table descriptor.
///
/// On the wire the kind is carried by the `type` key: a `RECORD` (or
/// `STRUCT`) type is a record with nested `fields`, anything else is a
/// scalar of that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireField", into = "WireField")]
pub struct FieldDescriptor {
    pub name: Identifier,
    pub column_type: ColumnType,
    pub kind: FieldKind,
    /// Nested fields; empty unless `kind` is `Record`.
    pub fields: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    /// Creates a scalar field of the given column type.
    pub fn scalar(name: Identifier, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            kind: FieldKind::Scalar,
            fields: Vec::new(),
        }
    }

    /// Creates a record field holding nested fields.
    pub fn record(name: Identifier, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            column_type: ColumnType::record(),
            kind: FieldKind::Record,
            fields,
        }
    }

    /// Returns true if this field is a nested record.
    pub fn is_record(&self) -> bool {
        self.kind == FieldKind::Record
    }
}

impl std::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.name, self.column_type, self.kind)
    }
}

#[derive(Serialize, Deserialize)]
struct WireField {
    name: Identifier,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldDescriptor>>,
}

impl From<WireField> for FieldDescriptor {
    fn from(wire: WireField) -> Self {
        if wire.column_type.is_record() {
            Self {
                name: wire.name,
                column_type: wire.column_type,
                kind: FieldKind::Record,
                fields: wire.fields.unwrap_or_default(),
            }
        } else {
            Self::scalar(wire.name, wire.column_type)
        }
    }
}

impl From<FieldDescriptor> for WireField {
    fn from(field: FieldDescriptor) -> Self {
        let fields = match field.kind {
            FieldKind::Record => Some(field.fields),
            FieldKind::Scalar => None,
        };
        Self {
            name: field.name,
            column_type: field.column_type,
            fields,
        }
    }
}
