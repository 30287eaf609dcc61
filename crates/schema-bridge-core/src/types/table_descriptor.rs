use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;
use super::field_descriptor::{FieldDescriptor, FieldKind};
use super::identifier::Identifier;

/// A top-level table in a columnar schema document.
///
/// Tables produced by the builder are always records. A document read from
/// elsewhere may carry a scalar at the top level; the reader rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireTable", into = "WireTable")]
pub struct TableDescriptor {
    pub name: Identifier,
    pub kind: FieldKind,
    pub fields: Vec<FieldDescriptor>,
}

impl TableDescriptor {
    /// Creates a record table with the given fields.
    pub fn new(name: Identifier, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            kind: FieldKind::Record,
            fields,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }
}

impl std::fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "table {} ({}) {{", self.name, self.kind)?;
        for field in &self.fields {
            writeln!(f, "  {field}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Serialize, Deserialize)]
struct WireTable {
    name: Identifier,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

impl From<WireTable> for TableDescriptor {
    fn from(wire: WireTable) -> Self {
        let kind = if wire.column_type.is_record() {
            FieldKind::Record
        } else {
            FieldKind::Scalar
        };
        Self {
            name: wire.name,
            kind,
            fields: wire.fields,
        }
    }
}

impl From<TableDescriptor> for WireTable {
    fn from(table: TableDescriptor) -> Self {
        // A scalar table has no column type of its own to preserve.
        let column_type = match table.kind {
            FieldKind::Record => ColumnType::record(),
            FieldKind::Scalar => ColumnType::any(),
        };
        Self {
            name: table.name,
            column_type,
            fields: table.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn new_is_record() {
        let t = TableDescriptor::new(ident("Employee"), vec![]);
        assert_eq!(t.kind, FieldKind::Record);
    }

    #[test]
    fn wire_format_matches_warehouse_json() {
        let t = TableDescriptor::new(
            ident("Employee"),
            vec![FieldDescriptor::scalar(
                ident("name"),
                ColumnType::new("STRING").unwrap(),
            )],
        );
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Employee",
                "type": "RECORD",
                "fields": [{ "name": "name", "type": "STRING" }]
            })
        );
    }

    #[test]
    fn scalar_top_level_is_preserved_as_scalar() {
        let t: TableDescriptor =
            serde_json::from_str(r#"{"name":"Loose","type":"STRING"}"#).unwrap();
        assert_eq!(t.kind, FieldKind::Scalar);
        assert!(t.fields.is_empty());
    }

    #[test]
    fn field_lookup() {
        let t = TableDescriptor::new(
            ident("Employee"),
            vec![FieldDescriptor::scalar(
                ident("name"),
                ColumnType::new("STRING").unwrap(),
            )],
        );
        assert!(t.field("name").is_some());
        assert!(t.field("age").is_none());
    }
}
