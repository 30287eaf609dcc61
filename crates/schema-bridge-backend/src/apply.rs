//! Additive merge of an incoming table descriptor into a stored one.

use schema_bridge_core::types::{FieldDescriptor, Identifier, TableDescriptor};

use crate::error::BackendError;

/// What applying a table did to the stored schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The table did not exist and was created as given.
    Created,
    /// Every incoming field already existed with the same type.
    Unchanged,
    /// New fields were appended, in incoming order.
    Altered { added: Vec<Identifier> },
}

/// Result of one `apply_schema` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub table: Identifier,
    pub outcome: ApplyOutcome,
    /// Stored fields absent from the incoming descriptor. They are kept.
    pub retained: Vec<Identifier>,
}

impl ApplyReport {
    /// Returns true if the stored schema was written.
    pub fn changed(&self) -> bool {
        !matches!(self.outcome, ApplyOutcome::Unchanged)
    }
}

/// Merges `incoming` into `existing`, returning the merged table.
///
/// # Errors
///
/// Returns `BackendError::IncompatibleChange` if the table kinds differ or a
/// field exists on both sides with a different type, kind, or sub-fields.
pub fn merge(
    existing: &TableDescriptor,
    incoming: &TableDescriptor,
) -> Result<(TableDescriptor, ApplyReport), BackendError> {
    let table = existing.name.clone();
    if existing.kind != incoming.kind {
        return Err(BackendError::IncompatibleChange {
            table: table.to_string(),
            reason: format!("table is {}, incoming {}", existing.kind, incoming.kind),
        });
    }

    let mut merged = existing.clone();
    let mut added = Vec::new();
    for field in &incoming.fields {
        match existing.field(field.name.as_str()) {
            Some(current) => check_compatible(&table, current, field)?,
            None => {
                added.push(field.name.clone());
                merged.fields.push(field.clone());
            }
        }
    }

    let retained = existing
        .fields
        .iter()
        .filter(|f| incoming.field(f.name.as_str()).is_none())
        .map(|f| f.name.clone())
        .collect();
    let outcome = if added.is_empty() {
        ApplyOutcome::Unchanged
    } else {
        ApplyOutcome::Altered { added }
    };

    Ok((
        merged,
        ApplyReport {
            table,
            outcome,
            retained,
        },
    ))
}

/// Report for a table that did not exist before.
pub fn created(table: &TableDescriptor) -> ApplyReport {
    ApplyReport {
        table: table.name.clone(),
        outcome: ApplyOutcome::Created,
        retained: Vec::new(),
    }
}

fn check_compatible(
    table: &Identifier,
    current: &FieldDescriptor,
    incoming: &FieldDescriptor,
) -> Result<(), BackendError> {
    if current == incoming {
        return Ok(());
    }
    Err(BackendError::IncompatibleChange {
        table: table.to_string(),
        reason: format!(
            "field '{}' is {} ({}), incoming {} ({})",
            current.name, current.column_type, current.kind, incoming.column_type, incoming.kind
        ),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use schema_bridge_core::types::ColumnType;

    use super::*;

    fn ident(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    fn table(fields: &[(&str, &str)]) -> TableDescriptor {
        TableDescriptor::new(
            ident("Employee"),
            fields
                .iter()
                .map(|(n, t)| FieldDescriptor::scalar(ident(n), ColumnType::new(*t).unwrap()))
                .collect(),
        )
    }

    #[test]
    fn identical_table_is_unchanged() {
        let t = table(&[("name", "STRING")]);
        let (merged, report) = merge(&t, &t).unwrap();
        assert_eq!(merged, t);
        assert_eq!(report.outcome, ApplyOutcome::Unchanged);
        assert!(!report.changed());
        assert!(report.retained.is_empty());
    }

    #[test]
    fn new_field_is_appended() {
        let existing = table(&[("name", "STRING")]);
        let incoming = table(&[("name", "STRING"), ("newcolumn", "STRING")]);
        let (merged, report) = merge(&existing, &incoming).unwrap();
        assert_eq!(merged, incoming);
        assert_eq!(
            report.outcome,
            ApplyOutcome::Altered {
                added: vec![ident("newcolumn")]
            }
        );
        assert!(report.changed());
    }

    #[test]
    fn missing_field_is_retained_not_dropped() {
        let existing = table(&[("name", "STRING"), ("legacy", "STRING")]);
        let incoming = table(&[("name", "STRING"), ("age", "ANY")]);
        let (merged, report) = merge(&existing, &incoming).unwrap();
        assert_eq!(merged, table(&[("name", "STRING"), ("legacy", "STRING"), ("age", "ANY")]));
        assert_eq!(report.retained, vec![ident("legacy")]);
    }

    #[test]
    fn type_change_is_incompatible() {
        let existing = table(&[("age", "ANY")]);
        let incoming = table(&[("age", "INTEGER")]);
        let err = merge(&existing, &incoming).unwrap_err();
        assert!(matches!(
            &err,
            BackendError::IncompatibleChange { table, reason }
                if table == "Employee" && reason.contains("'age' is ANY")
        ));
    }

    #[test]
    fn created_report() {
        let report = created(&table(&[]));
        assert_eq!(report.outcome, ApplyOutcome::Created);
        assert!(report.changed());
    }

    proptest! {
        /// Merging never loses a stored field and never reorders them.
        #[test]
        fn merge_is_additive(
            existing in prop::collection::btree_set("[a-z]{1,6}", 0..6),
            incoming in prop::collection::btree_set("[a-z]{1,6}", 0..6),
        ) {
            let to_table = |names: &std::collections::BTreeSet<String>| {
                TableDescriptor::new(
                    ident("T"),
                    names
                        .iter()
                        .map(|n| FieldDescriptor::scalar(ident(n), ColumnType::new("STRING").unwrap()))
                        .collect(),
                )
            };
            let existing = to_table(&existing);
            let incoming = to_table(&incoming);
            let (merged, _) = merge(&existing, &incoming).unwrap();
            prop_assert_eq!(&merged.fields[..existing.fields.len()], &existing.fields[..]);
            for field in &incoming.fields {
                prop_assert!(merged.field(field.name.as_str()).is_some());
            }
        }
    }
}
