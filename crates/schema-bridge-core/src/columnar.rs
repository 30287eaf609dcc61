//! Conversion between class definitions and columnar table descriptors.

use crate::error::{MalformedSchemaError, UnsupportedTypeWarning};
use crate::type_mapper::TypeMapper;
use crate::types::{AttributeDef, ClassDef, FieldDescriptor, FieldKind, TableDescriptor};

/// A translation result together with the type fallbacks it needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated<T> {
    pub value: T,
    pub warnings: Vec<UnsupportedTypeWarning>,
}

impl<T> Translated<T> {
    /// Discards the warnings.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns true if every type had a mapping.
    pub fn is_lossless(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Builds one record table per class, one scalar field per attribute.
///
/// Total: unknown attribute types become `ANY` and are reported as
/// warnings. Classes sharing a name are not merged.
pub fn build(classes: &[ClassDef], mapper: &TypeMapper) -> Translated<Vec<TableDescriptor>> {
    let mut warnings = Vec::new();
    let tables = classes
        .iter()
        .map(|class| {
            let fields = class
                .attributes
                .iter()
                .map(|attribute| {
                    let column_type = match mapper.lookup_column_type(&attribute.type_name) {
                        Some(column_type) => column_type.clone(),
                        None => {
                            let fallback = mapper.to_column_type(&attribute.type_name);
                            warnings.push(unsupported(
                                class.name.as_str(),
                                attribute.name.as_str(),
                                attribute.type_name.as_str(),
                                fallback.as_str(),
                            ));
                            fallback
                        }
                    };
                    FieldDescriptor::scalar(attribute.name.clone(), column_type)
                })
                .collect();
            TableDescriptor::new(class.name.clone(), fields)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        tables = tables.len(),
        fallbacks = warnings.len(),
        "built columnar schema"
    );
    Translated {
        value: tables,
        warnings,
    }
}

/// Reads class definitions back from record tables.
///
/// # Errors
///
/// Fails on the first table that is not a record, contains a nested record
/// field, or repeats a field name. Nested records are rejected rather than
/// flattened or dropped.
pub fn read(
    tables: &[TableDescriptor],
    mapper: &TypeMapper,
) -> Result<Translated<Vec<ClassDef>>, MalformedSchemaError> {
    let mut warnings = Vec::new();
    let mut classes = Vec::with_capacity(tables.len());

    for table in tables {
        if table.kind != FieldKind::Record {
            return Err(MalformedSchemaError::UnsupportedTableKind {
                table: table.name.to_string(),
                kind: table.kind.to_string(),
            });
        }

        let mut attributes = Vec::with_capacity(table.fields.len());
        for field in &table.fields {
            if field.is_record() {
                return Err(MalformedSchemaError::NestedRecord {
                    table: table.name.to_string(),
                    field: field.name.to_string(),
                });
            }
            let type_name = match mapper.lookup_dsl_type(&field.column_type) {
                Some(type_name) => type_name.clone(),
                None => {
                    let fallback = mapper.to_dsl_type(&field.column_type);
                    warnings.push(unsupported(
                        table.name.as_str(),
                        field.name.as_str(),
                        field.column_type.as_str(),
                        fallback.as_str(),
                    ));
                    fallback
                }
            };
            attributes.push(AttributeDef::new(field.name.clone(), type_name));
        }

        classes.push(ClassDef::new(table.name.clone(), attributes)?);
    }

    tracing::debug!(
        classes = classes.len(),
        fallbacks = warnings.len(),
        "read columnar schema"
    );
    Ok(Translated {
        value: classes,
        warnings,
    })
}

fn unsupported(class: &str, attribute: &str, found: &str, fallback: &str) -> UnsupportedTypeWarning {
    let warning = UnsupportedTypeWarning {
        class: class.to_string(),
        attribute: attribute.to_string(),
        found: found.to_string(),
        fallback: fallback.to_string(),
    };
    tracing::warn!("{warning}");
    warning
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnType, Identifier};

    fn ident(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    fn class(name: &str, attrs: &[(&str, &str)]) -> ClassDef {
        ClassDef::new(
            ident(name),
            attrs
                .iter()
                .map(|(n, t)| AttributeDef::new(ident(n), ident(t)))
                .collect(),
        )
        .unwrap()
    }

    fn scalar(name: &str, ty: &str) -> FieldDescriptor {
        FieldDescriptor::scalar(ident(name), ColumnType::new(ty).unwrap())
    }

    #[test]
    fn build_one_table_per_class_in_order() {
        let classes = vec![
            class("Employee", &[("name", "String"), ("title", "String")]),
            class("Organisation", &[("name", "String")]),
        ];
        let built = build(&classes, &TypeMapper::default());
        assert!(built.is_lossless());
        let tables = built.into_value();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name.as_str(), "Employee");
        assert_eq!(tables[0].kind, FieldKind::Record);
        assert_eq!(tables[0].fields, vec![scalar("name", "STRING"), scalar("title", "STRING")]);
        assert_eq!(tables[1].name.as_str(), "Organisation");
    }

    #[test]
    fn build_unknown_type_uses_sentinel_and_warns() {
        let built = build(&[class("X", &[("a", "Weird")])], &TypeMapper::default());
        assert_eq!(built.value[0].fields[0].column_type.as_str(), "ANY");
        assert_eq!(built.value[0].fields[0].kind, FieldKind::Scalar);
        assert_eq!(built.warnings.len(), 1);
        assert_eq!(built.warnings[0].class, "X");
        assert_eq!(built.warnings[0].attribute, "a");
        assert_eq!(built.warnings[0].found, "Weird");
        assert_eq!(built.warnings[0].fallback, "ANY");
    }

    #[test]
    fn build_keeps_duplicate_class_names() {
        let classes = vec![class("Dup", &[]), class("Dup", &[("a", "String")])];
        let tables = build(&classes, &TypeMapper::default()).into_value();
        assert_eq!(tables.len(), 2);
        assert!(tables[0].fields.is_empty());
        assert_eq!(tables[1].fields.len(), 1);
    }

    #[test]
    fn build_empty_input() {
        assert!(build(&[], &TypeMapper::default()).value.is_empty());
    }

    #[test]
    fn read_maps_types_back() {
        let tables = vec![TableDescriptor::new(
            ident("Employee"),
            vec![scalar("name", "STRING"), scalar("age", "ANY")],
        )];
        let read_back = read(&tables, &TypeMapper::default()).unwrap();
        assert!(read_back.is_lossless());
        assert_eq!(
            read_back.value,
            vec![class("Employee", &[("name", "String"), ("age", "Any")])]
        );
    }

    #[test]
    fn read_unknown_column_type_warns() {
        let tables = vec![TableDescriptor::new(
            ident("Place"),
            vec![scalar("location", "GEOGRAPHY")],
        )];
        let read_back = read(&tables, &TypeMapper::default()).unwrap();
        assert_eq!(read_back.value[0].attributes[0].type_name.as_str(), "Any");
        assert_eq!(read_back.warnings.len(), 1);
        assert_eq!(read_back.warnings[0].found, "GEOGRAPHY");
        assert_eq!(read_back.warnings[0].fallback, "Any");
    }

    #[test]
    fn read_rejects_nested_record() {
        let tables = vec![TableDescriptor::new(
            ident("Employee"),
            vec![
                scalar("name", "STRING"),
                FieldDescriptor::record(ident("address"), vec![scalar("city", "STRING")]),
            ],
        )];
        let err = read(&tables, &TypeMapper::default()).unwrap_err();
        assert_eq!(
            err,
            MalformedSchemaError::NestedRecord {
                table: "Employee".into(),
                field: "address".into(),
            }
        );
    }

    #[test]
    fn read_rejects_scalar_table() {
        let mut table = TableDescriptor::new(ident("Loose"), vec![]);
        table.kind = FieldKind::Scalar;
        let err = read(&[table], &TypeMapper::default()).unwrap_err();
        assert!(matches!(
            err,
            MalformedSchemaError::UnsupportedTableKind { ref table, ref kind }
                if table == "Loose" && kind == "scalar"
        ));
    }

    #[test]
    fn read_rejects_duplicate_fields() {
        let tables = vec![TableDescriptor::new(
            ident("Foo"),
            vec![scalar("a", "STRING"), scalar("a", "STRING")],
        )];
        let err = read(&tables, &TypeMapper::default()).unwrap_err();
        assert_eq!(err.attribute_name(), Some("a"));
    }

    #[test]
    fn read_after_build_is_identity_for_mapped_types() {
        let classes = vec![
            class("Employee", &[("name", "String"), ("nickname", "String")]),
            class("Empty", &[]),
        ];
        let mapper = TypeMapper::default();
        let tables = build(&classes, &mapper).into_value();
        assert_eq!(read(&tables, &mapper).unwrap().into_value(), classes);
    }
}
