//! Mapping between DSL primitive type names and columnar type names.
//!
//! Both directions are total: a name with no mapping falls back to a fixed
//! sentinel (`ANY` going forward, `Any` going back). The two sentinels are
//! not guaranteed to be inverses of each other; a round trip through an
//! unknown type is lossy.

use std::collections::HashMap;

use crate::types::{ColumnType, Identifier, TypeName};

/// DSL type name used when a column type has no reverse mapping.
pub const UNKNOWN_DSL_TYPE: &str = "Any";

/// Column type used when a DSL type has no forward mapping.
pub const UNKNOWN_COLUMN_TYPE: &str = ColumnType::ANY;

/// Read-only, bidirectional type mapping table.
///
/// Built once and then shared by reference; lookups never mutate, so a single
/// mapper can serve any number of concurrent translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapper {
    forward: HashMap<TypeName, ColumnType>,
    reverse: HashMap<ColumnType, TypeName>,
}

impl Default for TypeMapper {
    /// `String <-> STRING` and `Any <-> ANY`.
    fn default() -> Self {
        Self::builder()
            .pair(Identifier::known("String"), ColumnType::known("STRING"))
            .pair(
                Identifier::known(UNKNOWN_DSL_TYPE),
                ColumnType::known(UNKNOWN_COLUMN_TYPE),
            )
            .build()
    }
}

impl TypeMapper {
    /// Starts an empty mapping table.
    pub fn builder() -> TypeMapperBuilder {
        TypeMapperBuilder::default()
    }

    /// The default table extended with the common warehouse primitives.
    pub fn standard() -> Self {
        Self::default().extend_standard()
    }

    fn extend_standard(self) -> Self {
        TypeMapperBuilder::from(self)
            .pair(Identifier::known("Integer"), ColumnType::known("INTEGER"))
            .reverse_alias(ColumnType::known("INT64"), Identifier::known("Integer"))
            .pair(Identifier::known("Float"), ColumnType::known("FLOAT"))
            .reverse_alias(ColumnType::known("FLOAT64"), Identifier::known("Float"))
            .pair(Identifier::known("Decimal"), ColumnType::known("NUMERIC"))
            .reverse_alias(ColumnType::known("BIGNUMERIC"), Identifier::known("Decimal"))
            .pair(Identifier::known("Boolean"), ColumnType::known("BOOLEAN"))
            .reverse_alias(ColumnType::known("BOOL"), Identifier::known("Boolean"))
            .pair(Identifier::known("StrictDate"), ColumnType::known("DATE"))
            .pair(Identifier::known("DateTime"), ColumnType::known("TIMESTAMP"))
            .reverse_alias(ColumnType::known("DATETIME"), Identifier::known("DateTime"))
            .build()
    }

    /// Forward lookup without fallback.
    pub fn lookup_column_type(&self, type_name: &TypeName) -> Option<&ColumnType> {
        self.forward.get(type_name)
    }

    /// Reverse lookup without fallback. Column types compare case-insensitively.
    pub fn lookup_dsl_type(&self, column_type: &ColumnType) -> Option<&TypeName> {
        self.reverse.get(column_type)
    }

    /// Maps a DSL type name to its column type, falling back to `ANY`.
    pub fn to_column_type(&self, type_name: &TypeName) -> ColumnType {
        self.lookup_column_type(type_name)
            .cloned()
            .unwrap_or_else(unknown_column_type)
    }

    /// Maps a column type to its DSL type name, falling back to `Any`.
    pub fn to_dsl_type(&self, column_type: &ColumnType) -> TypeName {
        self.lookup_dsl_type(column_type)
            .cloned()
            .unwrap_or_else(unknown_dsl_type)
    }

    /// Number of DSL type names with a forward mapping.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if no forward mapping is registered.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// The forward sentinel, `ANY`.
pub fn unknown_column_type() -> ColumnType {
    ColumnType::any()
}

/// The reverse sentinel, `Any`.
pub fn unknown_dsl_type() -> TypeName {
    Identifier::known(UNKNOWN_DSL_TYPE)
}

/// Builder for [`TypeMapper`].
#[derive(Debug, Default)]
pub struct TypeMapperBuilder {
    forward: HashMap<TypeName, ColumnType>,
    reverse: HashMap<ColumnType, TypeName>,
}

impl TypeMapperBuilder {
    /// Registers `dsl <-> column`.
    ///
    /// The forward entry replaces any earlier one for `dsl`; the reverse entry
    /// is only added if `column` has no DSL name yet.
    pub fn pair(mut self, dsl: TypeName, column: ColumnType) -> Self {
        self.reverse
            .entry(column.clone())
            .or_insert_with(|| dsl.clone());
        self.forward.insert(dsl, column);
        self
    }

    /// Registers a reverse-only mapping `column -> dsl`.
    pub fn reverse_alias(mut self, column: ColumnType, dsl: TypeName) -> Self {
        self.reverse.entry(column).or_insert(dsl);
        self
    }

    /// Freezes the table.
    pub fn build(self) -> TypeMapper {
        TypeMapper {
            forward: self.forward,
            reverse: self.reverse,
        }
    }
}

impl From<TypeMapper> for TypeMapperBuilder {
    fn from(mapper: TypeMapper) -> Self {
        Self {
            forward: mapper.forward,
            reverse: mapper.reverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dsl(s: &str) -> TypeName {
        Identifier::new(s).unwrap()
    }

    fn col(s: &str) -> ColumnType {
        ColumnType::new(s).unwrap()
    }

    #[test]
    fn string_maps_both_ways() {
        let m = TypeMapper::default();
        assert_eq!(m.to_column_type(&dsl("String")), col("STRING"));
        assert_eq!(m.to_dsl_type(&col("STRING")), dsl("String"));
    }

    #[test]
    fn reverse_is_case_insensitive() {
        let m = TypeMapper::default();
        assert_eq!(m.to_dsl_type(&col("string")), dsl("String"));
    }

    #[test]
    fn unknown_dsl_type_falls_back_to_any_column() {
        let m = TypeMapper::default();
        assert_eq!(m.lookup_column_type(&dsl("Weird")), None);
        assert_eq!(m.to_column_type(&dsl("Weird")), col("ANY"));
    }

    #[test]
    fn unknown_column_type_falls_back_to_any_dsl() {
        let m = TypeMapper::default();
        assert_eq!(m.lookup_dsl_type(&col("GEOGRAPHY")), None);
        assert_eq!(m.to_dsl_type(&col("GEOGRAPHY")), dsl("Any"));
    }

    #[test]
    fn default_leaves_integer_unmapped() {
        let m = TypeMapper::default();
        assert_eq!(m.to_column_type(&dsl("Integer")), col("ANY"));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn standard_maps_primitives() {
        let m = TypeMapper::standard();
        assert_eq!(m.to_column_type(&dsl("Integer")), col("INTEGER"));
        assert_eq!(m.to_column_type(&dsl("DateTime")), col("TIMESTAMP"));
        assert_eq!(m.to_dsl_type(&col("INT64")), dsl("Integer"));
        assert_eq!(m.to_dsl_type(&col("bool")), dsl("Boolean"));
        assert_eq!(m.to_dsl_type(&col("DATETIME")), dsl("DateTime"));
        assert_eq!(m.to_dsl_type(&col("STRING")), dsl("String"));
    }

    #[test]
    fn forward_override_keeps_first_reverse() {
        let m = TypeMapper::builder()
            .pair(dsl("Text"), col("STRING"))
            .pair(dsl("String"), col("STRING"))
            .pair(dsl("Text"), col("JSON"))
            .build();
        assert_eq!(m.to_column_type(&dsl("Text")), col("JSON"));
        assert_eq!(m.to_dsl_type(&col("STRING")), dsl("Text"));
        assert_eq!(m.to_dsl_type(&col("JSON")), dsl("Text"));
    }

    #[test]
    fn empty_builder_maps_everything_to_sentinels() {
        let m = TypeMapper::builder().build();
        assert!(m.is_empty());
        assert_eq!(m.to_column_type(&dsl("String")), col("ANY"));
        assert_eq!(m.to_dsl_type(&col("STRING")), dsl("Any"));
    }

    #[test]
    fn sentinels_are_not_inverse_for_unknown_types() {
        let m = TypeMapper::default();
        let forward = m.to_column_type(&dsl("Weird"));
        let back = m.to_dsl_type(&forward);
        assert_ne!(back, dsl("Weird"));
    }
}
