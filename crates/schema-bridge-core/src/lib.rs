//! # schema-bridge-core
//!
//! The schema model shared by the DSL and columnar sides of SchemaBridge:
//! validated identifiers, class definitions, table descriptors, the type
//! mapper, and the conversions between class definitions and tables.
//!
//! # Example
//!
//! ```
//! use schema_bridge_core::columnar::{build, read};
//! use schema_bridge_core::type_mapper::TypeMapper;
//! use schema_bridge_core::types::{AttributeDef, ClassDef, Identifier};
//!
//! let employee = ClassDef::new(
//!     Identifier::new("Employee").unwrap(),
//!     vec![AttributeDef::new(
//!         Identifier::new("name").unwrap(),
//!         Identifier::new("String").unwrap(),
//!     )],
//! )
//! .unwrap();
//!
//! let mapper = TypeMapper::default();
//! let tables = build(std::slice::from_ref(&employee), &mapper).into_value();
//! assert_eq!(tables[0].fields[0].column_type.as_str(), "STRING");
//!
//! let classes = read(&tables, &mapper).unwrap().into_value();
//! assert_eq!(classes, vec![employee]);
//! ```

pub mod columnar;
pub mod document;
pub mod error;
pub mod type_mapper;
pub mod types;

pub use columnar::{build, read, Translated};
pub use error::{MalformedSchemaError, UnsupportedTypeWarning};
pub use type_mapper::TypeMapper;
