//! # schema-bridge-dsl
//!
//! Parser and emitter for the class-definition DSL.
//!
//! This crate provides:
//! - A lexer that tokenizes `.pure` source files
//! - A block parser that produces `ClassDef` values and non-fatal warnings
//! - An emitter that converts `ClassDef` back to DSL text
//! - Round-trip fidelity: `parse(emit(classes))` produces the same classes
//!
//! # Example
//!
//! ```
//! use schema_bridge_dsl::{emit, parse};
//!
//! let source = r#"
//! class Employee {
//!   name : String;
//!   age : Integer;
//! }
//! "#;
//!
//! let classes = parse(source).expect("parse failed");
//! assert_eq!(classes.len(), 1);
//! assert_eq!(classes[0].name.as_str(), "Employee");
//!
//! let dsl_text = emit(&classes);
//! assert!(dsl_text.starts_with("class Employee {"));
//! ```

pub mod emitter;
pub mod error;
mod lexer;
pub mod parser;
pub mod token;

pub use emitter::{emit, emit_class};
pub use error::{DslError, ParseWarning, Span};
pub use parser::{parse, parse_document, ParsedDocument};
