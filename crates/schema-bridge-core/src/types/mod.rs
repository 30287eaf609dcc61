mod attribute_def;
mod class_def;
mod column_type;
mod field_descriptor;
mod identifier;
mod table_descriptor;

pub use attribute_def::AttributeDef;
pub use class_def::ClassDef;
pub use column_type::ColumnType;
pub use field_descriptor::{FieldDescriptor, FieldKind};
pub use identifier::{is_identifier, Identifier, TypeName};
pub use table_descriptor::TableDescriptor;
