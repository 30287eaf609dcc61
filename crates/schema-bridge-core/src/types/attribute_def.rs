use serde::{Deserialize, Serialize};

use super::identifier::{Identifier, TypeName};

/// A single named, typed attribute of a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: Identifier,
    #[serde(rename = "type")]
    pub type_name: TypeName,
}

impl AttributeDef {
    /// Creates a new attribute definition.
    pub fn new(name: Identifier, type_name: TypeName) -> Self {
        Self { name, type_name }
    }
}

impl std::fmt::Display for AttributeDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.name, self.type_name)
    }
}
