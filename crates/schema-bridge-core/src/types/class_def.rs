use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::MalformedSchemaError;

use super::attribute_def::AttributeDef;
use super::identifier::Identifier;

/// A flat class definition: a name and an ordered list of attributes.
///
/// Attribute order is significant; it becomes field order on the columnar
/// side and must survive a round trip unchanged.
///
/// Deserializing goes through [`ClassDef::new`], so duplicate attribute
/// names are rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireClass")]
pub struct ClassDef {
    pub name: Identifier,
    pub attributes: Vec<AttributeDef>,
}

impl ClassDef {
    /// Creates a new `ClassDef`, rejecting duplicate attribute names.
    ///
    /// An empty attribute list is valid.
    pub fn new(
        name: Identifier,
        attributes: Vec<AttributeDef>,
    ) -> Result<Self, MalformedSchemaError> {
        if let Some(duplicate) = first_duplicate(&attributes) {
            return Err(MalformedSchemaError::DuplicateAttribute {
                class: name.to_string(),
                attribute: duplicate.to_string(),
            });
        }
        Ok(Self { name, attributes })
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name.as_str() == name)
    }
}

fn first_duplicate(attributes: &[AttributeDef]) -> Option<&Identifier> {
    let mut seen = HashSet::with_capacity(attributes.len());
    attributes
        .iter()
        .map(|a| &a.name)
        .find(|name| !seen.insert(name.as_str()))
}

#[derive(Deserialize)]
struct WireClass {
    name: Identifier,
    #[serde(default)]
    attributes: Vec<AttributeDef>,
}

impl TryFrom<WireClass> for ClassDef {
    type Error = MalformedSchemaError;

    fn try_from(wire: WireClass) -> Result<Self, Self::Error> {
        Self::new(wire.name, wire.attributes)
    }
}

impl std::fmt::Display for ClassDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "class {} {{", self.name)?;
        for attribute in &self.attributes {
            writeln!(f, "  {attribute};")?;
        }
        write!(f, "}}")
    }
}
