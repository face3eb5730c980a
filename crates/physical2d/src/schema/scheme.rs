use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::WireType;

/// Attribute name to wire type. Iterates in attribute-name order, which is the
/// order the encoder writes fields in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: BTreeMap<String, WireType>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of every object hierarchy.
    pub fn object() -> Self {
        Self::new().with("id", WireType::Int32)
    }

    pub fn with(mut self, name: impl Into<String>, wire_type: WireType) -> Self {
        self.insert(name, wire_type);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, wire_type: WireType) -> Option<WireType> {
        self.fields.insert(name.into(), wire_type)
    }

    /// Union of `parent` and `self`. On a name collision the entry declared
    /// here (the more derived type) wins.
    pub fn extending(self, parent: &Schema) -> Self {
        let mut merged = parent.clone();
        for (name, wire_type) in self.fields {
            if let Some(previous) = merged.fields.insert(name.clone(), wire_type.clone()) {
                if previous != wire_type {
                    log::debug!(
                        "schema field `{}` redeclared: {:?} overrides inherited {:?}",
                        name,
                        wire_type,
                        previous
                    );
                }
            }
        }
        merged
    }

    pub fn get(&self, name: &str) -> Option<&WireType> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireType)> {
        self.fields.iter().map(|(name, wire_type)| (name.as_str(), wire_type))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Implemented by every concrete networked type. A derived type returns its own
/// attributes `extending` its parent's `net_scheme()`.
pub trait NetScheme {
    fn net_scheme() -> Schema;
}
