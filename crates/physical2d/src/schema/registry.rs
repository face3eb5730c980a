use std::collections::HashMap;

use super::Schema;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("type `{0}` is already registered")]
    DuplicateType(String),
    #[error("type `{child}` extends unregistered type `{parent}`")]
    UnknownParent { child: String, parent: String },
    #[error("type `{0}` is not registered")]
    UnknownType(String),
}

#[derive(Debug, Clone)]
struct Entry {
    parent: Option<String>,
    own: Schema,
}

/// Named type hierarchy. Parents must be registered before their children, so
/// ancestry chains are always finite.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, Entry>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        parent: Option<&str>,
        own: Schema,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        if let Some(parent) = parent {
            if !self.types.contains_key(parent) {
                return Err(SchemaError::UnknownParent {
                    child: name,
                    parent: parent.to_owned(),
                });
            }
        }

        log::debug!("registered schema type `{}` ({} own fields)", name, own.len());
        self.types.insert(
            name,
            Entry {
                parent: parent.map(str::to_owned),
                own,
            },
        );
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.types.get(name).and_then(|entry| entry.parent.as_deref())
    }

    /// Merged schema of `name` and all of its ancestors, most-derived entries
    /// winning on collisions.
    pub fn resolve(&self, name: &str) -> Result<Schema, SchemaError> {
        let mut chain = Vec::new();
        let mut current = Some(name);
        while let Some(type_name) = current {
            let entry = self
                .types
                .get(type_name)
                .ok_or_else(|| SchemaError::UnknownType(type_name.to_owned()))?;
            chain.push(&entry.own);
            current = entry.parent.as_deref();
        }

        Ok(chain
            .into_iter()
            .rev()
            .fold(Schema::new(), |merged, own| own.clone().extending(&merged)))
    }
}
