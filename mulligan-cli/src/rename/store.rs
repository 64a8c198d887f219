use std::fmt::Debug;

use crate::core::error::{MulliganError, Result};

/// Host binding that reads and writes entity names.
///
/// Entities are opaque handles. A store must refuse `set_name` when another
/// live entity in the same scope already carries the name.
pub trait NamingStore {
    type Entity: Clone + Debug;

    fn name(&self, entity: &Self::Entity) -> Result<String>;

    fn set_name(&mut self, entity: &Self::Entity, new_name: &str) -> Result<()>;

    /// Identifier that survives renames, used to derive placeholder names
    fn stable_id(&self, entity: &Self::Entity) -> String;

    /// Whether another entity in `entity`'s scope currently uses `name`
    fn is_name_taken(&self, entity: &Self::Entity, name: &str) -> bool;

    /// Entities only collide with others in the same scope (e.g. a directory)
    fn scope(&self, _entity: &Self::Entity) -> String {
        String::new()
    }

    /// Host-specific reason a name cannot be used
    fn validate_name(&self, _name: &str) -> Option<String> {
        None
    }
}

/// In-memory store with one flat scope; entities are indices
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    names: Vec<String>,
    history: Vec<(usize, String, String)>,
}

impl MemoryStore {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            history: Vec::new(),
        }
    }

    /// Every entity handle, in insertion order
    pub fn entities(&self) -> Vec<usize> {
        (0..self.names.len()).collect()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(entity, old, new)` for every successful `set_name`
    pub fn history(&self) -> &[(usize, String, String)] {
        &self.history
    }
}

impl NamingStore for MemoryStore {
    type Entity = usize;

    fn name(&self, entity: &usize) -> Result<String> {
        self.names
            .get(*entity)
            .cloned()
            .ok_or_else(|| MulliganError::EntityNotFound(entity.to_string()))
    }

    fn set_name(&mut self, entity: &usize, new_name: &str) -> Result<()> {
        let old_name = self.name(entity)?;
        if self.is_name_taken(entity, new_name) {
            return Err(MulliganError::NameTaken(new_name.to_string()));
        }

        self.names[*entity] = new_name.to_string();
        self.history.push((*entity, old_name, new_name.to_string()));
        Ok(())
    }

    fn stable_id(&self, entity: &usize) -> String {
        entity.to_string()
    }

    fn is_name_taken(&self, entity: &usize, name: &str) -> bool {
        self.names
            .iter()
            .enumerate()
            .any(|(i, existing)| i != *entity && existing == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_refuses_taken_names() {
        let mut store = MemoryStore::new(["A", "B"]);

        let err = store.set_name(&0, "B").unwrap_err();
        assert!(matches!(err, MulliganError::NameTaken(name) if name == "B"));

        store.set_name(&0, "C").unwrap();
        assert_eq!(store.names(), &["C".to_string(), "B".to_string()]);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_renaming_to_own_name_is_allowed() {
        let mut store = MemoryStore::new(["A"]);
        store.set_name(&0, "A").unwrap();
        assert!(!store.is_name_taken(&0, "A"));
    }

    #[test]
    fn test_unknown_entity() {
        let store = MemoryStore::new(["A"]);
        assert!(matches!(
            store.name(&3),
            Err(MulliganError::EntityNotFound(_))
        ));
    }
}
