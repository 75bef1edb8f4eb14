use thiserror::Error;
use tracing::{debug, info};

use crate::schedule::event::{ClassEvent, ClassId};
use crate::storage::{CLASSES_KEY, KeyValueStorage, read_json_or_default, write_json};
use crate::validation::{ClassForm, ValidationError, validate_class_form};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("No entry at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("No entry with id {0}")]
    NotFound(String),
}

/// In-memory class list mirrored to the `classes` storage key.
pub struct ClassStore<S> {
    storage: S,
    classes: Vec<ClassEvent>,
}

impl<S: KeyValueStorage> ClassStore<S> {
    /// Creates an empty store; call [`ClassStore::load_all`] to pick up saved classes.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            classes: Vec::new(),
        }
    }

    /// Replaces the in-memory list with whatever is stored. Missing or
    /// malformed data leaves the store empty.
    pub fn load_all(&mut self) {
        self.classes = read_json_or_default(&self.storage, CLASSES_KEY);
        debug!(count = self.classes.len(), "loaded classes");
    }

    pub fn add(&mut self, form: &ClassForm) -> Result<ClassId, ValidationError> {
        let event = validate_class_form(form)?;
        Ok(self.add_event(event))
    }

    pub fn add_event(&mut self, event: ClassEvent) -> ClassId {
        let id = event.id;
        info!(%id, class_name = %event.class_name, "adding class");
        self.classes.push(event);
        self.persist();
        id
    }

    pub fn delete(&mut self, id: ClassId) -> Result<ClassEvent, StoreError> {
        let index = self
            .classes
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.delete_at(index)
    }

    /// Removes by position. Every index at or after `index` shifts down by one.
    pub fn delete_at(&mut self, index: usize) -> Result<ClassEvent, StoreError> {
        if index >= self.classes.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.classes.len(),
            });
        }
        let removed = self.classes.remove(index);
        info!(id = %removed.id, class_name = %removed.class_name, "deleted class");
        self.persist();
        Ok(removed)
    }

    pub fn list(&self) -> &[ClassEvent] {
        &self.classes
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassEvent> {
        self.classes.iter().find(|c| c.id == id)
    }

    fn persist(&self) {
        write_json(&self.storage, CLASSES_KEY, &self.classes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::storage::tests::ReadOnlyStorage;

    fn form(name: &str) -> ClassForm {
        ClassForm {
            class_name: name.to_string(),
            location: "Room 4".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-05-01".to_string(),
            days: vec!["Mon".to_string(), "Wed".to_string()],
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
        }
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let storage = MemoryStorage::new();
        let mut store = ClassStore::new(storage.clone());
        let id = store.add(&form("Algorithms")).unwrap();

        let mut reloaded = ClassStore::new(storage);
        reloaded.load_all();
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.list()[0], *store.get(id).unwrap());
    }

    #[test]
    fn test_add_invalid_stores_nothing() {
        let storage = MemoryStorage::new();
        let mut store = ClassStore::new(storage.clone());
        let mut bad = form("Algorithms");
        bad.days.clear();
        assert_eq!(store.add(&bad), Err(ValidationError::NoDays));
        assert!(store.list().is_empty());
        assert!(storage.read(CLASSES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_delete_at_shifts_remaining() {
        let mut store = ClassStore::new(MemoryStorage::new());
        for name in ["Algorithms", "Databases", "Networks"] {
            store.add(&form(name)).unwrap();
        }
        let removed = store.delete_at(0).unwrap();
        assert_eq!(removed.class_name, "Algorithms");
        assert_eq!(store.list().len(), 2);
        assert!(store.list().iter().all(|c| c.class_name != "Algorithms"));
        assert_eq!(store.list()[0].class_name, "Databases");
    }

    #[test]
    fn test_delete_at_out_of_range() {
        let mut store = ClassStore::new(MemoryStorage::new());
        store.add(&form("Algorithms")).unwrap();
        assert_eq!(
            store.delete_at(1),
            Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_delete_by_id_is_stable_across_deletes() {
        let mut store = ClassStore::new(MemoryStorage::new());
        let first = store.add(&form("Algorithms")).unwrap();
        let second = store.add(&form("Databases")).unwrap();
        let third = store.add(&form("Networks")).unwrap();

        store.delete(first).unwrap();
        assert_eq!(store.delete(third).unwrap().class_name, "Networks");
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].id, second);
        assert_eq!(
            store.delete(first),
            Err(StoreError::NotFound(first.to_string()))
        );
    }

    #[test]
    fn test_load_all_malformed_is_empty() {
        let storage = MemoryStorage::new();
        storage.write(CLASSES_KEY, r#"[{"className": "legacy"}]"#).unwrap();
        let mut store = ClassStore::new(storage);
        store.load_all();
        assert!(store.list().is_empty());

        let id = store.add(&form("Algorithms")).unwrap();
        store.load_all();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].id, id);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = ClassStore::new(ReadOnlyStorage::default());
        let id = store.add(&form("Algorithms")).unwrap();
        assert!(store.get(id).is_some());

        store.load_all();
        assert!(store.list().is_empty());
    }
}
