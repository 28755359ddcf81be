//! Key-value storage backends.

use std::collections::HashMap;

use super::StoreResult;
use crate::db::Database;

/// Synchronous string key-value storage (the browser storage API shape).
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;

    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}

impl KeyValueStorage for Database {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_value(key)?)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        Ok(self.put_value(key, value)?)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.delete_value(key)?;
        Ok(())
    }
}

/// In-process storage; contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
