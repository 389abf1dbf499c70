use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::RosterStorage;
use crate::error::StoreError;

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.blobs.borrow_mut().insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
