use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::SlotStore;

/// In-memory, HashMap-based slot store.
///
/// Intended for tests and embedding. All slots are held in memory behind a
/// `RwLock`. An optional byte quota (counting keys and values, the way
/// origin-scoped browser storage does) makes capacity failures exercisable.
pub struct InMemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
    quota_bytes: Option<u64>,
}

impl InMemorySlotStore {
    /// Create a new unbounded store.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota_bytes: None,
        }
    }

    /// Create a store that rejects writes past `quota_bytes` total.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of slots currently stored.
    pub fn len(&self) -> usize {
        self.slots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all keys and values.
    pub fn total_bytes(&self) -> u64 {
        let slots = self.slots.read().expect("lock poisoned");
        slots
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }

    /// Remove all slots.
    pub fn clear(&self) {
        self.slots.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemorySlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore for InMemorySlotStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let slots = self.slots.read().expect("lock poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self.slots.write().expect("lock poisoned");

        if let Some(quota) = self.quota_bytes {
            let used: u64 = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.len() + v.len()) as u64)
                .sum();
            let needed = (key.len() + value.len()) as u64;
            if used + needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available: quota.saturating_sub(used),
                });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut slots = self.slots.write().expect("lock poisoned");
        Ok(slots.remove(key).is_some())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let slots = self.slots.read().expect("lock poisoned");
        let mut keys: Vec<String> = slots.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for InMemorySlotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySlotStore")
            .field("slot_count", &self.len())
            .field("quota_bytes", &self.quota_bytes)
            .finish()
    }
}
