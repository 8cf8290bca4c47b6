//! Typed slot binding: one named slot, one in-memory value, kept in sync.
//!
//! A [`PersistedSlot`] reads its slot exactly once when opened and writes the
//! whole value back on every update. Values are serialized as JSON inside a
//! small version envelope (`{"v":1,"data":…}`), compressed, and stored as a
//! string.
//!
//! Reads are deliberately forgiving. The load chain, in order:
//!
//! 1. absent slot → the caller's default;
//! 2. decompress, then parse the envelope;
//! 3. if the payload predates the envelope, parse it bare;
//! 4. if decompression fails, the slot predates compression — parse the raw
//!    stored string the same way;
//! 5. anything still unreadable → the caller's default.
//!
//! No failure on that path reaches the caller; each degradation is recorded
//! as a diagnostic. Writes are the opposite: storage errors are returned so
//! the boundary can decide whether to warn the user, while the in-memory
//! value is kept (memory and storage may diverge until the next successful
//! write).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::SlotStore;

/// Current envelope version written by [`PersistedSlot::set`].
const ENVELOPE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    v: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    v: u32,
    data: T,
}

/// A typed value bound to one named slot of a [`SlotStore`].
pub struct PersistedSlot<T, S> {
    store: Arc<S>,
    key: String,
    value: T,
}

impl<T, S> PersistedSlot<T, S>
where
    T: Serialize + DeserializeOwned,
    S: SlotStore,
{
    /// Bind `key` to a typed value, reading the slot's current contents once.
    ///
    /// Never fails: missing, corrupt, or unreadable slots yield `default`.
    pub fn open(store: Arc<S>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = Self::load(store.as_ref(), &key).unwrap_or(default);
        Self { store, key, value }
    }

    fn load(store: &S, key: &str) -> Option<T> {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "slot read failed, using default");
                return None;
            }
        };

        match lumina_codec::decompress(&raw) {
            Ok(text) => {
                if let Some(value) = Self::parse(key, &text) {
                    return Some(value);
                }
                warn!(key, "decompressed slot did not parse, trying raw form");
            }
            Err(e) => {
                // Slots written before compression was introduced hold raw
                // JSON and land here.
                debug!(key, error = %e, "slot is not compressed, trying raw form");
            }
        }

        match Self::parse(key, &raw) {
            Some(value) => {
                debug!(key, "loaded legacy uncompressed slot");
                Some(value)
            }
            None => {
                warn!(key, "slot unreadable, using default");
                None
            }
        }
    }

    /// Parse a slot payload: the version envelope, or a bare legacy value.
    fn parse(key: &str, text: &str) -> Option<T> {
        if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(text) {
            if envelope.v == ENVELOPE_VERSION {
                return Some(envelope.data);
            }
            warn!(key, version = envelope.v, "unsupported slot envelope version");
            return None;
        }
        serde_json::from_str::<T>(text).ok()
    }

    /// The slot key this binding writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current in-memory value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and persist it. Exactly one store write.
    ///
    /// On a storage failure the in-memory value is still replaced and the
    /// error is returned to the caller.
    pub fn set(&mut self, value: T) -> StoreResult<()> {
        self.value = value;
        self.save()
    }

    /// Replace the value with a function of the previous value and persist.
    /// Exactly one store write.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> StoreResult<()> {
        let next = f(&self.value);
        self.set(next)
    }

    /// Remove the persisted slot and reset the in-memory value.
    ///
    /// Returns whether the slot existed. Nothing is written back; the slot
    /// stays absent until the next [`set`](Self::set).
    pub fn reset(&mut self, value: T) -> StoreResult<bool> {
        self.value = value;
        self.store.remove(&self.key)
    }

    fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&EnvelopeRef {
            v: ENVELOPE_VERSION,
            data: &self.value,
        })
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let payload = match lumina_codec::compress(&json) {
            Ok(blob) => blob,
            Err(e) => {
                // Degrade to storing the serialized form untouched; the load
                // chain reads it back via the raw-form fallback.
                warn!(key = %self.key, error = %e, "compression failed, storing uncompressed");
                json
            }
        };

        self.store.set(&self.key, &payload)
    }
}

impl<T: std::fmt::Debug, S> std::fmt::Debug for PersistedSlot<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSlot")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}
