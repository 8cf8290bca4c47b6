//! Slot persistence for the Lumina collection tracker.
//!
//! Application state lives in a handful of named *slots* — string-keyed,
//! string-valued entries in a durable key-value store. This crate provides
//! the storage seam and the typed binding over it:
//!
//! - [`SlotStore`] — the backend trait: synchronous `get`/`set`/`remove`
//!   over string slots, with finite capacity
//! - [`InMemorySlotStore`] — `HashMap`-based backend for tests and embedding,
//!   with an optional byte quota to exercise capacity failures
//! - [`FileSlotStore`] — one file per slot under a root directory
//! - [`PersistedSlot`] — binds one typed value to one slot: read once at
//!   open, compress-on-write, decompress-on-read, with a legacy fallback
//!   chain that never fails the caller
//!
//! # Design Rules
//!
//! 1. Every write fully replaces the previous slot value (last write wins).
//! 2. The load path never propagates a failure: corrupt, legacy, or missing
//!    data degrades to the caller's default, with diagnostics.
//! 3. Write failures are returned to the caller; the in-memory value is kept,
//!    so memory and storage may diverge until the next successful write.
//! 4. Slots are independent: no slot's failure affects another slot.

pub mod error;
pub mod file;
pub mod memory;
pub mod slot;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileSlotStore;
pub use memory::InMemorySlotStore;
pub use slot::PersistedSlot;
pub use traits::SlotStore;
