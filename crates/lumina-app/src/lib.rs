//! Domain state for the Lumina collection tracker.
//!
//! [`App`] is the single authoritative state container the presentation
//! layer talks to: it owns the collections and items sequences (each bound
//! to a persisted slot), the active collection, the search query, the
//! current view, and the theme. Mutation operations update the in-memory
//! state and push the new value through the slot binding, so every change
//! is durable as a side effect of making it.
//!
//! # Key Types
//!
//! - [`App`] — the state container and its mutation operations
//! - [`NewItem`] / [`ItemPatch`] — inputs for item creation and partial update
//! - [`View`] — the view-navigation state machine
//! - [`Overview`] / [`ValueAnalysis`] — derived dashboard statistics

pub mod error;
pub mod ops;
pub mod state;
pub mod stats;
pub mod view;

pub use error::{AppError, AppResult};
pub use ops::{ItemPatch, NewItem};
pub use state::App;
pub use stats::{overview, value_analysis, CollectionValue, Overview, ValueAnalysis};
pub use view::View;
