//! The application state container.
//!
//! One [`App`] instance owns everything the presentation layer renders:
//! the persisted collections/items/theme slots and the session-only
//! selection state (active collection, search query, current view). All
//! mutation goes through its methods; each durable mutation produces
//! exactly one slot write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lumina_codec::{normalize_image, ImageOptions};
use lumina_store::{PersistedSlot, SlotStore};
use lumina_types::{Collection, CollectionId, Item, ItemId, Theme};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::ops::{ItemPatch, NewItem};
use crate::stats::{self, Overview, ValueAnalysis};
use crate::view::View;

/// Slot holding the ordered collections sequence.
pub const COLLECTIONS_SLOT: &str = "lumina_collections";
/// Slot holding the ordered items sequence.
pub const ITEMS_SLOT: &str = "lumina_items";
/// Slot holding the theme preference.
pub const THEME_SLOT: &str = "tracker_theme";

/// Authoritative in-memory state, bound to persisted slots.
pub struct App<S: SlotStore> {
    collections: PersistedSlot<Vec<Collection>, S>,
    items: PersistedSlot<Vec<Item>, S>,
    theme: PersistedSlot<Theme, S>,
    active_collection: Option<CollectionId>,
    search_query: String,
    view: View,
}

impl<S: SlotStore> App<S> {
    /// Open the application state over a storage backend.
    ///
    /// Each slot is read once; missing or unreadable slots start from their
    /// defaults. The first collection (if any) becomes the active one, and
    /// the session starts on the collection view.
    pub fn open(store: Arc<S>) -> Self {
        let collections: PersistedSlot<Vec<Collection>, S> =
            PersistedSlot::open(Arc::clone(&store), COLLECTIONS_SLOT, Vec::new());
        let items = PersistedSlot::open(Arc::clone(&store), ITEMS_SLOT, Vec::new());
        let theme = PersistedSlot::open(store, THEME_SLOT, Theme::default());

        let active_collection = collections.get().first().map(|c| c.id.clone());
        debug!(
            collections = collections.get().len(),
            items = items.get().len(),
            "application state loaded"
        );

        Self {
            collections,
            items,
            theme,
            active_collection,
            search_query: String::new(),
            view: View::default(),
        }
    }

    // ---- Collections ----

    /// All collections, in creation order.
    pub fn collections(&self) -> &[Collection] {
        self.collections.get()
    }

    /// Create a collection and make it active.
    ///
    /// The id is a slug derived from `name`. A name whose slug already
    /// exists is rejected — two collections sharing an id would make every
    /// later lookup ambiguous.
    pub fn add_collection(&mut self, name: &str) -> AppResult<CollectionId> {
        let collection = Collection::new(name)?;
        if self
            .collections
            .get()
            .iter()
            .any(|c| c.id == collection.id)
        {
            return Err(AppError::DuplicateCollection(collection.id));
        }

        let id = collection.id.clone();
        self.collections.update(|prev| {
            let mut next = prev.clone();
            next.push(collection);
            next
        })?;
        self.active_collection = Some(id.clone());
        info!(collection = %id, "collection added");
        Ok(id)
    }

    /// Delete a collection and cascade-delete its items.
    ///
    /// Returns `false` if the id is unknown. If the deleted collection was
    /// active, the first remaining collection becomes active.
    pub fn delete_collection(&mut self, id: &CollectionId) -> AppResult<bool> {
        if !self.collections.get().iter().any(|c| &c.id == id) {
            return Ok(false);
        }

        self.collections
            .update(|prev| prev.iter().filter(|c| &c.id != id).cloned().collect())?;
        self.items
            .update(|prev| prev.iter().filter(|i| &i.collection_id != id).cloned().collect())?;

        if self.active_collection.as_ref() == Some(id) {
            self.active_collection = self.collections.get().first().map(|c| c.id.clone());
        }
        info!(collection = %id, "collection deleted");
        Ok(true)
    }

    /// The collection new items are added to.
    pub fn active_collection(&self) -> Option<&CollectionId> {
        self.active_collection.as_ref()
    }

    /// Switch the active collection. Returns `false` for an unknown id.
    pub fn set_active_collection(&mut self, id: &CollectionId) -> bool {
        if self.collections.get().iter().any(|c| &c.id == id) {
            self.active_collection = Some(id.clone());
            true
        } else {
            false
        }
    }

    // ---- Items ----

    /// All items across all collections, in creation order.
    pub fn items(&self) -> &[Item] {
        self.items.get()
    }

    /// Add an item to the active collection.
    ///
    /// Assigns a fresh unique id and the creation timestamp; both are
    /// immutable afterwards.
    pub fn add_item(&mut self, new: NewItem) -> AppResult<ItemId> {
        let collection_id = self
            .active_collection
            .clone()
            .ok_or(AppError::NoActiveCollection)?;

        let item = Item {
            id: ItemId::generate(),
            collection_id,
            name: new.name,
            value: new.value,
            image: new.image,
            owned: new.owned,
            date_added: Utc::now(),
            date_of_purchase: new.date_of_purchase,
        };
        let id = item.id;

        self.items.update(|prev| {
            let mut next = prev.clone();
            next.push(item);
            next
        })?;
        debug!(item = %id, "item added");
        Ok(id)
    }

    /// Replace the provided fields on the matching item.
    ///
    /// An unknown id is a no-op (`Ok(false)`), not an error.
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> AppResult<bool> {
        if !self.contains_item(id) {
            return Ok(false);
        }
        self.items.update(|prev| {
            prev.iter()
                .map(|i| {
                    if i.id == id {
                        let mut updated = i.clone();
                        patch.apply(&mut updated);
                        updated
                    } else {
                        i.clone()
                    }
                })
                .collect()
        })?;
        Ok(true)
    }

    /// Remove the matching item. Unknown ids are a no-op.
    pub fn delete_item(&mut self, id: ItemId) -> AppResult<bool> {
        if !self.contains_item(id) {
            return Ok(false);
        }
        self.items
            .update(|prev| prev.iter().filter(|i| i.id != id).cloned().collect())?;
        debug!(item = %id, "item deleted");
        Ok(true)
    }

    /// Flip the ownership flag on the matching item. Unknown ids are a no-op.
    pub fn toggle_owned(&mut self, id: ItemId) -> AppResult<bool> {
        if !self.contains_item(id) {
            return Ok(false);
        }
        self.items.update(|prev| {
            prev.iter()
                .map(|i| {
                    if i.id == id {
                        let mut toggled = i.clone();
                        toggled.owned = !toggled.owned;
                        toggled
                    } else {
                        i.clone()
                    }
                })
                .collect()
        })?;
        Ok(true)
    }

    /// Normalize an uploaded photo and attach it to the matching item.
    ///
    /// The one suspending operation: decoding and re-encoding run on the
    /// blocking pool. On failure nothing is stored; the caller must not
    /// resubmit the same form until this resolves.
    pub async fn attach_image(
        &mut self,
        id: ItemId,
        bytes: Vec<u8>,
        opts: ImageOptions,
    ) -> AppResult<bool> {
        if !self.contains_item(id) {
            return Ok(false);
        }
        let data_uri = normalize_image(bytes, opts).await?;
        self.update_item(
            id,
            ItemPatch {
                image: Some(Some(data_uri)),
                ..ItemPatch::default()
            },
        )
    }

    fn contains_item(&self, id: ItemId) -> bool {
        self.items.get().iter().any(|i| i.id == id)
    }

    // ---- Derived views ----

    /// Items of the active collection whose name contains the search query
    /// (case-insensitive; an empty query matches all). Order-preserving and
    /// recomputed on every call.
    pub fn filtered_items(&self) -> Vec<&Item> {
        let query = self.search_query.to_lowercase();
        self.items
            .get()
            .iter()
            .filter(|item| {
                self.active_collection.as_ref() == Some(&item.collection_id)
                    && item.name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Overview dashboard over all collections, or one of them.
    pub fn overview(&self, filter: Option<&CollectionId>, now: DateTime<Utc>) -> Overview {
        stats::overview(self.collections.get(), self.items.get(), filter, now)
    }

    /// Value breakdown over all collections, or one of them.
    pub fn value_analysis(&self, filter: Option<&CollectionId>) -> ValueAnalysis {
        stats::value_analysis(self.collections.get(), self.items.get(), filter)
    }

    // ---- Session state ----

    /// The current search query.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// The view currently shown.
    pub fn view(&self) -> View {
        self.view
    }

    /// Navigate to another view.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    // ---- Theme ----

    /// The persisted theme preference.
    pub fn theme(&self) -> Theme {
        *self.theme.get()
    }

    /// Flip the theme and persist the choice.
    pub fn toggle_theme(&mut self) -> AppResult<Theme> {
        self.theme.update(|t| t.toggled())?;
        Ok(*self.theme.get())
    }

    // ---- Data management ----

    /// Remove the collections and items slots and reset session state.
    ///
    /// The theme preference survives, matching the original reset behavior.
    pub fn clear_all_data(&mut self) -> AppResult<()> {
        self.collections.reset(Vec::new())?;
        self.items.reset(Vec::new())?;
        self.active_collection = None;
        self.search_query.clear();
        info!("all collection data cleared");
        Ok(())
    }
}

impl<S: SlotStore> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("collections", &self.collections.get().len())
            .field("items", &self.items.get().len())
            .field("active_collection", &self.active_collection)
            .field("view", &self.view)
            .finish()
    }
}
