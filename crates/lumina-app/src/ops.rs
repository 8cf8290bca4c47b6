use chrono::NaiveDate;
use lumina_types::Item;

/// Input for [`crate::App::add_item`].
///
/// The id, owning collection, and creation timestamp are assigned by the
/// state container, never by the caller.
#[derive(Clone, Debug, Default)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Estimated value, if known.
    pub value: Option<f64>,
    /// Pre-normalized `data:image/jpeg;base64,…` thumbnail.
    pub image: Option<String>,
    /// Whether the item is owned (vs. wishlisted).
    pub owned: bool,
    /// Purchase date, if recorded.
    pub date_of_purchase: Option<NaiveDate>,
}

impl NewItem {
    /// An owned item with just a name, other fields empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owned: true,
            ..Self::default()
        }
    }
}

/// Partial update for [`crate::App::update_item`].
///
/// Only fields set to `Some` are replaced on the matching item; the inner
/// `Option` distinguishes "set to a value" from "clear the field". The item
/// id, owning collection, and creation timestamp are immutable and cannot
/// be patched.
#[derive(Clone, Debug, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub value: Option<Option<f64>>,
    pub image: Option<Option<String>>,
    pub owned: Option<bool>,
    pub date_of_purchase: Option<Option<NaiveDate>>,
}

impl ItemPatch {
    pub(crate) fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(value) = self.value {
            item.value = value;
        }
        if let Some(image) = &self.image {
            item.image = image.clone();
        }
        if let Some(owned) = self.owned {
            item.owned = owned;
        }
        if let Some(date) = self.date_of_purchase {
            item.date_of_purchase = date;
        }
    }
}
