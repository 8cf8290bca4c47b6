//! Derived dashboard statistics.
//!
//! Pure reads over the collections and items sequences: nothing here is
//! materialized state, everything is recomputed per call. Value sums only
//! count owned items — wishlisted entries carry a value but do not
//! contribute until they are acquired. The clock is a parameter so the
//! month-bucketing is testable.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc};
use lumina_types::{Collection, CollectionId, Item};

/// Entries shown in the "recent purchases" list.
const RECENT_LIMIT: usize = 5;

/// Entries shown in the "most valuable" list.
const TOP_ITEM_LIMIT: usize = 5;

/// Aggregate dashboard numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct Overview {
    /// Items in scope (owned and wishlisted).
    pub total_items: usize,
    /// Items in scope marked owned.
    pub owned_items: usize,
    /// Sum of owned item values.
    pub total_value: f64,
    /// Owned share of all items in scope, as a rounded percentage.
    pub progress_percent: u32,
    /// Collections in scope.
    pub collection_count: usize,
    /// Owned items acquired in the current calendar month.
    pub purchases_this_month: usize,
    /// The most recently acquired owned items, newest first.
    pub recent: Vec<Item>,
}

/// Owned value attributed to one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionValue {
    pub id: CollectionId,
    pub name: String,
    pub value: f64,
}

/// Value breakdown across collections.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueAnalysis {
    /// Sum of owned item values in scope.
    pub total_value: f64,
    /// Per-collection owned value, highest first.
    pub collections: Vec<CollectionValue>,
    /// The most valuable owned items (value > 0), highest first.
    pub top_items: Vec<Item>,
}

fn in_scope(item: &Item, filter: Option<&CollectionId>) -> bool {
    filter.map_or(true, |id| &item.collection_id == id)
}

/// Compute the overview dashboard for all collections, or one of them.
pub fn overview(
    collections: &[Collection],
    items: &[Item],
    filter: Option<&CollectionId>,
    now: DateTime<Utc>,
) -> Overview {
    let scoped: Vec<&Item> = items.iter().filter(|i| in_scope(i, filter)).collect();

    let total_items = scoped.len();
    let owned_items = scoped.iter().filter(|i| i.owned).count();
    let total_value: f64 = scoped
        .iter()
        .filter(|i| i.owned)
        .filter_map(|i| i.value)
        .sum();
    let progress_percent = if total_items > 0 {
        ((owned_items as f64 / total_items as f64) * 100.0).round() as u32
    } else {
        0
    };

    let today = now.date_naive();
    let purchases_this_month = scoped
        .iter()
        .filter(|i| i.owned)
        .filter(|i| {
            let acquired = i.acquired_on();
            acquired.year() == today.year() && acquired.month() == today.month()
        })
        .count();

    let mut recent: Vec<Item> = scoped
        .iter()
        .filter(|i| i.owned)
        .map(|i| (*i).clone())
        .collect();
    recent.sort_by(|a, b| {
        b.acquired_on()
            .cmp(&a.acquired_on())
            .then(b.date_added.cmp(&a.date_added))
    });
    recent.truncate(RECENT_LIMIT);

    Overview {
        total_items,
        owned_items,
        total_value,
        progress_percent,
        collection_count: if filter.is_some() {
            1
        } else {
            collections.len()
        },
        purchases_this_month,
        recent,
    }
}

/// Compute the value breakdown for all collections, or one of them.
pub fn value_analysis(
    collections: &[Collection],
    items: &[Item],
    filter: Option<&CollectionId>,
) -> ValueAnalysis {
    let scoped: Vec<&Item> = items.iter().filter(|i| in_scope(i, filter)).collect();
    let total_value: f64 = scoped
        .iter()
        .filter(|i| i.owned)
        .filter_map(|i| i.value)
        .sum();

    let mut per_collection: Vec<CollectionValue> = collections
        .iter()
        .filter(|c| filter.map_or(true, |id| &c.id == id))
        .map(|c| CollectionValue {
            id: c.id.clone(),
            name: c.name.clone(),
            value: items
                .iter()
                .filter(|i| i.collection_id == c.id && i.owned)
                .filter_map(|i| i.value)
                .sum(),
        })
        .collect();
    per_collection.sort_by(|a, b| cmp_value_desc(a.value, b.value));

    let mut top_items: Vec<Item> = scoped
        .iter()
        .filter(|i| i.owned && i.value.unwrap_or(0.0) > 0.0)
        .map(|i| (*i).clone())
        .collect();
    top_items.sort_by(|a, b| cmp_value_desc(a.value.unwrap_or(0.0), b.value.unwrap_or(0.0)));
    top_items.truncate(TOP_ITEM_LIMIT);

    ValueAnalysis {
        total_value,
        collections: per_collection,
        top_items,
    }
}

fn cmp_value_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
