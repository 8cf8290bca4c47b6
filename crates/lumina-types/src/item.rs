use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::collection::CollectionId;
use crate::error::TypeError;

/// Globally unique item identifier.
///
/// Backed by a random (v4) UUID, so ids are unique across the entire item
/// set, not just within a collection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the canonical hyphenated UUID form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidItemId(s.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tracked item within a collection.
///
/// Wire format is camelCase (`collectionId`, `dateAdded`, `dateOfPurchase`)
/// to match the persisted slots written by earlier releases. Two fields need
/// legacy tolerance on read: the old writer stored `value` as the raw form
/// input string (`""` or `"12.50"`) and `dateOfPurchase` as `""` when unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Globally unique id, assigned once at creation.
    pub id: ItemId,
    /// The collection this item belongs to.
    pub collection_id: CollectionId,
    /// Display name.
    pub name: String,
    /// Estimated value, if known.
    #[serde(default, deserialize_with = "de_legacy_value")]
    pub value: Option<f64>,
    /// Embedded thumbnail as a `data:image/jpeg;base64,…` URI.
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the item is owned (vs. wishlisted).
    #[serde(default)]
    pub owned: bool,
    /// Set at creation, immutable afterwards.
    pub date_added: DateTime<Utc>,
    /// Purchase date, if recorded.
    #[serde(default, deserialize_with = "de_legacy_date")]
    pub date_of_purchase: Option<NaiveDate>,
}

impl Item {
    /// The date that best represents when the item entered the collection:
    /// the purchase date when recorded, otherwise the creation timestamp.
    pub fn acquired_on(&self) -> NaiveDate {
        self.date_of_purchase
            .unwrap_or_else(|| self.date_added.date_naive())
    }
}

/// Accept a number, a numeric string, `""`, or `null` for `value`.
fn de_legacy_value<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        None => None,
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
    })
}

/// Accept an ISO date string, `""`, or `null` for `dateOfPurchase`.
fn de_legacy_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<String>::deserialize(de)? {
        None => None,
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
    })
}
