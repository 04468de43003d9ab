use std::collections::HashMap;

use picksheet_core::{ItemId, OrderId};

/// One order line as stored in `order_items`: how many units of an item an
/// order needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedItem {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub quantity: i64,
}

impl OrderedItem {
    pub fn new(order_id: OrderId, item_id: ItemId, quantity: i64) -> Self {
        Self {
            order_id,
            item_id,
            quantity,
        }
    }
}

/// Display names keyed by item.
///
/// The first name seen for an item wins; later duplicates are ignored, never
/// merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemNames {
    by_item: HashMap<ItemId, String>,
}

impl ItemNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name unless the item already has one. Returns `true` when the
    /// name was stored.
    pub fn insert_first(&mut self, item_id: ItemId, name: impl Into<String>) -> bool {
        match self.by_item.entry(item_id) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(name.into());
                true
            }
        }
    }

    pub fn get(&self, item_id: ItemId) -> Option<&str> {
        self.by_item.get(&item_id).map(String::as_str)
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.by_item.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.by_item.keys().copied()
    }
}

impl<S: Into<String>> FromIterator<(ItemId, S)> for ItemNames {
    fn from_iter<I: IntoIterator<Item = (ItemId, S)>>(iter: I) -> Self {
        let mut names = Self::new();
        for (item_id, name) in iter {
            names.insert_first(item_id, name);
        }
        names
    }
}
