use std::collections::HashMap;

use picksheet_core::ItemId;

/// Which kind of `item_rack` row is being looked at.
///
/// The primary rack is where an item is picked from in bulk; secondary racks
/// hold overflow stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RackPlacement {
    Primary,
    Secondary,
}

impl RackPlacement {
    /// Value of the `is_main` column for this placement.
    pub fn is_main(self) -> bool {
        matches!(self, RackPlacement::Primary)
    }
}

/// Rack names accumulated per item, in the order they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RackNames {
    by_item: HashMap<ItemId, Vec<String>>,
}

impl RackNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item_id: ItemId, rack_name: impl Into<String>) {
        self.by_item.entry(item_id).or_default().push(rack_name.into());
    }

    /// Rack names for an item, in accumulation order.
    pub fn components(&self, item_id: ItemId) -> Option<&[String]> {
        self.by_item.get(&item_id).map(Vec::as_slice)
    }

    /// Comma-joined display string, or `None` when the item has no rack of
    /// this kind.
    pub fn joined(&self, item_id: ItemId) -> Option<String> {
        self.components(item_id).map(|racks| racks.join(","))
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(ItemId, S)> for RackNames {
    fn from_iter<I: IntoIterator<Item = (ItemId, S)>>(iter: I) -> Self {
        let mut racks = Self::new();
        for (item_id, rack_name) in iter {
            racks.push(item_id, rack_name);
        }
        racks
    }
}

/// Primary and secondary rack placements for a set of items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RackAssignments {
    pub primary: RackNames,
    pub secondary: RackNames,
}

impl RackAssignments {
    pub fn new(primary: RackNames, secondary: RackNames) -> Self {
        Self { primary, secondary }
    }

    pub fn names(&self, placement: RackPlacement) -> &RackNames {
        match placement {
            RackPlacement::Primary => &self.primary,
            RackPlacement::Secondary => &self.secondary,
        }
    }
}
