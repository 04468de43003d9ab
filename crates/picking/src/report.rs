//! In-memory join of order lines with names and rack placements.

use picksheet_core::{ItemId, OrderId};

use crate::item::{ItemNames, OrderedItem};
use crate::rack::RackAssignments;

/// A single picking-sheet entry: one order line enriched with what is known
/// about its item.
///
/// Enrichment is best-effort. Missing fields stay `None`; a `None`
/// `secondary_racks` is rendered as "no overflow rack".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub name: Option<String>,
    pub secondary_racks: Option<String>,
    pub primary_rack: Option<String>,
}

/// Join order lines with item names and racks.
///
/// Produces exactly one row per input line, in input order.
pub fn assemble(items: &[OrderedItem], names: &ItemNames, racks: &RackAssignments) -> Vec<ReportRow> {
    items
        .iter()
        .map(|line| ReportRow {
            order_id: line.order_id,
            item_id: line.item_id,
            quantity: line.quantity,
            name: names.get(line.item_id).map(str::to_owned),
            secondary_racks: racks.secondary.joined(line.item_id),
            primary_rack: racks.primary.joined(line.item_id),
        })
        .collect()
}
