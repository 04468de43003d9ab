//! Order picking domain module.
//!
//! This crate contains the picking-sheet model, the in-memory join of order
//! lines with item names and rack placements, and the text layout of the
//! sheet. It is pure domain logic (no IO, no SQL, no storage).

pub mod item;
pub mod rack;
pub mod report;
pub mod sheet;

pub use item::{ItemNames, OrderedItem};
pub use rack::{RackAssignments, RackNames, RackPlacement};
pub use report::{ReportRow, assemble};
pub use sheet::PickingSheet;
