//! Read-only query boundary over the warehouse schema.
//!
//! `order_items(order_id, item_id, quantity)`, `items(id, name)` and
//! `item_rack(rack_id, item_id, rack_name, is_main)` are the only relations
//! the picking sheet reads.

pub mod in_memory;
pub mod mysql;
pub mod r#trait;

pub use in_memory::InMemoryPickingQueries;
pub use mysql::MySqlPickingQueries;
pub use r#trait::{PickingQueries, StoreError};
