//! Infrastructure layer: data store access, configuration, report pipeline.

pub mod config;
pub mod queries;
pub mod report;
pub mod resolvers;

pub use config::{ConfigError, DatabaseConfig};
pub use queries::{InMemoryPickingQueries, MySqlPickingQueries, PickingQueries, StoreError};
pub use report::build_picking_sheet;
pub use resolvers::{ItemNameResolver, OrderItemResolver, RackResolver};
