use std::sync::Arc;

use thiserror::Error;

use picksheet_core::{DomainError, ItemId, OrderId};
use picksheet_picking::{OrderedItem, RackPlacement};

/// Data store operation error.
///
/// `InvalidInput` is the only non-infrastructure variant; everything else is
/// a failure to reach, query or decode the store. None of them are retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to decode row: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StoreError::InvalidInput(_))
    }
}

/// Query-execution capability handed to the resolvers.
///
/// Implementations return rows in the documented order and never filter,
/// merge or deduplicate them; that bookkeeping belongs to the resolvers.
/// Callers guarantee the identifier slices are non-empty.
#[async_trait::async_trait]
pub trait PickingQueries: Send + Sync {
    /// `order_items` rows for the given orders, ordered by item id, then order id.
    async fn order_items(&self, order_ids: &[OrderId]) -> Result<Vec<OrderedItem>, StoreError>;

    /// `(id, name)` rows from `items`, ordered by id.
    async fn item_names(&self, item_ids: &[ItemId]) -> Result<Vec<(ItemId, String)>, StoreError>;

    /// `(item_id, rack_name)` rows from `item_rack` for one placement.
    ///
    /// Secondary racks are ordered by rack id, primary racks by rack name.
    async fn rack_names(
        &self,
        item_ids: &[ItemId],
        placement: RackPlacement,
    ) -> Result<Vec<(ItemId, String)>, StoreError>;
}

#[async_trait::async_trait]
impl<Q> PickingQueries for Arc<Q>
where
    Q: PickingQueries + ?Sized,
{
    async fn order_items(&self, order_ids: &[OrderId]) -> Result<Vec<OrderedItem>, StoreError> {
        (**self).order_items(order_ids).await
    }

    async fn item_names(&self, item_ids: &[ItemId]) -> Result<Vec<(ItemId, String)>, StoreError> {
        (**self).item_names(item_ids).await
    }

    async fn rack_names(
        &self,
        item_ids: &[ItemId],
        placement: RackPlacement,
    ) -> Result<Vec<(ItemId, String)>, StoreError> {
        (**self).rack_names(item_ids, placement).await
    }
}
