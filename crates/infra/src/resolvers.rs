//! Resolvers: one per lookup the picking sheet needs.
//!
//! Each resolver borrows a [`PickingQueries`] capability, validates its input
//! independently, and turns raw rows into the domain maps.

use std::collections::HashSet;

use tracing::instrument;

use picksheet_core::{DomainError, ItemId, OrderId};
use picksheet_picking::{ItemNames, OrderedItem, RackAssignments, RackNames, RackPlacement};

use crate::queries::{PickingQueries, StoreError};

fn require_non_empty<T>(ids: &[T], what: &str) -> Result<(), StoreError> {
    if ids.is_empty() {
        return Err(DomainError::validation(format!("at least one {what} is required")).into());
    }
    Ok(())
}

/// Fetches the order lines for a set of orders.
pub struct OrderItemResolver<'a, Q: ?Sized> {
    queries: &'a Q,
}

impl<'a, Q> OrderItemResolver<'a, Q>
where
    Q: PickingQueries + ?Sized,
{
    pub fn new(queries: &'a Q) -> Self {
        Self { queries }
    }

    /// Order lines ordered by item id, then order id.
    #[instrument(skip_all, fields(order_count = order_ids.len()), err)]
    pub async fn resolve(&self, order_ids: &[OrderId]) -> Result<Vec<OrderedItem>, StoreError> {
        require_non_empty(order_ids, "order id")?;

        let items = self.queries.order_items(order_ids).await?;
        tracing::debug!(line_count = items.len(), "order lines resolved");
        Ok(items)
    }
}

/// Fetches display names for a set of items.
pub struct ItemNameResolver<'a, Q: ?Sized> {
    queries: &'a Q,
}

impl<'a, Q> ItemNameResolver<'a, Q>
where
    Q: PickingQueries + ?Sized,
{
    pub fn new(queries: &'a Q) -> Self {
        Self { queries }
    }

    /// First name seen per item. Items without a row are simply absent.
    #[instrument(skip_all, fields(item_count = item_ids.len()), err)]
    pub async fn resolve(&self, item_ids: &[ItemId]) -> Result<ItemNames, StoreError> {
        require_non_empty(item_ids, "item id")?;

        let wanted: HashSet<ItemId> = item_ids.iter().copied().collect();
        let rows = self.queries.item_names(item_ids).await?;
        let row_count = rows.len();

        let names: ItemNames = rows.into_iter().filter(|(id, _)| wanted.contains(id)).collect();

        if names.len() < row_count {
            tracing::debug!(row_count, distinct = names.len(), "duplicate item names ignored");
        }
        Ok(names)
    }
}

/// Fetches primary and secondary rack placements for a set of items.
pub struct RackResolver<'a, Q: ?Sized> {
    queries: &'a Q,
}

impl<'a, Q> RackResolver<'a, Q>
where
    Q: PickingQueries + ?Sized,
{
    pub fn new(queries: &'a Q) -> Self {
        Self { queries }
    }

    /// Two statements, secondary first: rack names are accumulated per item
    /// in the order each statement returns them.
    #[instrument(skip_all, fields(item_count = item_ids.len()), err)]
    pub async fn resolve(&self, item_ids: &[ItemId]) -> Result<RackAssignments, StoreError> {
        require_non_empty(item_ids, "item id")?;

        let wanted: HashSet<ItemId> = item_ids.iter().copied().collect();

        let secondary = self.placement(item_ids, &wanted, RackPlacement::Secondary).await?;
        let primary = self.placement(item_ids, &wanted, RackPlacement::Primary).await?;

        tracing::debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            "rack placements resolved"
        );
        Ok(RackAssignments::new(primary, secondary))
    }

    async fn placement(
        &self,
        item_ids: &[ItemId],
        wanted: &HashSet<ItemId>,
        placement: RackPlacement,
    ) -> Result<RackNames, StoreError> {
        let rows = self.queries.rack_names(item_ids, placement).await?;
        Ok(rows.into_iter().filter(|(id, _)| wanted.contains(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::InMemoryPickingQueries;

    fn ids(raw: &[i64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::new).collect()
    }

    #[tokio::test]
    async fn order_resolver_returns_exactly_the_lines_of_requested_orders() {
        let queries = InMemoryPickingQueries::new()
            .with_order_item(1, 10, 1)
            .with_order_item(1, 11, 2)
            .with_order_item(2, 12, 3)
            .with_order_item(3, 13, 4);

        let lines = OrderItemResolver::new(&queries)
            .resolve(&[OrderId::new(1), OrderId::new(3)])
            .await
            .unwrap();

        let items: HashSet<i64> = lines.iter().map(|l| l.item_id.get()).collect();
        assert_eq!(items, HashSet::from([10, 11, 13]));
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_statement() {
        let queries = InMemoryPickingQueries::new();

        let err = OrderItemResolver::new(&queries).resolve(&[]).await.unwrap_err();
        assert!(err.is_invalid_input());
        let err = ItemNameResolver::new(&queries).resolve(&[]).await.unwrap_err();
        assert!(err.is_invalid_input());
        let err = RackResolver::new(&queries).resolve(&[]).await.unwrap_err();
        assert!(err.is_invalid_input());

        assert_eq!(queries.statement_count(), 0);
    }

    #[tokio::test]
    async fn name_resolver_keeps_first_name_and_only_requested_items() {
        let queries = InMemoryPickingQueries::new()
            .with_item(1, "Widget")
            .with_item(1, "Widget (old)")
            .with_item(2, "Gadget")
            .with_item(3, "Not asked for");

        let names = ItemNameResolver::new(&queries).resolve(&ids(&[1, 2, 4])).await.unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names.get(ItemId::new(1)), Some("Widget"));
        assert_eq!(names.get(ItemId::new(2)), Some("Gadget"));
        assert!(!names.contains(ItemId::new(3)));
        assert!(!names.contains(ItemId::new(4)));
    }

    #[tokio::test]
    async fn rack_resolver_accumulates_per_placement() {
        let queries = InMemoryPickingQueries::new()
            .with_rack(1, 42, "A1", true)
            .with_rack(5, 7, "B3", false)
            .with_rack(4, 7, "B2", false)
            .with_rack(6, 7, "A7", true);

        let racks = RackResolver::new(&queries).resolve(&ids(&[7, 42])).await.unwrap();

        assert_eq!(racks.primary.joined(ItemId::new(42)).as_deref(), Some("A1"));
        assert_eq!(racks.secondary.joined(ItemId::new(42)), None);
        assert_eq!(racks.secondary.joined(ItemId::new(7)).as_deref(), Some("B2,B3"));
        assert_eq!(racks.primary.joined(ItemId::new(7)).as_deref(), Some("A7"));
        assert_eq!(queries.statement_count(), 2);
    }

    #[tokio::test]
    async fn several_primary_racks_are_joined_by_name() {
        let queries = InMemoryPickingQueries::new()
            .with_rack(1, 3, "C2", true)
            .with_rack(2, 3, "C1", true);

        let racks = RackResolver::new(&queries).resolve(&ids(&[3])).await.unwrap();

        assert_eq!(racks.primary.joined(ItemId::new(3)).as_deref(), Some("C1,C2"));
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let queries = InMemoryPickingQueries::new().failing_on("rack_names");

        let err = RackResolver::new(&queries).resolve(&ids(&[1])).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(ref msg) if msg.contains("rack_names")));
        assert_eq!(queries.statement_count(), 1);
    }
}
