use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use picksheet_core::{ItemId, OrderId};
use picksheet_picking::{OrderedItem, RackPlacement};

use super::r#trait::{PickingQueries, StoreError};

#[derive(Debug, Clone)]
struct RackRow {
    rack_id: i64,
    item_id: ItemId,
    rack_name: String,
    is_main: bool,
}

#[derive(Debug, Default)]
struct Tables {
    order_items: Vec<OrderedItem>,
    items: Vec<(ItemId, String)>,
    item_rack: Vec<RackRow>,
}

/// In-memory warehouse tables.
///
/// Intended for tests/dev. Applies the same filters and orderings as the SQL
/// implementation (stable sorts, so duplicate rows keep insertion order) and
/// counts the statements it was asked to run.
#[derive(Debug, Default)]
pub struct InMemoryPickingQueries {
    tables: RwLock<Tables>,
    statements: AtomicUsize,
    failing: Option<&'static str>,
}

impl InMemoryPickingQueries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order_item(self, order_id: i64, item_id: i64, quantity: i64) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables
                .order_items
                .push(OrderedItem::new(OrderId::new(order_id), ItemId::new(item_id), quantity));
        }
        self
    }

    pub fn with_item(self, id: i64, name: impl Into<String>) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables.items.push((ItemId::new(id), name.into()));
        }
        self
    }

    pub fn with_rack(self, rack_id: i64, item_id: i64, rack_name: impl Into<String>, is_main: bool) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables.item_rack.push(RackRow {
                rack_id,
                item_id: ItemId::new(item_id),
                rack_name: rack_name.into(),
                is_main,
            });
        }
        self
    }

    /// Make every call of `operation` (`"order_items"`, `"item_names"` or
    /// `"rack_names"`) fail with a database error.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing = Some(operation);
        self
    }

    /// Number of statements issued so far.
    pub fn statement_count(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }

    fn begin(&self, operation: &'static str) -> Result<(), StoreError> {
        self.statements.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(operation) {
            return Err(StoreError::Database(format!("database error in {operation}: injected failure")));
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Connection("in-memory tables poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl PickingQueries for InMemoryPickingQueries {
    async fn order_items(&self, order_ids: &[OrderId]) -> Result<Vec<OrderedItem>, StoreError> {
        self.begin("order_items")?;
        let tables = self.read()?;

        let mut rows: Vec<OrderedItem> = tables
            .order_items
            .iter()
            .filter(|line| order_ids.contains(&line.order_id))
            .copied()
            .collect();
        rows.sort_by_key(|line| (line.item_id, line.order_id));
        Ok(rows)
    }

    async fn item_names(&self, item_ids: &[ItemId]) -> Result<Vec<(ItemId, String)>, StoreError> {
        self.begin("item_names")?;
        let tables = self.read()?;

        let mut rows: Vec<(ItemId, String)> = tables
            .items
            .iter()
            .filter(|(id, _)| item_ids.contains(id))
            .cloned()
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        Ok(rows)
    }

    async fn rack_names(
        &self,
        item_ids: &[ItemId],
        placement: RackPlacement,
    ) -> Result<Vec<(ItemId, String)>, StoreError> {
        self.begin("rack_names")?;
        let tables = self.read()?;

        let mut rows: Vec<&RackRow> = tables
            .item_rack
            .iter()
            .filter(|row| row.is_main == placement.is_main() && item_ids.contains(&row.item_id))
            .collect();
        match placement {
            RackPlacement::Secondary => rows.sort_by_key(|row| row.rack_id),
            RackPlacement::Primary => rows.sort_by(|a, b| a.rack_name.cmp(&b.rack_name)),
        }

        Ok(rows
            .into_iter()
            .map(|row| (row.item_id, row.rack_name.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn order_items_are_filtered_and_sorted_by_item_then_order() {
        let queries = InMemoryPickingQueries::new()
            .with_order_item(2, 20, 1)
            .with_order_item(1, 20, 2)
            .with_order_item(1, 10, 3)
            .with_order_item(3, 5, 9);

        let rows = queries
            .order_items(&[OrderId::new(1), OrderId::new(2)])
            .await
            .unwrap();

        let keys: Vec<(i64, i64)> = rows.iter().map(|r| (r.item_id.get(), r.order_id.get())).collect();
        assert_eq!(keys, vec![(10, 1), (20, 1), (20, 2)]);
        assert_eq!(queries.statement_count(), 1);
    }

    #[tokio::test]
    async fn rack_names_split_by_placement_with_their_own_ordering() {
        let queries = InMemoryPickingQueries::new()
            .with_rack(3, 1, "B3", false)
            .with_rack(2, 1, "B2", false)
            .with_rack(9, 1, "A2", true)
            .with_rack(8, 1, "A1", true);

        let secondary = queries
            .rack_names(&[ItemId::new(1)], RackPlacement::Secondary)
            .await
            .unwrap();
        let primary = queries
            .rack_names(&[ItemId::new(1)], RackPlacement::Primary)
            .await
            .unwrap();

        let names = |rows: &[(ItemId, String)]| rows.iter().map(|(_, n)| n.clone()).collect::<Vec<_>>();
        assert_eq!(names(&secondary), vec!["B2", "B3"]);
        assert_eq!(names(&primary), vec!["A1", "A2"]);
    }

    #[tokio::test]
    async fn injected_failure_is_a_database_error() {
        let queries = InMemoryPickingQueries::new().failing_on("item_names");

        let err = queries.item_names(&[ItemId::new(1)]).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(queries.statement_count(), 1);
    }
}
