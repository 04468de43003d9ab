//! Picking-sheet pipeline: order lines → names → racks → assembled sheet.

use std::collections::BTreeSet;

use tracing::instrument;

use picksheet_core::{ItemId, OrderId};
use picksheet_picking::{PickingSheet, assemble};

use crate::queries::{PickingQueries, StoreError};
use crate::resolvers::{ItemNameResolver, OrderItemResolver, RackResolver};

/// Build the picking sheet for `order_ids`.
///
/// Statements run strictly one after another. When the orders have no lines
/// the enrichment lookups are skipped and the sheet is header-only.
#[instrument(skip_all, fields(title = %title, order_count = order_ids.len()), err)]
pub async fn build_picking_sheet<Q>(
    queries: &Q,
    title: &str,
    order_ids: &[OrderId],
) -> Result<PickingSheet, StoreError>
where
    Q: PickingQueries + ?Sized,
{
    let lines = OrderItemResolver::new(queries).resolve(order_ids).await?;
    if lines.is_empty() {
        tracing::info!("no order lines found");
        return Ok(PickingSheet::new(title, Vec::new()));
    }

    let item_ids: Vec<ItemId> = lines
        .iter()
        .map(|line| line.item_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let names = ItemNameResolver::new(queries).resolve(&item_ids).await?;
    let racks = RackResolver::new(queries).resolve(&item_ids).await?;

    let rows = assemble(&lines, &names, &racks);
    tracing::info!(rows = rows.len(), items = item_ids.len(), "picking sheet assembled");
    Ok(PickingSheet::new(title, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::InMemoryPickingQueries;

    fn warehouse() -> InMemoryPickingQueries {
        InMemoryPickingQueries::new()
            .with_order_item(10, 1, 2)
            .with_order_item(11, 1, 3)
            .with_order_item(14, 1, 4)
            .with_order_item(10, 2, 3)
            .with_order_item(11, 3, 1)
            .with_order_item(14, 4, 4)
            .with_order_item(15, 5, 1)
            .with_item(1, "Ноутбук")
            .with_item(2, "Телевизор")
            .with_item(3, "Телефон")
            .with_item(4, "Системный блок")
            .with_item(5, "Часы")
            .with_rack(1, 1, "А", true)
            .with_rack(2, 2, "А", true)
            .with_rack(3, 3, "Б", true)
            .with_rack(4, 3, "З", false)
            .with_rack(5, 3, "В", false)
            .with_rack(6, 4, "Ж", true)
            .with_rack(7, 5, "Ж", true)
            .with_rack(8, 5, "А", false)
    }

    #[tokio::test]
    async fn single_order_single_item() {
        let queries = InMemoryPickingQueries::new()
            .with_order_item(5, 42, 3)
            .with_item(42, "Widget")
            .with_rack(1, 42, "A1", true);

        let sheet = build_picking_sheet(&queries, "5", &[OrderId::new(5)]).await.unwrap();
        let out = sheet.to_string();

        assert_eq!(out.matches("=====Стеллаж").count(), 1);
        assert!(out.contains("=====Стеллаж A1:\n"));
        assert!(out.contains("Widget (id=42)\n"));
        assert!(out.contains("заказ 5, 3 шт \n"));
        assert!(!out.contains("доп стеллаж"));
        assert_eq!(queries.statement_count(), 4);
    }

    #[tokio::test]
    async fn full_batch_renders_in_item_order() {
        let queries = warehouse();
        let orders: Vec<OrderId> = [10, 11, 14, 15].into_iter().map(OrderId::new).collect();

        let sheet = build_picking_sheet(&queries, "10,11,14,15", &orders).await.unwrap();

        let expected = concat!(
            "=+=+=+= Страница сборки заказов 10,11,14,15\n",
            "=====Стеллаж А:\n",
            "Ноутбук (id=1)\n",
            "заказ 10, 2 шт \n",
            "\n",
            "Ноутбук (id=1)\n",
            "заказ 11, 3 шт \n",
            "\n",
            "Ноутбук (id=1)\n",
            "заказ 14, 4 шт \n",
            "\n",
            "Телевизор (id=2)\n",
            "заказ 10, 3 шт \n",
            "\n",
            "=====Стеллаж Б:\n",
            "Телефон (id=3)\n",
            "заказ 11, 1 шт \n",
            "доп стеллаж: З,В\n",
            "\n",
            "=====Стеллаж Ж:\n",
            "Системный блок (id=4)\n",
            "заказ 14, 4 шт \n",
            "\n",
            "Часы (id=5)\n",
            "заказ 15, 1 шт \n",
            "доп стеллаж: А\n",
            "\n",
        );
        assert_eq!(sheet.to_string(), expected);
    }

    #[tokio::test]
    async fn identical_runs_render_identical_output() {
        let queries = warehouse();
        let orders = [OrderId::new(11), OrderId::new(14)];

        let first = build_picking_sheet(&queries, "11,14", &orders).await.unwrap().to_string();
        let second = build_picking_sheet(&queries, "11,14", &orders).await.unwrap().to_string();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_orders_skip_enrichment() {
        let queries = warehouse();

        let sheet = build_picking_sheet(&queries, "99", &[OrderId::new(99)]).await.unwrap();

        assert!(sheet.is_empty());
        assert_eq!(sheet.to_string(), "=+=+=+= Страница сборки заказов 99\n");
        assert_eq!(queries.statement_count(), 1);
    }

    #[tokio::test]
    async fn items_missing_from_lookup_tables_keep_their_rows() {
        let queries = InMemoryPickingQueries::new().with_order_item(1, 77, 2);

        let sheet = build_picking_sheet(&queries, "1", &[OrderId::new(1)]).await.unwrap();

        assert_eq!(sheet.rows().len(), 1);
        assert_eq!(
            sheet.to_string(),
            "=+=+=+= Страница сборки заказов 1\n=====Стеллаж :\n (id=77)\nзаказ 1, 2 шт \n\n"
        );
    }

    #[tokio::test]
    async fn failing_statement_aborts_the_pipeline() {
        let queries = warehouse().failing_on("item_names");

        let err = build_picking_sheet(&queries, "10", &[OrderId::new(10)]).await.unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(queries.statement_count(), 2);
    }
}
