//! MySQL-backed query implementation.
//!
//! Every statement expands its `IN (...)` list with bound parameters through
//! `QueryBuilder`; identifiers are never interpolated into SQL text.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database | `Database` |
//! | Io, Tls, PoolClosed, PoolTimedOut | `Connection` |
//! | ColumnDecode, ColumnNotFound, Decode | `Decode` |
//! | Other | `Database` |

use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Connection, MySql, QueryBuilder, Row};
use tracing::{Span, instrument};

use picksheet_core::{ItemId, OrderId};
use picksheet_picking::{OrderedItem, RackPlacement};

use super::r#trait::{PickingQueries, StoreError};
use crate::config::DatabaseConfig;

/// MySQL-backed implementation of [`PickingQueries`].
///
/// Holds a pool capped at one connection: the statements are issued one after
/// another and never overlap.
#[derive(Debug, Clone)]
pub struct MySqlPickingQueries {
    pool: MySqlPool,
}

impl MySqlPickingQueries {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open the connection described by `config` and ping it.
    #[instrument(skip(config), err)]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(config.connect_timeout)
            .connect(&config.url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let mut conn = pool.acquire().await.map_err(|e| map_sqlx_error("ping", e))?;
        conn.ping().await.map_err(|e| map_sqlx_error("ping", e))?;
        drop(conn);

        tracing::debug!("data store connection established");
        Ok(Self::new(pool))
    }

    /// Close the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl PickingQueries for MySqlPickingQueries {
    #[instrument(skip_all, fields(order_count = order_ids.len(), row_count = tracing::field::Empty), err)]
    async fn order_items(&self, order_ids: &[OrderId]) -> Result<Vec<OrderedItem>, StoreError> {
        let mut qb = order_items_query(order_ids);
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("order_items", e))?;

        let items = rows
            .iter()
            .map(ordered_item_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("order_items", e))?;

        Span::current().record("row_count", items.len());
        Ok(items)
    }

    #[instrument(skip_all, fields(item_count = item_ids.len(), row_count = tracing::field::Empty), err)]
    async fn item_names(&self, item_ids: &[ItemId]) -> Result<Vec<(ItemId, String)>, StoreError> {
        let mut qb = item_names_query(item_ids);
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("item_names", e))?;

        let names = rows
            .iter()
            .map(item_name_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("item_names", e))?;

        Span::current().record("row_count", names.len());
        Ok(names)
    }

    #[instrument(skip_all, fields(item_count = item_ids.len(), ?placement, row_count = tracing::field::Empty), err)]
    async fn rack_names(
        &self,
        item_ids: &[ItemId],
        placement: RackPlacement,
    ) -> Result<Vec<(ItemId, String)>, StoreError> {
        let mut qb = rack_names_query(item_ids, placement);
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("rack_names", e))?;

        let racks = rows
            .iter()
            .map(rack_name_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("rack_names", e))?;

        Span::current().record("row_count", racks.len());
        Ok(racks)
    }
}

/// `order_items` rows for the given orders, ordered by item id, then order id.
fn order_items_query(order_ids: &[OrderId]) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT order_id, item_id, quantity FROM order_items WHERE order_id IN ");
    push_id_list(&mut qb, order_ids.iter().map(|id| id.get()));
    qb.push(" ORDER BY item_id, order_id");
    qb
}

fn item_names_query(item_ids: &[ItemId]) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT id, name FROM items WHERE id IN ");
    push_id_list(&mut qb, item_ids.iter().map(|id| id.get()));
    qb.push(" ORDER BY id");
    qb
}

/// Secondary racks come in rack id order, primary racks in rack name order.
fn rack_names_query(item_ids: &[ItemId], placement: RackPlacement) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT item_id, rack_name FROM item_rack WHERE is_main = ");
    qb.push_bind(placement.is_main());
    qb.push(" AND item_id IN ");
    push_id_list(&mut qb, item_ids.iter().map(|id| id.get()));
    qb.push(match placement {
        RackPlacement::Secondary => " ORDER BY rack_id",
        RackPlacement::Primary => " ORDER BY rack_name",
    });
    qb
}

/// Append `(?, ?, ...)` with one bound parameter per id.
fn push_id_list(qb: &mut QueryBuilder<'_, MySql>, ids: impl Iterator<Item = i64>) {
    qb.push("(");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");
}

fn ordered_item_from_row(row: &MySqlRow) -> Result<OrderedItem, sqlx::Error> {
    Ok(OrderedItem::new(
        OrderId::new(row.try_get("order_id")?),
        ItemId::new(row.try_get("item_id")?),
        row.try_get("quantity")?,
    ))
}

fn item_name_from_row(row: &MySqlRow) -> Result<(ItemId, String), sqlx::Error> {
    Ok((ItemId::new(row.try_get("id")?), row.try_get("name")?))
}

fn rack_name_from_row(row: &MySqlRow) -> Result<(ItemId, String), sqlx::Error> {
    Ok((ItemId::new(row.try_get("item_id")?), row.try_get("rack_name")?))
}

/// Map SQLx errors to StoreError.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            StoreError::Database(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Connection(format!("{} failed: {}", operation, err))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
            StoreError::Decode(format!("{}: {}", operation, err))
        }
        _ => StoreError::Database(format!("sqlx error in {}: {}", operation, err)),
    }
}
