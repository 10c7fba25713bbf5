//! # Supply Request Repository
//!
//! A supply request is fulfilled the moment it is recorded: the request row
//! and the stock increment commit together. There is no pending state and no
//! warehouse-side stock.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use retail_core::{StoreId, SupplyRequest, UserId, ValidationError, WarehouseId};

/// Repository for supply requests.
#[derive(Debug, Clone)]
pub struct SupplyRequestRepository {
    pool: SqlitePool,
}

impl SupplyRequestRepository {
    /// Creates a new SupplyRequestRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplyRequestRepository { pool }
    }

    /// Increments stock and records the request, atomically.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the store does not carry the product
    /// * `Err(DbError::ForeignKeyViolation)` - the warehouse does not exist
    /// * `Err(DbError::Validation)` - the new stock level would overflow
    ///
    /// Any error leaves both tables untouched.
    pub async fn place(
        &self,
        manager_id: UserId,
        warehouse_id: WarehouseId,
        store_id: StoreId,
        product_name: &str,
        units: i64,
    ) -> DbResult<SupplyRequest> {
        debug!(
            manager_id = %manager_id,
            warehouse_id = %warehouse_id,
            store_id = %store_id,
            product = %product_name,
            units = units,
            "Placing supply request"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let restocked = sqlx::query(
            r#"
            UPDATE products
            SET units_in_stock = units_in_stock + ?1
            WHERE store_id = ?2 AND product_name = ?3
              AND units_in_stock <= 9223372036854775807 - ?1
            "#,
        )
        .bind(units)
        .bind(store_id)
        .bind(product_name)
        .execute(&mut *tx)
        .await?;

        if restocked.rows_affected() == 0 {
            let on_hand: Option<i64> = sqlx::query_scalar(
                "SELECT units_in_stock FROM products WHERE store_id = ?1 AND product_name = ?2",
            )
            .bind(store_id)
            .bind(product_name)
            .fetch_optional(&mut *tx)
            .await?;

            return Err(match on_hand {
                Some(on_hand) => ValidationError::OutOfRange {
                    field: "units in stock".to_string(),
                    min: 0,
                    max: i64::MAX - on_hand,
                }
                .into(),
                None => DbError::not_found("Product", format!("{store_id}/{product_name}")),
            });
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO supply_requests
                (manager_id, warehouse_id, store_id, product_name, units_requested)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(manager_id)
        .bind(warehouse_id)
        .bind(store_id)
        .bind(product_name)
        .bind(units)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(SupplyRequest {
            request_number: inserted.last_insert_rowid(),
            manager_id,
            warehouse_id,
            store_id,
            product_name: product_name.to_string(),
            units_requested: units,
        })
    }

    /// Lists a store's supply requests, newest first.
    pub async fn list_for_store(&self, store_id: StoreId) -> DbResult<Vec<SupplyRequest>> {
        let requests = sqlx::query_as::<_, SupplyRequest>(
            r#"
            SELECT request_number, manager_id, warehouse_id, store_id, product_name, units_requested
            FROM supply_requests
            WHERE store_id = ?1
            ORDER BY request_number DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
