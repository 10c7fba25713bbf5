//! # Warehouse Repository
//!
//! Warehouses are only ever existence-checked by supply requests.

use sqlx::SqlitePool;

use crate::error::DbResult;
use retail_core::{Coordinates, WarehouseId};

/// Repository for warehouse records.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    pub async fn exists(&self, id: WarehouseId) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM warehouses WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a warehouse and returns its id.
    pub async fn insert(&self, area: &str, location: Coordinates) -> DbResult<WarehouseId> {
        let result =
            sqlx::query("INSERT INTO warehouses (area, latitude, longitude) VALUES (?1, ?2, ?3)")
                .bind(area)
                .bind(location.latitude)
                .bind(location.longitude)
                .execute(&self.pool)
                .await?;

        Ok(WarehouseId::new(result.last_insert_rowid()))
    }
}
