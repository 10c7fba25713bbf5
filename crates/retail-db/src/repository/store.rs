//! # Store Repository
//!
//! Stores are read-only to the services; `insert` exists for seeding and tests.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use retail_core::{Coordinates, Store, StoreId, UserId};

const STORE_COLUMNS: &str = "id, name, latitude, longitude, manager_id, established_date";

/// Repository for store records.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Gets a store by id.
    pub async fn get_by_id(&self, id: StoreId) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Lists every store, by id.
    ///
    /// The proximity filter runs over this list; there is no spatial index.
    pub async fn list_all(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = stores.len(), "Listed stores");
        Ok(stores)
    }

    /// Lists the stores whose manager is `manager_id`.
    pub async fn managed_by(&self, manager_id: UserId) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE manager_id = ?1 ORDER BY id"
        ))
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Inserts a store and returns its id.
    pub async fn insert(
        &self,
        name: &str,
        location: Coordinates,
        manager_id: UserId,
        established: NaiveDate,
    ) -> DbResult<StoreId> {
        debug!(name = %name, manager_id = %manager_id, "Inserting store");

        let result = sqlx::query(
            r#"
            INSERT INTO stores (name, latitude, longitude, manager_id, established_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(name)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(manager_id)
        .bind(established)
        .execute(&self.pool)
        .await?;

        Ok(StoreId::new(result.last_insert_rowid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use retail_core::Role;

    fn at(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn opened() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let manager = db
            .users()
            .insert("mia", "pw", at(5.0, 5.0), Role::Manager)
            .await
            .unwrap();

        let a = db.stores().insert("North", at(10.0, 35.0), manager, opened()).await.unwrap();
        let b = db.stores().insert("South", at(60.0, 60.0), manager, opened()).await.unwrap();

        let store = db.stores().get_by_id(a).await.unwrap().unwrap();
        assert_eq!(store.name, "North");
        assert_eq!(store.manager_id, manager);
        assert_eq!(store.established_date, opened());

        let all = db.stores().list_all().await.unwrap();
        assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);

        assert_eq!(db.stores().managed_by(manager).await.unwrap().len(), 2);
        assert!(db.stores().managed_by(UserId::new(99)).await.unwrap().is_empty());
        assert!(db.stores().get_by_id(StoreId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_requires_existing_manager() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .stores()
            .insert("Orphan", at(1.0, 1.0), UserId::new(42), opened())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
