//! Shared fixture for the service integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use retail_core::{Coordinates, Product, Role, SessionContext, StoreId, UserId, WarehouseId};
use retail_db::{Database, DbConfig};
use retail_service::{RetailService, ServiceConfig};

/// Two stores with their managers, an admin, a customer and a warehouse.
///
/// ```text
///   customer "cal"   (10, 10)
///   store S "Near"   (10, 35)  managed by "mia"   distance 25 ─ reachable
///   store T "Far"    (60, 60)  managed by "max"   distance ~70.7
///   warehouse        (50, 50)
/// ```
pub struct Fixture {
    pub service: RetailService,
    pub near: StoreId,
    pub far: StoreId,
    pub warehouse: WarehouseId,
    pub mia: UserId,
    pub max: UserId,
    pub cal: UserId,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Self::with_database(db).await
    }

    pub async fn with_database(db: Database) -> Self {
        let users = db.users();
        let mia = users.insert("mia", "pw", at(10.0, 35.0), Role::Manager).await.unwrap();
        let max = users.insert("max", "pw", at(60.0, 60.0), Role::Manager).await.unwrap();
        users.insert("root", "pw", at(50.0, 50.0), Role::Admin).await.unwrap();

        let opened = NaiveDate::from_ymd_opt(2018, 4, 2).unwrap();
        let near = db.stores().insert("Near", at(10.0, 35.0), mia, opened).await.unwrap();
        let far = db.stores().insert("Far", at(60.0, 60.0), max, opened).await.unwrap();
        let warehouse = db.warehouses().insert("Central", at(50.0, 50.0)).await.unwrap();

        let service = RetailService::from_database(db, ServiceConfig::default());
        let cal = service.sessions().register("cal", "pw", 10.0, 10.0).await.unwrap();

        Fixture {
            service,
            near,
            far,
            warehouse,
            mia,
            max,
            cal,
        }
    }

    pub async fn login(&self, name: &str) -> SessionContext {
        self.service.sessions().login(name, "pw").await.unwrap()
    }

    pub async fn stock(&self, store_id: StoreId, units: i64, name: &str) {
        self.service
            .database()
            .products()
            .insert(&Product {
                store_id,
                product_name: name.to_string(),
                units_in_stock: units,
                price_per_unit_cents: 500,
            })
            .await
            .unwrap();
    }

    pub async fn units(&self, store_id: StoreId, name: &str) -> i64 {
        self.service
            .database()
            .products()
            .get(store_id, name)
            .await
            .unwrap()
            .unwrap()
            .units_in_stock
    }

    /// Row count of an append-only table.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.service.database().pool())
            .await
            .unwrap()
    }
}

pub fn at(lat: f64, lon: f64) -> Coordinates {
    Coordinates::new(lat, lon).unwrap()
}
