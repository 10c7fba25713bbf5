//! # Repository Module
//!
//! Database repository implementations for the retail service.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Service (retail-service)                                              │
//! │       │                                                                 │
//! │       │  db.orders().place(customer, store, "Widget", 3)               │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── place(&self, ...)     ← owns its transaction                      │
//! │  └── get(&self, number)                                                │
//! │       │                                                                 │
//! │       │  Parameterized SQL only                                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Repositories never check roles. They enforce what the schema and a    │
//! │  single transaction can enforce: keys, stock >= 0, atomic pairs.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Registration, login lookup, admin edits
//! - [`StoreRepository`](store::StoreRepository) - Store lookup and listing
//! - [`WarehouseRepository`](warehouse::WarehouseRepository) - Existence checks
//! - [`ProductRepository`](product::ProductRepository) - Catalog and audited updates
//! - [`OrderRepository`](order::OrderRepository) - Atomic order placement
//! - [`SupplyRequestRepository`](supply::SupplyRequestRepository) - Atomic restock
//! - [`ReportRepository`](report::ReportRepository) - Read-only aggregates

pub mod order;
pub mod product;
pub mod report;
pub mod store;
pub mod supply;
pub mod user;
pub mod warehouse;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::pool::Database;
    use retail_core::{Coordinates, Product, Role, StoreId, UserId};

    /// A manager and the store they run, at (10, 35).
    pub async fn seed_store(db: &Database) -> (UserId, StoreId) {
        let manager = db
            .users()
            .insert("mia", "pw", Coordinates::new(5.0, 5.0).unwrap(), Role::Manager)
            .await
            .unwrap();
        let store = db
            .stores()
            .insert(
                "Corner Shop",
                Coordinates::new(10.0, 35.0).unwrap(),
                manager,
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            )
            .await
            .unwrap();
        (manager, store)
    }

    pub async fn seed_customer(db: &Database, name: &str) -> UserId {
        db.users()
            .insert(name, "pw", Coordinates::new(10.0, 10.0).unwrap(), Role::Customer)
            .await
            .unwrap()
    }

    pub fn widget(store_id: StoreId, name: &str, units: i64) -> Product {
        Product {
            store_id,
            product_name: name.to_string(),
            units_in_stock: units,
            price_per_unit_cents: 250,
        }
    }

    pub async fn stock_of(db: &Database, store_id: StoreId, name: &str) -> i64 {
        db.products()
            .get(store_id, name)
            .await
            .unwrap()
            .unwrap()
            .units_in_stock
    }
}
