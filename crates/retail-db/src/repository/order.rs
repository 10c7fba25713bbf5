//! # Order Repository
//!
//! Order placement: stock decrement and order insert as one transaction.
//!
//! ## Reserve-and-Record
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         place (one transaction)                         │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    UPDATE products                                                      │
//! │      SET units_in_stock = units_in_stock - :units                      │
//! │      WHERE store_id = :store AND product_name = :name                  │
//! │        AND units_in_stock >= :units     ◄── the only stock check       │
//! │        │                                                                │
//! │        ├── 1 row ──► INSERT INTO orders (...) ──► COMMIT ──► Placed    │
//! │        │                                                                │
//! │        └── 0 rows ─► SELECT units_in_stock (same transaction)          │
//! │                        ├── row  ──► InsufficientStock { available }    │
//! │                        └── none ──► ProductNotFound                    │
//! │                      (transaction dropped, nothing written)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first statement is the write, so SQLite takes the write lock up front
//! and competing sessions queue on `busy_timeout` instead of racing a stale
//! read. Two orders can never both pass the `>=` guard on the same units.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use retail_core::{Order, OrderNumber, StoreId, UserId};

/// Result of an order attempt that reached the database.
///
/// Business rejections are values, not errors: the transaction ran, decided,
/// and rolled back cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOrderOutcome {
    /// Stock was decremented and the order recorded.
    Placed(Order),
    /// The product exists but holds fewer units than requested.
    InsufficientStock { available: i64 },
    /// The store does not carry the product.
    ProductNotFound,
}

/// Repository for orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Decrements stock and inserts the order, atomically.
    ///
    /// `units` must already be validated as positive.
    pub async fn place(
        &self,
        customer_id: UserId,
        store_id: StoreId,
        product_name: &str,
        units: i64,
    ) -> DbResult<PlaceOrderOutcome> {
        debug!(
            customer_id = %customer_id,
            store_id = %store_id,
            product = %product_name,
            units = units,
            "Placing order"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let reserved = sqlx::query(
            r#"
            UPDATE products
            SET units_in_stock = units_in_stock - ?1
            WHERE store_id = ?2 AND product_name = ?3 AND units_in_stock >= ?1
            "#,
        )
        .bind(units)
        .bind(store_id)
        .bind(product_name)
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            let available: Option<i64> = sqlx::query_scalar(
                "SELECT units_in_stock FROM products WHERE store_id = ?1 AND product_name = ?2",
            )
            .bind(store_id)
            .bind(product_name)
            .fetch_optional(&mut *tx)
            .await?;

            debug!(store_id = %store_id, product = %product_name, ?available, "Order rejected");

            return Ok(match available {
                Some(available) => PlaceOrderOutcome::InsufficientStock { available },
                None => PlaceOrderOutcome::ProductNotFound,
            });
        }

        let order_time = Utc::now();
        let inserted = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, store_id, product_name, units_ordered, order_time)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(customer_id)
        .bind(store_id)
        .bind(product_name)
        .bind(units)
        .bind(order_time)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(PlaceOrderOutcome::Placed(Order {
            order_number: OrderNumber::new(inserted.last_insert_rowid()),
            customer_id,
            store_id,
            product_name: product_name.to_string(),
            units_ordered: units,
            order_time,
        }))
    }

    /// Gets an order by number.
    pub async fn get(&self, order_number: OrderNumber) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_number, customer_id, store_id, product_name, units_ordered, order_time
            FROM orders
            WHERE order_number = ?1
            "#,
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::test_support::{seed_customer, seed_store, stock_of, widget};
    use std::time::Duration;

    #[tokio::test]
    async fn test_place_decrements_and_records() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;
        let customer = seed_customer(&db, "cal").await;
        db.products().insert(&widget(store, "Widget", 5)).await.unwrap();

        let outcome = db.orders().place(customer, store, "Widget", 3).await.unwrap();
        let PlaceOrderOutcome::Placed(order) = outcome else {
            panic!("expected a placed order, got {outcome:?}");
        };
        assert_eq!(order.units_ordered, 3);
        assert_eq!(stock_of(&db, store, "Widget").await, 2);

        let stored = db.orders().get(order.order_number).await.unwrap().unwrap();
        assert_eq!(stored.customer_id, customer);
        assert_eq!(stored.product_name, "Widget");
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_stock_untouched() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;
        let customer = seed_customer(&db, "cal").await;
        db.products().insert(&widget(store, "Widget", 2)).await.unwrap();

        let outcome = db.orders().place(customer, store, "Widget", 3).await.unwrap();
        assert_eq!(outcome, PlaceOrderOutcome::InsufficientStock { available: 2 });
        assert_eq!(stock_of(&db, store, "Widget").await, 2);

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orders, 0);
    }

    #[tokio::test]
    async fn test_exact_stock_can_be_ordered() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;
        let customer = seed_customer(&db, "cal").await;
        db.products().insert(&widget(store, "Widget", 4)).await.unwrap();

        let outcome = db.orders().place(customer, store, "Widget", 4).await.unwrap();
        assert!(matches!(outcome, PlaceOrderOutcome::Placed(_)));
        assert_eq!(stock_of(&db, store, "Widget").await, 0);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;
        let customer = seed_customer(&db, "cal").await;

        let outcome = db.orders().place(customer, store, "Gadget", 1).await.unwrap();
        assert_eq!(outcome, PlaceOrderOutcome::ProductNotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_orders_never_oversell() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("orders.db"))
            .max_connections(8)
            .busy_timeout(Duration::from_secs(30));
        let db = Database::new(config).await.unwrap();

        let (_, store) = seed_store(&db).await;
        let customer = seed_customer(&db, "cal").await;
        db.products().insert(&widget(store, "Widget", 10)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..12 {
            let orders = db.orders();
            handles.push(tokio::spawn(async move {
                orders.place(customer, store, "Widget", 3).await.unwrap()
            }));
        }

        let mut placed = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                PlaceOrderOutcome::Placed(_) => placed += 1,
                PlaceOrderOutcome::InsufficientStock { available } => {
                    assert!(available < 3);
                    rejected += 1;
                }
                PlaceOrderOutcome::ProductNotFound => panic!("product vanished"),
            }
        }

        assert_eq!(placed, 3);
        assert_eq!(rejected, 9);
        assert_eq!(stock_of(&db, store, "Widget").await, 1);
    }
}
