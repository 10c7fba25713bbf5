//! # Report Repository
//!
//! Read-only aggregate queries. Nothing here writes, and nothing here checks
//! who is asking; scoping is the caller's job.
//!
//! Ties are broken deterministically (newest order number first, or name
//! ascending) so repeated calls return the same rows.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use retail_core::{
    CustomerPopularity, ProductPopularity, ProductUpdateRecord, RecentOrder, StoreId, StoreOrder,
    UserId,
};

/// Repository for read-only reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// A customer's most recent orders, with the store name.
    pub async fn recent_orders(&self, customer_id: UserId, limit: u32) -> DbResult<Vec<RecentOrder>> {
        let rows = sqlx::query_as::<_, RecentOrder>(
            r#"
            SELECT o.order_number, o.store_id, s.name AS store_name,
                   o.product_name, o.units_ordered, o.order_time
            FROM orders o
            INNER JOIN stores s ON s.id = o.store_id
            WHERE o.customer_id = ?1
            ORDER BY o.order_time DESC, o.order_number DESC
            LIMIT ?2
            "#,
        )
        .bind(customer_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(customer_id = %customer_id, count = rows.len(), "Recent orders");
        Ok(rows)
    }

    /// A store's products by number of orders, most ordered first.
    pub async fn popular_products(
        &self,
        store_id: StoreId,
        limit: u32,
    ) -> DbResult<Vec<ProductPopularity>> {
        let rows = sqlx::query_as::<_, ProductPopularity>(
            r#"
            SELECT product_name, COUNT(*) AS order_count
            FROM orders
            WHERE store_id = ?1
            GROUP BY product_name
            ORDER BY order_count DESC, product_name ASC
            LIMIT ?2
            "#,
        )
        .bind(store_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// A store's customers by number of orders, most frequent first.
    pub async fn popular_customers(
        &self,
        store_id: StoreId,
        limit: u32,
    ) -> DbResult<Vec<CustomerPopularity>> {
        let rows = sqlx::query_as::<_, CustomerPopularity>(
            r#"
            SELECT o.customer_id, u.name AS customer_name, COUNT(*) AS order_count
            FROM orders o
            INNER JOIN users u ON u.id = o.customer_id
            WHERE o.store_id = ?1
            GROUP BY o.customer_id, u.name
            ORDER BY order_count DESC, o.customer_id ASC
            LIMIT ?2
            "#,
        )
        .bind(store_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// A store's most recent audited product updates.
    pub async fn recent_product_updates(
        &self,
        store_id: StoreId,
        limit: u32,
    ) -> DbResult<Vec<ProductUpdateRecord>> {
        let rows = sqlx::query_as::<_, ProductUpdateRecord>(
            r#"
            SELECT update_number, manager_id, store_id, product_name, updated_on
            FROM product_updates
            WHERE store_id = ?1
            ORDER BY updated_on DESC, update_number DESC
            LIMIT ?2
            "#,
        )
        .bind(store_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every order of a store with the customer's name, newest first.
    pub async fn store_orders(&self, store_id: StoreId) -> DbResult<Vec<StoreOrder>> {
        let rows = sqlx::query_as::<_, StoreOrder>(
            r#"
            SELECT o.order_number, u.name AS customer_name, o.store_id,
                   o.product_name, o.units_ordered, o.order_time
            FROM orders o
            INNER JOIN users u ON u.id = o.customer_id
            WHERE o.store_id = ?1
            ORDER BY o.order_time DESC, o.order_number DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(store_id = %store_id, count = rows.len(), "Store orders");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::order::PlaceOrderOutcome;
    use crate::repository::test_support::{seed_customer, seed_store, widget};
    use retail_core::Money;

    async fn order(db: &Database, customer: UserId, store: StoreId, product: &str) {
        let outcome = db.orders().place(customer, store, product, 1).await.unwrap();
        assert!(matches!(outcome, PlaceOrderOutcome::Placed(_)));
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first_with_store_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;
        let cal = seed_customer(&db, "cal").await;
        let dee = seed_customer(&db, "dee").await;
        for name in ["A", "B", "C"] {
            db.products().insert(&widget(store, name, 10)).await.unwrap();
        }

        order(&db, cal, store, "A").await;
        order(&db, cal, store, "B").await;
        order(&db, dee, store, "C").await;
        order(&db, cal, store, "C").await;

        let rows = db.reports().recent_orders(cal, 2).await.unwrap();
        let products: Vec<&str> = rows.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(products, vec!["C", "B"]);
        assert!(rows.iter().all(|r| r.store_name == "Corner Shop"));
        assert!(rows[0].order_time >= rows[1].order_time);
    }

    #[tokio::test]
    async fn test_popularity_reports() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;
        let cal = seed_customer(&db, "cal").await;
        let dee = seed_customer(&db, "dee").await;
        for name in ["A", "B"] {
            db.products().insert(&widget(store, name, 10)).await.unwrap();
        }

        order(&db, cal, store, "B").await;
        order(&db, dee, store, "B").await;
        order(&db, dee, store, "A").await;
        order(&db, dee, store, "B").await;

        let products = db.reports().popular_products(store, 5).await.unwrap();
        assert_eq!(products[0].product_name, "B");
        assert_eq!(products[0].order_count, 3);
        assert_eq!(products[1].order_count, 1);

        let customers = db.reports().popular_customers(store, 1).await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].customer_id, dee);
        assert_eq!(customers[0].customer_name, "dee");
        assert_eq!(customers[0].order_count, 3);

        let all = db.reports().store_orders(store).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].customer_name, "dee");
        assert_eq!(all[3].customer_name, "cal");
    }

    #[tokio::test]
    async fn test_recent_product_updates() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (manager, store) = seed_store(&db).await;
        db.products().insert(&widget(store, "A", 1)).await.unwrap();
        db.products().insert(&widget(store, "B", 1)).await.unwrap();

        for (name, units) in [("A", 5), ("B", 6), ("A", 7)] {
            db.products()
                .update_with_audit(manager, store, name, units, Money::from_cents(100))
                .await
                .unwrap();
        }

        let rows = db.reports().recent_product_updates(store, 2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "A");
        assert_eq!(rows[1].product_name, "B");
        assert!(rows[0].update_number > rows[1].update_number);
    }

    #[tokio::test]
    async fn test_reports_on_empty_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, store) = seed_store(&db).await;

        assert!(db.reports().popular_products(store, 5).await.unwrap().is_empty());
        assert!(db.reports().popular_customers(store, 5).await.unwrap().is_empty());
        assert!(db.reports().store_orders(store).await.unwrap().is_empty());
    }
}
