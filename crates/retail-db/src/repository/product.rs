//! # Product Repository
//!
//! Per-store inventory rows keyed by `(store_id, product_name)`.
//!
//! ## Audited Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    update_with_audit (one transaction)                  │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    UPDATE products SET units_in_stock, price_per_unit_cents            │
//! │      WHERE store_id = ? AND product_name = ?                           │
//! │        │                                                                │
//! │        ├── 0 rows ──► NotFound, transaction dropped (rollback)         │
//! │        ▼                                                                │
//! │    INSERT INTO product_updates (manager_id, store_id, product_name,    │
//! │                                 updated_on)                            │
//! │  COMMIT ──► both rows visible together, or neither                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use retail_core::{Money, Product, ProductUpdateRecord, StoreId, UserId};

const PRODUCT_COLUMNS: &str = "store_id, product_name, units_in_stock, price_per_unit_cents";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let catalog = repo.list_for_store(store_id).await?;
/// let widget = repo.get(store_id, "Widget").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists a store's products ordered by name.
    ///
    /// An unknown store yields an empty list; callers that need to tell the
    /// two apart check the store first.
    pub async fn list_for_store(&self, store_id: StoreId) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE store_id = ?1 ORDER BY product_name"
        ))
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(store_id = %store_id, count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets one product of a store.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - The store does not carry this product
    pub async fn get(&self, store_id: StoreId, product_name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE store_id = ?1 AND product_name = ?2"
        ))
        .bind(store_id)
        .bind(product_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Adds a product to a store's catalog.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(
            store_id = %product.store_id,
            product = %product.product_name,
            "Inserting product"
        );

        sqlx::query(
            r#"
            INSERT INTO products (store_id, product_name, units_in_stock, price_per_unit_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product.store_id)
        .bind(&product.product_name)
        .bind(product.units_in_stock)
        .bind(product.price_per_unit_cents)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: product.product_name.clone(),
            },
            other => other,
        })?;

        Ok(())
    }

    /// Sets absolute stock and price and appends the audit record, atomically.
    ///
    /// ## Returns
    /// * `Ok(ProductUpdateRecord)` - the audit row that was written
    /// * `Err(DbError::NotFound)` - the store does not carry the product;
    ///   nothing was written
    pub async fn update_with_audit(
        &self,
        manager_id: UserId,
        store_id: StoreId,
        product_name: &str,
        units_in_stock: i64,
        price: Money,
    ) -> DbResult<ProductUpdateRecord> {
        debug!(
            store_id = %store_id,
            product = %product_name,
            units = units_in_stock,
            price_cents = price.cents(),
            "Updating product with audit"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET units_in_stock = ?1, price_per_unit_cents = ?2
            WHERE store_id = ?3 AND product_name = ?4
            "#,
        )
        .bind(units_in_stock)
        .bind(price.cents())
        .bind(store_id)
        .bind(product_name)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Product",
                format!("{store_id}/{product_name}"),
            ));
        }

        let updated_on = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO product_updates (manager_id, store_id, product_name, updated_on)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(manager_id)
        .bind(store_id)
        .bind(product_name)
        .bind(updated_on)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(ProductUpdateRecord {
            update_number: result.last_insert_rowid(),
            manager_id,
            store_id,
            product_name: product_name.to_string(),
            updated_on,
        })
    }
}
