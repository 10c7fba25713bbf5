//! # Catalog Service
//!
//! Product listing and audited product updates.
//!
//! ## Update Workflow
//! ```text
//! update_product(ctx, store, "Widget", 40, $2.50)
//!      │
//!      ├── store exists                               ─► NotFound
//!      ├── admin, or manager of this store            ─► Authorization
//!      ├── validate name, units >= 0, price > 0       ─► Validation
//!      ▼
//! ProductRepository::update_with_audit (one transaction)
//!      ├── no such product                            ─► NotFound, no audit row
//!      └── product row + product_updates row committed together
//! ```

use tracing::{info, warn};

use retail_core::validation::{validate_price, validate_product_name, validate_stock_level};
use retail_core::{Money, Product, ProductUpdateRecord, SessionContext, StoreId};
use retail_db::Database;

use crate::error::ServiceResult;
use crate::require_store;

/// Inventory reads and writes.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// A store's products, ordered by name.
    pub async fn list_products(&self, store_id: StoreId) -> ServiceResult<Vec<Product>> {
        require_store(&self.db, store_id).await?;
        Ok(self.db.products().list_for_store(store_id).await?)
    }

    /// Sets absolute stock and price for one product and records who did it.
    pub async fn update_product(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
        product_name: &str,
        units_in_stock: i64,
        price: Money,
    ) -> ServiceResult<ProductUpdateRecord> {
        let session = ctx.session()?;
        let store = require_store(&self.db, store_id).await?;
        if let Err(denied) = session.require_catalog_access(&store) {
            warn!(user_id = %session.user_id(), store_id = %store_id, "Product update denied");
            return Err(denied.into());
        }

        let product_name = product_name.trim();
        validate_product_name(product_name)?;
        validate_stock_level(units_in_stock)?;
        validate_price(price)?;

        let record = self
            .db
            .products()
            .update_with_audit(session.user_id(), store_id, product_name, units_in_stock, price)
            .await?;

        info!(
            user_id = %session.user_id(),
            store_id = %store_id,
            product = %product_name,
            units = units_in_stock,
            price = %price,
            "Product updated"
        );
        Ok(record)
    }
}
