//! # Reporting Service
//!
//! Read-only views over orders and audit records.
//!
//! | Report                  | Scope            | Who                         |
//! |-------------------------|------------------|-----------------------------|
//! | `recent_orders`         | caller's orders  | any logged-in user          |
//! | `popular_products`      | one store        | that store's manager, admin |
//! | `popular_customers`     | one store        | that store's manager, admin |
//! | `recent_product_updates`| one store        | that store's manager, admin |
//! | `store_orders`          | one store        | that store's manager, admin |
//!
//! A `None` limit means the configured default (5 unless overridden).

use tracing::warn;

use retail_core::validation::validate_report_limit;
use retail_core::{
    CustomerPopularity, ProductPopularity, ProductUpdateRecord, RecentOrder, Session,
    SessionContext, StoreId, StoreOrder,
};
use retail_db::Database;

use crate::error::ServiceResult;
use crate::require_store;

/// Read-only aggregate queries.
#[derive(Debug, Clone)]
pub struct ReportingService {
    db: Database,
    default_limit: u32,
}

impl ReportingService {
    pub fn new(db: Database, default_limit: u32) -> Self {
        ReportingService { db, default_limit }
    }

    /// The caller's own most recent orders, newest first.
    pub async fn recent_orders(
        &self,
        ctx: &SessionContext,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<RecentOrder>> {
        let session = ctx.session()?;
        let limit = self.limit(limit)?;
        Ok(self.db.reports().recent_orders(session.user_id(), limit).await?)
    }

    /// A store's products by order count, descending.
    pub async fn popular_products(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<ProductPopularity>> {
        let limit = self.limit(limit)?;
        self.authorize_store(ctx, store_id).await?;
        Ok(self.db.reports().popular_products(store_id, limit).await?)
    }

    /// A store's customers by order count, descending.
    pub async fn popular_customers(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<CustomerPopularity>> {
        let limit = self.limit(limit)?;
        self.authorize_store(ctx, store_id).await?;
        Ok(self.db.reports().popular_customers(store_id, limit).await?)
    }

    /// A store's latest audited product updates.
    pub async fn recent_product_updates(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<ProductUpdateRecord>> {
        let limit = self.limit(limit)?;
        self.authorize_store(ctx, store_id).await?;
        Ok(self
            .db
            .reports()
            .recent_product_updates(store_id, limit)
            .await?)
    }

    /// Every order of a store with customer names, newest first.
    pub async fn store_orders(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
    ) -> ServiceResult<Vec<StoreOrder>> {
        self.authorize_store(ctx, store_id).await?;
        Ok(self.db.reports().store_orders(store_id).await?)
    }

    fn limit(&self, requested: Option<u32>) -> ServiceResult<u32> {
        let limit = requested.unwrap_or(self.default_limit);
        validate_report_limit(limit)?;
        Ok(limit)
    }

    async fn authorize_store<'a>(
        &self,
        ctx: &'a SessionContext,
        store_id: StoreId,
    ) -> ServiceResult<&'a Session> {
        let session = ctx.session()?;
        let store = require_store(&self.db, store_id).await?;

        if let Err(denied) = session.require_report_access(&store) {
            warn!(user_id = %session.user_id(), store_id = %store_id, "Report access denied");
            return Err(denied.into());
        }
        Ok(session)
    }
}
