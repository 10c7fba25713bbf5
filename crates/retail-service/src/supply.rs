//! # Supply Request Service
//!
//! Lets a store's manager pull stock from a warehouse.
//!
//! Requests are fulfilled on the spot: recording the request and adding the
//! units to the store's stock commit in one transaction. There is no
//! approval step and warehouses carry no stock of their own.

use tracing::{info, warn};

use retail_core::validation::{validate_product_name, validate_supply_units};
use retail_core::{SessionContext, StoreId, SupplyRequest, WarehouseId};
use retail_db::Database;

use crate::error::{ServiceError, ServiceResult};
use crate::require_store;

/// Manager-to-warehouse restocking.
#[derive(Debug, Clone)]
pub struct SupplyRequestService {
    db: Database,
}

impl SupplyRequestService {
    pub fn new(db: Database) -> Self {
        SupplyRequestService { db }
    }

    /// Records a supply request and increments stock atomically.
    ///
    /// ## Errors
    /// * `Authorization` - caller is not the manager of `store_id` (admins included)
    /// * `NotFound` - unknown store or warehouse, or the store does not carry the product
    /// * `Validation` - `units` is not in `1..=MAX_SUPPLY_UNITS`, or the
    ///   increment would push stock past what the column can hold
    pub async fn place_supply_request(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
        product_name: &str,
        units: i64,
        warehouse_id: WarehouseId,
    ) -> ServiceResult<SupplyRequest> {
        let session = ctx.session()?;
        let store = require_store(&self.db, store_id).await?;
        if let Err(denied) = session.require_supply_access(&store) {
            warn!(user_id = %session.user_id(), store_id = %store_id, "Supply request denied");
            return Err(denied.into());
        }

        let product_name = product_name.trim();
        validate_product_name(product_name)?;
        validate_supply_units(units)?;

        if !self.db.warehouses().exists(warehouse_id).await? {
            return Err(ServiceError::not_found("Warehouse", warehouse_id));
        }

        let request = self
            .db
            .supply_requests()
            .place(session.user_id(), warehouse_id, store_id, product_name, units)
            .await?;

        info!(
            request_number = request.request_number,
            user_id = %session.user_id(),
            warehouse_id = %warehouse_id,
            store_id = %store_id,
            product = %product_name,
            units = units,
            "Supply request fulfilled"
        );
        Ok(request)
    }

    /// Supply requests recorded for a store the caller manages, newest first.
    pub async fn requests_for_store(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
    ) -> ServiceResult<Vec<SupplyRequest>> {
        let session = ctx.session()?;
        let store = require_store(&self.db, store_id).await?;
        session.require_report_access(&store)?;

        Ok(self.db.supply_requests().list_for_store(store_id).await?)
    }
}
