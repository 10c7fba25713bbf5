//! # Order Service
//!
//! Store discovery and order placement.
//!
//! ## Placement Workflow
//! ```text
//! place_order(ctx, store, "Widget", 3)
//!      │
//!      ├── logged in?                                  ─► Authentication
//!      ├── units > 0, product name given               ─► Validation
//!      ├── store exists                                ─► NotFound
//!      ├── distance(user now, store) <= radius         ─► OutOfRange
//!      ▼
//! OrderRepository::place (one transaction)
//!      ├── Placed(order)              ─► Ok(order)
//!      ├── InsufficientStock          ─► InsufficientStock (no retry)
//!      └── ProductNotFound            ─► NotFound
//! ```
//!
//! The user's coordinates are read at call time, so an admin moving a user
//! takes effect on that user's very next order.

use tracing::{info, warn};

use retail_core::proximity::within_radius;
use retail_core::validation::{validate_order_units, validate_product_name};
use retail_core::{CoreError, Order, Session, SessionContext, Store, StoreId, User};
use retail_db::{Database, PlaceOrderOutcome};

use crate::error::{ServiceError, ServiceResult};
use crate::require_store;

/// Order placement for any logged-in user.
#[derive(Debug, Clone)]
pub struct OrderService {
    db: Database,
    radius: f64,
}

impl OrderService {
    pub fn new(db: Database, radius: f64) -> Self {
        OrderService { db, radius }
    }

    /// Stores within the order radius of the caller, by id.
    pub async fn nearby_stores(&self, ctx: &SessionContext) -> ServiceResult<Vec<Store>> {
        let user = self.current_user(ctx.session()?).await?;
        let origin = user.coordinates();

        let stores = self.db.stores().list_all().await?;
        let reachable = within_radius(
            origin,
            stores.iter().map(|s| (s.id, s.coordinates())),
            self.radius,
        );

        Ok(stores
            .into_iter()
            .filter(|s| reachable.contains(&s.id))
            .collect())
    }

    /// Places an order and decrements stock in one transaction.
    pub async fn place_order(
        &self,
        ctx: &SessionContext,
        store_id: StoreId,
        product_name: &str,
        units: i64,
    ) -> ServiceResult<Order> {
        let session = ctx.session()?;
        let product_name = product_name.trim();
        validate_product_name(product_name)?;
        validate_order_units(units)?;

        let store = require_store(&self.db, store_id).await?;
        let user = self.current_user(session).await?;

        let distance = user.coordinates().planar_distance(&store.coordinates());
        if distance > self.radius {
            warn!(
                user_id = %user.id,
                store_id = %store_id,
                distance = distance,
                "Order rejected: store out of range"
            );
            return Err(CoreError::OutOfRange {
                store_id,
                distance,
                radius: self.radius,
            }
            .into());
        }

        let outcome = self
            .db
            .orders()
            .place(user.id, store_id, product_name, units)
            .await?;

        match outcome {
            PlaceOrderOutcome::Placed(order) => {
                info!(
                    order_number = %order.order_number,
                    user_id = %user.id,
                    store_id = %store_id,
                    product = %product_name,
                    units = units,
                    "Order placed"
                );
                Ok(order)
            }
            PlaceOrderOutcome::InsufficientStock { available } => {
                Err(CoreError::InsufficientStock {
                    store_id,
                    product_name: product_name.to_string(),
                    available,
                    requested: units,
                }
                .into())
            }
            PlaceOrderOutcome::ProductNotFound => Err(ServiceError::not_found(
                "Product",
                format!("{store_id}/{product_name}"),
            )),
        }
    }

    async fn current_user(&self, session: &Session) -> ServiceResult<User> {
        self.db
            .users()
            .get_by_id(session.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("User", session.user_id()))
    }
}
