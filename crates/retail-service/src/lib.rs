//! # retail-service: Role-Gated Retail Operations
//!
//! The business layer between a menu-driven client and the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Retail Service Call Flow                         │
//! │                                                                         │
//! │  Menu client                                                           │
//! │       │  ctx = service.sessions().login("amy", "pw")                   │
//! │       │  service.orders().place_order(&ctx, store, "Widget", 3)        │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  retail-service (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │  SessionService   CatalogService   OrderService                 │   │
//! │  │  SupplyRequestService   ReportingService   AdminService         │   │
//! │  │                                                                 │   │
//! │  │  1. who is calling?        SessionContext (retail-core)         │   │
//! │  │  2. may they do this?      Session::require_* (retail-core)     │   │
//! │  │  3. is the input sane?     validation (retail-core)             │   │
//! │  │  4. do it atomically       repositories (retail-db)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  retail-db ──► SQLite                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use retail_service::{RetailService, ServiceConfig};
//!
//! let service = RetailService::connect(&ServiceConfig::load()?).await?;
//!
//! let ctx = service.sessions().login("amy", "pw").await?;
//! for store in service.orders().nearby_stores(&ctx).await? {
//!     println!("{} {}", store.id, store.name);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod order;
pub mod reporting;
pub mod session;
pub mod supply;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use admin::AdminService;
pub use catalog::CatalogService;
pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use order::OrderService;
pub use reporting::ReportingService;
pub use session::SessionService;
pub use supply::SupplyRequestService;

use retail_core::{Store, StoreId};
use retail_db::Database;
use tracing::info;

/// All services over one shared database pool.
#[derive(Debug, Clone)]
pub struct RetailService {
    db: Database,
    config: ServiceConfig,
}

impl RetailService {
    /// Opens the configured database (running migrations) and builds the services.
    pub async fn connect(config: &ServiceConfig) -> ServiceResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(path = %config.database_path.display(), "Retail service ready");
        Ok(RetailService::from_database(db, config.clone()))
    }

    /// Wraps an already-open database.
    pub fn from_database(db: Database, config: ServiceConfig) -> Self {
        RetailService { db, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.db.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.config.order_radius)
    }

    pub fn supply(&self) -> SupplyRequestService {
        SupplyRequestService::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportingService {
        ReportingService::new(self.db.clone(), self.config.report_limit)
    }

    pub fn admin(&self) -> AdminService {
        AdminService::new(self.db.clone())
    }

    /// True when the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        self.db.health_check().await
    }

    /// `(total, applied)` schema migrations.
    pub async fn migration_status(&self) -> ServiceResult<(usize, usize)> {
        Ok(self.db.migration_status().await?)
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}

/// Loads a store or fails with `NotFound`.
pub(crate) async fn require_store(db: &Database, store_id: StoreId) -> ServiceResult<Store> {
    db.stores()
        .get_by_id(store_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Store", store_id))
}
