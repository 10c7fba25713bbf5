//! # retail-db: Database Layer for the Retail Service
//!
//! This crate provides database access for the retail operations service.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Retail Service Data Flow                         │
//! │                                                                         │
//! │  OrderService::place_order(ctx, store, "Widget", 3)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    retail-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (repository/) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ OrderRepo     │    │ 001_initial_ │  │   │
//! │  │   │ Connection    │◄───│ ProductRepo   │    │   schema.sql │  │   │
//! │  │   │ Management    │    │ ReportRepo .. │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (users, stores, orders, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use retail_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("retail.db")).await?;
//!
//! let catalog = db.products().list_for_store(store_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::order::{OrderRepository, PlaceOrderOutcome};
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::store::StoreRepository;
pub use repository::supply::SupplyRequestRepository;
pub use repository::user::UserRepository;
pub use repository::warehouse::WarehouseRepository;
