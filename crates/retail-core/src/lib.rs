//! # retail-core: Pure Business Rules for the Retail Service
//!
//! This crate holds every rule that can be decided without touching the
//! database: who may do what, how far a store is, and what counts as valid
//! input.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Retail Ops Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Menu client (not in this repo)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SessionContext + arguments             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 retail-service (role-gated services)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ retail-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  session  │  │ proximity │  │ validation│  │   │
//! │  │   │  Store    │  │  Role     │  │  planar   │  │   rules   │  │   │
//! │  │   │  Product  │  │  Session  │  │  distance │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 retail-db (SQLite repositories)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (User, Store, Product, Order, ...) and id newtypes
//! - [`session`] - `Role` and the explicit `SessionContext`
//! - [`proximity`] - Planar distance filter for store reachability
//! - [`money`] - Integer-cent prices
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use retail_core::proximity::Coordinates;
//! use retail_core::ORDER_RADIUS;
//!
//! let user = Coordinates::new(10.0, 10.0).unwrap();
//! let store = Coordinates::new(10.0, 35.0).unwrap();
//!
//! assert!(user.is_within(&store, ORDER_RADIUS));
//! ```

pub mod error;
pub mod money;
pub mod proximity;
pub mod session;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use proximity::Coordinates;
pub use session::{Role, Session, SessionContext};
pub use types::*;

/// Distance (in plane units) within which a store is visible and orderable.
pub const ORDER_RADIUS: f64 = 30.0;

/// Lower bound for latitude and longitude.
pub const COORDINATE_MIN: f64 = 0.0;

/// Upper bound for latitude and longitude.
pub const COORDINATE_MAX: f64 = 100.0;

/// Row count used by the "top 5" style reports when the caller gives none.
pub const DEFAULT_REPORT_LIMIT: u32 = 5;

/// Largest row count a report may request.
pub const MAX_REPORT_LIMIT: u32 = 100;
