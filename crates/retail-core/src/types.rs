//! # Domain Types
//!
//! Entities persisted by the data store, plus the read models the reports
//! return.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌───────────────────────┐       │
//! │  │    User      │   │    Store     │   │       Product         │       │
//! │  │  id          │◄──│  manager_id  │◄──│  (store_id, name) key │       │
//! │  │  role        │   │  lat / lon   │   │  units_in_stock >= 0  │       │
//! │  └──────────────┘   └──────────────┘   └───────────────────────┘       │
//! │         ▲                  ▲                       ▲                    │
//! │         │                  │                       │                    │
//! │  ┌──────┴───────┐   ┌──────┴─────────────┐  ┌──────┴──────────┐        │
//! │  │    Order     │   │ ProductUpdateRecord│  │ SupplyRequest   │        │
//! │  │ (immutable)  │   │   (append-only)    │  │ (append-only)   │        │
//! │  └──────────────┘   └────────────────────┘  └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Credentials never leave the data store: [`User`] has no password field and
//! login is a parameterized `(name, credential)` lookup.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::proximity::Coordinates;
use crate::session::Role;

// =============================================================================
// Identifiers
// =============================================================================

/// Defines an `i64` newtype id that cannot be mixed up with other entity ids.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw row id.
            #[inline]
            pub const fn new(id: i64) -> Self {
                $name(id)
            }

            /// Returns the raw row id.
            #[inline]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                $name(id)
            }
        }
    };
}

define_id!(
    /// Primary key of a user row.
    UserId
);
define_id!(
    /// Primary key of a store row.
    StoreId
);
define_id!(
    /// Primary key of a warehouse row.
    WarehouseId
);
define_id!(
    /// Server-generated order number.
    OrderNumber
);

// =============================================================================
// User
// =============================================================================

/// A registered user (credential excluded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub role: Role,
}

impl User {
    /// Current position on the plane.
    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::unchecked(self.latitude, self.longitude)
    }
}

/// Field values written by an admin user update.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: String,
    pub coordinates: Coordinates,
    pub role: Role,
}

// =============================================================================
// Store & Warehouse
// =============================================================================

/// A physical store. Read-only for the services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub manager_id: UserId,
    pub established_date: NaiveDate,
}

impl Store {
    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::unchecked(self.latitude, self.longitude)
    }
}

/// A warehouse that supply requests are addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Warehouse {
    pub id: WarehouseId,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
}

// =============================================================================
// Product
// =============================================================================

/// A product carried by one store, keyed by `(store_id, product_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub store_id: StoreId,
    pub product_name: String,
    /// Never negative; enforced by a CHECK constraint and the conditional decrement.
    pub units_in_stock: i64,
    pub price_per_unit_cents: i64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_per_unit_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub order_number: OrderNumber,
    pub customer_id: UserId,
    pub store_id: StoreId,
    pub product_name: String,
    pub units_ordered: i64,
    pub order_time: DateTime<Utc>,
}

// =============================================================================
// Audit Trail
// =============================================================================

/// One committed product change made through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductUpdateRecord {
    pub update_number: i64,
    pub manager_id: UserId,
    pub store_id: StoreId,
    pub product_name: String,
    pub updated_on: DateTime<Utc>,
}

/// A restock request sent to a warehouse.
///
/// Requests are fulfilled immediately: the stock increment is committed in the
/// same transaction as this row. There is no approval step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyRequest {
    pub request_number: i64,
    pub manager_id: UserId,
    pub warehouse_id: WarehouseId,
    pub store_id: StoreId,
    pub product_name: String,
    pub units_requested: i64,
}

// =============================================================================
// Report Rows
// =============================================================================

/// A customer's order joined with the store name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RecentOrder {
    pub order_number: OrderNumber,
    pub store_id: StoreId,
    pub store_name: String,
    pub product_name: String,
    pub units_ordered: i64,
    pub order_time: DateTime<Utc>,
}

/// Order count per product within one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductPopularity {
    pub product_name: String,
    pub order_count: i64,
}

/// Order count per customer within one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CustomerPopularity {
    pub customer_id: UserId,
    pub customer_name: String,
    pub order_count: i64,
}

/// A store's order as seen by its manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreOrder {
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub store_id: StoreId,
    pub product_name: String,
    pub units_ordered: i64,
    pub order_time: DateTime<Utc>,
}
