//! # Service Error Type
//!
//! The error every service operation returns.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Retail Service                     │
//! │                                                                         │
//! │  ValidationError (retail-core) ──────────────┐                          │
//! │  CoreError (roles, stock, range) ────────────┤                          │
//! │  DbError (retail-db) ────────────────────────┤                          │
//! │                                              ▼                          │
//! │                                        ServiceError                     │
//! │                                              │                          │
//! │                        ┌─────────────────────┴──────────────┐           │
//! │                        ▼                                    ▼           │
//! │             is_recoverable() == true            is_recoverable() == false│
//! │             Validation, Authentication          everything else         │
//! │             client re-prompts                   operation aborts once   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use retail_core::{CoreError, StoreId, ValidationError};
use retail_db::DbError;

/// Machine-readable error codes for the client.
///
/// ## Usage in a Menu Client
/// ```rust,ignore
/// match err.code() {
///     ErrorCode::ValidationError => reprompt(err),
///     ErrorCode::InsufficientStock => show("Not enough stock"),
///     _ => show_error(err),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation
    ValidationError,

    /// No user matches the credentials, or nobody is logged in
    AuthenticationFailed,

    /// The caller's role or store ownership forbids the operation
    NotAuthorized,

    /// Referenced user, store, product or warehouse does not exist
    NotFound,

    /// The record already exists
    Conflict,

    /// Not enough units on hand
    InsufficientStock,

    /// Store is beyond the order radius
    OutOfRange,

    /// Data store failure
    DatabaseError,
}

/// Errors returned by the retail services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login failed or the context is unauthenticated.
    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("Not authorized: {reason}")]
    Authorization { reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error(
        "Insufficient stock for {product_name} at store {store_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        store_id: StoreId,
        product_name: String,
        available: i64,
        requested: i64,
    },

    #[error("Store {store_id} is {distance:.2} units away, beyond the {radius} unit limit")]
    OutOfRange {
        store_id: StoreId,
        distance: f64,
        radius: f64,
    },

    /// Propagated unchanged; never retried.
    #[error("Data store error: {0}")]
    DataStore(DbError),
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Validation(_) => ErrorCode::ValidationError,
            ServiceError::Authentication { .. } => ErrorCode::AuthenticationFailed,
            ServiceError::Authorization { .. } => ErrorCode::NotAuthorized,
            ServiceError::NotFound { .. } => ErrorCode::NotFound,
            ServiceError::Conflict { .. } => ErrorCode::Conflict,
            ServiceError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            ServiceError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ServiceError::DataStore(_) => ErrorCode::DatabaseError,
        }
    }

    /// True when the client should re-prompt rather than abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::Authentication { .. }
        )
    }
}

/// Converts core errors to service errors.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthenticated => ServiceError::Authentication {
                reason: err.to_string(),
            },
            CoreError::RoleNotPermitted { .. } | CoreError::NotStoreManager { .. } => {
                ServiceError::Authorization {
                    reason: err.to_string(),
                }
            }
            CoreError::InsufficientStock {
                store_id,
                product_name,
                available,
                requested,
            } => ServiceError::InsufficientStock {
                store_id,
                product_name,
                available,
                requested,
            },
            CoreError::OutOfRange {
                store_id,
                distance,
                radius,
            } => ServiceError::OutOfRange {
                store_id,
                distance,
                radius,
            },
            CoreError::Validation(e) => ServiceError::Validation(e),
        }
    }
}

/// Converts database errors to service errors.
///
/// Only the classifications the client can act on are lifted out; every
/// other failure stays a `DataStore` error.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            DbError::Validation(err) => ServiceError::Validation(err),
            DbError::UniqueViolation { field, value } => ServiceError::Conflict {
                message: format!("{field} '{value}' already exists"),
            },
            other => {
                tracing::error!(error = %other, "Data store failure");
                ServiceError::DataStore(other)
            }
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
