//! # Error Types
//!
//! Domain-specific error types for retail-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  retail-core errors (this file)                                        │
//! │  ├── CoreError        - Authorization and business rule failures       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  retail-db errors                                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  retail-service errors                                                 │
//! │  └── ServiceError     - What the menu client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                          DbError ───┴──► ServiceError → client         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::session::Role;
use crate::types::{StoreId, UserId};

// =============================================================================
// Core Error
// =============================================================================

/// Business rule and authorization failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The session has no logged-in user.
    #[error("Not logged in")]
    Unauthenticated,

    /// The caller's role does not allow the operation at all.
    #[error("A {role} cannot {action}")]
    RoleNotPermitted { role: Role, action: &'static str },

    /// A manager tried to act on a store they do not own.
    #[error("User {user_id} does not manage store {store_id}")]
    NotStoreManager { user_id: UserId, store_id: StoreId },

    /// Not enough units on hand to fill an order.
    ///
    /// ## User Workflow
    /// ```text
    /// Place order (qty: 3)
    ///      │
    ///      ▼
    /// Conditional decrement: stock=2, WHERE stock >= 3 matches nothing
    ///      │
    ///      ▼
    /// InsufficientStock { product_name: "Widget", available: 2, requested: 3 }
    /// ```
    #[error(
        "Insufficient stock for {product_name} at store {store_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        store_id: StoreId,
        product_name: String,
        available: i64,
        requested: i64,
    },

    /// The store is farther away than the order radius.
    #[error("Store {store_id} is {distance:.2} units away, beyond the {radius} unit limit")]
    OutOfRange {
        store_id: StoreId,
        distance: f64,
        radius: f64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary closest to the input so the client can re-prompt.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Integer value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Coordinate outside the [0, 100] plane (or not a number at all).
    #[error("{field} must be between {min} and {max}, got {value}")]
    CoordinateOutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            store_id: StoreId::new(4),
            product_name: "Widget".to_string(),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Widget at store 4: available 2, requested 3"
        );

        let err = CoreError::RoleNotPermitted {
            role: Role::Customer,
            action: "update products",
        };
        assert_eq!(err.to_string(), "A customer cannot update products");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::CoordinateOutOfRange {
            field: "latitude".to_string(),
            value: 120.5,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "latitude must be between 0 and 100, got 120.5");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "units".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
