//! # Validation Module
//!
//! Input validation for every value that crosses into the services.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu client                                                  │
//! │  └── Parses text into numbers, re-prompts on ValidationError           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (Rust)                                              │
//! │  └── THIS MODULE: ranges, emptiness, allowed values                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (units_in_stock >= 0), CHECK (price_per_unit_cents > 0)    │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use retail_core::validation::{validate_coordinate, validate_order_units};
//!
//! assert!(validate_coordinate("latitude", 42.0).is_ok());
//! assert!(validate_order_units(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{COORDINATE_MAX, COORDINATE_MIN, MAX_REPORT_LIMIT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest user or store name accepted.
pub const MAX_NAME_LEN: usize = 50;

/// Longest product name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 30;

/// Most units a single supply request may add.
pub const MAX_SUPPLY_UNITS: i64 = 1_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 50 characters
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a credential. Any non-empty value is accepted; comparison is
/// left to the data store.
pub fn validate_credential(credential: &str) -> ValidationResult<()> {
    if credential.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name used as part of the product key.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("product name", name, MAX_PRODUCT_NAME_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates one coordinate against the [0, 100] plane. NaN is rejected.
pub fn validate_coordinate(field: &str, value: f64) -> ValidationResult<()> {
    if !(COORDINATE_MIN..=COORDINATE_MAX).contains(&value) {
        return Err(ValidationError::CoordinateOutOfRange {
            field: field.to_string(),
            value,
            min: COORDINATE_MIN,
            max: COORDINATE_MAX,
        });
    }

    Ok(())
}

/// Validates the unit count of an order (> 0).
pub fn validate_order_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units".to_string(),
        });
    }

    Ok(())
}

/// Validates the unit count of a supply request (1..=MAX_SUPPLY_UNITS).
pub fn validate_supply_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units requested".to_string(),
        });
    }

    if units > MAX_SUPPLY_UNITS {
        return Err(ValidationError::OutOfRange {
            field: "units requested".to_string(),
            min: 1,
            max: MAX_SUPPLY_UNITS,
        });
    }

    Ok(())
}

/// Validates a new absolute stock level (>= 0).
pub fn validate_stock_level(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "units in stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price (> $0.00).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price per unit".to_string(),
        });
    }

    Ok(())
}

/// Validates a report row limit (1..=100).
pub fn validate_report_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_REPORT_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: i64::from(MAX_REPORT_LIMIT),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("Amy").is_ok());
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
        assert!(validate_user_name(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_credential() {
        assert!(validate_credential("x").is_ok());
        assert!(validate_credential("").is_err());
    }

    #[test]
    fn test_validate_coordinate() {
        assert!(validate_coordinate("latitude", 0.0).is_ok());
        assert!(validate_coordinate("latitude", 100.0).is_ok());
        assert!(validate_coordinate("latitude", -0.01).is_err());
        assert!(validate_coordinate("longitude", 100.01).is_err());
        assert!(validate_coordinate("longitude", f64::INFINITY).is_err());
        assert!(validate_coordinate("longitude", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_units() {
        assert!(validate_order_units(1).is_ok());
        assert!(validate_order_units(0).is_err());
        assert!(validate_order_units(-3).is_err());

        assert!(validate_supply_units(10).is_ok());
        assert!(validate_supply_units(0).is_err());
        assert!(validate_supply_units(MAX_SUPPLY_UNITS).is_ok());
        assert!(matches!(
            validate_supply_units(i64::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));

        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_report_limit() {
        assert!(validate_report_limit(5).is_ok());
        assert!(validate_report_limit(0).is_err());
        assert!(validate_report_limit(101).is_err());
    }
}
