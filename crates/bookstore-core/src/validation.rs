//! # Validation Module
//!
//! Small input validators shared by the value-object factories.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (bookstore-api)                                         │
//! │  └── JSON shape (serde deserialization)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Value objects (Isbn, Money, Author)                          │
//! │  └── THIS MODULE: field-level rules                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Book / StockEntry                                            │
//! │  └── Cross-field rules (price non-negative, total non-negative)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::CURRENCY_CODE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and rejects it when nothing is left.
///
/// ## Returns
/// The trimmed slice.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::require_non_blank;
///
/// assert_eq!(require_non_blank("first name", "  Ada ").unwrap(), "Ada");
/// assert!(require_non_blank("first name", "   ").is_err());
/// ```
pub fn require_non_blank<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Validates a currency code.
///
/// ## Rules
/// - Must not be empty
/// - Must be exactly 3 bytes long (no ISO-4217 lookup)
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != CURRENCY_CODE_LENGTH {
        return Err(ValidationError::CurrencyCode {
            code: code.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity that must be strictly positive.
///
/// ## User Workflow
/// ```text
/// reserve(0) / release(-1) / restock(0)
///      │
///      ▼
/// validate_positive_quantity ← THIS FUNCTION
///      │
///      ├── n <= 0? → "<field> must be positive"
///      │
///      └── OK → state transition runs
/// ```
pub fn validate_positive_quantity(field: &str, n: i64) -> ValidationResult<()> {
    if n <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a value that must be zero or greater.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("price", 0).is_ok());
/// assert!(validate_non_negative("price", -1).is_err());
/// ```
pub fn validate_non_negative(field: &str, n: i64) -> ValidationResult<()> {
    if n < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
