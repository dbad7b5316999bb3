//! # Validation Module
//!
//! Turns raw form fields into domain values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTML form (required, type="number", type="date")             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Route handler (Rust)                                         │
//! │  └── THIS MODULE: parse + business rules                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE names and emails                                           │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kala_core::validation::{parse_optional_amount, parse_quantity};
//!
//! assert_eq!(parse_quantity("").unwrap(), 1);
//! assert_eq!(parse_optional_amount("transf", " ").unwrap(), None);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest catalog item, user or client name accepted.
pub const MAX_NAME_LEN: usize = 200;

/// Longest email accepted.
pub const MAX_EMAIL_LEN: usize = 120;

/// Highest price accepted from a form, in pesos. Keeps `price × quantity`
/// and the transfer surcharge well inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Date format used by `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required name field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use kala_core::validation::validate_name;
///
/// assert_eq!(validate_name("name", "  Shampoo neutro ").unwrap(), "Shampoo neutro");
/// assert!(validate_name("name", "").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates an email and returns it trimmed.
///
/// Only checks shape loosely: local accounts such as `admin@kala` are valid.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::invalid_format("email", "must look like user@domain")),
    }
}

/// Validates a password. Passwords are never trimmed.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn parse_int(field: &str, raw: &str) -> ValidationResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, "must be a whole number"))
}

/// Parses a price. An empty field means zero.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed MAX_AMOUNT
pub fn parse_amount(field: &str, raw: &str) -> ValidationResult<Money> {
    if raw.trim().is_empty() {
        return Ok(Money::zero());
    }

    let amount = parse_int(field, raw)?;
    if amount < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT,
        });
    }

    Ok(Money::new(amount))
}

/// Parses an optional price. An empty field means "not set".
pub fn parse_optional_amount(field: &str, raw: &str) -> ValidationResult<Option<Money>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(field, raw).map(Some)
}

/// Parses a stock count. An empty field means zero.
pub fn parse_stock(raw: &str) -> ValidationResult<i64> {
    if raw.trim().is_empty() {
        return Ok(0);
    }
    parse_int("stock", raw)
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "qty".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Parses a sale quantity. An empty field means one unit.
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    if raw.trim().is_empty() {
        return Ok(1);
    }

    let qty = parse_int("qty", raw)?;
    validate_quantity(qty)?;
    Ok(qty)
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a sale date in `YYYY-MM-DD` form.
pub fn parse_sale_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::required("date"));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format("date", "expected YYYY-MM-DD"))
}

// =============================================================================
// Unit Tests
// =============================================================================
