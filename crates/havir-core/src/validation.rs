//! # Validation Module
//!
//! Field rules applied while turning a menu file into a catalog, and to the
//! few operator-facing settings that are not simply clamped.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (THIS MODULE)                                   │
//! │  ├── ids, names, prices checked once at startup                        │
//! │  └── a bad entry fails the whole load                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Invoice engine                                               │
//! │  ├── discount clamped to [0, 100]                                      │
//! │  └── quantity <= 0 removes the line, > u32::MAX saturates              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use havir_core::validation::{validate_entry_name, saturate_quantity};
//!
//! validate_entry_name("Tea").unwrap();
//! assert_eq!(saturate_quantity(5000), 5000);
//! ```

use serde_json::Number;

use crate::error::ValidationError;
use crate::locale::CurrencyFormat;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest accepted menu price, in minor units.
///
/// Any accepted price times any `u32` quantity fits in an `i64`.
pub const MAX_PRICE_MINOR: i64 = i64::MAX / u32::MAX as i64;

/// Longest menu entry name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Longest menu entry id, in characters.
pub const MAX_ID_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu entry name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters (not bytes, Persian names are multi-byte)
///
/// ## Example
/// ```rust
/// use havir_core::validation::validate_entry_name;
///
/// assert!(validate_entry_name("چای").is_ok());
/// assert!(validate_entry_name("  ").is_err());
/// ```
pub fn validate_entry_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the textual form of a menu entry id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - No whitespace inside (ids are typed as single command arguments)
pub fn validate_entry_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if id.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Converts a JSON price into minor units of `currency`.
///
/// ## Rules
/// - Must be non-negative (free items are allowed)
/// - Must not exceed [`MAX_PRICE_MINOR`] minor units
/// - Must not have more fraction digits than the currency
///   (`12.5` is fine for USD, not for Toman)
///
/// ## Example
/// ```rust
/// use havir_core::locale::CurrencyFormat;
/// use havir_core::validation::price_to_minor;
///
/// let toman = CurrencyFormat::default();
/// let usd = CurrencyFormat::usd();
///
/// let price: serde_json::Number = serde_json::from_str("20000").unwrap();
/// assert_eq!(price_to_minor(&price, &toman).unwrap().minor(), 20_000);
///
/// let price: serde_json::Number = serde_json::from_str("4.5").unwrap();
/// assert_eq!(price_to_minor(&price, &usd).unwrap().minor(), 450);
/// assert!(price_to_minor(&price, &toman).is_err());
/// ```
pub fn price_to_minor(price: &Number, currency: &CurrencyFormat) -> ValidationResult<Money> {
    let scale = currency.scale();
    let out_of_range = || ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: MAX_PRICE_MINOR,
    };

    if let Some(whole) = price.as_u64() {
        return i64::try_from(whole)
            .ok()
            .and_then(|w| w.checked_mul(scale))
            .filter(|minor| *minor <= MAX_PRICE_MINOR)
            .map(Money::from_minor)
            .ok_or_else(out_of_range);
    }

    if price.as_i64().is_some() {
        // as_u64 failed, so the integer is negative
        return Err(out_of_range());
    }

    let value = price.as_f64().ok_or_else(out_of_range)?;
    if !value.is_finite() || value < 0.0 {
        return Err(out_of_range());
    }

    let scaled = value * scale as f64;
    let rounded = scaled.round();
    if (scaled - rounded).abs() > 1e-6 {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!(
                "has more than {} decimal place(s) for {}",
                currency.decimals, currency.code
            ),
        });
    }

    if rounded > MAX_PRICE_MINOR as f64 {
        return Err(out_of_range());
    }

    Ok(Money::from_minor(rounded as i64))
}

/// Converts a positive requested quantity to a line quantity.
///
/// Values above `u32::MAX` are stored as `u32::MAX`. Callers handle `<= 0`
/// (line removal) before converting.
#[inline]
pub fn saturate_quantity(qty: i64) -> u32 {
    u32::try_from(qty.max(1)).unwrap_or(u32::MAX)
}

/// Validates receipt paper width in characters.
///
/// ## Rules
/// - Between 20 and 120 columns (58mm rolls are ~32, 80mm rolls ~48)
pub fn validate_receipt_width(width: usize) -> ValidationResult<()> {
    if !(20..=120).contains(&width) {
        return Err(ValidationError::OutOfRange {
            field: "receipt width".to_string(),
            min: 20,
            max: 120,
        });
    }

    Ok(())
}

/// Validates the number of currency fraction digits.
pub fn validate_currency_decimals(decimals: u32) -> ValidationResult<()> {
    if decimals > CurrencyFormat::MAX_DECIMALS {
        return Err(ValidationError::OutOfRange {
            field: "currency decimals".to_string(),
            min: 0,
            max: CurrencyFormat::MAX_DECIMALS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
