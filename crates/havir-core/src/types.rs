//! # Domain Types
//!
//! Core domain types used throughout Havir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   MenuEntry     │   │  DiscountRate   │   │  InvoiceMode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (EntryId)   │   │  bps (u32)      │   │  Empty          │       │
//! │  │  name           │   │  1000 = 10%     │   │  Populated      │       │
//! │  │  price (Money)  │   │  0..=10000      │   └─────────────────┘       │
//! │  │  category       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Menu entries are created once by [`crate::catalog::Catalog`] and never
//! mutated afterwards. Invoice lines borrow them instead of copying.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::locale::delocalize_digits;
use crate::money::Money;

// =============================================================================
// Entry Identifier
// =============================================================================

/// Identifier of a menu entry.
///
/// Catalog files spell ids as JSON integers or strings; both normalise to the
/// same textual key, so `1` and `"1"` name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Creates an id from its textual form (surrounding whitespace is dropped).
    pub fn new(id: impl AsRef<str>) -> Self {
        EntryId(id.as_ref().trim().to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId::new(id)
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        EntryId::new(id)
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        EntryId(id.to_string())
    }
}

// =============================================================================
// Menu Entry
// =============================================================================

/// A dish or drink on the counter's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Unique across the whole catalog.
    pub id: EntryId,

    /// Display name shown to the cashier and printed on receipts.
    pub name: String,

    /// Unit price in minor units, never negative.
    pub price: Money,

    /// Category the entry is listed under.
    pub category: String,
}

impl MenuEntry {
    /// Calculates the price of `quantity` portions.
    #[inline]
    pub fn line_total(&self, quantity: u32) -> Money {
        self.price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Invoice-wide discount in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 1000 bps = 10% and 1250 bps = 12.5%.
/// The rate is always within 0..=10000 (0% to 100%); every constructor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a rate from basis points, clamping anything above 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > Self::MAX_BPS {
            DiscountRate(Self::MAX_BPS)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a rate from a percentage, clamped to [0, 100]. NaN counts as 0.
    ///
    /// ## Precision
    /// A rate is held to 0.01% (one basis point). Finer input is rounded to
    /// the nearest basis point before any total is computed, so `33.337`
    /// becomes 33.34% and `42.0049` becomes 42%. Every total uses the
    /// rounded rate.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percent(-10.0).percent(), 0.0);
    /// assert_eq!(DiscountRate::from_percent(150.0).percent(), 100.0);
    /// assert_eq!(DiscountRate::from_percent(42.0).percent(), 42.0);
    /// assert_eq!(DiscountRate::from_percent(33.337).bps(), 3_334);
    /// assert_eq!(DiscountRate::from_percent(f64::NAN).percent(), 0.0);
    /// ```
    pub fn from_percent(pct: f64) -> Self {
        if pct.is_nan() {
            return DiscountRate::zero();
        }
        let clamped = pct.clamp(0.0, 100.0);
        DiscountRate((clamped * 100.0).round() as u32).min(DiscountRate(Self::MAX_BPS))
    }

    /// Reads a percentage typed by the operator.
    ///
    /// Takes the longest leading decimal number (so `"15%"` is 15 and
    /// `"12.5 off"` is 12.5), accepts Persian digits, and treats anything
    /// without a leading number as 0. The result is clamped like
    /// [`DiscountRate::from_percent`].
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::parse_input("15%").bps(), 1500);
    /// assert_eq!(DiscountRate::parse_input("abc").bps(), 0);
    /// assert_eq!(DiscountRate::parse_input("۲۰").bps(), 2000);
    /// assert_eq!(DiscountRate::parse_input("999").bps(), 10_000);
    /// ```
    pub fn parse_input(input: &str) -> Self {
        let normalized = delocalize_digits(input);
        let number = leading_number(normalized.trim_start());
        DiscountRate::from_percent(number.and_then(|n| n.parse::<f64>().ok()).unwrap_or(0.0))
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Returns the longest prefix of `s` that reads as a decimal number
/// (`[+-]digits[.digits][e[+-]digits]`), or `None` when there are no digits.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

// =============================================================================
// Invoice Mode
// =============================================================================

/// The two observable shapes of an invoice.
///
/// Only the presentation layer branches on this (e.g. showing an empty-state
/// placeholder instead of the totals table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceMode {
    /// No lines selected yet.
    Empty,
    /// At least one line.
    Populated,
}

impl Default for InvoiceMode {
    fn default() -> Self {
        InvoiceMode::Empty
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_normalises_numbers_and_strings() {
        assert_eq!(EntryId::from(1u64), EntryId::from("1"));
        assert_eq!(EntryId::from(" tea-1 ").as_str(), "tea-1");
    }

    #[test]
    fn test_menu_entry_line_total() {
        let entry = MenuEntry {
            id: EntryId::from(1u64),
            name: "Tea".to_string(),
            price: Money::from_minor(20_000),
            category: "Drinks".to_string(),
        };
        assert_eq!(entry.line_total(3).minor(), 60_000);
    }

    #[test]
    fn test_discount_rate_from_bps_clamps() {
        assert_eq!(DiscountRate::from_bps(825).bps(), 825);
        assert_eq!(DiscountRate::from_bps(20_000).bps(), 10_000);
    }

    #[test]
    fn test_discount_rate_from_percent() {
        assert_eq!(DiscountRate::from_percent(-10.0).bps(), 0);
        assert_eq!(DiscountRate::from_percent(-5.0).bps(), 0);
        assert_eq!(DiscountRate::from_percent(150.0).bps(), 10_000);
        assert_eq!(DiscountRate::from_percent(999.0).bps(), 10_000);
        assert_eq!(DiscountRate::from_percent(42.0).bps(), 4_200);
        assert_eq!(DiscountRate::from_percent(12.5).bps(), 1_250);
        assert_eq!(DiscountRate::from_percent(f64::NAN).bps(), 0);
        assert_eq!(DiscountRate::from_percent(f64::INFINITY).bps(), 10_000);
        assert_eq!(DiscountRate::from_percent(f64::NEG_INFINITY).bps(), 0);
    }

    #[test]
    fn test_discount_rate_rounds_to_basis_points() {
        assert_eq!(DiscountRate::from_percent(33.337).bps(), 3_334);
        assert_eq!(DiscountRate::from_percent(42.0049).bps(), 4_200);
        assert_eq!(DiscountRate::from_percent(0.004).bps(), 0);
        assert_eq!(DiscountRate::from_percent(12.5).percent(), 12.5);

        // The rounded rate is what the totals use
        let subtotal = Money::from_minor(1_000_000);
        let rate = DiscountRate::from_percent(33.337);
        assert_eq!(subtotal.percentage_of(rate).minor(), 333_400);
    }

    #[test]
    fn test_discount_rate_parse_input() {
        assert_eq!(DiscountRate::parse_input("10").bps(), 1_000);
        assert_eq!(DiscountRate::parse_input("  7.5").bps(), 750);
        assert_eq!(DiscountRate::parse_input(".5").bps(), 50);
        assert_eq!(DiscountRate::parse_input("15%").bps(), 1_500);
        assert_eq!(DiscountRate::parse_input("1e1").bps(), 1_000);
        assert_eq!(DiscountRate::parse_input("-5").bps(), 0);
        assert_eq!(DiscountRate::parse_input("").bps(), 0);
        assert_eq!(DiscountRate::parse_input("abc").bps(), 0);
        assert_eq!(DiscountRate::parse_input(".").bps(), 0);
        assert_eq!(DiscountRate::parse_input("۱۲").bps(), 1_200);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12abc"), Some("12"));
        assert_eq!(leading_number("3.14.15"), Some("3.14"));
        assert_eq!(leading_number("5e"), Some("5"));
        assert_eq!(leading_number("-2e-1x"), Some("-2e-1"));
        assert_eq!(leading_number("x1"), None);
        assert_eq!(leading_number("+"), None);
    }

    #[test]
    fn test_invoice_mode_default() {
        assert_eq!(InvoiceMode::default(), InvoiceMode::Empty);
    }
}
