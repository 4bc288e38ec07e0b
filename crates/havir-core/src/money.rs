//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point percentages:                                       │
//! │    33_333 × 0.15 = 4999.95 (or 4999.949999... depending on order)       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + basis points                       │
//! │    33_333 × 1500 bps = 49_999_500 / 10_000 → 5000 (half-up)             │
//! │    Every total is an exact integer, rounding happens ONCE               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A "minor unit" is the smallest amount the counter bills in. For Toman
//! (0 decimals) that is one Toman; for a 2-decimal currency it is one cent.
//! The catalog loader converts menu prices into minor units once, using the
//! configured [`CurrencyFormat`](crate::locale::CurrencyFormat).
//!
//! ## Usage
//! ```rust
//! use havir_core::money::Money;
//! use havir_core::types::DiscountRate;
//!
//! let tea = Money::from_minor(20_000);
//! let line = tea.multiply_quantity(2);
//! assert_eq!(line.minor(), 40_000);
//!
//! let discount = line.percentage_of(DiscountRate::from_percent(10.0));
//! assert_eq!(discount.minor(), 4_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are subtracted, and views print them as
///   negative amounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: `+`, `-`, sums and quantity products stop at
///   `i64::MAX`/`i64::MIN` instead of wrapping or panicking
///
/// ## Where Money Flows
/// ```text
/// MenuEntry.price ──► LineItem line total ──► Totals.subtotal
///                                                   │
///                              DiscountRate ──► Totals.discount_amount
///                                                   │
///                                                   ▼
///                                             Totals.total ──► Receipt
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::money::Money;
    ///
    /// let price = Money::from_minor(45_000);
    /// assert_eq!(price.minor(), 45_000);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity, saturating at `i64::MAX`.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(35_000);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 105_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `rate` percent of this amount, rounded half-up to the minor unit.
    ///
    /// ## Implementation
    /// Integer math on `i128`: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::money::Money;
    /// use havir_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_minor(33_333);
    /// let rate = DiscountRate::from_bps(1500); // 15%
    /// // 33_333 × 15% = 4999.95 → 5000
    /// assert_eq!(subtotal.percentage_of(rate).minor(), 5_000);
    /// ```
    pub fn percentage_of(&self, rate: DiscountRate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain minor-unit amount, for logs and debugging.
///
/// Receipts go through [`crate::locale`] for grouping, digits and currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
