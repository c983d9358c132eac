//! # Money Module
//!
//! Provides the `Money` type for line rates, extended costs and totals.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Quotation lines can have fractional quantities (2.5 m, 0.75 h), so   │
//! │  integer cents are not enough either: 0.75 × 12.34 = 9.255             │
//! │                                                                         │
//! │  OUR SOLUTION: exact base-10 decimals                                   │
//! │    Arithmetic is exact; rounding happens ONCE, when displayed          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rfq_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let rate = Money::new(Decimal::new(1000, 2));     // 10.00
//! let ext = rate.extend(Decimal::from(2));           // 20.00
//! let total = ext + Money::new(Decimal::new(500, 2)); // 25.00
//! assert_eq!(total.to_string(), "25.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Number of fractional digits shown for every monetary value.
pub const DISPLAY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// An exact currency amount.
///
/// ## Design Decisions
/// - **Decimal, not f64**: sums of many lines stay exact
/// - **No currency code**: the currency is implicit in the quotation
/// - **Display rounds**: `Display` always prints two fractional digits,
///   midpoint away from zero (12.345 → "12.35")
///
/// ## Where Money is Used
/// ```text
/// RfqItem.rate ──► Money ──extend(qty)──► extended cost ──Σ──► grand total
///                                               │                   │
///                                               └──── PDF table ◄───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies a unit rate by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use rfq_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Money::new(Decimal::new(1250, 2)); // 12.50
    /// assert_eq!(rate.extend(Decimal::from(3)).to_string(), "37.50");
    /// ```
    ///
    /// Saturates instead of panicking if the product leaves the decimal
    /// range; such values are far outside any real quotation.
    #[inline]
    pub fn extend(&self, qty: Decimal) -> Money {
        Money(self.0.saturating_mul(qty))
    }

    /// Rounds to the display scale, midpoint away from zero.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two fractional digits, no thousands separators, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Quantity Formatting
// =============================================================================

/// Formats a quantity in its natural representation.
///
/// Trailing fractional zeros are dropped so the same quantity prints the
/// same way whether it came from a payload (`2.50`) or the store (`2.5`).
///
/// ```rust
/// use rfq_core::money::format_quantity;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_quantity(Decimal::new(300, 2)), "3");
/// assert_eq!(format_quantity(Decimal::new(250, 2)), "2.5");
/// ```
pub fn format_quantity(qty: Decimal) -> String {
    qty.normalize().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
