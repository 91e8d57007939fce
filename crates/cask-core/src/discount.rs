//! # Discount Engine
//!
//! Quantity-tiered pricing as a pure function.
//!
//! ## Tier Table
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  quantity      factor     retained bps     meaning               │
//! │  ─────────     ──────     ────────────     ──────────────────    │
//! │  ≤ 0           1.0        10000            guard value           │
//! │  1..=3         1.0        10000            no discount           │
//! │  4..=9         0.9         9000            10% off               │
//! │  ≥ 10          0.8         8000            20% off               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stored value is a **retained-price multiplier**, not a discount
//! amount: 0.9 means the customer pays 90% of quantity × unit price.
//! Downstream consumers depend on exactly this representation.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Discount Factor
// =============================================================================

/// Retained-price multiplier in basis points (10000 = full price).
///
/// Basis points keep the factor exact where a float would not be:
/// 0.9 is stored as 9000, 0.8 as 8000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscountFactor(u32);

impl DiscountFactor {
    /// Full price - no discount.
    pub const NONE: DiscountFactor = DiscountFactor(10_000);

    /// 10% off: the customer retains 90% of the raw amount.
    pub const TEN_PERCENT_OFF: DiscountFactor = DiscountFactor(9_000);

    /// 20% off: the deepest tier.
    pub const TWENTY_PERCENT_OFF: DiscountFactor = DiscountFactor(8_000);

    /// Derives the factor for a line quantity.
    ///
    /// Zero and negative quantities map to full price; such lines never
    /// survive validation, but the derivation itself must not misprice
    /// them. Quantities of 20 and above stay in the deepest tier - the
    /// per-order cap bounds distinct items, not one line's quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cask_core::DiscountFactor;
    ///
    /// assert_eq!(DiscountFactor::for_quantity(3), DiscountFactor::NONE);
    /// assert_eq!(DiscountFactor::for_quantity(4), DiscountFactor::TEN_PERCENT_OFF);
    /// assert_eq!(DiscountFactor::for_quantity(10), DiscountFactor::TWENTY_PERCENT_OFF);
    /// ```
    pub const fn for_quantity(quantity: i64) -> DiscountFactor {
        match quantity {
            i64::MIN..=3 => DiscountFactor::NONE,
            4..=9 => DiscountFactor::TEN_PERCENT_OFF,
            _ => DiscountFactor::TWENTY_PERCENT_OFF,
        }
    }

    /// Returns the retained share in basis points.
    #[inline]
    pub const fn retained_bps(&self) -> u32 {
        self.0
    }

    /// Checks the factor sits inside the allowed band (80%..=100%).
    #[inline]
    pub const fn is_allowed(&self) -> bool {
        self.0 >= 8_000 && self.0 <= 10_000
    }

    /// Applies the factor to an amount, rounding half up.
    ///
    /// Widened through i128 so large order lines cannot overflow the
    /// intermediate product.
    pub fn apply(&self, amount: Money) -> Money {
        let retained = (amount.cents() as i128 * self.0 as i128 + 5_000) / 10_000;
        Money::from_cents(retained as i64)
    }
}

impl Default for DiscountFactor {
    fn default() -> Self {
        DiscountFactor::NONE
    }
}

// =============================================================================
// Line Total
// =============================================================================

/// Prices one line: quantity × unit price × tier factor.
///
/// ## Example
/// ```rust
/// use cask_core::{line_total, Money};
///
/// // 5 × $10.00 at the 10%-off tier = $45.00
/// assert_eq!(line_total(5, Money::from_cents(1000)).cents(), 4500);
/// ```
pub fn line_total(quantity: i64, unit_price: Money) -> Money {
    DiscountFactor::for_quantity(quantity).apply(unit_price.multiply_quantity(quantity))
}

// =============================================================================
// Unit Tests
// =============================================================================
