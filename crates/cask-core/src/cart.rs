//! # Cart Snapshot
//!
//! The read-only cart data consumed when an order is created. The cart
//! service owns carts; this crate only ever *copies* from one. Once an
//! order exists, later changes to the source cart never reach it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::status::EntityStatus;
use crate::{CartId, ProductId, UserId};

/// A cart as handed over by the cart service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    /// Business date the cart was assembled for.
    pub date: DateTime<Utc>,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Lines that are still live; only these are copied into an order.
    pub fn active_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|line| line.status.is_active())
    }
}

/// One product row in a cart: what, how many, at which pre-agreed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    pub status: EntityStatus,
}

impl CartLine {
    /// Creates a live cart line.
    pub fn new(product_id: ProductId, quantity: i64, unit_price: Money) -> Self {
        CartLine {
            product_id,
            quantity,
            unit_price,
            status: EntityStatus::Active,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
