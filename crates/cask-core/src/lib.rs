//! # cask-core: Pure Business Logic for the Cask Order Service
//!
//! This crate is the **heart** of Cask. It contains the order (sale)
//! aggregate and every rule that prices it, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Cask Architecture                           │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                 cask-orders (Service Layer)                │  │
//! │  │   create_order, update_order, cancel_item, list_orders     │  │
//! │  └─────────────────────────────┬──────────────────────────────┘  │
//! │                                │                                 │
//! │  ┌─────────────────────────────▼──────────────────────────────┐  │
//! │  │              ★ cask-core (THIS CRATE) ★                    │  │
//! │  │                                                            │  │
//! │  │  ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────────┐       │  │
//! │  │  │  money  │ │ discount │ │  order  │ │ validation │       │  │
//! │  │  │  Money  │ │  tiers   │ │  Order  │ │   checks   │       │  │
//! │  │  └─────────┘ └──────────┘ └─────────┘ └────────────┘       │  │
//! │  │                                                            │  │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS         │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`status`] - The shared entity lifecycle status
//! - [`discount`] - Quantity-tiered retained-price multipliers
//! - [`cart`] - Read-only cart snapshot consumed at order creation
//! - [`order`] - The order aggregate: line items, reconciliation, totals
//! - [`validation`] - Field-level business rule checks
//! - [`error`] - Domain error types

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod status;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use discount::{line_total, DiscountFactor};
pub use error::CoreError;
pub use money::Money;
pub use order::{LineItem, LineItemInput, Order};
pub use status::EntityStatus;
pub use validation::{FieldError, ValidationErrors};

use uuid::Uuid;

// =============================================================================
// Identifier Aliases
// =============================================================================
// All entities are keyed by UUID v4. The aliases keep signatures readable;
// the nil UUID is the "empty identifier" rejected by validation.

/// Identifier of an order.
pub type OrderId = Uuid;

/// Identifier of a product referenced by a line item.
pub type ProductId = Uuid;

/// Identifier of the user owning a cart or an order.
pub type UserId = Uuid;

/// Identifier of a cart.
pub type CartId = Uuid;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct line items on a single order.
///
/// ## Business Reason
/// Bounds the size of a checkout. This caps *distinct products*, not the
/// quantity of any one of them; quantities of 20 and above all share the
/// deepest discount tier.
pub const MAX_ORDER_ITEMS: usize = 20;
