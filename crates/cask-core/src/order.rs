//! # Order Aggregate
//!
//! The order (sale) aggregate root and its line items.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                            │
//! │                                                                  │
//! │  1. CREATE FROM CART                                             │
//! │     └── Order::from_cart() → Order { status: Active }            │
//! │         (copies every active cart line, prices the total)        │
//! │                                                                  │
//! │  2. MUTATE                                                       │
//! │     └── reconcile_lines() → add / re-quantity / soft-delete      │
//! │     └── cancel_item()     → soft-delete one line                 │
//! │     └── recompute_total() → after every mutation                 │
//! │                                                                  │
//! │  3. TERMINAL STATES                                              │
//! │     └── Completed (external trigger; blocks delete and cancel)   │
//! │     └── Deleted   (mark_deleted(); rows stay for history)        │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is ever physically removed - lines and orders are
//! soft-deleted so the sale history stays auditable.
//!
//! Every mutating operation takes `now` as a parameter; this crate never
//! reads the clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::discount::DiscountFactor;
use crate::error::CoreError;
use crate::money::Money;
use crate::status::EntityStatus;
use crate::validation::{
    check_date_not_past, check_id, check_quantity, check_unit_price, ValidationErrors,
};
use crate::{Cart, OrderId, ProductId, UserId, MAX_ORDER_ITEMS};

// =============================================================================
// Line Item
// =============================================================================

/// One product row owned by an order.
///
/// `discount` and `total_amount` are derived from quantity and unit price;
/// callers never set them directly. [`LineItem::recompute`] refreshes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    /// Owning order. A line item has no life of its own.
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    /// Derived retained-price multiplier for the current quantity.
    pub discount: DiscountFactor,
    /// Derived: quantity × unit price × discount.
    pub total_amount: Money,
    /// Active or Deleted; line items know no other states.
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl LineItem {
    /// Creates a live line item and prices it.
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
        now: DateTime<Utc>,
    ) -> Self {
        let mut item = LineItem {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity,
            unit_price,
            discount: DiscountFactor::NONE,
            total_amount: Money::zero(),
            status: EntityStatus::Active,
            created_at: now,
            updated_at: None,
            deleted_at: None,
        };
        item.recompute();
        item
    }

    /// Refreshes the derived discount and line total from the current
    /// quantity and unit price.
    pub fn recompute(&mut self) {
        self.discount = DiscountFactor::for_quantity(self.quantity);
        self.total_amount = self.discount.apply(self.unit_price.multiply_quantity(self.quantity));
    }

    /// Soft-deletes the line. Irreversible.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.status = EntityStatus::Deleted;
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }

    /// Checks whether the line is live.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// A desired line as supplied by callers: which product, how many, and the
/// price to use **if** the entry creates a new line. Existing lines keep
/// their stored price; only their quantity is reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
}

// =============================================================================
// Order
// =============================================================================

/// The order aggregate root.
///
/// Owns its line items and the derived `total_amount`; all mutation goes
/// through the methods below, each of which leaves the total consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Sequence number assigned by the store at creation; 0 before that.
    pub number: u64,
    pub user_id: UserId,
    /// Branch label the sale is booked under.
    pub branch: String,
    /// Business date of the sale.
    pub date: DateTime<Utc>,
    pub status: EntityStatus,
    /// Derived: sum of every *active* line's total.
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub items: Vec<LineItem>,
}

impl Order {
    /// Builds a new active order as a point-in-time copy of a cart.
    ///
    /// Every active cart line becomes a fresh active line item with the
    /// product id, quantity and unit price preserved verbatim. The cart
    /// is not referenced afterwards - mutating it later never affects the
    /// order created here.
    pub fn from_cart(
        id: OrderId,
        cart: &Cart,
        date: DateTime<Utc>,
        branch: String,
        now: DateTime<Utc>,
    ) -> Self {
        let items = cart
            .active_lines()
            .map(|line| LineItem::new(id, line.product_id, line.quantity, line.unit_price, now))
            .collect();

        let mut order = Order {
            id,
            number: 0,
            user_id: cart.user_id,
            branch,
            date,
            status: EntityStatus::Active,
            total_amount: Money::zero(),
            created_at: now,
            updated_at: None,
            deleted_at: None,
            items,
        };
        order.recompute_total();
        order
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Checks whether the order reached completion.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Live line items, in insertion order.
    pub fn active_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.is_active())
    }

    /// The live line item for `product_id`, if any.
    pub fn find_active_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.is_active() && item.product_id == product_id)
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Reprices every line and refreshes the order total.
    ///
    /// All lines are recomputed - soft-deleted ones included, so their
    /// stored discount/total stay consistent for auditing - but only
    /// active lines are summed. Idempotent: with no mutation in between,
    /// a second call changes nothing.
    pub fn recompute_total(&mut self) {
        for item in &mut self.items {
            item.recompute();
        }

        self.total_amount = self
            .items
            .iter()
            .filter(|item| item.is_active())
            .map(|item| item.total_amount)
            .sum();
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Diffs the order's live lines against the desired `incoming` set and
    /// applies the difference:
    ///
    /// 1. live lines whose product is absent from `incoming` are
    ///    soft-deleted;
    /// 2. incoming entries without a live counterpart append a new line at
    ///    the entry's price;
    /// 3. incoming entries whose quantity differs update the line in
    ///    place; identical quantities are a no-op.
    ///
    /// Duplicate product ids inside `incoming`: the first occurrence wins,
    /// later ones are ignored. An empty `incoming` soft-deletes every live
    /// line. A product whose previous line was soft-deleted gets a brand
    /// new line - the dead row stays for history.
    ///
    /// Callers run [`Order::recompute_total`] afterwards.
    pub fn reconcile_lines(&mut self, incoming: &[LineItemInput], now: DateTime<Utc>) {
        for item in self.items.iter_mut().filter(|item| item.is_active()) {
            let still_wanted = incoming
                .iter()
                .any(|entry| entry.product_id == item.product_id);
            if !still_wanted {
                item.mark_deleted(now);
            }
        }

        let mut seen: HashSet<ProductId> = HashSet::new();
        for entry in incoming {
            if !seen.insert(entry.product_id) {
                continue;
            }

            let existing = self
                .items
                .iter()
                .position(|item| item.is_active() && item.product_id == entry.product_id);

            match existing {
                None => {
                    let order_id = self.id;
                    self.items.push(LineItem::new(
                        order_id,
                        entry.product_id,
                        entry.quantity,
                        entry.unit_price,
                        now,
                    ));
                }
                Some(index) => {
                    let item = &mut self.items[index];
                    if item.quantity != entry.quantity {
                        item.quantity = entry.quantity;
                        item.updated_at = Some(now);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Cancels the live line carrying `product_id`.
    ///
    /// Rejected on a completed order. Returns a copy of the cancelled line
    /// (the event payload) after repricing the order.
    pub fn cancel_item(
        &mut self,
        product_id: ProductId,
        now: DateTime<Utc>,
    ) -> Result<LineItem, CoreError> {
        if self.is_completed() {
            return Err(CoreError::OrderCompleted { id: self.id });
        }

        let index = self
            .items
            .iter()
            .position(|item| item.is_active() && item.product_id == product_id)
            .ok_or(CoreError::ItemNotFound {
                order_id: self.id,
                product_id,
            })?;

        self.items[index].mark_deleted(now);
        let cancelled = self.items[index].clone();

        self.recompute_total();
        self.updated_at = Some(now);

        Ok(cancelled)
    }

    /// Soft-deletes the whole order. Rejected on a completed order.
    ///
    /// Line items are left untouched; the order-level status hides the
    /// sale from reads while keeping every row for history.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        if self.is_completed() {
            return Err(CoreError::OrderCompleted { id: self.id });
        }

        self.status = EntityStatus::Deleted;
        self.deleted_at = Some(now);
        self.updated_at = Some(now);

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Aggregate-level rule set, run before an order is first persisted.
    ///
    /// ## Rules
    /// - user id present
    /// - business date not before `today`
    /// - at least one line item, at most [`MAX_ORDER_ITEMS`] live ones
    /// - per live line: product id present, quantity ≥ 1, unit price > 0,
    ///   derived discount inside the allowed band, derived total > 0
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.record(check_id("userId", self.user_id));
        errors.record(check_date_not_past("date", self.date, today));

        if self.items.is_empty() {
            errors.add("products", "products cannot be empty");
        }

        let active_count = self.active_items().count();
        if active_count > MAX_ORDER_ITEMS {
            errors.add(
                "products",
                format!("products count must be less than or equal to {MAX_ORDER_ITEMS}"),
            );
        }

        for item in self.active_items() {
            errors.record(check_id("products.productId", item.product_id));
            errors.record(check_quantity("products.quantity", item.quantity));
            errors.record(check_unit_price("products.unitPrice", item.unit_price));

            if !item.discount.is_allowed() {
                errors.add("products.discount", "discount is outside the allowed band");
            }

            if !item.total_amount.is_positive() {
                errors.add("products.totalAmount", "must be greater than 0");
            }
        }

        errors.into_result()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;

    fn fixed_now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().expect("valid timestamp")
    }

    fn cart_with(lines: Vec<CartLine>) -> Cart {
        Cart {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: fixed_now(),
            lines,
        }
    }

    fn order_from(lines: Vec<CartLine>) -> Order {
        let cart = cart_with(lines);
        Order::from_cart(
            Uuid::new_v4(),
            &cart,
            fixed_now(),
            "main".to_string(),
            fixed_now(),
        )
    }

    fn entry(product_id: ProductId, quantity: i64, cents: i64) -> LineItemInput {
        LineItemInput {
            product_id,
            quantity,
            unit_price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_from_cart_copies_active_lines_and_prices_total() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let order = order_from(vec![
            CartLine::new(p1, 5, Money::from_cents(1000)),
            CartLine::new(p2, 12, Money::from_cents(800)),
        ]);

        assert_eq!(order.status, EntityStatus::Active);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.number, 0);
        // 45.00 + 76.80
        assert_eq!(order.total_amount.cents(), 12180);

        let first = order.find_active_item(p1).unwrap();
        assert_eq!(first.discount, DiscountFactor::TEN_PERCENT_OFF);
        assert_eq!(first.total_amount.cents(), 4500);
    }

    #[test]
    fn test_from_cart_skips_deleted_cart_lines() {
        let mut dead = CartLine::new(Uuid::new_v4(), 3, Money::from_cents(100));
        dead.status = EntityStatus::Deleted;
        let order = order_from(vec![dead, CartLine::new(Uuid::new_v4(), 2, Money::from_cents(2000))]);

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_amount.cents(), 4000);
    }

    #[test]
    fn test_recompute_total_is_idempotent() {
        let mut order = order_from(vec![
            CartLine::new(Uuid::new_v4(), 6, Money::from_cents(1500)),
            CartLine::new(Uuid::new_v4(), 15, Money::from_cents(1000)),
        ]);

        // 6 × 15.00 × 0.9 = 81.00; 15 × 10.00 × 0.8 = 120.00
        assert_eq!(order.total_amount.cents(), 20100);

        let before = order.clone();
        order.recompute_total();
        assert_eq!(order, before);
    }

    #[test]
    fn test_recompute_total_sums_active_lines_only() {
        let p1 = Uuid::new_v4();
        let mut order = order_from(vec![
            CartLine::new(p1, 2, Money::from_cents(2000)),
            CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000)),
        ]);
        assert_eq!(order.total_amount.cents(), 4000 + 4500);

        order.cancel_item(p1, fixed_now()).unwrap();
        assert_eq!(order.total_amount.cents(), 4500);

        // The dead line keeps consistent stored fields.
        let dead = order.items.iter().find(|i| i.product_id == p1).unwrap();
        assert_eq!(dead.total_amount.cents(), 4000);
    }

    #[test]
    fn test_reconcile_is_a_noop_for_identical_input() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut order = order_from(vec![
            CartLine::new(p1, 5, Money::from_cents(1000)),
            CartLine::new(p2, 12, Money::from_cents(800)),
        ]);
        let before = order.clone();

        let later: DateTime<Utc> = "2025-06-16T08:00:00Z".parse().unwrap();
        order.reconcile_lines(&[entry(p1, 5, 1000), entry(p2, 12, 800)], later);
        order.recompute_total();

        assert_eq!(order, before);
    }

    #[test]
    fn test_reconcile_soft_deletes_missing_products() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut order = order_from(vec![
            CartLine::new(p1, 5, Money::from_cents(1000)),
            CartLine::new(p2, 12, Money::from_cents(800)),
        ]);

        order.reconcile_lines(&[entry(p1, 5, 1000)], fixed_now());
        order.recompute_total();

        assert_eq!(order.active_items().count(), 1);
        assert_eq!(order.total_amount.cents(), 4500);

        let removed = order.items.iter().find(|i| i.product_id == p2).unwrap();
        assert_eq!(removed.status, EntityStatus::Deleted);
        assert!(removed.deleted_at.is_some());
    }

    #[test]
    fn test_reconcile_empty_input_soft_deletes_everything() {
        let mut order = order_from(vec![
            CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000)),
            CartLine::new(Uuid::new_v4(), 12, Money::from_cents(800)),
        ]);

        order.reconcile_lines(&[], fixed_now());
        order.recompute_total();

        assert_eq!(order.active_items().count(), 0);
        assert!(order.total_amount.is_zero());
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_reconcile_updates_quantity_in_place() {
        let p1 = Uuid::new_v4();
        let mut order = order_from(vec![CartLine::new(p1, 2, Money::from_cents(1000))]);
        let line_id = order.items[0].id;

        let later: DateTime<Utc> = "2025-06-16T08:00:00Z".parse().unwrap();
        // Price in the entry is ignored for existing lines.
        order.reconcile_lines(&[entry(p1, 10, 9999)], later);
        order.recompute_total();

        let line = order.find_active_item(p1).unwrap();
        assert_eq!(line.id, line_id);
        assert_eq!(line.quantity, 10);
        assert_eq!(line.unit_price.cents(), 1000);
        assert_eq!(line.updated_at, Some(later));
        // 10 × 10.00 × 0.8
        assert_eq!(order.total_amount.cents(), 8000);
    }

    #[test]
    fn test_reconcile_appends_new_products_at_entry_price() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut order = order_from(vec![CartLine::new(p1, 2, Money::from_cents(1000))]);

        order.reconcile_lines(&[entry(p1, 2, 1000), entry(p2, 4, 500)], fixed_now());
        order.recompute_total();

        let added = order.find_active_item(p2).unwrap();
        assert_eq!(added.order_id, order.id);
        assert_eq!(added.unit_price.cents(), 500);
        // 2 × 10.00 + 4 × 5.00 × 0.9
        assert_eq!(order.total_amount.cents(), 2000 + 1800);
    }

    #[test]
    fn test_reconcile_first_occurrence_wins_on_duplicates() {
        let p1 = Uuid::new_v4();
        let mut order = order_from(vec![CartLine::new(p1, 2, Money::from_cents(1000))]);

        order.reconcile_lines(&[entry(p1, 7, 1000), entry(p1, 99, 1000)], fixed_now());
        order.recompute_total();

        assert_eq!(order.active_items().count(), 1);
        assert_eq!(order.find_active_item(p1).unwrap().quantity, 7);
    }

    #[test]
    fn test_reconcile_readds_previously_deleted_product_as_new_line() {
        let p1 = Uuid::new_v4();
        let mut order = order_from(vec![CartLine::new(p1, 5, Money::from_cents(1000))]);
        let original_line_id = order.items[0].id;

        order.cancel_item(p1, fixed_now()).unwrap();
        order.reconcile_lines(&[entry(p1, 3, 1200)], fixed_now());
        order.recompute_total();

        // Dead row stays; a fresh line carries the product now.
        assert_eq!(order.items.len(), 2);
        let live = order.find_active_item(p1).unwrap();
        assert_ne!(live.id, original_line_id);
        assert_eq!(live.quantity, 3);
        assert_eq!(order.total_amount.cents(), 3600);
    }

    #[test]
    fn test_cancel_item_rejected_on_completed_order() {
        let p1 = Uuid::new_v4();
        let mut order = order_from(vec![CartLine::new(p1, 5, Money::from_cents(1000))]);
        order.status = EntityStatus::Completed;
        let total_before = order.total_amount;

        let err = order.cancel_item(p1, fixed_now()).unwrap_err();
        assert!(matches!(err, CoreError::OrderCompleted { .. }));

        assert!(order.find_active_item(p1).is_some());
        assert_eq!(order.total_amount, total_before);
    }

    #[test]
    fn test_cancel_item_unknown_product_is_not_found() {
        let mut order = order_from(vec![CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000))]);

        let err = order.cancel_item(Uuid::new_v4(), fixed_now()).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { .. }));
    }

    #[test]
    fn test_mark_deleted_rejected_on_completed_order() {
        let mut order = order_from(vec![CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000))]);
        order.status = EntityStatus::Completed;

        assert!(order.mark_deleted(fixed_now()).is_err());
        assert_eq!(order.status, EntityStatus::Completed);
    }

    #[test]
    fn test_mark_deleted_stamps_timestamps() {
        let mut order = order_from(vec![CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000))]);

        order.mark_deleted(fixed_now()).unwrap();
        assert_eq!(order.status, EntityStatus::Deleted);
        assert_eq!(order.deleted_at, Some(fixed_now()));
        assert_eq!(order.updated_at, Some(fixed_now()));
    }

    #[test]
    fn test_validate_accepts_a_well_formed_order() {
        let order = order_from(vec![CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000))]);
        assert!(order.validate(fixed_now().date_naive()).is_ok());
    }

    #[test]
    fn test_validate_collects_every_broken_field() {
        let mut order = order_from(vec![CartLine::new(Uuid::new_v4(), 5, Money::from_cents(1000))]);
        order.user_id = Uuid::nil();
        order.items.clear();
        order.recompute_total();

        let errors = order.validate(fixed_now().date_naive()).unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"userId"));
        assert!(fields.contains(&"products"));
    }

    #[test]
    fn test_validate_rejects_too_many_items() {
        let lines: Vec<CartLine> = (0..MAX_ORDER_ITEMS + 1)
            .map(|_| CartLine::new(Uuid::new_v4(), 1, Money::from_cents(100)))
            .collect();
        let order = order_from(lines);

        let errors = order.validate(fixed_now().date_naive()).unwrap_err();
        assert!(errors.to_string().contains("products count"));
    }

    #[test]
    fn test_validate_rejects_past_dates() {
        let mut order = order_from(vec![CartLine::new(Uuid::new_v4(), 1, Money::from_cents(100))]);
        order.date = "2025-06-10T00:00:00Z".parse().unwrap();

        let errors = order.validate(fixed_now().date_naive()).unwrap_err();
        assert!(errors.errors().iter().any(|e| e.field == "date"));
    }
}
