//! # Request Validation
//!
//! One validator per operation, composed from the field checks in
//! [`cask_core::validation`]. Each collects every broken field before
//! failing, so callers can report the full list at once.
//!
//! Validation here covers request shape; aggregate-level rules run in
//! [`cask_core::Order::validate`] before an order is first persisted.

use chrono::NaiveDate;
use uuid::Uuid;

use cask_core::validation::{
    check_date_not_past, check_id, check_quantity, check_unit_price, ValidationErrors,
};
use cask_core::MAX_ORDER_ITEMS;

use crate::service::{CreateOrderRequest, ListOrdersRequest, UpdateOrderRequest};
use crate::sort::OrderBy;
use crate::MAX_PAGE_SIZE;

/// Rules for `create_order`: cart id present, business date not past.
pub fn validate_create_order(
    request: &CreateOrderRequest,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.record(check_id("cartId", request.cart_id));
    errors.record(check_date_not_past("date", request.date, today));

    errors.into_result()
}

/// Rules for `update_order`: ids present, date not past, a non-empty,
/// bounded product list with well-formed entries.
pub fn validate_update_order(
    request: &UpdateOrderRequest,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.record(check_id("id", request.id));
    errors.record(check_id("userId", request.user_id));
    errors.record(check_date_not_past("date", request.date, today));

    if request.items.is_empty() {
        errors.add("products", "products cannot be empty");
    }

    if request.items.len() > MAX_ORDER_ITEMS {
        errors.add(
            "products",
            format!("products count must be less than or equal to {MAX_ORDER_ITEMS}"),
        );
    }

    for entry in &request.items {
        errors.record(check_id("products.productId", entry.product_id));
        errors.record(check_quantity("products.quantity", entry.quantity));
        errors.record(check_unit_price("products.unitPrice", entry.unit_price));
    }

    errors.into_result()
}

/// Rules for `cancel_item`: both identifiers present.
pub fn validate_cancel_item(order_id: Uuid, product_id: Uuid) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.record(check_id("id", order_id));
    errors.record(check_id("productId", product_id));

    errors.into_result()
}

/// Rules for `delete_order` and `get_order`: identifier present.
pub fn validate_order_id(id: Uuid) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.record(check_id("id", id));

    errors.into_result()
}

/// Rules for `list_orders`: page ≥ 1, size within bounds, and - when an
/// order string is supplied - a parseable, allow-listed ordering. Returns
/// the parsed ordering so the store applies exactly what was validated.
pub fn validate_list_orders(
    request: &ListOrdersRequest,
) -> Result<Option<OrderBy>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if request.page < 1 {
        errors.add("page", "page number must be greater than or equal to 1");
    }

    if request.size < 1 || request.size > MAX_PAGE_SIZE {
        errors.add("size", format!("size must be between 1 and {MAX_PAGE_SIZE}"));
    }

    let order_by = match request.order_by.as_deref() {
        None => None,
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => match OrderBy::parse(raw) {
            Ok(order_by) => Some(order_by),
            Err(error) => {
                errors.push(error);
                None
            }
        },
    };

    errors.into_result().map(|()| order_by)
}

// =============================================================================
// Unit Tests
// =============================================================================
