//! # Order Operations
//!
//! The six operations of the order service, each following the same
//! sequence: validate → load → mutate → persist → publish.
//!
//! ## Operations
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  create_order   cart snapshot → new Active order + OrderCreated  │
//! │  update_order   reconcile lines, reprice, read back              │
//! │  cancel_item    soft-delete one line + ItemCancelled             │
//! │  delete_order   soft-delete the order + OrderCancelled           │
//! │  get_order      read one snapshot                                │
//! │  list_orders    page + composite ordering + total count          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One request is one synchronous pass; the service holds no state of
//! its own beyond the injected ports. `Utc::now()` is captured once per
//! operation and passed into the aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use cask_core::{Cart, CartId, LineItemInput, Order, OrderId, ProductId, UserId};

use crate::error::{ServiceError, ServiceResult};
use crate::events::{EventPublisher, OrderEvent};
use crate::snapshot::{LineItemSnapshot, OrderSnapshot};
use crate::store::{CartStore, OrderStore};
use crate::validation::{
    validate_cancel_item, validate_create_order, validate_list_orders, validate_order_id,
    validate_update_order,
};

// =============================================================================
// Requests & Results
// =============================================================================

/// Input for `create_order`: which cart to snapshot, booked for which
/// business date, under which branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub cart_id: CartId,
    pub date: DateTime<Utc>,
    pub branch: String,
}

/// Input for `update_order`: the desired state of the order's header and
/// line set. Lines absent from `items` are cancelled; see
/// [`cask_core::Order::reconcile_lines`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub id: OrderId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub items: Vec<LineItemInput>,
}

/// Input for `list_orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersRequest {
    /// 1-based page number.
    pub page: u32,
    /// Rows per page, 1..=[`crate::MAX_PAGE_SIZE`].
    pub size: u32,
    /// Optional `"field [asc|desc], ..."` ordering over id, userId, date.
    pub order_by: Option<String>,
}

/// One page of orders plus the total row count for paging UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub items: Vec<OrderSnapshot>,
    pub total_items: u64,
}

/// Acknowledgement of a cancelled line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelItemAck {
    pub order_id: OrderId,
    pub product_id: ProductId,
}

/// Acknowledgement of a deleted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderAck {
    pub id: OrderId,
}

// =============================================================================
// Service
// =============================================================================

/// The order service: handlers wired to storage and publisher ports.
#[derive(Debug, Clone)]
pub struct OrderService<O, C, P> {
    orders: O,
    carts: C,
    publisher: P,
}

impl<O, C, P> OrderService<O, C, P>
where
    O: OrderStore,
    C: CartStore,
    P: EventPublisher,
{
    /// Wires a service to its ports.
    pub fn new(orders: O, carts: C, publisher: P) -> Self {
        OrderService {
            orders,
            carts,
            publisher,
        }
    }

    // -------------------------------------------------------------------------
    // Create
    // -------------------------------------------------------------------------

    /// Creates a new active order as a point-in-time copy of a cart.
    ///
    /// Fails NotFound when the cart does not resolve and Conflict when the
    /// cart's user already has an active order. Nothing is persisted and
    /// no event is emitted on any failure path.
    pub async fn create_order(&self, request: CreateOrderRequest) -> ServiceResult<OrderSnapshot> {
        let now = Utc::now();
        debug!(cart_id = %request.cart_id, branch = %request.branch, "create_order");

        validate_create_order(&request, now.date_naive())?;

        let cart: Cart = self
            .carts
            .get_by_id(request.cart_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("cart", request.cart_id))?;

        if let Some(existing) = self.orders.get_active_by_user(cart.user_id).await? {
            return Err(ServiceError::conflict(format!(
                "user {} already has an active order {}",
                cart.user_id, existing.id
            )));
        }

        let order = Order::from_cart(
            Uuid::new_v4(),
            &cart,
            request.date,
            request.branch,
            now,
        );
        order.validate(now.date_naive())?;

        let created = self.orders.create(order).await?;
        let snapshot = OrderSnapshot::from(&created);

        self.publisher
            .publish(OrderEvent::OrderCreated {
                order: snapshot.clone(),
            })
            .await?;

        info!(
            order_id = %created.id,
            number = created.number,
            total = %created.total_amount,
            "order created"
        );
        Ok(snapshot)
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Applies header changes and reconciles the line set, then reads the
    /// order back and returns the refreshed snapshot.
    pub async fn update_order(&self, request: UpdateOrderRequest) -> ServiceResult<OrderSnapshot> {
        let now = Utc::now();
        debug!(order_id = %request.id, items = request.items.len(), "update_order");

        validate_update_order(&request, now.date_naive())?;

        let mut order = self
            .orders
            .get_by_id(request.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", request.id))?;

        order.user_id = request.user_id;
        order.date = request.date;
        order.updated_at = Some(now);

        order.reconcile_lines(&request.items, now);
        order.recompute_total();

        self.orders.update(&order).await?;

        let refreshed = self
            .orders
            .get_by_id(request.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", request.id))?;

        info!(order_id = %refreshed.id, total = %refreshed.total_amount, "order updated");
        Ok(OrderSnapshot::from(&refreshed))
    }

    // -------------------------------------------------------------------------
    // Cancel Item
    // -------------------------------------------------------------------------

    /// Cancels one live line item off an order.
    ///
    /// Conflict on a completed order; NotFound when the order is missing
    /// or carries no live line for the product.
    pub async fn cancel_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> ServiceResult<CancelItemAck> {
        let now = Utc::now();
        debug!(%order_id, %product_id, "cancel_item");

        validate_cancel_item(order_id, product_id)?;

        let mut order = self
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", order_id))?;

        let cancelled = order.cancel_item(product_id, now)?;

        self.orders.update(&order).await?;

        self.publisher
            .publish(OrderEvent::ItemCancelled {
                item: LineItemSnapshot::from(&cancelled),
                order: OrderSnapshot::from(&order),
            })
            .await?;

        info!(%order_id, %product_id, total = %order.total_amount, "item cancelled");
        Ok(CancelItemAck {
            order_id,
            product_id,
        })
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    /// Soft-deletes an order. Conflict when it is completed.
    pub async fn delete_order(&self, id: OrderId) -> ServiceResult<DeleteOrderAck> {
        let now = Utc::now();
        debug!(order_id = %id, "delete_order");

        validate_order_id(id)?;

        let mut order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", id))?;

        order.mark_deleted(now)?;

        self.orders.update(&order).await?;

        self.publisher
            .publish(OrderEvent::OrderCancelled {
                order: OrderSnapshot::from(&order),
            })
            .await?;

        info!(order_id = %id, "order deleted");
        Ok(DeleteOrderAck { id })
    }

    // -------------------------------------------------------------------------
    // Get
    // -------------------------------------------------------------------------

    /// Reads one order.
    pub async fn get_order(&self, id: OrderId) -> ServiceResult<OrderSnapshot> {
        debug!(order_id = %id, "get_order");

        validate_order_id(id)?;

        let order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", id))?;

        Ok(OrderSnapshot::from(&order))
    }

    // -------------------------------------------------------------------------
    // List
    // -------------------------------------------------------------------------

    /// Reads one page of orders plus the total row count.
    pub async fn list_orders(&self, request: ListOrdersRequest) -> ServiceResult<OrderPage> {
        debug!(page = request.page, size = request.size, "list_orders");

        let order_by = validate_list_orders(&request)?;

        let orders = self
            .orders
            .get_page(request.page, request.size, order_by.as_ref())
            .await?;
        let total_items = self.orders.count().await?;

        Ok(OrderPage {
            items: orders.iter().map(OrderSnapshot::from).collect(),
            total_items,
        })
    }
}
