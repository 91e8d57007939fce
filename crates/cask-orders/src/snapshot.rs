//! # Order Snapshots
//!
//! The read view handed back by every operation and carried inside
//! events. A snapshot is a plain copy - holding one never observes later
//! mutations of the aggregate.
//!
//! Only live line items appear in a snapshot; cancelled lines are history,
//! not part of the order as callers see it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cask_core::{
    DiscountFactor, EntityStatus, LineItem, Money, Order, OrderId, ProductId, UserId,
};

/// Read view of one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub number: u64,
    pub user_id: UserId,
    pub branch: String,
    pub date: DateTime<Utc>,
    pub status: EntityStatus,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<LineItemSnapshot>,
}

/// Read view of one live line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemSnapshot {
    pub id: Uuid,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    /// Retained-price multiplier in basis points (10000 = full price).
    pub discount: DiscountFactor,
    pub total_amount: Money,
    pub status: EntityStatus,
}

impl From<&Order> for OrderSnapshot {
    fn from(order: &Order) -> Self {
        OrderSnapshot {
            id: order.id,
            number: order.number,
            user_id: order.user_id,
            branch: order.branch.clone(),
            date: order.date,
            status: order.status,
            total_amount: order.total_amount,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items: order.active_items().map(LineItemSnapshot::from).collect(),
        }
    }
}

impl From<&LineItem> for LineItemSnapshot {
    fn from(item: &LineItem) -> Self {
        LineItemSnapshot {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
            total_amount: item.total_amount,
            status: item.status,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
