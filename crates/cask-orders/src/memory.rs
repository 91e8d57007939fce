//! # In-Memory Store Adapters
//!
//! HashMap-backed implementations of the storage ports, used by the test
//! suites and the demo binary. They mimic the read semantics a relational
//! adapter would have: soft-deleted orders are invisible, soft-deleted
//! line items come back as stored.
//!
//! No cross-request coordination: two concurrent updates to the same
//! order are last-writer-wins, exactly like the real service contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use cask_core::{Cart, CartId, Order, OrderId, UserId};

use crate::sort::OrderBy;
use crate::store::{CartStore, OrderStore, StoreError};

// =============================================================================
// Order Store
// =============================================================================

/// In-memory order storage with a process-local sequence counter.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    next_number: AtomicU64,
}

impl InMemoryOrderStore {
    /// Creates an empty store; sequence numbers start at 1.
    pub fn new() -> Self {
        InMemoryOrderStore::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, mut order: Order) -> Result<Order, StoreError> {
        order.number = self.next_number.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(order_id = %order.id, number = order.number, "inserting order");

        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn update(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id) {
            return Err(StoreError::write_failed(
                "order",
                format!("no row for id {}", order.id),
            ));
        }

        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders
            .get(&id)
            .filter(|order| !order.status.is_deleted())
            .cloned())
    }

    async fn get_active_by_user(&self, user_id: UserId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .find(|order| order.user_id == user_id && order.status.is_active())
            .cloned())
    }

    async fn get_page(
        &self,
        page: u32,
        size: u32,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        let mut rows: Vec<Order> = orders
            .values()
            .filter(|order| !order.status.is_deleted())
            .cloned()
            .collect();

        match order_by {
            Some(order_by) => rows.sort_by(|a, b| order_by.compare(a, b)),
            None => rows.sort_by_key(|order| order.id),
        }

        let skip = size as usize * (page as usize).saturating_sub(1);
        Ok(rows.into_iter().skip(skip).take(size as usize).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.len() as u64)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// In-memory cart storage; carts are seeded, never mutated.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<CartId, Cart>>,
}

impl InMemoryCartStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryCartStore::default()
    }

    /// Seeds one cart.
    pub async fn insert(&self, cart: Cart) {
        let mut carts = self.carts.write().await;
        carts.insert(cart.id, cart);
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_by_id(&self, id: CartId) -> Result<Option<Cart>, StoreError> {
        let carts = self.carts.read().await;
        Ok(carts.get(&id).cloned())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
