//! # Storage Ports
//!
//! Contracts the order service consumes; persistence technology lives in
//! adapters. The in-memory adapters in [`crate::memory`] implement these
//! for tests and the demo binary.
//!
//! ## Read Semantics
//! Soft-deleted orders are invisible to `get_by_id` and `get_page`.
//! Soft-deleted *line items* are returned as stored - domain logic
//! filters by status where it matters, and history stays readable.

use async_trait::async_trait;
use thiserror::Error;

use cask_core::{Cart, CartId, Order, OrderId, UserId};

use crate::sort::OrderBy;

// =============================================================================
// Store Error
// =============================================================================

/// Infrastructure failure inside a storage adapter.
///
/// The service propagates these unchanged - no retries, no swallowing.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write could not be applied.
    #[error("{entity} could not be persisted: {reason}")]
    WriteFailed { entity: &'static str, reason: String },

    /// A read could not be served.
    #[error("{entity} could not be read: {reason}")]
    ReadFailed { entity: &'static str, reason: String },

    /// The backend is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates a WriteFailed error.
    pub fn write_failed(entity: &'static str, reason: impl Into<String>) -> Self {
        StoreError::WriteFailed {
            entity,
            reason: reason.into(),
        }
    }

    /// Creates a ReadFailed error.
    pub fn read_failed(entity: &'static str, reason: impl Into<String>) -> Self {
        StoreError::ReadFailed {
            entity,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Order Store
// =============================================================================

/// Storage contract for the order aggregate.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and assigns its sequence number.
    /// Returns the order as stored.
    async fn create(&self, order: Order) -> Result<Order, StoreError>;

    /// Persists the current state of an existing order.
    async fn update(&self, order: &Order) -> Result<(), StoreError>;

    /// Fetches an order by id. Soft-deleted orders read as absent.
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Fetches the user's active order, if one exists.
    async fn get_active_by_user(&self, user_id: UserId) -> Result<Option<Order>, StoreError>;

    /// Fetches one page: `skip = size × (page − 1)`, `take = size`,
    /// ordered by `order_by` (id ascending when absent).
    async fn get_page(
        &self,
        page: u32,
        size: u32,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<Order>, StoreError>;

    /// Total number of orders on record.
    async fn count(&self) -> Result<u64, StoreError>;
}

// =============================================================================
// Cart Store
// =============================================================================

/// Read-only access to carts owned by the cart service.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetches a cart by id.
    async fn get_by_id(&self, id: CartId) -> Result<Option<Cart>, StoreError>;
}

// =============================================================================
// Shared-Handle Delegation
// =============================================================================
// Lets callers keep a handle on an adapter (assertions, seeding) while the
// service owns another.

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for std::sync::Arc<T> {
    async fn create(&self, order: Order) -> Result<Order, StoreError> {
        (**self).create(order).await
    }

    async fn update(&self, order: &Order) -> Result<(), StoreError> {
        (**self).update(order).await
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn get_active_by_user(&self, user_id: UserId) -> Result<Option<Order>, StoreError> {
        (**self).get_active_by_user(user_id).await
    }

    async fn get_page(
        &self,
        page: u32,
        size: u32,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<Order>, StoreError> {
        (**self).get_page(page, size, order_by).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        (**self).count().await
    }
}

#[async_trait]
impl<T: CartStore + ?Sized> CartStore for std::sync::Arc<T> {
    async fn get_by_id(&self, id: CartId) -> Result<Option<Cart>, StoreError> {
        (**self).get_by_id(id).await
    }
}
