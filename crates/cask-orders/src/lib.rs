//! # cask-orders: The Cask Order Service
//!
//! Orchestrates the [`cask_core`] order aggregate behind six operations:
//! create, update, cancel-item, delete, get and list.
//!
//! ## Operation Shape
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │             validate → load → mutate → persist → publish         │
//! │                                                                  │
//! │   request ──► validation ──► OrderStore/CartStore (load)         │
//! │                     │                                            │
//! │                     ▼                                            │
//! │             cask-core aggregate (reconcile, price, guard)        │
//! │                     │                                            │
//! │                     ▼                                            │
//! │             OrderStore (persist) ──► EventPublisher (emit)       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and event delivery are ports ([`store::OrderStore`],
//! [`store::CartStore`], [`events::EventPublisher`]); the crate ships
//! in-memory adapters for tests and the demo binary. There is no locking
//! and no retry logic here: concurrent updates to one order are
//! last-writer-wins, and a failure between persist and publish loses the
//! event. Both gaps are deliberate and documented - resolving them
//! belongs to the storage/broker adapters.

pub mod error;
pub mod events;
pub mod memory;
pub mod service;
pub mod snapshot;
pub mod sort;
pub mod store;
pub mod validation;

pub use error::{ServiceError, ServiceResult};
pub use events::{
    EventPublisher, LoggingEventPublisher, OrderEvent, PublishError, RecordingEventPublisher,
};
pub use memory::{InMemoryCartStore, InMemoryOrderStore};
pub use service::{
    CancelItemAck, CreateOrderRequest, DeleteOrderAck, ListOrdersRequest, OrderPage, OrderService,
    UpdateOrderRequest,
};
pub use snapshot::{LineItemSnapshot, OrderSnapshot};
pub use sort::{OrderBy, SortDirection, SortField};
pub use store::{CartStore, OrderStore, StoreError};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest page size `list_orders` will serve.
pub const MAX_PAGE_SIZE: u32 = 100;
