//! # Domain Events
//!
//! The closed set of events this service emits, and the publisher port
//! they leave through.
//!
//! ## Delivery Model
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  handler ──► persist ──► publish(event) ──► adapter              │
//! │                                                                  │
//! │  Fire-and-forget from the service's point of view:               │
//! │  • no delivery guarantee (a broker adapter may add one)          │
//! │  • persist/publish is NOT atomic - a failure in between           │
//! │    loses the event and is not compensated here                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Updates emit nothing; only creation, order cancellation and item
//! cancellation are observable downstream.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::snapshot::{LineItemSnapshot, OrderSnapshot};

// =============================================================================
// Event Set
// =============================================================================

/// Everything downstream consumers can learn from this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OrderEvent {
    /// A new order was created from a cart.
    OrderCreated { order: OrderSnapshot },
    /// An order was cancelled (soft-deleted) as a whole.
    OrderCancelled { order: OrderSnapshot },
    /// One line item was cancelled off a live order.
    ItemCancelled {
        item: LineItemSnapshot,
        order: OrderSnapshot,
    },
}

impl OrderEvent {
    /// Stable event name for routing and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated { .. } => "order.created",
            OrderEvent::OrderCancelled { .. } => "order.cancelled",
            OrderEvent::ItemCancelled { .. } => "order.item_cancelled",
        }
    }
}

// =============================================================================
// Publisher Port
// =============================================================================

/// Failure inside a publisher adapter; propagated unchanged, never
/// retried by the service.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("event publish failed: {0}")]
    Failed(String),
}

/// Outbound port for domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hands one event to the transport.
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError>;
}

// Lets tests keep a handle on a publisher while the service owns another.
#[async_trait]
impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError> {
        (**self).publish(event).await
    }
}

// =============================================================================
// Logging Publisher
// =============================================================================

/// Publishes events to the log instead of a message broker.
///
/// The stand-in transport for development and tests; a real broker
/// adapter replaces it without touching the handlers.
#[derive(Debug, Default, Clone)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    /// Creates a logging publisher.
    pub fn new() -> Self {
        LoggingEventPublisher
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(&event)
            .unwrap_or_else(|e| format!("<unserializable event: {e}>"));
        info!(kind = event.kind(), %payload, "event published");

        Ok(())
    }
}

// =============================================================================
// Recording Publisher
// =============================================================================

/// Captures published events for test assertions.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: tokio::sync::Mutex<Vec<OrderEvent>>,
}

impl RecordingEventPublisher {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        RecordingEventPublisher::default()
    }

    /// Returns a copy of everything published so far.
    pub async fn recorded(&self) -> Vec<OrderEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: OrderEvent) -> Result<(), PublishError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
