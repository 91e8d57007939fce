//! # Service Error Types
//!
//! The failure taxonomy of every operation.
//!
//! ## Error Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                            │
//! │                                                                  │
//! │  cask-core CoreError ─┐                                          │
//! │  ValidationErrors ────┼──► ServiceError (this module)            │
//! │  StoreError ──────────┤      │                                   │
//! │  PublishError ────────┘      ▼                                   │
//! │                      caller (web layer, out of scope)            │
//! │                                                                  │
//! │  Infrastructure failures pass through unchanged - never          │
//! │  swallowed, never retried.                                       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use uuid::Uuid;

use cask_core::{CoreError, ValidationErrors};

use crate::events::PublishError;
use crate::store::StoreError;

/// Convenience alias for operation results.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Everything an operation can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request broke one or more validation rules.
    /// Carries every broken field, not just the first.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A referenced entity does not exist (or is not active).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// The current lifecycle state forbids the operation.
    #[error("{0}")]
    Conflict(String),

    /// Storage failure, unchanged from the adapter.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Publisher failure, unchanged from the adapter.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl ServiceError {
    /// Creates a NotFound error.
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ServiceError::NotFound { entity, id }
    }

    /// Creates a Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<CoreError> for ServiceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(errors) => ServiceError::Validation(errors),
            CoreError::OrderCompleted { id } => ServiceError::Conflict(format!(
                "order {id} is completed, the operation is not allowed"
            )),
            CoreError::ItemNotFound { product_id, .. } => ServiceError::NotFound {
                entity: "product",
                id: product_id,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
