//! # Domain Error Types
//!
//! Errors raised by the order aggregate itself. Failures that only the
//! service layer can detect (missing order, missing cart, storage trouble)
//! live in `cask-orders`.

use thiserror::Error;

use crate::validation::ValidationErrors;
use crate::{OrderId, ProductId};

/// Business rule violations raised by aggregate operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more fields broke a validation rule.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The order is completed; delete and cancel are no longer allowed.
    #[error("order {id} is completed, the operation is not allowed")]
    OrderCompleted { id: OrderId },

    /// No active line item carries the requested product.
    #[error("product {product_id} not found in order {order_id}")]
    ItemNotFound {
        order_id: OrderId,
        product_id: ProductId,
    },
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
