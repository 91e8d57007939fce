//! # Validation Module
//!
//! Field-level business rule checks.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                           │
//! │                                                                  │
//! │  Layer 1: Request validation (cask-orders)                       │
//! │  ├── ids present, dates sane, line entries well-formed           │
//! │  └── composed from the checks in THIS MODULE                     │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  Layer 2: Aggregate validation (Order::validate)                 │
//! │  ├── item count bounds, derived fields inside allowed bands      │
//! │  └── runs before an order is first persisted                     │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each check is a pure function returning `Option<FieldError>`; callers
//! collect them into a [`ValidationErrors`] list so a response can report
//! every broken field at once, not just the first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Error Carriers
// =============================================================================

/// One broken field: which field, and what rule it broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Request/entity field the rule applies to, e.g. `products.quantity`.
    pub field: String,
    /// Human-readable rule description.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation failures for one request or entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty collector.
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    /// Adds a failure for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Adds an already-built failure.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Records the outcome of a single check, if it failed.
    pub fn record(&mut self, outcome: Option<FieldError>) {
        if let Some(error) = outcome {
            self.0.push(error);
        }
    }

    /// Checks whether any failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded failures, in check order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Resolves the collector: `Ok(())` when clean, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Identifier Checks
// =============================================================================

/// Rejects the nil UUID.
///
/// ## Example
/// ```rust
/// use cask_core::validation::check_id;
/// use uuid::Uuid;
///
/// assert!(check_id("cartId", Uuid::new_v4()).is_none());
/// assert!(check_id("cartId", Uuid::nil()).is_some());
/// ```
pub fn check_id(field: &str, id: Uuid) -> Option<FieldError> {
    if id.is_nil() {
        return Some(FieldError::new(field, "must be a non-empty identifier"));
    }

    None
}

// =============================================================================
// Numeric Checks
// =============================================================================

/// Quantity must be at least 1.
pub fn check_quantity(field: &str, quantity: i64) -> Option<FieldError> {
    if quantity < 1 {
        return Some(FieldError::new(field, "must be greater or equal than 1"));
    }

    None
}

/// Unit price must be strictly positive.
pub fn check_unit_price(field: &str, unit_price: Money) -> Option<FieldError> {
    if !unit_price.is_positive() {
        return Some(FieldError::new(field, "must be greater than 0"));
    }

    None
}

// =============================================================================
// Date Checks
// =============================================================================

/// Business date must not fall before today.
///
/// Day granularity: any moment of the current day passes.
pub fn check_date_not_past(
    field: &str,
    date: DateTime<Utc>,
    today: NaiveDate,
) -> Option<FieldError> {
    if date.date_naive() < today {
        return Some(FieldError::new(field, "must be on or after today"));
    }

    None
}

// =============================================================================
// Unit Tests
// =============================================================================
