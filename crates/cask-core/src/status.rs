//! # Entity Lifecycle Status
//!
//! One status enumeration shared by orders, order line items and cart
//! lines. Entities compose this type instead of each declaring its own
//! near-identical copy; not every entity uses every state (a line item is
//! only ever Active or Deleted).

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order, line item or cart line.
///
/// Discriminants are explicit and distinct. Completed and Cancelled are
/// different business outcomes and must never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum EntityStatus {
    /// Live and mutable. The initial state of everything.
    Active = 1,
    /// Soft-deleted; kept on record, excluded from pricing and reads.
    Deleted = 2,
    /// Finalized by an external trigger. Terminal for delete and cancel.
    Completed = 3,
    /// Called off before completion.
    Cancelled = 4,
}

impl EntityStatus {
    /// Checks whether the entity is live.
    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, EntityStatus::Active)
    }

    /// Checks whether the entity was soft-deleted.
    #[inline]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, EntityStatus::Deleted)
    }

    /// Checks whether the entity reached completion.
    #[inline]
    pub const fn is_completed(&self) -> bool {
        matches!(self, EntityStatus::Completed)
    }
}

impl Default for EntityStatus {
    fn default() -> Self {
        EntityStatus::Active
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_active() {
        assert_eq!(EntityStatus::default(), EntityStatus::Active);
    }

    #[test]
    fn test_completed_and_cancelled_are_distinct() {
        assert_ne!(EntityStatus::Completed, EntityStatus::Cancelled);
        assert_ne!(
            EntityStatus::Completed as i16,
            EntityStatus::Cancelled as i16
        );
    }

    #[test]
    fn test_predicates() {
        assert!(EntityStatus::Active.is_active());
        assert!(!EntityStatus::Active.is_deleted());
        assert!(EntityStatus::Deleted.is_deleted());
        assert!(EntityStatus::Completed.is_completed());
        assert!(!EntityStatus::Cancelled.is_completed());
    }
}
