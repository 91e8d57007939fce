//! # List Ordering
//!
//! Parses the caller-supplied order string for `list_orders` and applies
//! it to in-memory rows.
//!
//! ## Format
//! ```text
//! "field [asc|desc], field2 [asc|desc]"
//!
//! - direction defaults to asc
//! - fields and directions are case-insensitive
//! - allowed fields: id, userId, date
//! - one unknown field or malformed part rejects the WHOLE string
//! ```
//!
//! Composite ordering applies fields left to right, each with its own
//! direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use cask_core::{FieldError, Order};

// =============================================================================
// Sort Field & Direction
// =============================================================================

/// Orderable columns. Everything else fails validation rather than being
/// silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    UserId,
    Date,
}

impl SortField {
    fn parse(input: &str) -> Option<SortField> {
        if input.eq_ignore_ascii_case("id") {
            Some(SortField::Id)
        } else if input.eq_ignore_ascii_case("userId") {
            Some(SortField::UserId)
        } else if input.eq_ignore_ascii_case("date") {
            Some(SortField::Date)
        } else {
            None
        }
    }

    fn compare(&self, a: &Order, b: &Order) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::UserId => a.user_id.cmp(&b.user_id),
            SortField::Date => a.date.cmp(&b.date),
        }
    }
}

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn parse(input: &str) -> Option<SortDirection> {
        if input.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Ascending)
        } else if input.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Descending)
        } else {
            None
        }
    }
}

// =============================================================================
// OrderBy
// =============================================================================

/// A validated composite ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    keys: Vec<(SortField, SortDirection)>,
}

impl OrderBy {
    /// Parses `"field [asc|desc], field2 [asc|desc]"`.
    ///
    /// ## Example
    /// ```rust
    /// use cask_orders::OrderBy;
    ///
    /// assert!(OrderBy::parse("date desc, id").is_ok());
    /// assert!(OrderBy::parse("branch desc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<OrderBy, FieldError> {
        let invalid = || {
            FieldError::new(
                "order",
                "must be in the format 'field [asc|desc], field2 [asc|desc]' \
                 with fields one of: id, userId, date",
            )
        };

        let mut keys = Vec::new();

        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid());
            }

            let (field, direction) = match part.split_once(' ') {
                None => (part, "asc"),
                Some((field, direction)) => (field.trim(), direction.trim()),
            };

            let field = SortField::parse(field).ok_or_else(invalid)?;
            let direction = SortDirection::parse(direction).ok_or_else(invalid)?;
            keys.push((field, direction));
        }

        Ok(OrderBy { keys })
    }

    /// The parsed keys, left to right.
    pub fn keys(&self) -> &[(SortField, SortDirection)] {
        &self.keys
    }

    /// Compares two orders under this composite ordering.
    pub fn compare(&self, a: &Order, b: &Order) -> Ordering {
        for (field, direction) in &self.keys {
            let ordering = match direction {
                SortDirection::Ascending => field.compare(a, b),
                SortDirection::Descending => field.compare(a, b).reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
