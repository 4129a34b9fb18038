// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure roster partitioning.
//!
//! This module splits an ordered roster of enrollment identifiers into
//! fixed-size groups plus at most one remainder group.
//!
//! ## Invariants
//!
//! - Groups partition the roster exactly: no omissions, no duplicates
//! - No group exceeds the capacity; only the remainder may be smaller
//! - Roster order is preserved across and within groups
//! - An empty roster yields zero groups (the empty-course placeholder is a
//!   writer concern, not a partitioner concern)
//!
//! ## Usage
//!
//! Callers must supply the roster in a deterministic order (the roster
//! reader's enrollment-identifier order) so repeated runs are reproducible.

use crate::error::DomainError;
use crate::validation::validate_batch_size_limit;

/// The result of partitioning a roster at a given capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPartition {
    /// Groups of exactly the capacity size, in roster order.
    pub full_groups: Vec<Vec<i64>>,
    /// The trailing group of fewer than capacity members, if any.
    pub remainder: Vec<i64>,
}

impl RosterPartition {
    /// Returns the total number of groups, counting the remainder.
    #[must_use]
    pub const fn group_count(&self) -> usize {
        self.full_groups.len() + if self.remainder.is_empty() { 0 } else { 1 }
    }

    /// Returns whether the partition contains a remainder group.
    #[must_use]
    pub const fn has_remainder(&self) -> bool {
        !self.remainder.is_empty()
    }

    /// Returns whether the roster was empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_groups.is_empty() && self.remainder.is_empty()
    }
}

/// Partitions an ordered roster into groups of at most `capacity` members.
///
/// Produces `floor(N / capacity)` groups of exactly `capacity`, in roster
/// order, followed by one remainder group of `N mod capacity` members when
/// that is nonzero.
///
/// # Arguments
///
/// * `roster` - Enrollment identifiers in the roster reader's stable order
/// * `capacity` - Maximum members per group
///
/// # Errors
///
/// Returns an error if the capacity is outside the permitted batch size
/// range.
pub fn partition_roster(roster: &[i64], capacity: u32) -> Result<RosterPartition, DomainError> {
    validate_batch_size_limit(capacity)?;
    let capacity: usize = capacity as usize;

    let mut full_groups: Vec<Vec<i64>> = Vec::with_capacity(roster.len() / capacity);
    let mut remainder: Vec<i64> = Vec::new();

    for chunk in roster.chunks(capacity) {
        if chunk.len() == capacity {
            full_groups.push(chunk.to_vec());
        } else {
            remainder = chunk.to_vec();
        }
    }

    Ok(RosterPartition {
        full_groups,
        remainder,
    })
}
