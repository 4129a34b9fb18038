// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course-scoped advisory locking.
//!
//! Allocation, resolution, and recalculation are invoked from independent
//! request contexts that may target the same course concurrently. Each
//! mutating operation holds its course's advisory mutex for its full
//! duration, which serializes the read-max-then-write numbering sequence
//! and keeps a recalculation's delete-and-rebuild exclusive with merges.
//! Read-only summaries do not take the lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of per-course advisory mutexes.
///
/// Lock cells are created on first use and kept for the registry's
/// lifetime; a course identifier always maps to the same mutex.
#[derive(Debug, Default)]
pub struct CourseLockRegistry {
    cells: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl CourseLockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the lock cell for a course, creating it on first use.
    ///
    /// Callers hold the returned mutex for the duration of one logical
    /// operation:
    ///
    /// ```ignore
    /// let cell = locks.cell(course_id);
    /// let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);
    /// // ... allocate / resolve / recalculate ...
    /// ```
    #[must_use]
    pub fn cell(&self, course_id: i64) -> Arc<Mutex<()>> {
        let mut cells = self
            .cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(course_id).or_default())
    }
}
