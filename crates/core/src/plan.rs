// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cohort_domain::{BatchStatus, BatchType};
use time::Date;

/// One batch the writer should materialize.
///
/// A planned batch carries everything the persistence layer needs to create
/// the batch record and re-point its member enrollments. Member order is
/// roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBatch {
    /// Position in the per-type numbering sequence (1-based).
    pub batch_number: u32,
    /// Display name, e.g. "Regular Batch 3".
    pub name: String,
    /// Capacity of the batch.
    pub max_students: u32,
    /// Enrollment identifiers to assign, in roster order.
    pub members: Vec<i64>,
    /// Whether this batch is flagged as a leftover pending resolution.
    pub is_leftover: bool,
    /// Lifecycle status at creation (always upcoming).
    pub status: BatchStatus,
    /// First teaching day.
    pub start_date: Date,
    /// Last teaching day.
    pub end_date: Date,
    /// Duration in months, copied from the course.
    pub duration_months: u8,
    /// Instructor inherited from the course at planning time.
    pub instructor_id: Option<i64>,
}

impl PlannedBatch {
    /// Returns the number of students this batch will hold.
    #[must_use]
    pub fn student_count(&self) -> u32 {
        u32::try_from(self.members.len()).unwrap_or(u32::MAX)
    }
}

/// The complete writer plan for one `(course, batch type)` allocation.
///
/// Plans are produced by pure planning functions and applied atomically by
/// the persistence layer; the plan itself never touches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    /// The course being allocated.
    pub course_id: i64,
    /// The batch type being allocated.
    pub batch_type: BatchType,
    /// The batches to create, in numbering order. At most the last one is
    /// flagged as a leftover.
    pub batches: Vec<PlannedBatch>,
}

impl AllocationPlan {
    /// Returns the number of batches the plan will create.
    #[must_use]
    pub const fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Returns the total number of students the plan assigns.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.members.len()).sum()
    }

    /// Returns the number of leftover batches in the plan (0 or 1).
    #[must_use]
    pub fn leftover_count(&self) -> usize {
        self.batches.iter().filter(|batch| batch.is_leftover).count()
    }
}
