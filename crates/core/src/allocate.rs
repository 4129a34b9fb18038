// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch allocation planning.
//!
//! This module turns a roster snapshot into an [`AllocationPlan`]: the full
//! groups first, then the remainder group flagged as a leftover, or a single
//! empty placeholder batch when the roster is empty.
//!
//! ## Invariants
//!
//! - Planning is pure: the same inputs always produce the same plan
//! - Batch numbers continue from the caller-supplied next number, which must
//!   be read fresh from storage on every invocation
//! - At most one batch per plan is flagged as a leftover
//! - An empty roster produces exactly one empty, non-leftover shell batch,
//!   so every enabled batch type always has at least one batch
//! - Enrollment status and batch type are never altered by allocation

use crate::error::CoreError;
use crate::plan::{AllocationPlan, PlannedBatch};
use cohort_domain::{
    BatchDateRange, BatchStatus, BatchType, Course, DomainError, Enrollment, batch_date_range,
    partition_roster, validate_batch_size_limit,
};

/// Plans the batch allocation for one batch type of a course.
///
/// The roster must be the current active enrollments of `batch_type`, in the
/// roster reader's stable order; `next_batch_number` must be the highest
/// persisted batch number for `(course, batch_type)` plus one (1 when none
/// exist).
///
/// # Arguments
///
/// * `course` - The persisted course being allocated
/// * `batch_type` - The batch type to allocate
/// * `roster` - Active enrollments of that type, in stable roster order
/// * `next_batch_number` - The first free batch number
///
/// # Returns
///
/// An [`AllocationPlan`] creating `floor(N / limit)` full batches followed
/// by one leftover batch for the remainder, or a single empty shell batch
/// for an empty roster.
///
/// # Errors
///
/// Returns an error if:
/// - The course or any roster entry has no persisted identifier
/// - The course's batch size limit, month, or duration is invalid
pub fn plan_batch_allocation(
    course: &Course,
    batch_type: BatchType,
    roster: &[Enrollment],
    next_batch_number: u32,
) -> Result<AllocationPlan, CoreError> {
    let course_id: i64 = course
        .course_id
        .ok_or(DomainError::UnpersistedEntity("course"))?;
    validate_batch_size_limit(course.batch_size_limit)?;

    let dates: BatchDateRange = batch_date_range(
        course.year,
        course.month,
        course.course_duration_months,
    )?;

    let mut members: Vec<i64> = Vec::with_capacity(roster.len());
    for enrollment in roster {
        members.push(
            enrollment
                .enrollment_id
                .ok_or(DomainError::UnpersistedEntity("enrollment"))?,
        );
    }

    let make_batch = |offset: u32, group: Vec<i64>, is_leftover: bool| PlannedBatch {
        batch_number: next_batch_number + offset,
        name: batch_type.batch_name(next_batch_number + offset),
        max_students: course.batch_size_limit,
        members: group,
        is_leftover,
        status: BatchStatus::Upcoming,
        start_date: dates.start_date,
        end_date: dates.end_date,
        duration_months: course.course_duration_months,
        instructor_id: course.instructor_id,
    };

    // An empty roster still gets a placeholder batch so the course has a
    // batch shell before anyone enrolls. The shell is not a leftover.
    if members.is_empty() {
        return Ok(AllocationPlan {
            course_id,
            batch_type,
            batches: vec![make_batch(0, Vec::new(), false)],
        });
    }

    let partition = partition_roster(&members, course.batch_size_limit)?;

    let mut batches: Vec<PlannedBatch> = Vec::with_capacity(partition.group_count());
    for (index, group) in partition.full_groups.into_iter().enumerate() {
        let offset = u32::try_from(index)
            .map_err(|_| CoreError::Internal(String::from("batch count exceeds u32 range")))?;
        batches.push(make_batch(offset, group, false));
    }
    if !partition.remainder.is_empty() {
        let offset = u32::try_from(batches.len())
            .map_err(|_| CoreError::Internal(String::from("batch count exceeds u32 range")))?;
        batches.push(make_batch(offset, partition.remainder, true));
    }

    Ok(AllocationPlan {
        course_id,
        batch_type,
        batches,
    })
}
