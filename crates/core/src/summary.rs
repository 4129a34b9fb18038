// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch distribution summarization.
//!
//! This module provides read-only aggregation of a course's batches and
//! active enrollments into the occupancy statistics the administrative
//! views display. It never mutates anything and is computed fresh from the
//! snapshots handed to it, so a caller always sees current state.

use crate::error::CoreError;
use cohort_domain::{Batch, BatchType, Course, DomainError, Enrollment};

/// Batches and student count for one batch type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTypeDistribution {
    /// The batch type summarized.
    pub batch_type: BatchType,
    /// All batches of this type, in storage order.
    pub batches: Vec<Batch>,
    /// Active enrollments of this type.
    pub student_count: usize,
}

/// Course-level capacity utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityUtilization {
    /// The course's total enrollment capacity.
    pub total_capacity: u32,
    /// Active enrollments counted against the capacity.
    pub used_capacity: u32,
    /// Remaining capacity (saturating at zero).
    pub available_capacity: u32,
    /// Rounded percentage of capacity in use. A zero-capacity course
    /// reports 0 rather than dividing by zero.
    pub utilization_percent: u32,
}

/// The full distribution picture for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSummary {
    /// The course summarized.
    pub course_id: i64,
    /// All active enrollments across both types.
    pub total_students: usize,
    /// All batches across both types.
    pub total_batches: usize,
    /// Regular-type distribution.
    pub regular: BatchTypeDistribution,
    /// Revision-type distribution.
    pub revision: BatchTypeDistribution,
    /// Batches currently flagged as leftovers, pending resolution.
    pub leftover_batches: Vec<Batch>,
    /// Capacity utilization across the whole course.
    pub capacity: CapacityUtilization,
}

/// Summarizes the batch distribution for a course.
///
/// Only enrollments in the active set (enrolled/active) count toward
/// student totals and capacity utilization; batches of every status are
/// listed.
///
/// # Arguments
///
/// * `course` - The persisted course
/// * `batches` - All batches of the course
/// * `enrollments` - The course's enrollments (any status; filtered here)
///
/// # Errors
///
/// Returns an error if the course has no persisted identifier.
pub fn summarize_distribution(
    course: &Course,
    batches: &[Batch],
    enrollments: &[Enrollment],
) -> Result<DistributionSummary, CoreError> {
    let course_id: i64 = course
        .course_id
        .ok_or(DomainError::UnpersistedEntity("course"))?;

    let active: Vec<&Enrollment> = enrollments
        .iter()
        .filter(|enrollment| enrollment.status.is_active())
        .collect();

    let distribution_for = |batch_type: BatchType| BatchTypeDistribution {
        batch_type,
        batches: batches
            .iter()
            .filter(|batch| batch.batch_type == batch_type)
            .cloned()
            .collect(),
        student_count: active
            .iter()
            .filter(|enrollment| enrollment.batch_type == batch_type)
            .count(),
    };

    let regular: BatchTypeDistribution = distribution_for(BatchType::Regular);
    let revision: BatchTypeDistribution = distribution_for(BatchType::Revision);

    let leftover_batches: Vec<Batch> = batches
        .iter()
        .filter(|batch| batch.is_leftover_batch)
        .cloned()
        .collect();

    let used_capacity: u32 = u32::try_from(active.len())
        .map_err(|_| CoreError::Internal(String::from("enrollment count exceeds u32 range")))?;
    let capacity: CapacityUtilization = CapacityUtilization {
        total_capacity: course.total_capacity,
        used_capacity,
        available_capacity: course.total_capacity.saturating_sub(used_capacity),
        utilization_percent: utilization_percent(used_capacity, course.total_capacity),
    };

    Ok(DistributionSummary {
        course_id,
        total_students: active.len(),
        total_batches: batches.len(),
        regular,
        revision,
        leftover_batches,
        capacity,
    })
}

/// Computes the rounded percentage of capacity in use.
#[allow(clippy::cast_possible_truncation)]
fn utilization_percent(used: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled: u64 = u64::from(used) * 100;
    let total: u64 = u64::from(total);
    // Safe cast: the rounded percentage of a u32 count fits in u32
    ((scaled + total / 2) / total) as u32
}
