// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// The smallest permitted per-batch size limit.
pub const MIN_BATCH_SIZE_LIMIT: u32 = 1;

/// The largest permitted per-batch size limit.
pub const MAX_BATCH_SIZE_LIMIT: u32 = 100;

/// Validates a per-batch size limit.
///
/// # Errors
///
/// Returns an error if the limit is outside the range
/// [`MIN_BATCH_SIZE_LIMIT`], [`MAX_BATCH_SIZE_LIMIT`].
pub const fn validate_batch_size_limit(limit: u32) -> Result<(), DomainError> {
    if limit >= MIN_BATCH_SIZE_LIMIT && limit <= MAX_BATCH_SIZE_LIMIT {
        Ok(())
    } else {
        Err(DomainError::InvalidBatchSizeLimit { limit })
    }
}

/// Validates a calendar month value.
///
/// # Errors
///
/// Returns an error if the month is not in the range 1-12.
pub const fn validate_month(month: u8) -> Result<(), DomainError> {
    if month >= 1 && month <= 12 {
        Ok(())
    } else {
        Err(DomainError::InvalidMonth { month })
    }
}

/// Validates a course duration.
///
/// # Errors
///
/// Returns an error if the duration is zero months.
pub const fn validate_course_duration(months: u8) -> Result<(), DomainError> {
    if months >= 1 {
        Ok(())
    } else {
        Err(DomainError::InvalidCourseDuration { months })
    }
}

/// Validates that a merge would keep the target batch within capacity.
///
/// This is the merge precondition: the combined student count must not
/// exceed the target's capacity. A combined count exactly equal to the
/// capacity is permitted.
///
/// # Arguments
///
/// * `target_batch_id` - The target batch's identifier (for error reporting)
/// * `target_current` - Students already in the target batch
/// * `incoming` - Students that would be transferred from the source
/// * `target_max` - The target batch's capacity
///
/// # Errors
///
/// Returns `DomainError::CapacityExceeded` if the combined count would
/// exceed the target's capacity.
pub const fn validate_merge_capacity(
    target_batch_id: i64,
    target_current: u32,
    incoming: u32,
    target_max: u32,
) -> Result<(), DomainError> {
    // checked_sub also rejects a target already past its capacity
    match target_max.checked_sub(target_current) {
        Some(available) if incoming <= available => Ok(()),
        _ => Err(DomainError::CapacityExceeded {
            batch_id: target_batch_id,
            current_students: target_current,
            incoming_students: incoming,
            max_students: target_max,
        }),
    }
}

/// Validates the occupancy invariant for a batch.
///
/// `current_students` may never exceed `max_students`; a violation is a
/// hard error, never silently truncated.
///
/// # Errors
///
/// Returns `DomainError::OccupancyViolation` if the batch holds more
/// students than its capacity.
pub const fn validate_batch_occupancy(
    batch_id: i64,
    current_students: u32,
    max_students: u32,
) -> Result<(), DomainError> {
    if current_students > max_students {
        Err(DomainError::OccupancyViolation {
            batch_id,
            current_students,
            max_students,
        })
    } else {
        Ok(())
    }
}
