// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{
    MAX_BATCH_SIZE_LIMIT, MIN_BATCH_SIZE_LIMIT, validate_batch_occupancy,
    validate_batch_size_limit, validate_course_duration, validate_merge_capacity, validate_month,
};

#[test]
fn test_batch_size_limit_bounds() {
    assert!(validate_batch_size_limit(MIN_BATCH_SIZE_LIMIT).is_ok());
    assert!(validate_batch_size_limit(25).is_ok());
    assert!(validate_batch_size_limit(MAX_BATCH_SIZE_LIMIT).is_ok());
    assert_eq!(
        validate_batch_size_limit(0),
        Err(DomainError::InvalidBatchSizeLimit { limit: 0 })
    );
    assert_eq!(
        validate_batch_size_limit(101),
        Err(DomainError::InvalidBatchSizeLimit { limit: 101 })
    );
}

#[test]
fn test_month_bounds() {
    assert!(validate_month(1).is_ok());
    assert!(validate_month(12).is_ok());
    assert_eq!(validate_month(0), Err(DomainError::InvalidMonth { month: 0 }));
    assert_eq!(
        validate_month(13),
        Err(DomainError::InvalidMonth { month: 13 })
    );
}

#[test]
fn test_course_duration_bounds() {
    assert!(validate_course_duration(1).is_ok());
    assert!(validate_course_duration(12).is_ok());
    assert_eq!(
        validate_course_duration(0),
        Err(DomainError::InvalidCourseDuration { months: 0 })
    );
}

#[test]
fn test_merge_capacity_exact_fit_succeeds() {
    // 18 + 7 == 25: filling the target to exactly its capacity is allowed
    assert!(validate_merge_capacity(2, 18, 7, 25).is_ok());
}

#[test]
fn test_merge_capacity_one_over_fails() {
    let result = validate_merge_capacity(2, 19, 7, 25);
    assert_eq!(
        result,
        Err(DomainError::CapacityExceeded {
            batch_id: 2,
            current_students: 19,
            incoming_students: 7,
            max_students: 25,
        })
    );
}

#[test]
fn test_merge_capacity_boundary_sweep() {
    for current in 0..=25 {
        let result = validate_merge_capacity(2, current, 7, 25);
        if current + 7 <= 25 {
            assert!(result.is_ok(), "current={current} should fit");
        } else {
            assert!(result.is_err(), "current={current} should overflow");
        }
    }
}

#[test]
fn test_merge_capacity_overfull_target_rejected() {
    // A target already past its capacity can never accept a transfer
    assert!(validate_merge_capacity(2, 30, 0, 25).is_err());
}

#[test]
fn test_merge_of_zero_students_into_full_target() {
    assert!(validate_merge_capacity(2, 25, 0, 25).is_ok());
}

#[test]
fn test_occupancy_invariant() {
    assert!(validate_batch_occupancy(1, 0, 25).is_ok());
    assert!(validate_batch_occupancy(1, 25, 25).is_ok());
    assert_eq!(
        validate_batch_occupancy(1, 26, 25),
        Err(DomainError::OccupancyViolation {
            batch_id: 1,
            current_students: 26,
            max_students: 25,
        })
    );
}
