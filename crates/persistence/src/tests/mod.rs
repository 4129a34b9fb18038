// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod allocation_tests;
mod resolution_tests;

use crate::Persistence;
use cohort::AllocationPlan;
use cohort_domain::{BatchType, BatchTypeFlags, Course, Enrollment, EnrollmentStatus};

pub fn create_test_course() -> Course {
    Course::new(
        String::from("Spanish A1 March 2026"),
        String::from("Spanish"),
        String::from("A1"),
        3,
        2026,
        100,
        25,
        3,
        BatchTypeFlags::new(true, true),
        Some(7),
    )
}

/// Creates an in-memory persistence instance seeded with one course.
pub fn setup_persistence_with_course() -> (Persistence, i64) {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let course_id = persistence
        .create_course(&create_test_course())
        .expect("course created");
    (persistence, course_id)
}

/// Seeds `count` enrolled students of `batch_type` and returns their ids.
pub fn seed_enrollments(
    persistence: &mut Persistence,
    course_id: i64,
    count: i64,
    batch_type: BatchType,
) -> Vec<i64> {
    (0..count)
        .map(|offset| {
            persistence
                .create_enrollment(&Enrollment::new(
                    2000 + offset,
                    course_id,
                    batch_type,
                    EnrollmentStatus::Enrolled,
                ))
                .expect("enrollment created")
        })
        .collect()
}

/// Runs the full read-plan-apply cycle for one batch type.
pub fn allocate_type(
    persistence: &mut Persistence,
    course_id: i64,
    batch_type: BatchType,
) -> Vec<i64> {
    let course = persistence.get_course(course_id).expect("course");
    let roster = persistence
        .list_active_enrollments(course_id, batch_type)
        .expect("roster");
    let next = persistence
        .next_batch_number(course_id, batch_type)
        .expect("next batch number");
    let plan: AllocationPlan =
        cohort::plan_batch_allocation(&course, batch_type, &roster, next).expect("plan");
    persistence.apply_allocation(&plan).expect("plan applied")
}
