// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::CourseLockRegistry;
use cohort_domain::{BatchType, BatchTypeFlags, Course, Enrollment, EnrollmentStatus};
use cohort_persistence::Persistence;

pub fn setup() -> (Persistence, CourseLockRegistry) {
    let persistence = Persistence::new_in_memory().expect("in-memory database");
    (persistence, CourseLockRegistry::new())
}

/// Creates a course with a batch size limit of 25 and capacity 100.
pub fn create_course(persistence: &mut Persistence, regular: bool, revision: bool) -> i64 {
    create_course_with_limit(persistence, regular, revision, 25)
}

pub fn create_course_with_limit(
    persistence: &mut Persistence,
    regular: bool,
    revision: bool,
    batch_size_limit: u32,
) -> i64 {
    let course = Course::new(
        String::from("Spanish A1 March 2026"),
        String::from("Spanish"),
        String::from("A1"),
        3,
        2026,
        100,
        batch_size_limit,
        3,
        BatchTypeFlags::new(regular, revision),
        Some(7),
    );
    persistence.create_course(&course).expect("course created")
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
                    3000 + offset,
                    course_id,
                    batch_type,
                    EnrollmentStatus::Enrolled,
                ))
                .expect("enrollment created")
        })
        .collect()
}
