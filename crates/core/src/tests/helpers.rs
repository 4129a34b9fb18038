// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cohort_domain::{
    Batch, BatchStatus, BatchType, BatchTypeFlags, Course, Enrollment, EnrollmentStatus,
};
use time::{Date, Month};

pub const TEST_COURSE_ID: i64 = 10;

pub fn create_test_course() -> Course {
    Course::with_id(
        TEST_COURSE_ID,
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

/// Creates `count` active enrollments with identifiers 1..=count.
pub fn create_test_roster(count: i64, batch_type: BatchType) -> Vec<Enrollment> {
    (1..=count)
        .map(|id| {
            Enrollment::with_id(
                id,
                1000 + id,
                TEST_COURSE_ID,
                None,
                batch_type,
                EnrollmentStatus::Enrolled,
            )
        })
        .collect()
}

pub fn create_test_batch(
    batch_id: i64,
    batch_number: u32,
    current_students: u32,
    is_leftover: bool,
) -> Batch {
    Batch {
        batch_id: Some(batch_id),
        course_id: TEST_COURSE_ID,
        batch_type: BatchType::Regular,
        batch_number,
        name: BatchType::Regular.batch_name(batch_number),
        max_students: 25,
        current_students,
        is_leftover_batch: is_leftover,
        status: BatchStatus::Upcoming,
        start_date: Date::from_calendar_date(2026, Month::March, 1).unwrap(),
        end_date: Date::from_calendar_date(2026, Month::May, 31).unwrap(),
        duration_months: 3,
        instructor_id: Some(7),
    }
}
