// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course mutations.
//!
//! Course records are owned by the administrative layer; the allocation
//! engine only reads them. This seeding mutation exists for that layer and
//! for test fixtures.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::courses;
use crate::error::PersistenceError;
use crate::mutations::to_i32;
use cohort_domain::Course;

backend_fn! {
/// Inserts a new course and returns its assigned identifier.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_course(conn: &mut _, course: &Course) -> Result<i64, PersistenceError> {
    diesel::insert_into(courses::table)
        .values((
            courses::name.eq(&course.name),
            courses::language.eq(&course.language),
            courses::level.eq(&course.level),
            courses::month.eq(i32::from(course.month)),
            courses::year.eq(i32::from(course.year)),
            courses::total_capacity.eq(to_i32(course.total_capacity)?),
            courses::batch_size_limit.eq(to_i32(course.batch_size_limit)?),
            courses::course_duration.eq(i32::from(course.course_duration_months)),
            courses::regular_enabled.eq(i32::from(course.batch_types.regular)),
            courses::revision_enabled.eq(i32::from(course.batch_types.revision)),
            courses::instructor_id.eq(course.instructor_id),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}
