// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course queries.
//!
//! The allocation engine treats courses as read-only configuration; this
//! module only ever fetches them.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::CourseRow;
use crate::diesel_schema::courses;
use crate::error::PersistenceError;
use cohort_domain::Course;

backend_fn! {
/// Fetches a course by its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `course_id` - The course identifier
///
/// # Errors
///
/// Returns an error if the course does not exist or a stored field cannot
/// be converted back into its domain type.
pub fn get_course(conn: &mut _, course_id: i64) -> Result<Course, PersistenceError> {
    let result = courses::table
        .filter(courses::course_id.eq(course_id))
        .first::<CourseRow>(conn);

    match result {
        Ok(row) => row.into_course(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::CourseNotFound(course_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
