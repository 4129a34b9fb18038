// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment queries.
//!
//! The roster reader contract lives here: active-roster queries return
//! enrollments ordered by `enrollment_id` ascending. Identifiers are
//! assigned in enrollment creation order, so this is a documented, stable
//! sort and repeated allocation runs see the roster in the same order.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::EnrollmentRow;
use crate::diesel_schema::enrollments;
use crate::error::PersistenceError;
use cohort_domain::Enrollment;

/// Statuses that occupy batch seats.
const ACTIVE_STATUSES: [&str; 2] = ["enrolled", "active"];

/// Converts a loaded set of rows into domain enrollments.
fn rows_into_enrollments(rows: Vec<EnrollmentRow>) -> Result<Vec<Enrollment>, PersistenceError> {
    rows.into_iter().map(EnrollmentRow::into_enrollment).collect()
}

backend_fn! {
/// Fetches an enrollment by its canonical identifier.
///
/// # Errors
///
/// Returns an error if the enrollment does not exist or a stored field
/// cannot be converted back into its domain type.
pub fn get_enrollment(
    conn: &mut _,
    enrollment_id: i64,
) -> Result<Enrollment, PersistenceError> {
    let result = enrollments::table
        .filter(enrollments::enrollment_id.eq(enrollment_id))
        .first::<EnrollmentRow>(conn);

    match result {
        Ok(row) => row.into_enrollment(),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::EnrollmentNotFound(enrollment_id))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Reads the active roster for one batch type of a course.
///
/// Returns enrollments with status in the active set, ordered by
/// `enrollment_id` ascending (the stable roster order).
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_active_enrollments(
    conn: &mut _,
    course_id: i64,
    batch_type: &str,
) -> Result<Vec<Enrollment>, PersistenceError> {
    let rows: Vec<EnrollmentRow> = enrollments::table
        .filter(enrollments::course_id.eq(course_id))
        .filter(enrollments::batch_type.eq(batch_type))
        .filter(enrollments::status.eq_any(ACTIVE_STATUSES))
        .order(enrollments::enrollment_id.asc())
        .load::<EnrollmentRow>(conn)?;

    rows_into_enrollments(rows)
}
}

backend_fn! {
/// Lists every enrollment of a course regardless of status.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_enrollments_for_course(
    conn: &mut _,
    course_id: i64,
) -> Result<Vec<Enrollment>, PersistenceError> {
    let rows: Vec<EnrollmentRow> = enrollments::table
        .filter(enrollments::course_id.eq(course_id))
        .order(enrollments::enrollment_id.asc())
        .load::<EnrollmentRow>(conn)?;

    rows_into_enrollments(rows)
}
}

backend_fn! {
/// Lists the enrollments currently pointing at a batch.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_enrollments_for_batch(
    conn: &mut _,
    batch_id: i64,
) -> Result<Vec<Enrollment>, PersistenceError> {
    let rows: Vec<EnrollmentRow> = enrollments::table
        .filter(enrollments::batch_id.eq(batch_id))
        .order(enrollments::enrollment_id.asc())
        .load::<EnrollmentRow>(conn)?;

    rows_into_enrollments(rows)
}
}
