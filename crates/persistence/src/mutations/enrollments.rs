// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment mutations.
//!
//! Enrollment records are created by the payment-completion glue; the
//! allocation engine only ever rewrites their batch pointer (and does so
//! through the allocation/resolution transactions, not here).

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::enrollments;
use crate::error::PersistenceError;
use cohort_domain::Enrollment;

backend_fn! {
/// Inserts a new enrollment and returns its assigned identifier.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_enrollment(
    conn: &mut _,
    enrollment: &Enrollment,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(enrollments::table)
        .values((
            enrollments::student_id.eq(enrollment.student_id),
            enrollments::course_id.eq(enrollment.course_id),
            enrollments::batch_id.eq(enrollment.batch_id),
            enrollments::batch_type.eq(enrollment.batch_type.as_str()),
            enrollments::status.eq(enrollment.status.as_str()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Updates an enrollment's lifecycle status.
///
/// Status transitions are owned by the enrollment/payment layer; the
/// allocation engine never calls this.
///
/// # Errors
///
/// Returns an error if the enrollment does not exist or the update fails.
pub fn update_enrollment_status(
    conn: &mut _,
    enrollment_id: i64,
    status: &str,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(enrollments::table.filter(enrollments::enrollment_id.eq(enrollment_id)))
            .set(enrollments::status.eq(status))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EnrollmentNotFound(enrollment_id));
    }
    Ok(())
}
}
