// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional application of allocation plans.
//!
//! One plan covers one `(course, batch type)` allocation and is applied in
//! a single transaction: every batch insert and every enrollment re-point
//! commits together or not at all. The unique index on
//! `(course_id, batch_type, batch_number)` rejects the loser of a
//! concurrent numbering race, surfacing as
//! [`PersistenceError::DuplicateBatchNumber`] and rolling the whole plan
//! back.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::format_date;
use crate::diesel_schema::{batches, enrollments};
use crate::error::PersistenceError;
use crate::mutations::to_i32;
use cohort::AllocationPlan;

backend_fn! {
/// Applies an allocation plan, creating its batches and re-pointing the
/// member enrollments.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan` - The plan produced by the allocation engine
///
/// # Returns
///
/// The assigned batch identifiers, in plan order.
///
/// # Errors
///
/// Returns an error (and rolls the whole plan back) if:
/// - A batch number collides with an existing one
/// - A member enrollment does not exist
/// - Any insert or update fails
pub fn apply_allocation_plan(
    conn: &mut _,
    plan: &AllocationPlan,
) -> Result<Vec<i64>, PersistenceError> {
    conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
        let mut batch_ids: Vec<i64> = Vec::with_capacity(plan.batches.len());

        for planned in &plan.batches {
            diesel::insert_into(batches::table)
                .values((
                    batches::course_id.eq(plan.course_id),
                    batches::batch_type.eq(plan.batch_type.as_str()),
                    batches::batch_number.eq(to_i32(planned.batch_number)?),
                    batches::name.eq(&planned.name),
                    batches::max_students.eq(to_i32(planned.max_students)?),
                    batches::current_students.eq(to_i32(planned.student_count())?),
                    batches::is_leftover_batch.eq(i32::from(planned.is_leftover)),
                    batches::status.eq(planned.status.as_str()),
                    batches::start_date.eq(format_date(planned.start_date)?),
                    batches::end_date.eq(format_date(planned.end_date)?),
                    batches::duration_months.eq(i32::from(planned.duration_months)),
                    batches::instructor_id.eq(planned.instructor_id),
                ))
                .execute(conn)?;

            let batch_id: i64 = conn.get_last_insert_rowid()?;

            for &enrollment_id in &planned.members {
                let updated: usize = diesel::update(
                    enrollments::table.filter(enrollments::enrollment_id.eq(enrollment_id)),
                )
                .set(enrollments::batch_id.eq(Some(batch_id)))
                .execute(conn)?;

                if updated == 0 {
                    return Err(PersistenceError::EnrollmentNotFound(enrollment_id));
                }
            }

            debug!(
                "created batch {} ({}) with {} members",
                batch_id,
                planned.name,
                planned.members.len()
            );
            batch_ids.push(batch_id);
        }

        Ok(batch_ids)
    })
}
}
