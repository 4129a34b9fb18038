// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recalculation mutations.
//!
//! The destructive half of a recalculation: every batch of the course goes
//! away and every enrollment is unassigned, in one transaction. The rebuild
//! that follows is ordinary allocation; callers hold the course lock across
//! both halves so no other writer can interleave.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::{batches, enrollments};
use crate::error::PersistenceError;

backend_fn! {
/// Deletes every batch of a course and unassigns its enrollments.
///
/// Leftover-resolution decisions and per-batch instructor overrides are
/// deliberately not preserved.
///
/// # Returns
///
/// The number of batches deleted.
///
/// # Errors
///
/// Returns an error (and rolls the deletion back) if any statement fails.
pub fn delete_course_batches(conn: &mut _, course_id: i64) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        diesel::update(enrollments::table.filter(enrollments::course_id.eq(course_id)))
            .set(enrollments::batch_id.eq(None::<i64>))
            .execute(conn)?;

        let deleted: usize =
            diesel::delete(batches::table.filter(batches::course_id.eq(course_id)))
                .execute(conn)?;

        info!("deleted {} batches for course {}", deleted, course_id);
        Ok(deleted)
    })
}
}
