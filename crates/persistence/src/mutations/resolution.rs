// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leftover batch resolution mutations.
//!
//! Confirmation is a single flag clear. A merge is a three-step
//! transaction: a conditional increment of the target's occupancy (the
//! capacity precondition and the increment applied as one atomic update, so
//! two merges racing for the same target cannot oversubscribe it), the
//! transfer of every source enrollment, and the deletion of the source
//! batch row. The deleted batch's number is not reclaimed.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::diesel_schema::{batches, enrollments};
use crate::error::PersistenceError;
use crate::mutations::to_i32;

backend_fn! {
/// Clears the leftover flag on a batch, confirming it as standalone.
///
/// # Errors
///
/// Returns an error if the batch does not exist or the update fails.
pub fn confirm_leftover_batch(conn: &mut _, batch_id: i64) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(batches::table.filter(batches::batch_id.eq(batch_id)))
        .set(batches::is_leftover_batch.eq(0))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BatchNotFound(batch_id));
    }
    Ok(())
}
}

backend_fn! {
/// Merges a leftover batch into a target batch and deletes the source.
///
/// The capacity check is applied as a conditional update: the target's
/// occupancy is incremented only where the result stays within its
/// capacity. Zero affected rows means the target vanished or can no longer
/// absorb the transfer; either way the merge is rolled back untouched.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `source_batch_id` - The flagged leftover batch
/// * `target_batch_id` - The batch receiving the members
/// * `transfer_count` - Students expected to move (from the planned
///   snapshot; a mismatch with the rows actually transferred aborts)
///
/// # Errors
///
/// Returns an error (and rolls the merge back) if:
/// - The target cannot absorb the transfer at commit time
/// - The number of transferred enrollments differs from the snapshot
/// - The source batch no longer exists
pub fn merge_leftover_batch(
    conn: &mut _,
    source_batch_id: i64,
    target_batch_id: i64,
    transfer_count: u32,
) -> Result<(), PersistenceError> {
    let count: i32 = to_i32(transfer_count)?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let absorbed: usize = diesel::update(
            batches::table.filter(
                batches::batch_id
                    .eq(target_batch_id)
                    .and(batches::current_students.le(batches::max_students - count)),
            ),
        )
        .set(batches::current_students.eq(batches::current_students + count))
        .execute(conn)?;

        if absorbed == 0 {
            return Err(PersistenceError::MergeConflict { target_batch_id });
        }

        let transferred: usize = diesel::update(
            enrollments::table.filter(enrollments::batch_id.eq(source_batch_id)),
        )
        .set(enrollments::batch_id.eq(Some(target_batch_id)))
        .execute(conn)?;

        if u32::try_from(transferred)
            .map_err(|_| PersistenceError::Other(String::from("Transfer count out of range")))?
            != transfer_count
        {
            return Err(PersistenceError::ConsistencyError(format!(
                "Merge of batch {source_batch_id} expected to transfer {transfer_count} \
                 enrollments but matched {transferred}"
            )));
        }

        let deleted: usize =
            diesel::delete(batches::table.filter(batches::batch_id.eq(source_batch_id)))
                .execute(conn)?;

        if deleted == 0 {
            return Err(PersistenceError::BatchNotFound(source_batch_id));
        }

        debug!(
            "merged batch {} into {} ({} students)",
            source_batch_id, target_batch_id, transfer_count
        );
        Ok(())
    })
}
}
