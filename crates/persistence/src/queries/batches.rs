// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch queries.
//!
//! Listing queries return batches ordered by batch type, then batch number,
//! so administrative views and summaries render in numbering order.

use diesel::dsl::max;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::BatchRow;
use crate::diesel_schema::batches;
use crate::error::PersistenceError;
use cohort_domain::Batch;

/// Converts a loaded set of rows into domain batches.
fn rows_into_batches(rows: Vec<BatchRow>) -> Result<Vec<Batch>, PersistenceError> {
    rows.into_iter().map(BatchRow::into_batch).collect()
}

backend_fn! {
/// Fetches a batch by its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `batch_id` - The batch identifier
///
/// # Errors
///
/// Returns an error if the batch does not exist or a stored field cannot be
/// converted back into its domain type.
pub fn get_batch(conn: &mut _, batch_id: i64) -> Result<Batch, PersistenceError> {
    let result = batches::table
        .filter(batches::batch_id.eq(batch_id))
        .first::<BatchRow>(conn);

    match result {
        Ok(row) => row.into_batch(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::BatchNotFound(batch_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists every batch of a course across all batch types.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_batches_for_course(
    conn: &mut _,
    course_id: i64,
) -> Result<Vec<Batch>, PersistenceError> {
    let rows: Vec<BatchRow> = batches::table
        .filter(batches::course_id.eq(course_id))
        .order((batches::batch_type.asc(), batches::batch_number.asc()))
        .load::<BatchRow>(conn)?;

    rows_into_batches(rows)
}
}

backend_fn! {
/// Lists the batches of one batch type of a course, in numbering order.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_batches_for_type(
    conn: &mut _,
    course_id: i64,
    batch_type: &str,
) -> Result<Vec<Batch>, PersistenceError> {
    let rows: Vec<BatchRow> = batches::table
        .filter(batches::course_id.eq(course_id))
        .filter(batches::batch_type.eq(batch_type))
        .order(batches::batch_number.asc())
        .load::<BatchRow>(conn)?;

    rows_into_batches(rows)
}
}

backend_fn! {
/// Lists the currently flagged leftover batches of a course.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_leftover_batches(
    conn: &mut _,
    course_id: i64,
) -> Result<Vec<Batch>, PersistenceError> {
    let rows: Vec<BatchRow> = batches::table
        .filter(batches::course_id.eq(course_id))
        .filter(batches::is_leftover_batch.eq(1))
        .order((batches::batch_type.asc(), batches::batch_number.asc()))
        .load::<BatchRow>(conn)?;

    rows_into_batches(rows)
}
}

backend_fn! {
/// Reads the highest batch number persisted for `(course, batch type)`.
///
/// This must be read fresh before every allocation so repeated invocations
/// extend the numbering sequence rather than collide with it.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn max_batch_number(
    conn: &mut _,
    course_id: i64,
    batch_type: &str,
) -> Result<Option<i32>, PersistenceError> {
    let result: Option<i32> = batches::table
        .filter(batches::course_id.eq(course_id))
        .filter(batches::batch_type.eq(batch_type))
        .select(max(batches::batch_number))
        .first::<Option<i32>>(conn)?;

    Ok(result)
}
}
