// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between stored rows and domain values.
//!
//! Dates are stored as ISO 8601 calendar dates (`YYYY-MM-DD`). Enum-typed
//! columns store the domain types' string representations; a row that fails
//! to parse back is a [`PersistenceError::ReconstructionError`].

use crate::error::PersistenceError;
use cohort_domain::{
    Batch, BatchStatus, BatchType, BatchTypeFlags, Course, Enrollment, EnrollmentStatus,
    validate_batch_occupancy,
};
use diesel::prelude::*;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Stored date format (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a calendar date for storage.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format date: {e}")))
}

/// Parses a stored calendar date.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &DATE_FORMAT).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid stored date '{value}': {e}"))
    })
}

/// Narrows a stored integer into the domain's unsigned range.
fn to_u32(value: i32, column: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("Column {column} holds negative value {value}"))
    })
}

/// Narrows a stored integer into a `u8` domain field.
fn to_u8(value: i32, column: &str) -> Result<u8, PersistenceError> {
    u8::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("Column {column} out of range: {value}"))
    })
}

/// One row of the `courses` table.
#[derive(Debug, Queryable)]
pub struct CourseRow {
    pub course_id: i64,
    pub name: String,
    pub language: String,
    pub level: String,
    pub month: i32,
    pub year: i32,
    pub total_capacity: i32,
    pub batch_size_limit: i32,
    pub course_duration: i32,
    pub regular_enabled: i32,
    pub revision_enabled: i32,
    pub instructor_id: Option<i64>,
}

impl CourseRow {
    /// Converts this row into a domain [`Course`].
    ///
    /// # Errors
    ///
    /// Returns an error if any stored field is outside its domain range.
    pub fn into_course(self) -> Result<Course, PersistenceError> {
        let year: u16 = u16::try_from(self.year).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "Column year out of range: {}",
                self.year
            ))
        })?;
        Ok(Course::with_id(
            self.course_id,
            self.name,
            self.language,
            self.level,
            to_u8(self.month, "month")?,
            year,
            to_u32(self.total_capacity, "total_capacity")?,
            to_u32(self.batch_size_limit, "batch_size_limit")?,
            to_u8(self.course_duration, "course_duration")?,
            BatchTypeFlags::new(self.regular_enabled != 0, self.revision_enabled != 0),
            self.instructor_id,
        ))
    }
}

/// One row of the `batches` table.
#[derive(Debug, Queryable)]
pub struct BatchRow {
    pub batch_id: i64,
    pub course_id: i64,
    pub batch_type: String,
    pub batch_number: i32,
    pub name: String,
    pub max_students: i32,
    pub current_students: i32,
    pub is_leftover_batch: i32,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub duration_months: i32,
    pub instructor_id: Option<i64>,
}

impl BatchRow {
    /// Converts this row into a domain [`Batch`].
    ///
    /// # Errors
    ///
    /// Returns an error if any stored field fails to parse back into its
    /// domain type.
    pub fn into_batch(self) -> Result<Batch, PersistenceError> {
        let batch_type: BatchType = BatchType::parse(&self.batch_type)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let status: BatchStatus = BatchStatus::parse(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let current_students: u32 = to_u32(self.current_students, "current_students")?;
        let max_students: u32 = to_u32(self.max_students, "max_students")?;
        // A stored batch holding more students than its capacity is corrupt
        // data, surfaced as a hard error rather than silently truncated
        validate_batch_occupancy(self.batch_id, current_students, max_students)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Batch {
            batch_id: Some(self.batch_id),
            course_id: self.course_id,
            batch_type,
            batch_number: to_u32(self.batch_number, "batch_number")?,
            name: self.name,
            max_students,
            current_students,
            is_leftover_batch: self.is_leftover_batch != 0,
            status,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            duration_months: to_u8(self.duration_months, "duration_months")?,
            instructor_id: self.instructor_id,
        })
    }
}

/// One row of the `enrollments` table.
#[derive(Debug, Queryable)]
pub struct EnrollmentRow {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub batch_id: Option<i64>,
    pub batch_type: String,
    pub status: String,
}

impl EnrollmentRow {
    /// Converts this row into a domain [`Enrollment`].
    ///
    /// # Errors
    ///
    /// Returns an error if the stored batch type or status fails to parse.
    pub fn into_enrollment(self) -> Result<Enrollment, PersistenceError> {
        let batch_type: BatchType = BatchType::parse(&self.batch_type)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let status: EnrollmentStatus = EnrollmentStatus::parse(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Enrollment::with_id(
            self.enrollment_id,
            self.student_id,
            self.course_id,
            self.batch_id,
            batch_type,
            status,
        ))
    }
}
