// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch date range derivation.
//!
//! Batches inherit their schedule from the owning course: they start on the
//! first day of the course month and end on the last day of the final month
//! of the course duration. No timezone handling happens here; batch dates
//! are plain calendar dates.

use crate::error::DomainError;
use crate::validation::{validate_course_duration, validate_month};
use time::{Date, Month};

/// A derived batch teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchDateRange {
    /// First teaching day (first day of the course month).
    pub start_date: Date,
    /// Last teaching day (last day of the final month).
    pub end_date: Date,
}

/// Derives the teaching period for batches of a course.
///
/// A course starting in `month`/`year` with a duration of `duration_months`
/// runs from the first day of that month through the last day of month
/// `month + duration_months - 1`, rolling over year boundaries as needed.
///
/// # Arguments
///
/// * `year` - Starting calendar year
/// * `month` - Starting calendar month (1-12)
/// * `duration_months` - Course duration in months (at least 1)
///
/// # Errors
///
/// Returns an error if the month or duration is invalid, or if the derived
/// dates fall outside the representable calendar range.
pub fn batch_date_range(
    year: u16,
    month: u8,
    duration_months: u8,
) -> Result<BatchDateRange, DomainError> {
    validate_month(month)?;
    validate_course_duration(duration_months)?;

    let start_month: Month =
        Month::try_from(month).map_err(|_| DomainError::InvalidMonth { month })?;
    let start_date: Date = Date::from_calendar_date(i32::from(year), start_month, 1).map_err(
        |_| DomainError::DateArithmeticOverflow {
            operation: format!("deriving batch start date for {year}-{month:02}"),
        },
    )?;

    // Zero-based index of the final month, counted from year 0
    let final_month_index: u32 =
        u32::from(year) * 12 + u32::from(month) - 1 + u32::from(duration_months) - 1;
    let end_year: i32 = i32::try_from(final_month_index / 12).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("deriving batch end year for {year}-{month:02}"),
        }
    })?;
    let end_month: Month = Month::try_from(u8::try_from(final_month_index % 12 + 1).map_err(
        |_| DomainError::DateArithmeticOverflow {
            operation: String::from("deriving batch end month"),
        },
    )?)
    .map_err(|_| DomainError::DateArithmeticOverflow {
        operation: String::from("deriving batch end month"),
    })?;

    let end_day: u8 = end_month.length(end_year);
    let end_date: Date = Date::from_calendar_date(end_year, end_month, end_day).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("deriving batch end date for {year}-{month:02}"),
        }
    })?;

    Ok(BatchDateRange {
        start_date,
        end_date,
    })
}
