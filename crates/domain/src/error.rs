// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::BatchType;

/// Errors that can occur during domain validation and allocation planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Course does not exist.
    CourseNotFound(i64),
    /// Batch does not exist.
    BatchNotFound(i64),
    /// Merge target batch does not exist.
    TargetBatchNotFound(i64),
    /// Merging would push the target batch past its capacity.
    CapacityExceeded {
        /// The target batch.
        batch_id: i64,
        /// Students already in the target batch.
        current_students: u32,
        /// Students that would be transferred in.
        incoming_students: u32,
        /// The target batch's capacity.
        max_students: u32,
    },
    /// A batch holds more students than its capacity permits.
    OccupancyViolation {
        /// The offending batch.
        batch_id: i64,
        /// Students currently in the batch.
        current_students: u32,
        /// The batch's capacity.
        max_students: u32,
    },
    /// The batch is not flagged as a leftover batch.
    NotALeftoverBatch(i64),
    /// A merge was requested without a target batch.
    MergeTargetMissing,
    /// Source and target batches belong to different courses.
    MergeCourseMismatch {
        /// The source batch's course.
        source_course: i64,
        /// The target batch's course.
        target_course: i64,
    },
    /// Source and target batches have different batch types.
    MergeTypeMismatch {
        /// The source batch's type.
        source_type: BatchType,
        /// The target batch's type.
        target_type: BatchType,
    },
    /// Batch type string is not recognized.
    InvalidBatchType(String),
    /// Batch status string is not recognized.
    InvalidBatchStatus(String),
    /// Enrollment status string is not recognized.
    InvalidEnrollmentStatus(String),
    /// Batch size limit is outside the permitted range.
    InvalidBatchSizeLimit {
        /// The invalid limit value.
        limit: u32,
    },
    /// Month is not a calendar month.
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },
    /// Course duration must be at least one month.
    InvalidCourseDuration {
        /// The invalid duration value.
        months: u8,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// An entity without a persisted identifier was used where one is required.
    UnpersistedEntity(&'static str),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CourseNotFound(id) => write!(f, "Course {id} not found"),
            Self::BatchNotFound(id) => write!(f, "Batch {id} not found"),
            Self::TargetBatchNotFound(id) => write!(f, "Target batch {id} not found"),
            Self::CapacityExceeded {
                batch_id,
                current_students,
                incoming_students,
                max_students,
            } => {
                write!(
                    f,
                    "Cannot place {incoming_students} students into batch {batch_id}: \
                     {current_students} already enrolled with a capacity of {max_students}"
                )
            }
            Self::OccupancyViolation {
                batch_id,
                current_students,
                max_students,
            } => {
                write!(
                    f,
                    "Batch {batch_id} holds {current_students} students but its capacity is {max_students}"
                )
            }
            Self::NotALeftoverBatch(id) => {
                write!(f, "Batch {id} is not flagged as a leftover batch")
            }
            Self::MergeTargetMissing => {
                write!(f, "Merge requires a target batch identifier")
            }
            Self::MergeCourseMismatch {
                source_course,
                target_course,
            } => {
                write!(
                    f,
                    "Cannot merge across courses: source belongs to course {source_course}, target to course {target_course}"
                )
            }
            Self::MergeTypeMismatch {
                source_type,
                target_type,
            } => {
                write!(
                    f,
                    "Cannot merge across batch types: source is {source_type}, target is {target_type}"
                )
            }
            Self::InvalidBatchType(value) => write!(f, "Invalid batch type: {value}"),
            Self::InvalidBatchStatus(value) => write!(f, "Invalid batch status: {value}"),
            Self::InvalidEnrollmentStatus(value) => {
                write!(f, "Invalid enrollment status: {value}")
            }
            Self::InvalidBatchSizeLimit { limit } => {
                write!(
                    f,
                    "Invalid batch size limit: {limit}. Must be between 1 and 100"
                )
            }
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidCourseDuration { months } => {
                write!(
                    f,
                    "Invalid course duration: {months}. Must be at least 1 month"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::UnpersistedEntity(entity) => {
                write!(f, "A persisted {entity} identifier is required here")
            }
        }
    }
}

impl std::error::Error for DomainError {}
