// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use cohort::CoreError;
use cohort_domain::DomainError;
use cohort_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract offered to request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The operation lost a race against a concurrent writer and was rolled
    /// back; the caller may retry against fresh state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::CourseNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Course"),
            message: format!("Course {id} does not exist"),
        },
        DomainError::BatchNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Batch"),
            message: format!("Batch {id} does not exist"),
        },
        DomainError::TargetBatchNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Target batch"),
            message: format!("Target batch {id} does not exist"),
        },
        DomainError::CapacityExceeded {
            batch_id,
            current_students,
            incoming_students,
            max_students,
        } => ApiError::DomainRuleViolation {
            rule: String::from("merge_capacity"),
            message: format!(
                "Cannot merge {incoming_students} students into batch {batch_id}: \
                 {current_students} already enrolled with a capacity of {max_students}"
            ),
        },
        DomainError::OccupancyViolation {
            batch_id,
            current_students,
            max_students,
        } => ApiError::DomainRuleViolation {
            rule: String::from("batch_occupancy"),
            message: format!(
                "Batch {batch_id} holds {current_students} students but its capacity is {max_students}"
            ),
        },
        DomainError::NotALeftoverBatch(id) => ApiError::DomainRuleViolation {
            rule: String::from("leftover_state"),
            message: format!("Batch {id} is not flagged as a leftover batch"),
        },
        DomainError::MergeTargetMissing => ApiError::InvalidInput {
            field: String::from("target_batch_id"),
            message: String::from("Merge requires a target batch identifier"),
        },
        DomainError::MergeCourseMismatch {
            source_course,
            target_course,
        } => ApiError::DomainRuleViolation {
            rule: String::from("merge_scope"),
            message: format!(
                "Cannot merge across courses: source belongs to course {source_course}, \
                 target to course {target_course}"
            ),
        },
        DomainError::MergeTypeMismatch {
            source_type,
            target_type,
        } => ApiError::DomainRuleViolation {
            rule: String::from("merge_scope"),
            message: format!(
                "Cannot merge across batch types: source is {source_type}, target is {target_type}"
            ),
        },
        DomainError::InvalidBatchType(value) => ApiError::InvalidInput {
            field: String::from("batch_type"),
            message: format!("Invalid batch type: {value}"),
        },
        DomainError::InvalidBatchStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid batch status: {value}"),
        },
        DomainError::InvalidEnrollmentStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid enrollment status: {value}"),
        },
        DomainError::InvalidBatchSizeLimit { limit } => ApiError::InvalidInput {
            field: String::from("batch_size_limit"),
            message: format!("Invalid batch size limit: {limit}. Must be between 1 and 100"),
        },
        DomainError::InvalidMonth { month } => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
        DomainError::InvalidCourseDuration { months } => ApiError::InvalidInput {
            field: String::from("course_duration"),
            message: format!("Invalid course duration: {months}. Must be at least 1 month"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::UnpersistedEntity(entity) => ApiError::Internal {
            message: format!("A persisted {entity} identifier is required here"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found lookups map to resource errors, lost races map to conflicts,
/// and everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::CourseNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Course"),
            message: format!("Course {id} does not exist"),
        },
        PersistenceError::BatchNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Batch"),
            message: format!("Batch {id} does not exist"),
        },
        PersistenceError::EnrollmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Enrollment"),
            message: format!("Enrollment {id} does not exist"),
        },
        PersistenceError::DuplicateBatchNumber(msg) => ApiError::Conflict {
            message: format!("A concurrent allocation already took the batch number: {msg}"),
        },
        PersistenceError::MergeConflict { target_batch_id } => ApiError::Conflict {
            message: format!(
                "Batch {target_batch_id} can no longer absorb the transfer; the merge was rolled back"
            ),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}
