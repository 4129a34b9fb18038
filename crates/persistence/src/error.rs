// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested course was not found.
    CourseNotFound(i64),
    /// The requested batch was not found.
    BatchNotFound(i64),
    /// The requested enrollment was not found.
    EnrollmentNotFound(i64),
    /// A batch number collided with an existing one for the same course and
    /// batch type. This is the losing side of a concurrent allocation race.
    DuplicateBatchNumber(String),
    /// A merge lost its capacity race: the target batch could no longer
    /// absorb the transfer at commit time.
    MergeConflict {
        /// The target batch that rejected the transfer.
        target_batch_id: i64,
    },
    /// A stored row could not be converted back into a domain value.
    ReconstructionError(String),
    /// Stored state no longer matches the snapshot an operation was planned
    /// against; the operation was rolled back.
    ConsistencyError(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::CourseNotFound(id) => write!(f, "Course not found: {id}"),
            Self::BatchNotFound(id) => write!(f, "Batch not found: {id}"),
            Self::EnrollmentNotFound(id) => write!(f, "Enrollment not found: {id}"),
            Self::DuplicateBatchNumber(msg) => {
                write!(f, "Batch number already taken: {msg}")
            }
            Self::MergeConflict { target_batch_id } => {
                write!(
                    f,
                    "Merge into batch {target_batch_id} rejected: target can no longer absorb the transfer"
                )
            }
            Self::ReconstructionError(msg) => {
                write!(f, "Stored row reconstruction error: {msg}")
            }
            Self::ConsistencyError(msg) => write!(f, "Consistency error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::DuplicateBatchNumber(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
