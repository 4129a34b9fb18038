// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Represents a batch type.
///
/// A course's roster is split into independently sized groups per type;
/// students never cross type boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchType {
    /// Standard first-pass teaching group.
    #[serde(rename = "regular")]
    Regular,
    /// Revision group for returning students.
    #[serde(rename = "revision")]
    Revision,
}

impl BatchType {
    /// All batch types, in allocation order.
    pub const ALL: [Self; 2] = [Self::Regular, Self::Revision];

    /// Converts this batch type to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Revision => "revision",
        }
    }

    /// Returns the display title used in batch names (e.g. "Regular").
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Revision => "Revision",
        }
    }

    /// Builds the display name for a numbered batch of this type,
    /// e.g. "Regular Batch 3".
    #[must_use]
    pub fn batch_name(&self, batch_number: u32) -> String {
        format!("{} Batch {batch_number}", self.title())
    }

    /// Parses a batch type from its storage representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not name a known batch type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "regular" => Ok(Self::Regular),
            "revision" => Ok(Self::Revision),
            _ => Err(DomainError::InvalidBatchType(s.to_string())),
        }
    }
}

impl FromStr for BatchType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for BatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BatchStatus {
    /// Created but not yet started.
    #[default]
    #[serde(rename = "upcoming")]
    Upcoming,
    /// Teaching in progress.
    #[serde(rename = "active")]
    Active,
    /// Teaching finished.
    #[serde(rename = "completed")]
    Completed,
    /// Cancelled before or during teaching.
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl BatchStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a batch status from its storage representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not name a known batch status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBatchStatus(s.to_string())),
        }
    }
}

impl FromStr for BatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EnrollmentStatus {
    /// Created, payment not yet confirmed.
    #[default]
    #[serde(rename = "pending")]
    Pending,
    /// Payment confirmed, awaiting course start.
    #[serde(rename = "enrolled")]
    Enrolled,
    /// Actively attending.
    #[serde(rename = "active")]
    Active,
    /// Finished the course.
    #[serde(rename = "completed")]
    Completed,
    /// Withdrawn or refunded.
    #[serde(rename = "cancelled")]
    Cancelled,
    /// Moved to a different course offering.
    #[serde(rename = "transferred")]
    Transferred,
}

impl EnrollmentStatus {
    /// Returns whether this enrollment counts toward batch allocation.
    ///
    /// Only enrolled and active students occupy batch seats.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Enrolled | Self::Active)
    }

    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Enrolled => "enrolled",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Transferred => "transferred",
        }
    }

    /// Parses an enrollment status from its storage representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not name a known enrollment status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "enrolled" => Ok(Self::Enrolled),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "transferred" => Ok(Self::Transferred),
            _ => Err(DomainError::InvalidEnrollmentStatus(s.to_string())),
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-course batch type enablement flags.
///
/// Each type is turned on or off independently; a disabled type gets no
/// batches at all, not even an empty shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTypeFlags {
    /// Whether regular batches are enabled.
    pub regular: bool,
    /// Whether revision batches are enabled.
    pub revision: bool,
}

impl BatchTypeFlags {
    /// Creates new flags.
    #[must_use]
    pub const fn new(regular: bool, revision: bool) -> Self {
        Self { regular, revision }
    }

    /// Checks whether a batch type is enabled.
    #[must_use]
    pub const fn is_enabled(&self, batch_type: BatchType) -> bool {
        match batch_type {
            BatchType::Regular => self.regular,
            BatchType::Revision => self.revision,
        }
    }

    /// Returns the enabled batch types in allocation order.
    #[must_use]
    pub fn enabled_types(&self) -> Vec<BatchType> {
        BatchType::ALL
            .into_iter()
            .filter(|batch_type| self.is_enabled(*batch_type))
            .collect()
    }
}

impl Default for BatchTypeFlags {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// Represents a course offering.
///
/// A course identifies a language/level/month/year combination and carries
/// the configuration the allocation engine reads: overall capacity, the
/// per-batch size limit, the duration, and the batch type flags. The engine
/// never mutates a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the course has not been persisted yet.
    pub course_id: Option<i64>,
    /// Display name of the course offering.
    pub name: String,
    /// The language taught.
    pub language: String,
    /// The proficiency level (e.g. "A1", "B2").
    pub level: String,
    /// Starting calendar month (1-12).
    pub month: u8,
    /// Starting calendar year.
    pub year: u16,
    /// Total enrollment capacity across all batches.
    pub total_capacity: u32,
    /// Maximum students per batch.
    pub batch_size_limit: u32,
    /// Course duration in months.
    pub course_duration_months: u8,
    /// Which batch types are enabled for this course.
    pub batch_types: BatchTypeFlags,
    /// The default instructor, inherited by new batches.
    pub instructor_id: Option<i64>,
}

impl Course {
    /// Creates a new `Course` without a persisted identifier.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: String,
        language: String,
        level: String,
        month: u8,
        year: u16,
        total_capacity: u32,
        batch_size_limit: u32,
        course_duration_months: u8,
        batch_types: BatchTypeFlags,
        instructor_id: Option<i64>,
    ) -> Self {
        Self {
            course_id: None,
            name,
            language,
            level,
            month,
            year,
            total_capacity,
            batch_size_limit,
            course_duration_months,
            batch_types,
            instructor_id,
        }
    }

    /// Creates a `Course` with an existing persisted identifier.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        course_id: i64,
        name: String,
        language: String,
        level: String,
        month: u8,
        year: u16,
        total_capacity: u32,
        batch_size_limit: u32,
        course_duration_months: u8,
        batch_types: BatchTypeFlags,
        instructor_id: Option<i64>,
    ) -> Self {
        Self {
            course_id: Some(course_id),
            name,
            language,
            level,
            month,
            year,
            total_capacity,
            batch_size_limit,
            course_duration_months,
            batch_types,
            instructor_id,
        }
    }
}

/// Represents one teaching group within a course.
///
/// Batch numbers are unique within `(course, batch_type)` and form a
/// contiguous sequence starting at 1 over the lifetime of the pair; gaps
/// appear only through merge deletion or recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the batch has not been persisted yet.
    pub batch_id: Option<i64>,
    /// The course this batch belongs to.
    pub course_id: i64,
    /// The batch type.
    pub batch_type: BatchType,
    /// Position in the per-type numbering sequence (1-based).
    pub batch_number: u32,
    /// Display name, e.g. "Regular Batch 3".
    pub name: String,
    /// Maximum students this batch can hold.
    pub max_students: u32,
    /// Students currently assigned to this batch.
    pub current_students: u32,
    /// True until the batch is confirmed or merged away.
    pub is_leftover_batch: bool,
    /// Lifecycle status.
    pub status: BatchStatus,
    /// First teaching day.
    pub start_date: Date,
    /// Last teaching day.
    pub end_date: Date,
    /// Duration in months, copied from the course at creation.
    pub duration_months: u8,
    /// Assigned instructor, inherited from the course at creation and not
    /// re-synced afterwards.
    pub instructor_id: Option<i64>,
}

impl Batch {
    /// Returns the number of unoccupied seats.
    #[must_use]
    pub const fn available_slots(&self) -> u32 {
        self.max_students.saturating_sub(self.current_students)
    }

    /// Returns whether the batch is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.current_students >= self.max_students
    }

    /// Returns the occupancy as a rounded percentage of capacity.
    ///
    /// A zero-capacity batch reports 0% rather than dividing by zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn capacity_percentage(&self) -> u32 {
        if self.max_students == 0 {
            return 0;
        }
        let scaled: u64 = u64::from(self.current_students) * 100;
        let capacity: u64 = u64::from(self.max_students);
        // Safe cast: the rounded percentage of a u32 occupancy fits in u32
        ((scaled + capacity / 2) / capacity) as u32
    }
}

/// Represents one student's enrollment in a course.
///
/// The batch type is chosen at enrollment time and never changes; the batch
/// pointer starts unset and is maintained exclusively by the allocation
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the enrollment has not been persisted yet.
    pub enrollment_id: Option<i64>,
    /// The enrolled student.
    pub student_id: i64,
    /// The course enrolled in.
    pub course_id: i64,
    /// The batch this enrollment is assigned to, if any.
    pub batch_id: Option<i64>,
    /// The batch type chosen at enrollment time.
    pub batch_type: BatchType,
    /// Lifecycle status.
    pub status: EnrollmentStatus,
}

impl Enrollment {
    /// Creates a new unassigned `Enrollment` without a persisted identifier.
    #[must_use]
    pub const fn new(
        student_id: i64,
        course_id: i64,
        batch_type: BatchType,
        status: EnrollmentStatus,
    ) -> Self {
        Self {
            enrollment_id: None,
            student_id,
            course_id,
            batch_id: None,
            batch_type,
            status,
        }
    }

    /// Creates an `Enrollment` with an existing persisted identifier.
    #[must_use]
    pub const fn with_id(
        enrollment_id: i64,
        student_id: i64,
        course_id: i64,
        batch_id: Option<i64>,
        batch_type: BatchType,
        status: EnrollmentStatus,
    ) -> Self {
        Self {
            enrollment_id: Some(enrollment_id),
            student_id,
            course_id,
            batch_id,
            batch_type,
            status,
        }
    }
}
