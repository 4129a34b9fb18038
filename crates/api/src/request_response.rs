// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use crate::error::ApiError;
use cohort::ResolveAction;
use cohort_domain::Batch;
use thiserror::Error;
use time::Date;

/// Error parsing a resolve action from its wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveActionParseError {
    /// The action string is not one of the known actions.
    #[error("unknown resolve action '{0}': expected 'leave' or 'merge'")]
    UnknownAction(String),
}

/// Parses a resolve action from its wire representation.
///
/// # Errors
///
/// Returns an error if the string is neither `"leave"` nor `"merge"`.
pub fn parse_resolve_action(value: &str) -> Result<ResolveAction, ResolveActionParseError> {
    match value {
        "leave" => Ok(ResolveAction::Leave),
        "merge" => Ok(ResolveAction::Merge),
        _ => Err(ResolveActionParseError::UnknownAction(value.to_string())),
    }
}

/// One batch as presented to callers.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BatchInfo {
    /// The canonical batch identifier.
    pub batch_id: i64,
    /// The course this batch belongs to.
    pub course_id: i64,
    /// The batch type (wire value, `"regular"` or `"revision"`).
    pub batch_type: String,
    /// Position in the per-type numbering sequence.
    pub batch_number: u32,
    /// Display name, e.g. "Regular Batch 3".
    pub name: String,
    /// Capacity of the batch.
    pub max_students: u32,
    /// Students currently assigned.
    pub current_students: u32,
    /// Whether the batch is still flagged as a leftover.
    pub is_leftover_batch: bool,
    /// Lifecycle status (wire value).
    pub status: String,
    /// First teaching day.
    pub start_date: Date,
    /// Last teaching day.
    pub end_date: Date,
    /// Assigned instructor, if any.
    pub instructor_id: Option<i64>,
}

impl BatchInfo {
    /// Builds the DTO from a persisted domain batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch has no persisted identifier.
    pub fn from_batch(batch: &Batch) -> Result<Self, ApiError> {
        let batch_id: i64 = batch.batch_id.ok_or_else(|| ApiError::Internal {
            message: String::from("Batch without a persisted identifier in API response"),
        })?;
        Ok(Self {
            batch_id,
            course_id: batch.course_id,
            batch_type: batch.batch_type.as_str().to_string(),
            batch_number: batch.batch_number,
            name: batch.name.clone(),
            max_students: batch.max_students,
            current_students: batch.current_students,
            is_leftover_batch: batch.is_leftover_batch,
            status: batch.status.as_str().to_string(),
            start_date: batch.start_date,
            end_date: batch.end_date,
            instructor_id: batch.instructor_id,
        })
    }
}

/// Summary counts for one allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocationSummaryInfo {
    /// Active students across both batch types.
    pub total_students: usize,
    /// Active regular-type students.
    pub regular_students: usize,
    /// Active revision-type students.
    pub revision_students: usize,
    /// Batches created by this run.
    pub total_batches: usize,
    /// Students placed into leftover batches by this run.
    pub leftover_students: usize,
}

/// API response for a successful batch creation run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateBatchesResponse {
    /// The course allocated.
    pub course_id: i64,
    /// Newly created full (and shell) batches.
    pub batches: Vec<BatchInfo>,
    /// Newly created leftover batches (at most one per enabled type).
    pub leftover_batches: Vec<BatchInfo>,
    /// Summary counts for this run.
    pub summary: AllocationSummaryInfo,
    /// A success message.
    pub message: String,
}

/// API request to resolve a leftover batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveLeftoverRequest {
    /// The flagged leftover batch.
    pub batch_id: i64,
    /// The decision: `"leave"` or `"merge"`.
    pub action: String,
    /// The merge target; required when the action is `"merge"`.
    pub target_batch_id: Option<i64>,
}

/// API response for a successful leftover resolution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolveLeftoverResponse {
    /// The batch the decision applied to.
    pub batch_id: i64,
    /// The decision that was applied (wire value).
    pub action: String,
    /// Students moved to the target (merge only).
    pub merged_students: Option<u32>,
    /// The target batch after the merge (merge only).
    pub target_batch: Option<BatchInfo>,
    /// A success message.
    pub message: String,
}

/// Batches and student count for one batch type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BatchTypeDistributionInfo {
    /// The batch type (wire value).
    pub batch_type: String,
    /// All batches of this type, in numbering order.
    pub batches: Vec<BatchInfo>,
    /// Active enrollments of this type.
    pub student_count: usize,
}

/// Course-level capacity utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapacityUtilizationInfo {
    /// The course's total enrollment capacity.
    pub total_capacity: u32,
    /// Active enrollments counted against the capacity.
    pub used_capacity: u32,
    /// Remaining capacity.
    pub available_capacity: u32,
    /// Rounded percentage of capacity in use.
    pub utilization_percent: u32,
}

/// API response for the batch distribution summary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DistributionSummaryResponse {
    /// The course summarized.
    pub course_id: i64,
    /// All active enrollments across both types.
    pub total_students: usize,
    /// All batches across both types.
    pub total_batches: usize,
    /// Regular-type distribution.
    pub regular: BatchTypeDistributionInfo,
    /// Revision-type distribution.
    pub revision: BatchTypeDistributionInfo,
    /// Batches currently flagged as leftovers.
    pub leftover_batches: Vec<BatchInfo>,
    /// Capacity utilization across the whole course.
    pub capacity: CapacityUtilizationInfo,
}

/// API response for a successful recalculation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecalculateBatchesResponse {
    /// The course recalculated.
    pub course_id: i64,
    /// Batches deleted by the wipe step.
    pub deleted_batches: usize,
    /// The rebuild result.
    pub result: CreateBatchesResponse,
    /// A success message.
    pub message: String,
}
