// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the allocation engine's public operations.
//!
//! Each handler orchestrates the same shape: read snapshots from
//! persistence, plan with the pure engine, apply the plan transactionally,
//! translate errors at the boundary. Mutating handlers hold the course's
//! advisory lock for their full duration; the read-only summary does not.

use std::sync::PoisonError;
use tracing::{error, info};

use cohort::{
    AllocationPlan, BatchTypeDistribution, ResolutionPlan, ResolveAction, plan_batch_allocation,
    plan_resolution, summarize_distribution,
};
use cohort_domain::{Batch, BatchType, Course, DomainError, Enrollment};
use cohort_persistence::{Persistence, PersistenceError};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::locks::CourseLockRegistry;
use crate::request_response::{
    AllocationSummaryInfo, BatchInfo, BatchTypeDistributionInfo, CapacityUtilizationInfo,
    CreateBatchesResponse, DistributionSummaryResponse, RecalculateBatchesResponse,
    ResolveLeftoverRequest, ResolveLeftoverResponse, parse_resolve_action,
};

/// Creates batches for every enabled batch type of a course.
///
/// Reads each type's active roster in the stable roster order, plans the
/// partition, and applies each type's plan in its own transaction. Types
/// never share batches; a disabled type is skipped entirely.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `locks` - The shared course lock registry
/// * `course_id` - The course to allocate
///
/// # Errors
///
/// Returns an error if:
/// - The course does not exist
/// - The course configuration fails validation
/// - A concurrent allocation took a batch number first
/// - Any persistence write fails
pub fn create_batches_for_course(
    persistence: &mut Persistence,
    locks: &CourseLockRegistry,
    course_id: i64,
) -> Result<CreateBatchesResponse, ApiError> {
    let cell = locks.cell(course_id);
    let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

    create_batches_locked(persistence, course_id)
}

/// The creation path proper; callers must hold the course lock.
fn create_batches_locked(
    persistence: &mut Persistence,
    course_id: i64,
) -> Result<CreateBatchesResponse, ApiError> {
    let course: Course = persistence
        .get_course(course_id)
        .map_err(translate_persistence_error)?;

    let mut batches: Vec<BatchInfo> = Vec::new();
    let mut leftover_batches: Vec<BatchInfo> = Vec::new();
    let mut regular_students: usize = 0;
    let mut revision_students: usize = 0;
    let mut leftover_students: usize = 0;

    for batch_type in course.batch_types.enabled_types() {
        let roster: Vec<Enrollment> = persistence
            .list_active_enrollments(course_id, batch_type)
            .map_err(translate_persistence_error)?;
        match batch_type {
            BatchType::Regular => regular_students = roster.len(),
            BatchType::Revision => revision_students = roster.len(),
        }

        let next_number: u32 = persistence
            .next_batch_number(course_id, batch_type)
            .map_err(translate_persistence_error)?;

        let plan: AllocationPlan =
            plan_batch_allocation(&course, batch_type, &roster, next_number)
                .map_err(translate_core_error)?;

        let batch_ids: Vec<i64> = persistence
            .apply_allocation(&plan)
            .map_err(translate_persistence_error)?;

        for &batch_id in &batch_ids {
            let batch: Batch = persistence
                .get_batch(batch_id)
                .map_err(translate_persistence_error)?;
            let info: BatchInfo = BatchInfo::from_batch(&batch)?;
            if batch.is_leftover_batch {
                leftover_students += usize::try_from(batch.current_students).unwrap_or(0);
                leftover_batches.push(info);
            } else {
                batches.push(info);
            }
        }
    }

    let total_batches: usize = batches.len() + leftover_batches.len();
    let summary: AllocationSummaryInfo = AllocationSummaryInfo {
        total_students: regular_students + revision_students,
        regular_students,
        revision_students,
        total_batches,
        leftover_students,
    };

    info!(
        "allocated course {}: {} batches, {} leftover",
        course_id,
        total_batches,
        leftover_batches.len()
    );

    Ok(CreateBatchesResponse {
        course_id,
        batches,
        leftover_batches,
        summary,
        message: format!("Created {total_batches} batches for course {course_id}"),
    })
}

/// Applies an administrative decision to a leftover batch.
///
/// `leave` clears the flag (idempotently); `merge` transfers the members
/// into the target batch and deletes the source. The merge capacity
/// precondition is checked against the planning snapshot and re-applied
/// atomically at commit time, so a racing merge cannot oversubscribe the
/// target.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `locks` - The shared course lock registry
/// * `request` - The resolution request
///
/// # Errors
///
/// Returns an error if:
/// - The action string is unknown, or `merge` lacks a target
/// - The batch or target does not exist
/// - The batch is not flagged (merge), or the target cannot absorb it
/// - The target belongs to a different course or batch type
pub fn resolve_leftover_batch(
    persistence: &mut Persistence,
    locks: &CourseLockRegistry,
    request: &ResolveLeftoverRequest,
) -> Result<ResolveLeftoverResponse, ApiError> {
    let action: ResolveAction =
        parse_resolve_action(&request.action).map_err(|e| ApiError::InvalidInput {
            field: String::from("action"),
            message: e.to_string(),
        })?;

    // Locate the course first so the lock can be taken, then re-read the
    // source under the lock to plan against a stable snapshot.
    let course_id: i64 = persistence
        .get_batch(request.batch_id)
        .map_err(translate_persistence_error)?
        .course_id;

    let cell = locks.cell(course_id);
    let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

    let source: Batch = persistence
        .get_batch(request.batch_id)
        .map_err(translate_persistence_error)?;

    let target: Option<Batch> = match (action, request.target_batch_id) {
        (ResolveAction::Merge, Some(target_batch_id)) => Some(
            persistence.get_batch(target_batch_id).map_err(|e| {
                if e == PersistenceError::BatchNotFound(target_batch_id) {
                    translate_domain_error(DomainError::TargetBatchNotFound(target_batch_id))
                } else {
                    translate_persistence_error(e)
                }
            })?,
        ),
        _ => None,
    };

    let plan: ResolutionPlan =
        plan_resolution(&source, action, target.as_ref()).map_err(translate_core_error)?;

    match plan {
        ResolutionPlan::AlreadyConfirmed { batch_id } => Ok(ResolveLeftoverResponse {
            batch_id,
            action: action.as_str().to_string(),
            merged_students: None,
            target_batch: None,
            message: format!("Batch {batch_id} was already confirmed as a standalone batch"),
        }),
        ResolutionPlan::Confirm { batch_id } => {
            persistence
                .confirm_leftover(batch_id)
                .map_err(translate_persistence_error)?;
            info!("confirmed leftover batch {} as standalone", batch_id);
            Ok(ResolveLeftoverResponse {
                batch_id,
                action: action.as_str().to_string(),
                merged_students: None,
                target_batch: None,
                message: format!("Batch {batch_id} kept as a standalone batch"),
            })
        }
        ResolutionPlan::Merge {
            source_batch_id,
            target_batch_id,
            course_id: _,
            transfer_count,
        } => {
            persistence
                .merge_leftover(source_batch_id, target_batch_id, transfer_count)
                .map_err(translate_persistence_error)?;
            info!(
                "merged batch {} into {} ({} students)",
                source_batch_id, target_batch_id, transfer_count
            );

            let target_batch: Batch = persistence
                .get_batch(target_batch_id)
                .map_err(translate_persistence_error)?;
            Ok(ResolveLeftoverResponse {
                batch_id: source_batch_id,
                action: action.as_str().to_string(),
                merged_students: Some(transfer_count),
                target_batch: Some(BatchInfo::from_batch(&target_batch)?),
                message: format!(
                    "Merged {transfer_count} students into batch {target_batch_id}"
                ),
            })
        }
    }
}

/// Produces the batch distribution summary for a course.
///
/// Read-only and computed fresh on every call; no lock is taken and no
/// record is mutated.
///
/// # Errors
///
/// Returns an error if the course does not exist or the database cannot be
/// queried.
pub fn get_batch_distribution_summary(
    persistence: &mut Persistence,
    course_id: i64,
) -> Result<DistributionSummaryResponse, ApiError> {
    let course: Course = persistence
        .get_course(course_id)
        .map_err(translate_persistence_error)?;
    let batches: Vec<Batch> = persistence
        .list_batches_for_course(course_id)
        .map_err(translate_persistence_error)?;
    let enrollments: Vec<Enrollment> = persistence
        .list_enrollments_for_course(course_id)
        .map_err(translate_persistence_error)?;

    let summary = summarize_distribution(&course, &batches, &enrollments)
        .map_err(translate_core_error)?;

    let type_info = |distribution: &BatchTypeDistribution| -> Result<
        BatchTypeDistributionInfo,
        ApiError,
    > {
        Ok(BatchTypeDistributionInfo {
            batch_type: distribution.batch_type.as_str().to_string(),
            batches: distribution
                .batches
                .iter()
                .map(BatchInfo::from_batch)
                .collect::<Result<Vec<BatchInfo>, ApiError>>()?,
            student_count: distribution.student_count,
        })
    };

    Ok(DistributionSummaryResponse {
        course_id: summary.course_id,
        total_students: summary.total_students,
        total_batches: summary.total_batches,
        regular: type_info(&summary.regular)?,
        revision: type_info(&summary.revision)?,
        leftover_batches: summary
            .leftover_batches
            .iter()
            .map(BatchInfo::from_batch)
            .collect::<Result<Vec<BatchInfo>, ApiError>>()?,
        capacity: CapacityUtilizationInfo {
            total_capacity: summary.capacity.total_capacity,
            used_capacity: summary.capacity.used_capacity,
            available_capacity: summary.capacity.available_capacity,
            utilization_percent: summary.capacity.utilization_percent,
        },
    })
}

/// Destructively rebuilds every batch of a course from its current roster.
///
/// Deletes all batches (both types) in one transaction, then re-runs the
/// creation path. Leftover-resolution decisions and per-batch instructor
/// overrides are not preserved. The course lock is held across the whole
/// wipe-and-rebuild, so no merge or allocation can interleave.
///
/// # Errors
///
/// Returns an error if the course does not exist or any step fails. A
/// failure after the wipe leaves the course with zero batches; this is
/// logged as an error and surfaced, never retried automatically.
pub fn recalculate_batches(
    persistence: &mut Persistence,
    locks: &CourseLockRegistry,
    course_id: i64,
) -> Result<RecalculateBatchesResponse, ApiError> {
    let cell = locks.cell(course_id);
    let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

    // Course existence is checked before anything is destroyed
    persistence
        .get_course(course_id)
        .map_err(translate_persistence_error)?;

    let deleted_batches: usize = persistence
        .delete_course_batches(course_id)
        .map_err(translate_persistence_error)?;

    match create_batches_locked(persistence, course_id) {
        Ok(result) => {
            info!(
                "recalculated course {}: {} batches deleted, {} created",
                course_id, deleted_batches, result.summary.total_batches
            );
            Ok(RecalculateBatchesResponse {
                course_id,
                deleted_batches,
                message: format!("Recalculated batches for course {course_id}"),
                result,
            })
        }
        Err(e) => {
            // The wipe already committed: the course has zero batches until
            // an operator re-runs the rebuild
            error!(
                "recalculation of course {} failed after deleting {} batches: {}",
                course_id, deleted_batches, e
            );
            Err(e)
        }
    }
}
