// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leftover batch resolution planning.
//!
//! A leftover batch moves through a small state machine: it starts flagged,
//! and an administrative decision either confirms it as a standalone batch
//! (flag cleared, batch persists) or merges it into a target batch (members
//! transferred, source record deleted). Both terminal states are final.
//!
//! ## Invariants
//!
//! - Confirming is idempotent: confirming an already-confirmed batch is a
//!   no-op success
//! - Merging a batch that is not flagged is an invalid-state error
//! - A merge never exceeds the target's capacity; the precondition is
//!   checked here and re-checked atomically at the storage layer
//! - Merges stay within one course and one batch type
//! - The deleted source's batch number is not reclaimed

use crate::error::CoreError;
use cohort_domain::{Batch, DomainError, validate_merge_capacity};

/// The administrative decision applied to a leftover batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    /// Keep the leftover batch as a standalone batch.
    Leave,
    /// Merge the leftover batch into a target batch.
    Merge,
}

impl ResolveAction {
    /// Converts this action to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Merge => "merge",
        }
    }
}

impl std::fmt::Display for ResolveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The storage-layer work a resolution decision requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionPlan {
    /// The batch was already confirmed; nothing to do.
    AlreadyConfirmed {
        /// The batch that was already confirmed.
        batch_id: i64,
    },
    /// Clear the leftover flag on the batch.
    Confirm {
        /// The batch to confirm.
        batch_id: i64,
    },
    /// Transfer all source members to the target, then delete the source.
    Merge {
        /// The flagged source batch.
        source_batch_id: i64,
        /// The batch receiving the members.
        target_batch_id: i64,
        /// The course both batches belong to.
        course_id: i64,
        /// Number of students moving to the target.
        transfer_count: u32,
    },
}

/// Plans the resolution of a leftover batch.
///
/// # Arguments
///
/// * `source` - The batch the decision applies to
/// * `action` - The administrative decision
/// * `target` - The merge target; required for [`ResolveAction::Merge`]
///
/// # Returns
///
/// The [`ResolutionPlan`] the persistence layer should apply.
///
/// # Errors
///
/// Returns an error if:
/// - A merge is requested on a batch that is not flagged as a leftover
/// - A merge is requested without a target batch
/// - The target belongs to a different course or batch type
/// - The merge would exceed the target's capacity
pub fn plan_resolution(
    source: &Batch,
    action: ResolveAction,
    target: Option<&Batch>,
) -> Result<ResolutionPlan, CoreError> {
    let source_batch_id: i64 = source
        .batch_id
        .ok_or(DomainError::UnpersistedEntity("batch"))?;

    match action {
        ResolveAction::Leave => {
            // Clearing an already-cleared flag is a no-op, not an error
            if source.is_leftover_batch {
                Ok(ResolutionPlan::Confirm {
                    batch_id: source_batch_id,
                })
            } else {
                Ok(ResolutionPlan::AlreadyConfirmed {
                    batch_id: source_batch_id,
                })
            }
        }
        ResolveAction::Merge => {
            if !source.is_leftover_batch {
                return Err(DomainError::NotALeftoverBatch(source_batch_id).into());
            }

            let target: &Batch = target.ok_or(DomainError::MergeTargetMissing)?;
            let target_batch_id: i64 = target
                .batch_id
                .ok_or(DomainError::UnpersistedEntity("batch"))?;

            if target.course_id != source.course_id {
                return Err(DomainError::MergeCourseMismatch {
                    source_course: source.course_id,
                    target_course: target.course_id,
                }
                .into());
            }
            if target.batch_type != source.batch_type {
                return Err(DomainError::MergeTypeMismatch {
                    source_type: source.batch_type,
                    target_type: target.batch_type,
                }
                .into());
            }

            validate_merge_capacity(
                target_batch_id,
                target.current_students,
                source.current_students,
                target.max_students,
            )?;

            Ok(ResolutionPlan::Merge {
                source_batch_id,
                target_batch_id,
                course_id: source.course_id,
                transfer_count: source.current_students,
            })
        }
    }
}
