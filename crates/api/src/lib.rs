// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process API boundary for the Cohort allocation engine.
//!
//! The four public operations of the engine live here:
//!
//! - [`create_batches_for_course`] — allocate every enabled batch type
//! - [`resolve_leftover_batch`] — confirm or merge a flagged leftover
//! - [`get_batch_distribution_summary`] — read-only occupancy statistics
//! - [`recalculate_batches`] — destructive wipe-and-rebuild
//!
//! This crate owns no transport. Request handlers (HTTP, jobs, whatever the
//! deployment uses) call these functions in-process with a
//! [`cohort_persistence::Persistence`] adapter and a shared
//! [`CourseLockRegistry`]; the registry serializes mutating operations per
//! course so a recalculation can never interleave with a merge or a
//! concurrent allocation on the same course.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod locks;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    create_batches_for_course, get_batch_distribution_summary, recalculate_batches,
    resolve_leftover_batch,
};
pub use locks::CourseLockRegistry;
pub use request_response::{
    AllocationSummaryInfo, BatchInfo, BatchTypeDistributionInfo, CapacityUtilizationInfo,
    CreateBatchesResponse, DistributionSummaryResponse, RecalculateBatchesResponse,
    ResolveActionParseError, ResolveLeftoverRequest, ResolveLeftoverResponse,
    parse_resolve_action,
};
