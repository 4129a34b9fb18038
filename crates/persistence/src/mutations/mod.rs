// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! All state-changing operations of the persistence layer. Every logical
//! operation that touches more than one row runs inside a single database
//! transaction, so a partial failure never leaves a half-applied
//! allocation, merge, or recalculation behind.
//!
//! - `courses` — course seeding (owned by the administrative layer)
//! - `enrollments` — enrollment seeding (owned by the payment glue)
//! - `allocation` — transactional application of allocation plans
//! - `resolution` — leftover confirmation and merge
//! - `recalculation` — course-wide batch deletion
//!
//! Backend-specific helpers (`get_last_insert_rowid()`) come from the
//! `backend` module; everything else is Diesel DSL.

pub mod allocation;
pub mod courses;
pub mod enrollments;
pub mod recalculation;
pub mod resolution;

use num_traits::ToPrimitive;

/// Narrows a domain count into a stored integer column.
pub(crate) fn to_i32(value: u32) -> Result<i32, crate::error::PersistenceError> {
    value.to_i32().ok_or_else(|| {
        crate::error::PersistenceError::Other(format!("Value out of column range: {value}"))
    })
}
