// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! All read-only operations of the persistence layer. Every query is
//! generated in backend-specific monomorphic versions (`_sqlite` and
//! `_mysql` suffixes) by the `backend_fn!` macro and uses Diesel DSL
//! exclusively.
//!
//! - `courses` — course lookup
//! - `batches` — batch lookup, listing, and max-batch-number reads
//! - `enrollments` — roster reads in the documented stable order

pub mod batches;
pub mod courses;
pub mod enrollments;
