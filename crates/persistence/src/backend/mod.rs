// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Everything that cannot be expressed in backend-agnostic Diesel DSL lives
//! here: connection initialization, migration execution, PRAGMA/engine
//! configuration, and the last-insert-id workaround. All allocation queries
//! and mutations stay backend-agnostic in `queries/` and `mutations/`.
//!
//! - `sqlite` — default backend for development and all standard tests
//! - `mysql` — MySQL/MariaDB, validated via `cargo xtask test-mariadb`

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Backend-specific operations needed by otherwise agnostic mutation code.
///
/// Implemented for both connection types so a single `backend_fn!` body can
/// retrieve inserted row identifiers and verify referential integrity
/// without knowing which backend it runs on.
pub trait PersistenceBackend: Connection {
    /// Retrieves the identifier of the most recently inserted row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
