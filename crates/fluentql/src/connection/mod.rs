//! The database connection seam.
//!
//! [`Query`](crate::Query) never talks to a driver directly: execute-mode
//! terminals render the prepared form and forward `(sql, bindings)` to a
//! [`Connection`]. Any type implementing the trait works, which keeps the
//! builder testable with an in-memory recorder.
//!
//! With the `postgres` feature (default), [`tokio_postgres::Client`] and
//! [`tokio_postgres::Transaction`] implement the trait.

#[cfg(feature = "postgres")]
mod postgres;

use crate::error::SqlResult;
use crate::format::replace_placeholders;
use crate::value::Value;
use std::future::Future;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Rows changed by the statement.
    pub changes: u64,
    /// Id of the inserted row, when the driver reports one.
    pub last_insert_id: Option<i64>,
}

impl RunResult {
    pub fn new(changes: u64) -> Self {
        Self {
            changes,
            last_insert_id: None,
        }
    }
}

/// A database handle that executes `?`-placeholder SQL with ordered bindings.
pub trait Connection: Send + Sync {
    /// Row type produced by reads.
    type Row: Send;

    /// Run a query and return every row.
    fn all(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = SqlResult<Vec<Self::Row>>> + Send;

    /// Run a query and return the first row, if any.
    fn get(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = SqlResult<Option<Self::Row>>> + Send;

    /// Run a statement that returns no rows.
    fn run(&self, sql: &str, bindings: &[Value])
    -> impl Future<Output = SqlResult<RunResult>> + Send;

    /// Run an INSERT statement.
    ///
    /// The default implementation calls [`Connection::run`].
    fn insert(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = SqlResult<RunResult>> + Send {
        self.run(sql, bindings)
    }
}

/// Rewrite `?` placeholders as `$1, $2, ...`.
///
/// Question marks inside quoted text (`'...'`, `"..."`, `` `...` ``) are left
/// alone, the same way they are skipped when counting bindings.
///
/// ```ignore
/// assert_eq!(
///     numbered_placeholders("a = ? AND b = '?' AND c = ?"),
///     "a = $1 AND b = '?' AND c = $2"
/// );
/// ```
pub fn numbered_placeholders(sql: &str) -> String {
    replace_placeholders(sql, |n| Some(format!("${}", n + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_placeholders() {
        assert_eq!(
            numbered_placeholders("INSERT INTO users (name, age) VALUES (?, ?)"),
            "INSERT INTO users (name, age) VALUES ($1, $2)"
        );
        assert_eq!(numbered_placeholders("SELECT * FROM t"), "SELECT * FROM t");
    }

    #[test]
    fn test_numbered_placeholders_skip_literals() {
        assert_eq!(
            numbered_placeholders("a = ? AND b = 'it''s ?' AND c = ?"),
            "a = $1 AND b = 'it''s ?' AND c = $2"
        );
    }

    #[test]
    fn test_numbered_placeholders_skip_quoted_identifiers() {
        assert_eq!(
            numbered_placeholders("SELECT \"why?\", `what?` FROM t WHERE a = ?"),
            "SELECT \"why?\", `what?` FROM t WHERE a = $1"
        );
    }

    #[test]
    fn test_numbering_matches_binding_count() {
        let sql = "SELECT '?' AS marker FROM t WHERE note = 'why?' AND id IN (?, ?)";
        let numbered = numbered_placeholders(sql);
        assert_eq!(
            numbered,
            "SELECT '?' AS marker FROM t WHERE note = 'why?' AND id IN ($1, $2)"
        );
        assert_eq!(crate::format::count_placeholders(sql), 2);
    }
}
