//! Execute-mode terminals.

use super::{Execute, Prepared, Query};
use crate::connection::Connection;
use crate::error::SqlResult;
use crate::record::Record;

fn trace(kind: &'static str, prepared: &Prepared) {
    tracing::debug!(
        target: "fluentql.sql",
        kind,
        params = prepared.bindings.len(),
        sql = %prepared.sql,
        "executing statement"
    );
}

impl Query<Execute> {
    /// Insert `record` into the table.
    ///
    /// Returns `Ok(true)` once the connection accepts the statement and
    /// `Ok(false)` when it reports a failure. Errors raised while rendering
    /// (such as a missing table) are returned as `Err`.
    ///
    /// ```ignore
    /// let ok = table("users")
    ///     .insert(&conn, [("name", "John".into()), ("age", 20.into()), ("sex", "M".into())])
    ///     .await?;
    /// ```
    pub async fn insert<C: Connection>(
        &self,
        conn: &C,
        record: impl Into<Record>,
    ) -> SqlResult<bool> {
        let prepared = self.prepare_insert(record)?;
        trace("insert", &prepared);
        match conn.insert(&prepared.sql, &prepared.bindings).await {
            Ok(_) => Ok(true),
            Err(err) => {
                tracing::warn!(
                    target: "fluentql.sql",
                    error = %err,
                    sql = %prepared.sql,
                    "insert failed"
                );
                Ok(false)
            }
        }
    }

    /// Run the SELECT statement and return every row.
    pub async fn get<C: Connection>(&self, conn: &C) -> SqlResult<Vec<C::Row>> {
        let prepared = self.prepare()?;
        trace("select", &prepared);
        conn.all(&prepared.sql, &prepared.bindings).await
    }

    /// Run the SELECT statement with `LIMIT 1` and return the row, if any.
    pub async fn first<C: Connection>(&self, conn: &C) -> SqlResult<Option<C::Row>> {
        let prepared = self.prepare_first()?;
        trace("select", &prepared);
        conn.get(&prepared.sql, &prepared.bindings).await
    }

    /// Run an UPDATE and return the number of changed rows.
    pub async fn update<C: Connection>(
        &self,
        conn: &C,
        record: impl Into<Record>,
    ) -> SqlResult<u64> {
        let prepared = self.prepare_update(record)?;
        trace("update", &prepared);
        Ok(conn.run(&prepared.sql, &prepared.bindings).await?.changes)
    }

    /// Run a DELETE and return the number of removed rows.
    pub async fn delete<C: Connection>(&self, conn: &C) -> SqlResult<u64> {
        let prepared = self.prepare_delete()?;
        trace("delete", &prepared);
        Ok(conn.run(&prepared.sql, &prepared.bindings).await?.changes)
    }
}
