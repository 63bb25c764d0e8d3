use super::{Connection, RunResult, numbered_placeholders};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

fn params(bindings: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    bindings.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

impl Connection for tokio_postgres::Client {
    type Row = Row;

    async fn all(&self, sql: &str, bindings: &[Value]) -> SqlResult<Vec<Row>> {
        let sql = numbered_placeholders(sql);
        self.query(sql.as_str(), &params(bindings))
            .await
            .map_err(SqlError::from)
    }

    async fn get(&self, sql: &str, bindings: &[Value]) -> SqlResult<Option<Row>> {
        let rows = Connection::all(self, sql, bindings).await?;
        Ok(rows.into_iter().next())
    }

    async fn run(&self, sql: &str, bindings: &[Value]) -> SqlResult<RunResult> {
        let sql = numbered_placeholders(sql);
        let changes = self
            .execute(sql.as_str(), &params(bindings))
            .await
            .map_err(SqlError::from)?;
        Ok(RunResult::new(changes))
    }
}

impl Connection for tokio_postgres::Transaction<'_> {
    type Row = Row;

    async fn all(&self, sql: &str, bindings: &[Value]) -> SqlResult<Vec<Row>> {
        let sql = numbered_placeholders(sql);
        self.query(sql.as_str(), &params(bindings))
            .await
            .map_err(SqlError::from)
    }

    async fn get(&self, sql: &str, bindings: &[Value]) -> SqlResult<Option<Row>> {
        let rows = Connection::all(self, sql, bindings).await?;
        Ok(rows.into_iter().next())
    }

    async fn run(&self, sql: &str, bindings: &[Value]) -> SqlResult<RunResult> {
        let sql = numbered_placeholders(sql);
        let changes = self
            .execute(sql.as_str(), &params(bindings))
            .await
            .map_err(SqlError::from)?;
        Ok(RunResult::new(changes))
    }
}
