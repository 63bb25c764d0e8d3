//! The fluent statement builder.
//!
//! A [`Query`] owns one [`ClauseBuilder`] per clause and routes every fluent
//! call into the matching one. Terminal calls assemble the clauses in a fixed
//! order into SELECT, INSERT, UPDATE or DELETE text.
//!
//! The render mode is part of the type:
//!
//! - `Query<Execute>` (the default) forwards the prepared statement to a
//!   [`Connection`](crate::Connection)
//! - `Query<Literal>` (after [`Query::to_sql`]) returns SQL with every value
//!   inlined as a literal
//!
//! # Example
//!
//! ```ignore
//! use fluentql::{table, Direction};
//!
//! let sql = table("my_table")
//!     .where_("name", "=", "John")?
//!     .select(["id", "name"])
//!     .limit(2)
//!     .group_by(["class"])
//!     .offset(5)
//!     .order_by("id", Direction::Desc)
//!     .having("class", "LIKE", "%example%")?
//!     .to_sql()
//!     .get()?;
//! ```

mod execute;
mod render;

pub use render::Prepared;

use crate::clause::{ClauseBuilder, ClauseKind};
use crate::condition;
use crate::error::SqlResult;
use crate::format::identifier;
use crate::fragment::{Fragment, Separator};
use crate::scope::{HavingScope, WhereScope};
use crate::validate;
use crate::value::Value;
use std::fmt;
use std::marker::PhantomData;

/// Render mode: execute through a connection with bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Execute;

/// Render mode: return SQL text with values inlined.
#[derive(Debug, Clone, Copy, Default)]
pub struct Literal;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start a query against `name`.
pub fn table(name: impl Into<String>) -> Query {
    Query::new().table(name)
}

/// Fluent SQL statement builder.
#[derive(Debug, Clone)]
pub struct Query<M = Execute> {
    table: Option<String>,
    select: ClauseBuilder,
    join: ClauseBuilder,
    wheres: ClauseBuilder,
    group_by: ClauseBuilder,
    having: ClauseBuilder,
    order_by: ClauseBuilder,
    limit: Option<u64>,
    offset: Option<u64>,
    mode: PhantomData<M>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// Create an empty query. A table must be set before rendering.
    pub fn new() -> Self {
        Self {
            table: None,
            select: ClauseBuilder::new(ClauseKind::Select),
            join: ClauseBuilder::new(ClauseKind::Join),
            wheres: ClauseBuilder::new(ClauseKind::Where),
            group_by: ClauseBuilder::new(ClauseKind::GroupBy),
            having: ClauseBuilder::new(ClauseKind::Having),
            order_by: ClauseBuilder::new(ClauseKind::OrderBy),
            limit: None,
            offset: None,
            mode: PhantomData,
        }
    }

    /// Switch to literal rendering: terminals return SQL text.
    pub fn to_sql(self) -> Query<Literal> {
        self.with_mode()
    }
}

impl Query<Literal> {
    /// Switch back to execute mode.
    pub fn to_execute(self) -> Query<Execute> {
        self.with_mode()
    }
}

impl<M> Query<M> {
    fn with_mode<N>(self) -> Query<N> {
        Query {
            table: self.table,
            select: self.select,
            join: self.join,
            wheres: self.wheres,
            group_by: self.group_by,
            having: self.having,
            order_by: self.order_by,
            limit: self.limit,
            offset: self.offset,
            mode: PhantomData,
        }
    }

    /// Set the target table.
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    // ==================== SELECT / GROUP BY / ORDER BY ====================

    /// Add columns to the SELECT list. Repeated calls accumulate.
    ///
    /// A column holding a `?` outside quotes is backtick-escaped; use
    /// [`Query::select_raw`] for expressions with bindings.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for column in columns {
            self.select.push(list_item(column.as_ref()));
        }
        self
    }

    /// Add a raw SELECT expression with `?` bindings.
    pub fn select_raw(mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.select.push(condition::raw(sql, bindings, Separator::Comma)?);
        Ok(self)
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for column in columns {
            self.group_by.push(list_item(column.as_ref()));
        }
        self
    }

    /// Add `column direction` to ORDER BY.
    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order_by.push(Fragment::unchecked(
            format!("{} {}", identifier(column), direction),
            Vec::new(),
            Some(Separator::Comma),
        ));
        self
    }

    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, Direction::Desc)
    }

    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, Direction::Asc)
    }

    /// Newest first.
    pub fn latest(self, column: &str) -> Self {
        self.order_by(column, Direction::Desc)
    }

    /// Oldest first.
    pub fn oldest(self, column: &str) -> Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    // ==================== JOIN ====================

    /// `JOIN table ON local op foreign`
    pub fn join(self, table: &str, local: &str, op: &str, foreign: &str) -> SqlResult<Self> {
        self.push_join("JOIN", table, local, op, foreign)
    }

    /// `LEFT JOIN table ON local op foreign`
    pub fn left_join(self, table: &str, local: &str, op: &str, foreign: &str) -> SqlResult<Self> {
        self.push_join("LEFT JOIN", table, local, op, foreign)
    }

    fn push_join(
        mut self,
        keyword: &str,
        table: &str,
        local: &str,
        op: &str,
        foreign: &str,
    ) -> SqlResult<Self> {
        let op = validate::operator(op)?;
        self.join.push(Fragment::unchecked(
            format!(
                "{} {} ON {} {} {}",
                keyword,
                identifier(table),
                identifier(local),
                op,
                identifier(foreign)
            ),
            Vec::new(),
            None,
        ));
        Ok(self)
    }

    // ==================== WHERE ====================

    fn wheres(&mut self) -> WhereScope<'_> {
        WhereScope::new(&mut self.wheres)
    }

    /// `AND column op value`
    pub fn where_(mut self, column: &str, op: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.wheres().where_(column, op, value)?;
        Ok(self)
    }

    /// `OR column op value`
    pub fn or_where(mut self, column: &str, op: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.wheres().or_where(column, op, value)?;
        Ok(self)
    }

    /// `AND column = value`
    pub fn where_eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.wheres().where_eq(column, value);
        self
    }

    /// `OR column = value`
    pub fn or_where_eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.wheres().or_where_eq(column, value);
        self
    }

    pub fn where_null(mut self, column: &str) -> Self {
        self.wheres().where_null(column);
        self
    }

    pub fn or_where_null(mut self, column: &str) -> Self {
        self.wheres().or_where_null(column);
        self
    }

    pub fn where_not_null(mut self, column: &str) -> Self {
        self.wheres().where_not_null(column);
        self
    }

    pub fn or_where_not_null(mut self, column: &str) -> Self {
        self.wheres().or_where_not_null(column);
        self
    }

    pub fn where_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.wheres().where_in(column, values);
        self
    }

    pub fn or_where_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.wheres().or_where_in(column, values);
        self
    }

    pub fn where_not_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.wheres().where_not_in(column, values);
        self
    }

    pub fn or_where_not_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.wheres().or_where_not_in(column, values);
        self
    }

    /// `AND column BETWEEN low AND high`
    pub fn where_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.wheres().where_between(column, range)?;
        Ok(self)
    }

    pub fn or_where_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.wheres().or_where_between(column, range)?;
        Ok(self)
    }

    pub fn where_not_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.wheres().where_not_between(column, range)?;
        Ok(self)
    }

    pub fn or_where_not_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.wheres().or_where_not_between(column, range)?;
        Ok(self)
    }

    /// `AND first op second`
    pub fn where_column(mut self, first: &str, op: &str, second: &str) -> SqlResult<Self> {
        self.wheres().where_column(first, op, second)?;
        Ok(self)
    }

    pub fn or_where_column(mut self, first: &str, op: &str, second: &str) -> SqlResult<Self> {
        self.wheres().or_where_column(first, op, second)?;
        Ok(self)
    }

    /// `AND` raw SQL with one binding per `?`.
    pub fn where_raw(mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.wheres().where_raw(sql, bindings)?;
        Ok(self)
    }

    pub fn or_where_raw(mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.wheres().or_where_raw(sql, bindings)?;
        Ok(self)
    }

    pub fn where_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.wheres().where_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn or_where_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.wheres().or_where_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn where_not_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.wheres().where_not_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn or_where_not_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.wheres().or_where_not_exists(subquery, bindings)?;
        Ok(self)
    }

    /// `AND ( ... )`, with the group's conditions added by `f`.
    ///
    /// ```ignore
    /// table("users")
    ///     .where_("age", ">", 90)?
    ///     .where_group(|q| {
    ///         q.where_("name", "=", "John")?.or_where("id", ">", 1)?;
    ///         Ok(())
    ///     })?;
    /// ```
    pub fn where_group<F>(mut self, f: F) -> SqlResult<Self>
    where
        F: FnOnce(&mut WhereScope<'_>) -> SqlResult<()>,
    {
        self.wheres().where_group(f)?;
        Ok(self)
    }

    /// `OR ( ... )`
    pub fn or_where_group<F>(mut self, f: F) -> SqlResult<Self>
    where
        F: FnOnce(&mut WhereScope<'_>) -> SqlResult<()>,
    {
        self.wheres().or_where_group(f)?;
        Ok(self)
    }

    // ==================== HAVING ====================

    fn havings(&mut self) -> HavingScope<'_> {
        HavingScope::new(&mut self.having)
    }

    pub fn having(mut self, column: &str, op: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.havings().having(column, op, value)?;
        Ok(self)
    }

    pub fn or_having(mut self, column: &str, op: &str, value: impl Into<Value>) -> SqlResult<Self> {
        self.havings().or_having(column, op, value)?;
        Ok(self)
    }

    pub fn having_null(mut self, column: &str) -> Self {
        self.havings().having_null(column);
        self
    }

    pub fn or_having_null(mut self, column: &str) -> Self {
        self.havings().or_having_null(column);
        self
    }

    pub fn having_not_null(mut self, column: &str) -> Self {
        self.havings().having_not_null(column);
        self
    }

    pub fn or_having_not_null(mut self, column: &str) -> Self {
        self.havings().or_having_not_null(column);
        self
    }

    pub fn having_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.havings().having_in(column, values);
        self
    }

    pub fn or_having_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.havings().or_having_in(column, values);
        self
    }

    pub fn having_not_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.havings().having_not_in(column, values);
        self
    }

    pub fn or_having_not_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.havings().or_having_not_in(column, values);
        self
    }

    pub fn having_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.havings().having_between(column, range)?;
        Ok(self)
    }

    pub fn or_having_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.havings().or_having_between(column, range)?;
        Ok(self)
    }

    pub fn having_not_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.havings().having_not_between(column, range)?;
        Ok(self)
    }

    pub fn or_having_not_between<V: Into<Value>>(
        mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<Self> {
        self.havings().or_having_not_between(column, range)?;
        Ok(self)
    }

    /// `AND first op second`
    pub fn having_column(mut self, first: &str, op: &str, second: &str) -> SqlResult<Self> {
        self.havings().having_column(first, op, second)?;
        Ok(self)
    }

    pub fn or_having_column(mut self, first: &str, op: &str, second: &str) -> SqlResult<Self> {
        self.havings().or_having_column(first, op, second)?;
        Ok(self)
    }

    pub fn having_raw(mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.havings().having_raw(sql, bindings)?;
        Ok(self)
    }

    pub fn or_having_raw(mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.havings().or_having_raw(sql, bindings)?;
        Ok(self)
    }

    pub fn having_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.havings().having_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn or_having_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.havings().or_having_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn having_not_exists(mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<Self> {
        self.havings().having_not_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn or_having_not_exists(
        mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<Self> {
        self.havings().or_having_not_exists(subquery, bindings)?;
        Ok(self)
    }

    pub fn having_group<F>(mut self, f: F) -> SqlResult<Self>
    where
        F: FnOnce(&mut HavingScope<'_>) -> SqlResult<()>,
    {
        self.havings().having_group(f)?;
        Ok(self)
    }

    pub fn or_having_group<F>(mut self, f: F) -> SqlResult<Self>
    where
        F: FnOnce(&mut HavingScope<'_>) -> SqlResult<()>,
    {
        self.havings().or_having_group(f)?;
        Ok(self)
    }
}

/// A comma-joined SELECT / GROUP BY entry.
fn list_item(column: &str) -> Fragment {
    Fragment::unchecked(
        identifier(column).into_owned(),
        Vec::new(),
        Some(Separator::Comma),
    )
}
