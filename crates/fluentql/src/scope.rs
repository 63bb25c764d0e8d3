//! Grouping callback adapters.
//!
//! [`WhereScope`] and [`HavingScope`] expose the clause verbs over a borrowed
//! [`ClauseBuilder`]. `*_group` methods open a group on the builder, hand a
//! fresh scope to the callback (its pushes land in the open group), and close
//! the group again, which is how `WHERE a AND (b OR c)` is written without
//! touching [`Group`](crate::clause::Group) directly.
//!
//! ```ignore
//! let sql = fluentql::table("users")
//!     .to_sql()
//!     .where_("age", ">", 90)?
//!     .where_group(|q| {
//!         q.where_("name", "=", "John")?.or_where("id", ">", 1)?;
//!         Ok(())
//!     })?
//!     .get()?;
//! ```

use crate::clause::ClauseBuilder;
use crate::condition;
use crate::error::SqlResult;
use crate::fragment::Separator;
use crate::value::Value;

/// WHERE verbs over a borrowed clause builder.
pub struct WhereScope<'c> {
    clause: &'c mut ClauseBuilder,
}

impl<'c> WhereScope<'c> {
    pub fn new(clause: &'c mut ClauseBuilder) -> Self {
        Self { clause }
    }

    /// AND `column op value`
    pub fn where_(
        &mut self,
        column: &str,
        op: &str,
        value: impl Into<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::compare(column, op, value, Separator::And)?);
        Ok(self)
    }

    /// OR `column op value`
    pub fn or_where(
        &mut self,
        column: &str,
        op: &str,
        value: impl Into<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::compare(column, op, value, Separator::Or)?);
        Ok(self)
    }

    /// AND `column = value`
    pub fn where_eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.compare_eq(column, value, Separator::And)
    }

    /// OR `column = value`
    pub fn or_where_eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.compare_eq(column, value, Separator::Or)
    }

    fn compare_eq(&mut self, column: &str, value: impl Into<Value>, sep: Separator) -> &mut Self {
        self.clause.push(condition::equals(column, value, sep));
        self
    }

    pub fn where_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, false, Separator::And));
        self
    }

    pub fn or_where_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, false, Separator::Or));
        self
    }

    pub fn where_not_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, true, Separator::And));
        self
    }

    pub fn or_where_not_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, true, Separator::Or));
        self
    }

    pub fn where_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, false, Separator::And));
        self
    }

    pub fn or_where_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, false, Separator::Or));
        self
    }

    pub fn where_not_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, true, Separator::And));
        self
    }

    pub fn or_where_not_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, true, Separator::Or));
        self
    }

    /// AND `column BETWEEN low AND high`; `range` must hold exactly two values.
    pub fn where_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, false, Separator::And)?);
        Ok(self)
    }

    pub fn or_where_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, false, Separator::Or)?);
        Ok(self)
    }

    pub fn where_not_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, true, Separator::And)?);
        Ok(self)
    }

    pub fn or_where_not_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, true, Separator::Or)?);
        Ok(self)
    }

    /// AND `first op second` (column to column)
    pub fn where_column(&mut self, first: &str, op: &str, second: &str) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::columns(first, op, second, Separator::And)?);
        Ok(self)
    }

    pub fn or_where_column(
        &mut self,
        first: &str,
        op: &str,
        second: &str,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::columns(first, op, second, Separator::Or)?);
        Ok(self)
    }

    /// AND raw SQL; `bindings` must match its `?` placeholders.
    pub fn where_raw(&mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::raw(sql, bindings, Separator::And)?);
        Ok(self)
    }

    pub fn or_where_raw(&mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<&mut Self> {
        self.clause.push(condition::raw(sql, bindings, Separator::Or)?);
        Ok(self)
    }

    /// AND `EXISTS (subquery)`
    pub fn where_exists(&mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, false, Separator::And)?);
        Ok(self)
    }

    pub fn or_where_exists(
        &mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, false, Separator::Or)?);
        Ok(self)
    }

    pub fn where_not_exists(
        &mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, true, Separator::And)?);
        Ok(self)
    }

    pub fn or_where_not_exists(
        &mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, true, Separator::Or)?);
        Ok(self)
    }

    /// AND `( ... )` built by `f`.
    pub fn where_group<F>(&mut self, f: F) -> SqlResult<&mut Self>
    where
        F: FnOnce(&mut WhereScope<'_>) -> SqlResult<()>,
    {
        self.clause.start_group(Some(Separator::And));
        let result = f(&mut WhereScope::new(&mut *self.clause));
        self.clause.end_group();
        result.map(|()| self)
    }

    /// OR `( ... )` built by `f`.
    pub fn or_where_group<F>(&mut self, f: F) -> SqlResult<&mut Self>
    where
        F: FnOnce(&mut WhereScope<'_>) -> SqlResult<()>,
    {
        self.clause.start_group(Some(Separator::Or));
        let result = f(&mut WhereScope::new(&mut *self.clause));
        self.clause.end_group();
        result.map(|()| self)
    }
}

/// HAVING verbs over a borrowed clause builder.
pub struct HavingScope<'c> {
    clause: &'c mut ClauseBuilder,
}

impl<'c> HavingScope<'c> {
    pub fn new(clause: &'c mut ClauseBuilder) -> Self {
        Self { clause }
    }

    /// AND `column op value`
    pub fn having(
        &mut self,
        column: &str,
        op: &str,
        value: impl Into<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::compare(column, op, value, Separator::And)?);
        Ok(self)
    }

    /// OR `column op value`
    pub fn or_having(
        &mut self,
        column: &str,
        op: &str,
        value: impl Into<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::compare(column, op, value, Separator::Or)?);
        Ok(self)
    }

    pub fn having_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, false, Separator::And));
        self
    }

    pub fn or_having_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, false, Separator::Or));
        self
    }

    pub fn having_not_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, true, Separator::And));
        self
    }

    pub fn or_having_not_null(&mut self, column: &str) -> &mut Self {
        self.clause
            .push(condition::null_check(column, true, Separator::Or));
        self
    }

    pub fn having_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, false, Separator::And));
        self
    }

    pub fn or_having_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, false, Separator::Or));
        self
    }

    pub fn having_not_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, true, Separator::And));
        self
    }

    pub fn or_having_not_in<V: Into<Value>>(
        &mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.clause
            .push(condition::in_list(column, values, true, Separator::Or));
        self
    }

    pub fn having_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, false, Separator::And)?);
        Ok(self)
    }

    pub fn or_having_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, false, Separator::Or)?);
        Ok(self)
    }

    pub fn having_not_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, true, Separator::And)?);
        Ok(self)
    }

    pub fn or_having_not_between<V: Into<Value>>(
        &mut self,
        column: &str,
        range: impl IntoIterator<Item = V>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::between(column, range, true, Separator::Or)?);
        Ok(self)
    }

    /// AND `first op second` (expression to expression)
    pub fn having_column(&mut self, first: &str, op: &str, second: &str) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::columns(first, op, second, Separator::And)?);
        Ok(self)
    }

    pub fn or_having_column(
        &mut self,
        first: &str,
        op: &str,
        second: &str,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::columns(first, op, second, Separator::Or)?);
        Ok(self)
    }

    pub fn having_raw(&mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::raw(sql, bindings, Separator::And)?);
        Ok(self)
    }

    pub fn or_having_raw(&mut self, sql: &str, bindings: Vec<Value>) -> SqlResult<&mut Self> {
        self.clause.push(condition::raw(sql, bindings, Separator::Or)?);
        Ok(self)
    }

    /// AND `EXISTS (subquery)`
    pub fn having_exists(&mut self, subquery: &str, bindings: Vec<Value>) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, false, Separator::And)?);
        Ok(self)
    }

    pub fn or_having_exists(
        &mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, false, Separator::Or)?);
        Ok(self)
    }

    pub fn having_not_exists(
        &mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, true, Separator::And)?);
        Ok(self)
    }

    pub fn or_having_not_exists(
        &mut self,
        subquery: &str,
        bindings: Vec<Value>,
    ) -> SqlResult<&mut Self> {
        self.clause
            .push(condition::exists(subquery, bindings, true, Separator::Or)?);
        Ok(self)
    }

    /// AND `( ... )` built by `f`.
    pub fn having_group<F>(&mut self, f: F) -> SqlResult<&mut Self>
    where
        F: FnOnce(&mut HavingScope<'_>) -> SqlResult<()>,
    {
        self.clause.start_group(Some(Separator::And));
        let result = f(&mut HavingScope::new(&mut *self.clause));
        self.clause.end_group();
        result.map(|()| self)
    }

    /// OR `( ... )` built by `f`.
    pub fn or_having_group<F>(&mut self, f: F) -> SqlResult<&mut Self>
    where
        F: FnOnce(&mut HavingScope<'_>) -> SqlResult<()>,
    {
        self.clause.start_group(Some(Separator::Or));
        let result = f(&mut HavingScope::new(&mut *self.clause));
        self.clause.end_group();
        result.map(|()| self)
    }
}
