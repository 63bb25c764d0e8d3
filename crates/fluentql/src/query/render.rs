//! Statement assembly and the literal-mode terminals.

use super::{Literal, Query};
use crate::clause::ClauseBuilder;
use crate::error::{SqlError, SqlResult};
use crate::format::{identifier, placeholder_list, value_list};
use std::borrow::Cow;
use crate::record::Record;
use crate::value::Value;

/// A statement in placeholder form with its ordered bindings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prepared {
    pub sql: String,
    pub bindings: Vec<Value>,
}

/// Collects non-empty statement parts and joins them with single spaces.
struct Assembly {
    as_literal: bool,
    parts: Vec<String>,
    bindings: Vec<Value>,
}

impl Assembly {
    fn new(as_literal: bool) -> Self {
        Self {
            as_literal,
            parts: Vec::new(),
            bindings: Vec::new(),
        }
    }

    fn text(&mut self, part: impl Into<String>) -> &mut Self {
        let part = part.into();
        if !part.is_empty() {
            self.parts.push(part);
        }
        self
    }

    fn clause(&mut self, clause: &ClauseBuilder) -> &mut Self {
        let text = clause.render_clause(self.as_literal, &mut self.bindings);
        self.text(text)
    }

    fn values<'v>(&mut self, values: impl IntoIterator<Item = &'v Value>) {
        self.bindings.extend(values.into_iter().cloned());
    }

    fn finish(self) -> Prepared {
        Prepared {
            sql: self.parts.join(" "),
            bindings: self.bindings,
        }
    }
}

impl<M> Query<M> {
    fn require_table(&self) -> SqlResult<Cow<'_, str>> {
        self.table
            .as_deref()
            .map(identifier)
            .ok_or(SqlError::MissingTable)
    }

    fn pagination(&self, asm: &mut Assembly, limit: Option<u64>) {
        if let Some(n) = limit {
            asm.text(format!("LIMIT {}", n));
        }
        if let Some(n) = self.offset {
            asm.text(format!("OFFSET {}", n));
        }
    }

    pub(crate) fn render_select(&self, as_literal: bool, limit: Option<u64>) -> SqlResult<Prepared> {
        let table = self.require_table()?;
        let mut asm = Assembly::new(as_literal);
        asm.clause(&self.select)
            .text(format!("FROM {}", table))
            .clause(&self.join)
            .clause(&self.wheres)
            .clause(&self.group_by)
            .clause(&self.having)
            .clause(&self.order_by);
        self.pagination(&mut asm, limit);
        Ok(asm.finish())
    }

    pub(crate) fn render_insert(&self, as_literal: bool, record: &Record) -> SqlResult<Prepared> {
        let table = self.require_table()?;
        let mut asm = Assembly::new(as_literal);
        if record.is_empty() {
            asm.text(format!("INSERT INTO {} DEFAULT VALUES", table));
            return Ok(asm.finish());
        }
        let columns = record
            .columns()
            .map(identifier)
            .collect::<Vec<_>>()
            .join(", ");
        let values = if as_literal {
            value_list(&record.values().cloned().collect::<Vec<_>>())
        } else {
            asm.values(record.values());
            placeholder_list(record.len())
        };
        asm.text(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table, columns, values
        ));
        Ok(asm.finish())
    }

    pub(crate) fn render_update(&self, as_literal: bool, record: &Record) -> SqlResult<Prepared> {
        let table = self.require_table()?;
        if record.is_empty() {
            return Err(SqlError::EmptyAssignments);
        }
        let mut asm = Assembly::new(as_literal);
        let assignments = record
            .iter()
            .map(|(column, value)| {
                let column = identifier(column);
                if as_literal {
                    format!("{} = {}", column, value.to_literal())
                } else {
                    format!("{} = ?", column)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        if !as_literal {
            asm.values(record.values());
        }
        asm.text(format!("UPDATE {} SET {}", table, assignments))
            .clause(&self.wheres)
            .clause(&self.order_by);
        self.pagination(&mut asm, self.limit);
        Ok(asm.finish())
    }

    pub(crate) fn render_delete(&self, as_literal: bool) -> SqlResult<Prepared> {
        let table = self.require_table()?;
        let mut asm = Assembly::new(as_literal);
        asm.text(format!("DELETE FROM {}", table))
            .clause(&self.wheres)
            .clause(&self.order_by);
        self.pagination(&mut asm, self.limit);
        Ok(asm.finish())
    }

    // ==================== Prepared form ====================

    /// The SELECT statement with `?` placeholders and its bindings.
    pub fn prepare(&self) -> SqlResult<Prepared> {
        self.render_select(false, self.limit)
    }

    /// Like [`Query::prepare`] with `LIMIT 1`.
    pub fn prepare_first(&self) -> SqlResult<Prepared> {
        self.render_select(false, Some(1))
    }

    pub fn prepare_insert(&self, record: impl Into<Record>) -> SqlResult<Prepared> {
        self.render_insert(false, &record.into())
    }

    pub fn prepare_update(&self, record: impl Into<Record>) -> SqlResult<Prepared> {
        self.render_update(false, &record.into())
    }

    pub fn prepare_delete(&self) -> SqlResult<Prepared> {
        self.render_delete(false)
    }
}

impl Query<Literal> {
    /// The SELECT statement as literal SQL.
    pub fn get(&self) -> SqlResult<String> {
        Ok(self.render_select(true, self.limit)?.sql)
    }

    /// The SELECT statement as literal SQL with `LIMIT 1`.
    pub fn first(&self) -> SqlResult<String> {
        Ok(self.render_select(true, Some(1))?.sql)
    }

    pub fn insert(&self, record: impl Into<Record>) -> SqlResult<String> {
        Ok(self.render_insert(true, &record.into())?.sql)
    }

    pub fn update(&self, record: impl Into<Record>) -> SqlResult<String> {
        Ok(self.render_update(true, &record.into())?.sql)
    }

    pub fn delete(&self) -> SqlResult<String> {
        Ok(self.render_delete(true)?.sql)
    }
}
