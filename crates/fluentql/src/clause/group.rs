use super::{ClauseBuilder, ClauseKind, Member};
use crate::fragment::{Separator, with_separator};
use crate::value::Value;

/// A parenthesized, keyword-less sub-clause.
///
/// Renders to an empty string when nothing inside it renders, so the parent
/// skips it when placing separators.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    separator: Option<Separator>,
    body: ClauseBuilder,
}

impl Group {
    /// Create an empty group joined to its parent with `separator`.
    pub fn new(separator: Option<Separator>) -> Self {
        Self {
            separator,
            body: ClauseBuilder::new(ClauseKind::None),
        }
    }

    /// Separator joining the group to the member before it.
    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    /// Members inside the parentheses.
    pub fn members(&self) -> &[Member] {
        self.body.members()
    }

    /// Whether nothing has been pushed into the group.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub(crate) fn is_grouping(&self) -> bool {
        self.body.is_grouping()
    }

    /// Append a member, or hand it to a nested open group.
    pub fn push(&mut self, member: impl Into<Member>) {
        self.body.push(member);
    }

    pub(crate) fn start_group(&mut self, separator: Option<Separator>) {
        self.body.start_group(separator);
    }

    pub(crate) fn end_group(&mut self) {
        self.body.end_group();
    }

    /// Render as `(...)`, or `""` when the body is empty.
    pub fn render(&self, as_literal: bool, with_sep: bool) -> String {
        let mut sink = Vec::new();
        self.render_into(as_literal, with_sep, &mut sink)
    }

    /// Placeholder form of [`Group::render`] with the bindings of rendered members.
    pub fn render_prepared(&self, with_sep: bool) -> (String, Vec<Value>) {
        let mut bindings = Vec::new();
        let sql = self.render_into(false, with_sep, &mut bindings);
        (sql, bindings)
    }

    pub(super) fn render_into(
        &self,
        as_literal: bool,
        with_sep: bool,
        bindings: &mut Vec<Value>,
    ) -> String {
        let mut inner = Vec::new();
        let body = self.body.render_body(as_literal, &mut inner);
        if body.is_empty() {
            return String::new();
        }
        bindings.append(&mut inner);
        with_separator(format!("({})", body), self.separator, with_sep)
    }
}
