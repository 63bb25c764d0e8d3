//! Composite clause builders.
//!
//! A [`ClauseBuilder`] is an ordered list of [`Fragment`]s and nested
//! [`Group`]s tagged with the clause keyword it renders under. The same
//! rendering algorithm serves top-level clauses and groups, since a group is
//! itself a keyword-less builder wrapped in parentheses.
//!
//! While a grouping callback runs, pushes are redirected into the most
//! recently started group. The redirect is tracked by [`PushState`]:
//!
//! ```text
//! Direct --start_group--> Grouping(i) --end_group--> Direct
//!                           |    ^
//!               start_group |    | end_group
//!                           v    |
//!                     (nested group of member i)
//! ```

mod group;

pub use group::Group;

use crate::fragment::{Fragment, Separator};
use crate::value::Value;

/// The clause a builder renders under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// `SELECT`; renders `*` when empty
    Select,
    /// Join members carry their own `JOIN` keyword
    Join,
    /// `WHERE`
    Where,
    /// `GROUP BY`
    GroupBy,
    /// `HAVING`
    Having,
    /// `ORDER BY`
    OrderBy,
    /// No keyword (groups)
    None,
}

impl ClauseKind {
    /// Keyword prefixed onto a non-empty rendering, if any.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            ClauseKind::Select => Some("SELECT"),
            ClauseKind::Where => Some("WHERE"),
            ClauseKind::GroupBy => Some("GROUP BY"),
            ClauseKind::Having => Some("HAVING"),
            ClauseKind::OrderBy => Some("ORDER BY"),
            ClauseKind::Join | ClauseKind::None => None,
        }
    }
}

/// Where `push` currently lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushState {
    /// Pushes append to this builder's own members.
    #[default]
    Direct,
    /// Pushes go to the group at this member index.
    Grouping(usize),
}

/// A clause member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A leaf fragment.
    Fragment(Fragment),
    /// A parenthesized sub-expression.
    Group(Group),
}

impl From<Fragment> for Member {
    fn from(fragment: Fragment) -> Self {
        Member::Fragment(fragment)
    }
}

impl From<Group> for Member {
    fn from(group: Group) -> Self {
        Member::Group(group)
    }
}

impl Member {
    fn separator(&self) -> Option<Separator> {
        match self {
            Member::Fragment(fragment) => fragment.separator(),
            Member::Group(group) => group.separator(),
        }
    }

    /// Text placed between the previous member and this one.
    fn glue(&self) -> &'static str {
        self.separator().map_or(" ", |sep| sep.glue())
    }

    /// Render this member, appending its bindings to `bindings` only when the
    /// rendering is non-empty.
    fn render_into(&self, as_literal: bool, with_sep: bool, bindings: &mut Vec<Value>) -> String {
        match self {
            Member::Fragment(fragment) => {
                if fragment.template().trim().is_empty() {
                    return String::new();
                }
                bindings.extend_from_slice(fragment.bindings());
                fragment.render(as_literal, with_sep)
            }
            Member::Group(group) => group.render_into(as_literal, with_sep, bindings),
        }
    }
}

/// An ordered, append-only sequence of clause members.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseBuilder {
    kind: ClauseKind,
    members: Vec<Member>,
    state: PushState,
}

impl ClauseBuilder {
    /// Create an empty builder for `kind`.
    pub fn new(kind: ClauseKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
            state: PushState::Direct,
        }
    }

    /// The clause this builder renders.
    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    /// Whether a non-empty rendering is prefixed with the clause keyword.
    pub fn emits_keyword(&self) -> bool {
        self.kind.keyword().is_some()
    }

    /// Top-level members in push order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Whether nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Current push target of this builder (outermost level).
    pub fn state(&self) -> PushState {
        self.state
    }

    /// Whether a group is currently open at any depth.
    pub fn is_grouping(&self) -> bool {
        matches!(self.state, PushState::Grouping(_))
    }

    /// Append a member, or hand it to the open group.
    pub fn push(&mut self, member: impl Into<Member>) {
        let member = member.into();
        match self.active_group_mut() {
            Some(group) => group.push(member),
            None => self.members.push(member),
        }
    }

    /// Open a new group; pushes are redirected into it until [`end_group`].
    ///
    /// When a group is already open the new group is nested inside it.
    ///
    /// [`end_group`]: ClauseBuilder::end_group
    pub fn start_group(&mut self, separator: Option<Separator>) {
        match self.active_group_mut() {
            Some(group) => group.start_group(separator),
            None => {
                self.members.push(Member::Group(Group::new(separator)));
                self.state = PushState::Grouping(self.members.len() - 1);
            }
        }
    }

    /// Close the innermost open group. A no-op when no group is open.
    pub fn end_group(&mut self) {
        if let Some(group) = self.active_group_mut() {
            if group.is_grouping() {
                group.end_group();
                return;
            }
            self.state = PushState::Direct;
        }
    }

    fn active_group_mut(&mut self) -> Option<&mut Group> {
        match self.state {
            PushState::Direct => None,
            PushState::Grouping(idx) => match self.members.get_mut(idx) {
                Some(Member::Group(group)) => Some(group),
                _ => None,
            },
        }
    }

    /// Render the clause, keyword included.
    pub fn render(&self, as_literal: bool) -> String {
        let mut sink = Vec::new();
        self.render_clause(as_literal, &mut sink)
    }

    /// Render the placeholder form of the clause and collect its bindings.
    pub fn render_prepared(&self) -> (String, Vec<Value>) {
        let mut bindings = Vec::new();
        let sql = self.render_clause(false, &mut bindings);
        (sql, bindings)
    }

    pub(crate) fn render_clause(&self, as_literal: bool, bindings: &mut Vec<Value>) -> String {
        let body = self.render_body(as_literal, bindings);
        match self.kind.keyword() {
            Some(keyword) if !body.is_empty() => format!("{} {}", keyword, body),
            _ => body,
        }
    }

    /// Render members without the keyword.
    ///
    /// Only the first non-empty member goes without its separator; empty
    /// members are skipped entirely. Members are joined by a single space,
    /// except that a `,` separator attaches to the preceding member.
    pub(crate) fn render_body(&self, as_literal: bool, bindings: &mut Vec<Value>) -> String {
        let mut body = String::new();
        for member in &self.members {
            let text = member.render_into(as_literal, !body.is_empty(), bindings);
            if text.is_empty() {
                continue;
            }
            if !body.is_empty() {
                body.push_str(member.glue());
            }
            body.push_str(&text);
        }
        if body.is_empty() && self.kind == ClauseKind::Select {
            return "*".to_string();
        }
        body
    }
}

#[cfg(test)]
mod tests;
