//! Immutable SQL fragments.
//!
//! A [`Fragment`] is the leaf unit of every clause: a template with `?`
//! placeholders, the values bound to them, and the separator that joins it to
//! the member before it.
//!
//! Both rendering protocols live here:
//! - literal: every `?` is replaced by the matching value as a SQL literal
//! - prepared: `?` stays in the text and the values are returned alongside

use crate::error::{SqlError, SqlResult};
use crate::format::{Placeholders, count_placeholders, replace_placeholders};
use crate::value::Value;
use std::fmt;

/// The joiner placed in front of every member but the first one of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `,`
    Comma,
}

impl Separator {
    /// SQL text of the separator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::And => "AND",
            Separator::Or => "OR",
            Separator::Comma => ",",
        }
    }

    /// Text between the previous member and this separator.
    pub(crate) fn glue(&self) -> &'static str {
        match self {
            Separator::Comma => "",
            Separator::And | Separator::Or => " ",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix `text` with `"{separator} "` when requested and a separator is set.
pub(crate) fn with_separator(text: String, separator: Option<Separator>, enabled: bool) -> String {
    match separator {
        Some(sep) if enabled => format!("{} {}", sep, text),
        _ => text,
    }
}

/// One self-rendering piece of SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    template: String,
    bindings: Vec<Value>,
    separator: Option<Separator>,
}

impl Fragment {
    /// Create a fragment.
    ///
    /// `bindings` must hold one value per `?` in `template`; a `?` inside a
    /// quoted section is text and takes no binding.
    pub fn new(
        template: impl Into<String>,
        bindings: Vec<Value>,
        separator: Option<Separator>,
    ) -> SqlResult<Self> {
        let template = template.into();
        let scan = Placeholders::scan(&template);
        if !scan.is_balanced() {
            return Err(SqlError::InvalidTemplate(template));
        }
        if scan.count() != bindings.len() {
            return Err(SqlError::InvalidArity {
                expected: scan.count(),
                got: bindings.len(),
            });
        }
        Ok(Self {
            template,
            bindings,
            separator,
        })
    }

    /// A fragment without bindings; fails if `template` has placeholders.
    pub fn text(template: impl Into<String>, separator: Option<Separator>) -> SqlResult<Self> {
        Self::new(template, Vec::new(), separator)
    }

    /// Build from a template the crate assembled itself.
    pub(crate) fn unchecked(
        template: String,
        bindings: Vec<Value>,
        separator: Option<Separator>,
    ) -> Self {
        debug_assert_eq!(
            count_placeholders(&template),
            bindings.len(),
            "placeholder count must match bindings for {template:?}"
        );
        Self {
            template,
            bindings,
            separator,
        }
    }

    /// The template text, placeholders intact.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The bound values in placeholder order.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// The separator tag.
    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    /// Render as literal SQL (`as_literal`) or as a placeholder template.
    pub fn render(&self, as_literal: bool, with_sep: bool) -> String {
        let body = if as_literal {
            self.inline_bindings()
        } else {
            self.template.clone()
        };
        with_separator(body, self.separator, with_sep)
    }

    /// Render the placeholder template together with its bindings.
    pub fn render_prepared(&self, with_sep: bool) -> (String, Vec<Value>) {
        (self.render(false, with_sep), self.bindings.clone())
    }

    /// Substitute each placeholder left to right; substituted text is never
    /// rescanned.
    fn inline_bindings(&self) -> String {
        replace_placeholders(&self.template, |n| self.bindings.get(n).map(Value::to_literal))
    }
}
