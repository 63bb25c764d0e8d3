//! Escaping and list formatting helpers.

use crate::value::Value;
use std::borrow::Cow;

/// Quote a string as a SQL literal, doubling embedded single quotes.
///
/// ```ignore
/// assert_eq!(quote_literal("John"), "'John'");
/// ```
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Escape an identifier with backticks.
///
/// Dotted names are escaped per part (`users.id` -> `` `users`.`id` ``), `*` is
/// left bare, and embedded backticks are doubled.
pub fn escape_identifier(name: &str) -> String {
    name.split('.')
        .map(|part| {
            if part == "*" {
                part.to_string()
            } else {
                format!("`{}`", part.replace('`', "``"))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Join identifiers with `, `, escaping each one.
pub fn identifier_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| escape_identifier(n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join values rendered as SQL literals with `, `.
pub fn value_list(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_literal)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `n` comma-separated `?` placeholders.
pub fn placeholder_list(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Placeholder layout of a SQL template.
///
/// A `?` inside a quoted section (`'...'`, `"..."` or `` `...` ``) is text,
/// not a placeholder. A doubled quote (`'it''s'`) closes and reopens the
/// section, so it stays quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    offsets: Vec<usize>,
    balanced: bool,
}

impl Placeholders {
    /// Scan `template`.
    pub fn scan(template: &str) -> Self {
        let mut quote: Option<char> = None;
        let mut offsets = Vec::new();
        for (i, ch) in template.char_indices() {
            match quote {
                Some(q) if ch == q => quote = None,
                Some(_) => {}
                None => match ch {
                    '\'' | '"' | '`' => quote = Some(ch),
                    '?' => offsets.push(i),
                    _ => {}
                },
            }
        }
        Self {
            offsets,
            balanced: quote.is_none(),
        }
    }

    /// Byte offsets of the placeholders, in order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// Whether every quoted section is closed.
    pub fn is_balanced(&self) -> bool {
        self.balanced
    }
}

/// Count the `?` placeholders in a template, ignoring quoted text.
pub fn count_placeholders(template: &str) -> usize {
    Placeholders::scan(template).count()
}

/// Replace the n-th placeholder (0-based) with `f(n)`; `None` keeps the `?`.
///
/// Replacement text is never rescanned.
pub fn replace_placeholders(template: &str, mut f: impl FnMut(usize) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut last = 0;
    for (n, &offset) in Placeholders::scan(template).offsets().iter().enumerate() {
        out.push_str(&template[last..offset]);
        match f(n) {
            Some(text) => out.push_str(&text),
            None => out.push('?'),
        }
        last = offset + 1;
    }
    out.push_str(&template[last..]);
    out
}

/// A name safe to splice into a template.
///
/// Names without placeholders or open quotes are returned as given; anything
/// else is escaped with [`escape_identifier`].
pub fn identifier(name: &str) -> Cow<'_, str> {
    let scan = Placeholders::scan(name);
    if scan.count() == 0 && scan.is_balanced() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(escape_identifier(name))
    }
}
