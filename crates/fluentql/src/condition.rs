//! Fragment constructors for WHERE / HAVING conditions.
//!
//! Every clause verb (`where_`, `or_where`, `where_null`, ...) is one of these
//! constructors with a [`Separator`] preset: `AND` for the base verb, `OR` for
//! the `or_` verb. Validation runs before the fragment is built.
//!
//! Column names pass through [`identifier`]: a name holding a `?` or an
//! unterminated quote is backtick-escaped so it never reads as a placeholder.

use crate::error::SqlResult;
use crate::format::{identifier, placeholder_list};
use crate::fragment::{Fragment, Separator};
use crate::validate;
use crate::value::Value;

/// `column op ?`
pub fn compare(
    column: &str,
    op: &str,
    value: impl Into<Value>,
    separator: Separator,
) -> SqlResult<Fragment> {
    let op = validate::operator(op)?;
    Ok(Fragment::unchecked(
        format!("{} {} ?", identifier(column), op),
        vec![value.into()],
        Some(separator),
    ))
}

/// `column = ?`
pub fn equals(column: &str, value: impl Into<Value>, separator: Separator) -> Fragment {
    Fragment::unchecked(
        format!("{} = ?", identifier(column)),
        vec![value.into()],
        Some(separator),
    )
}

/// `column IS NULL` / `column IS NOT NULL`
pub fn null_check(column: &str, negated: bool, separator: Separator) -> Fragment {
    let check = if negated { "IS NOT NULL" } else { "IS NULL" };
    Fragment::unchecked(
        format!("{} {}", identifier(column), check),
        Vec::new(),
        Some(separator),
    )
}

/// `column IN (?, ...)` / `column NOT IN (?, ...)`
///
/// An empty list can never match (`1=0`); an empty NOT IN always does (`1=1`).
pub fn in_list<V: Into<Value>>(
    column: &str,
    values: impl IntoIterator<Item = V>,
    negated: bool,
    separator: Separator,
) -> Fragment {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        let constant = if negated { "1=1" } else { "1=0" };
        return Fragment::unchecked(constant.to_string(), Vec::new(), Some(separator));
    }
    let op = if negated { "NOT IN" } else { "IN" };
    Fragment::unchecked(
        format!("{} {} ({})", identifier(column), op, placeholder_list(values.len())),
        values,
        Some(separator),
    )
}

/// `column BETWEEN ? AND ?` / `column NOT BETWEEN ? AND ?`
///
/// `range` must hold exactly two values.
pub fn between<V: Into<Value>>(
    column: &str,
    range: impl IntoIterator<Item = V>,
    negated: bool,
    separator: Separator,
) -> SqlResult<Fragment> {
    let (low, high) = validate::pair(range.into_iter().collect())?;
    let op = if negated { "NOT BETWEEN" } else { "BETWEEN" };
    Ok(Fragment::unchecked(
        format!("{} {} ? AND ?", identifier(column), op),
        vec![low.into(), high.into()],
        Some(separator),
    ))
}

/// `first op second`, comparing two columns.
pub fn columns(first: &str, op: &str, second: &str, separator: Separator) -> SqlResult<Fragment> {
    let op = validate::operator(op)?;
    Ok(Fragment::unchecked(
        format!("{} {} {}", identifier(first), op, identifier(second)),
        Vec::new(),
        Some(separator),
    ))
}

/// Caller-written SQL with `?` placeholders.
pub fn raw(sql: &str, bindings: Vec<Value>, separator: Separator) -> SqlResult<Fragment> {
    Fragment::new(sql, bindings, Some(separator))
}

/// `EXISTS (subquery)` / `NOT EXISTS (subquery)`
pub fn exists(
    subquery: &str,
    bindings: Vec<Value>,
    negated: bool,
    separator: Separator,
) -> SqlResult<Fragment> {
    let keyword = if negated { "NOT EXISTS" } else { "EXISTS" };
    Fragment::new(format!("{} ({})", keyword, subquery), bindings, Some(separator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqlError;

    #[test]
    fn test_compare() {
        let f = compare("age", ">", 90, Separator::And).unwrap();
        assert_eq!(f.template(), "age > ?");
        assert_eq!(f.bindings(), &[Value::from(90)]);

        let f = compare("name", "like", "%jo%", Separator::Or).unwrap();
        assert_eq!(f.render(true, true), "OR name LIKE '%jo%'");

        assert!(compare("name", "===", "John", Separator::And).is_err());
    }

    #[test]
    fn test_null_check() {
        assert_eq!(
            null_check("deleted_at", false, Separator::And).template(),
            "deleted_at IS NULL"
        );
        assert_eq!(
            null_check("deleted_at", true, Separator::And).template(),
            "deleted_at IS NOT NULL"
        );
    }

    #[test]
    fn test_in_list() {
        let f = in_list("id", [1, 2, 3], false, Separator::And);
        assert_eq!(f.template(), "id IN (?, ?, ?)");
        assert_eq!(f.render(true, false), "id IN (1, 2, 3)");

        let f = in_list("role", ["a", "b"], true, Separator::And);
        assert_eq!(f.render(true, false), "role NOT IN ('a', 'b')");
    }

    #[test]
    fn test_empty_in_list() {
        let f = in_list("id", Vec::<i32>::new(), false, Separator::And);
        assert_eq!(f.template(), "1=0");
        assert!(f.bindings().is_empty());

        let f = in_list("id", Vec::<i32>::new(), true, Separator::And);
        assert_eq!(f.template(), "1=1");
    }

    #[test]
    fn test_between() {
        let f = between("age", [18, 65], false, Separator::And).unwrap();
        assert_eq!(f.render(true, false), "age BETWEEN 18 AND 65");

        let f = between("age", [18, 65], true, Separator::And).unwrap();
        assert_eq!(f.template(), "age NOT BETWEEN ? AND ?");

        let err = between("age", [18], false, Separator::And).unwrap_err();
        assert!(matches!(err, SqlError::InvalidArity { expected: 2, got: 1 }));
        let err = between("age", [1, 2, 3], false, Separator::And).unwrap_err();
        assert!(matches!(err, SqlError::InvalidArity { expected: 2, got: 3 }));
    }

    #[test]
    fn test_columns() {
        let f = columns("users.id", "=", "posts.user_id", Separator::And).unwrap();
        assert_eq!(f.template(), "users.id = posts.user_id");
        assert!(columns("a", "IS", "b", Separator::And).is_err());
    }

    #[test]
    fn test_raw_checks_binding_count() {
        let f = raw("a = ? OR b = ?", vec![1.into(), 2.into()], Separator::And).unwrap();
        assert_eq!(f.render(true, false), "a = 1 OR b = 2");

        let err = raw("a = ?", vec![], Separator::And).unwrap_err();
        assert!(matches!(err, SqlError::InvalidArity { expected: 1, got: 0 }));
    }

    #[test]
    fn test_raw_quoted_question_mark() {
        let f = raw("note = 'why?'", vec![], Separator::And).unwrap();
        assert_eq!(f.render(true, false), "note = 'why?'");

        let f = raw("note = 'it''s ?' AND id = ?", vec![3.into()], Separator::And).unwrap();
        assert_eq!(f.render(true, false), "note = 'it''s ?' AND id = 3");

        let err = raw("note = 'why?", vec![], Separator::And).unwrap_err();
        assert!(matches!(err, SqlError::InvalidTemplate(_)));
    }

    #[test]
    fn test_column_names_with_question_marks() {
        let f = equals("what?", 1, Separator::And);
        assert_eq!(f.template(), "`what?` = ?");
        assert_eq!(f.render(true, false), "`what?` = 1");

        let f = compare("ok?", "!=", false, Separator::And).unwrap();
        assert_eq!(f.template(), "`ok?` != ?");

        let f = in_list("why?", [1, 2], false, Separator::And);
        assert_eq!(f.render(true, false), "`why?` IN (1, 2)");

        let f = columns("a.b?", "=", "c.d", Separator::And).unwrap();
        assert_eq!(f.template(), "`a`.`b?` = c.d");
    }

    #[test]
    fn test_exists() {
        let f = exists(
            "SELECT 1 FROM posts WHERE posts.user_id = users.id AND posts.draft = ?",
            vec![false.into()],
            false,
            Separator::And,
        )
        .unwrap();
        assert_eq!(
            f.render(true, false),
            "EXISTS (SELECT 1 FROM posts WHERE posts.user_id = users.id AND posts.draft = FALSE)"
        );

        let f = exists("SELECT 1", vec![], true, Separator::Or).unwrap();
        assert_eq!(f.render(true, true), "OR NOT EXISTS (SELECT 1)");
    }
}
