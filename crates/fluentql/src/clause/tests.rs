use super::*;

fn cond(sql: &str, value: impl Into<Value>, sep: Separator) -> Fragment {
    Fragment::new(sql, vec![value.into()], Some(sep)).unwrap()
}

#[test]
fn test_empty_select_renders_star() {
    let select = ClauseBuilder::new(ClauseKind::Select);
    assert_eq!(select.render(true), "SELECT *");
    assert_eq!(select.render_prepared(), ("SELECT *".to_string(), vec![]));
}

#[test]
fn test_empty_where_renders_nothing() {
    let wh = ClauseBuilder::new(ClauseKind::Where);
    assert_eq!(wh.render(true), "");
    assert!(wh.emits_keyword());
    assert!(!ClauseBuilder::new(ClauseKind::Join).emits_keyword());
    assert!(!ClauseBuilder::new(ClauseKind::None).emits_keyword());
}

#[test]
fn test_first_member_has_no_separator() {
    let mut wh = ClauseBuilder::new(ClauseKind::Where);
    wh.push(cond("a = ?", 1, Separator::Or));
    wh.push(cond("b = ?", 2, Separator::And));
    wh.push(cond("c = ?", 3, Separator::Or));
    assert_eq!(wh.render(true), "WHERE a = 1 AND b = 2 OR c = 3");

    let (sql, bindings) = wh.render_prepared();
    assert_eq!(sql, "WHERE a = ? AND b = ? OR c = ?");
    assert_eq!(bindings, vec![Value::from(1), Value::from(2), Value::from(3)]);
}

#[test]
fn test_comma_separated_members() {
    let mut select = ClauseBuilder::new(ClauseKind::Select);
    select.push(Fragment::text("id", Some(Separator::Comma)).unwrap());
    select.push(Fragment::text("name", Some(Separator::Comma)).unwrap());
    assert_eq!(select.render(false), "SELECT id, name");
}

#[test]
fn test_group_is_redirect_target() {
    let mut wh = ClauseBuilder::new(ClauseKind::Where);
    wh.push(cond("age > ?", 90, Separator::And));
    assert_eq!(wh.state(), PushState::Direct);

    wh.start_group(Some(Separator::And));
    assert_eq!(wh.state(), PushState::Grouping(1));
    wh.push(cond("name = ?", "John", Separator::And));
    wh.push(cond("id > ?", 1, Separator::Or));
    wh.end_group();
    assert_eq!(wh.state(), PushState::Direct);

    wh.push(cond("position = ?", "accountant", Separator::Or));

    assert_eq!(wh.members().len(), 3);
    assert_eq!(
        wh.render(true),
        "WHERE age > 90 AND (name = 'John' OR id > 1) OR position = 'accountant'"
    );
}

#[test]
fn test_nested_groups_redirect_to_innermost() {
    let mut wh = ClauseBuilder::new(ClauseKind::Where);
    wh.start_group(Some(Separator::And));
    wh.push(cond("a = ?", 1, Separator::And));
    wh.start_group(Some(Separator::Or));
    wh.push(cond("b = ?", 2, Separator::And));
    wh.push(cond("c = ?", 3, Separator::And));
    wh.end_group();
    // Back in the outer group, not at the top level.
    assert_eq!(wh.state(), PushState::Grouping(0));
    wh.push(cond("d = ?", 4, Separator::And));
    wh.end_group();
    assert_eq!(wh.state(), PushState::Direct);

    assert_eq!(wh.members().len(), 1);
    assert_eq!(
        wh.render(true),
        "WHERE (a = 1 OR (b = 2 AND c = 3) AND d = 4)"
    );
    let (sql, bindings) = wh.render_prepared();
    assert_eq!(sql, "WHERE (a = ? OR (b = ? AND c = ?) AND d = ?)");
    assert_eq!(bindings.len(), 4);
}

#[test]
fn test_empty_group_is_skipped() {
    let mut wh = ClauseBuilder::new(ClauseKind::Where);
    wh.start_group(Some(Separator::And));
    wh.end_group();
    wh.push(cond("a = ?", 1, Separator::Or));
    wh.start_group(Some(Separator::Or));
    wh.end_group();
    assert_eq!(wh.render(true), "WHERE a = 1");
}

#[test]
fn test_only_empty_groups_render_nothing() {
    let mut having = ClauseBuilder::new(ClauseKind::Having);
    having.start_group(Some(Separator::And));
    having.start_group(Some(Separator::Or));
    having.end_group();
    having.end_group();
    assert_eq!(having.render(true), "");
    assert_eq!(having.render_prepared(), (String::new(), vec![]));
}

#[test]
fn test_end_group_without_open_group_is_noop() {
    let mut wh = ClauseBuilder::new(ClauseKind::Where);
    wh.end_group();
    assert_eq!(wh.state(), PushState::Direct);
    wh.push(cond("a = ?", 1, Separator::And));
    assert_eq!(wh.render(false), "WHERE a = ?");
}

#[test]
fn test_group_standalone_render() {
    let mut group = Group::new(Some(Separator::Or));
    assert_eq!(group.render(true, true), "");
    group.push(cond("x = ?", "y", Separator::And));
    assert_eq!(group.render(true, true), "OR (x = 'y')");
    assert_eq!(group.render(true, false), "(x = 'y')");
    assert_eq!(
        group.render_prepared(true),
        ("OR (x = ?)".to_string(), vec![Value::from("y")])
    );
}

#[test]
fn test_render_is_idempotent() {
    let mut wh = ClauseBuilder::new(ClauseKind::Where);
    wh.push(cond("a = ?", 1, Separator::And));
    wh.start_group(Some(Separator::Or));
    wh.push(cond("b = ?", 2, Separator::And));
    wh.end_group();
    assert_eq!(wh.render(true), wh.render(true));
    assert_eq!(wh.render_prepared(), wh.render_prepared());
}
