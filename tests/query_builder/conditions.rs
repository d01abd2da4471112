use serde_json::json;
use service_core::query_builder::conditions::*;
use service_core::query_builder::Dialect;

#[test]
fn test_simple_condition_binds_value() {
    let (sql, args) = Condition::simple("name", "=", json!("test")).to_sql(Dialect::MySql);
    assert_eq!(sql, "name = ?");
    assert_eq!(args, vec![json!("test")]);
}

#[test]
fn test_in_condition_numbers_postgres_placeholders() {
    let condition = Condition::In {
        field: "id".to_string(),
        values: vec![json!(1), json!(2), json!(3)],
    };
    let (sql, args) = condition.to_sql(Dialect::Postgres);
    assert_eq!(sql, "id IN ($1, $2, $3)");
    assert_eq!(args.len(), 3);
}

#[test]
fn test_between_condition() {
    let (sql, args) = Condition::Between {
        field: "created_at".to_string(),
        start: json!("2024-01-01"),
        end: json!("2024-12-31"),
    }
    .to_sql(Dialect::Sqlite);
    assert_eq!(sql, "created_at BETWEEN ? AND ?");
    assert_eq!(args, vec![json!("2024-01-01"), json!("2024-12-31")]);
}

#[test]
fn test_or_group_is_parenthesized() {
    let clause = WhereClause::or(vec![
        Condition::like("username", "jo%"),
        Condition::like("username", "al%"),
    ]);
    let (sql, _) = clause.to_sql(Dialect::MySql);
    assert_eq!(sql, "(username LIKE ? OR username LIKE ?)");
}

#[test]
fn test_nested_groups_keep_placeholder_order() {
    let clause = WhereClause::and(vec![
        Condition::simple("business_id", "=", json!(1)),
        Condition::any(vec![
            Condition::simple("age", "<", json!(20)),
            Condition::simple("age", ">", json!(60)),
        ]),
    ]);
    let (sql, args) = clause.to_sql(Dialect::Postgres);
    assert_eq!(sql, "(business_id = $1 AND (age < $2 OR age > $3))");
    assert_eq!(args, vec![json!(1), json!(20), json!(60)]);
}

#[test]
fn test_raw_condition_rewrites_placeholders() {
    let (sql, args) = Condition::raw("status = ? AND shop_id <> ?", vec![json!(1), json!(0)])
        .to_sql(Dialect::Postgres);
    assert_eq!(sql, "status = $1 AND shop_id <> $2");
    assert_eq!(args, vec![json!(1), json!(0)]);
}

#[test]
fn test_raw_fragments_are_grouped_in_or_chain() {
    let clause = WhereClause::or(vec![
        Condition::raw("status = ? AND age > ?", vec![json!(1), json!(30)]),
        Condition::simple("shop_id", "=", json!(0)),
    ]);
    let (sql, args) = clause.to_sql(Dialect::Postgres);
    assert_eq!(sql, "((status = $1 AND age > $2) OR shop_id = $3)");
    assert_eq!(args, vec![json!(1), json!(30), json!(0)]);
}

#[test]
fn test_empty_where_clause_is_tautology() {
    let (sql, args) = WhereClause::and(vec![]).to_sql(Dialect::Sqlite);
    assert_eq!(sql, "1=1");
    assert!(args.is_empty());
}
