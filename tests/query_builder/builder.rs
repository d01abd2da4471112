use serde_json::json;
use service_core::query_builder::{
    Dialect, FilterSpec, MatchMode, QueryBuilder, QueryOptions, QueryParam, SelectQuery,
};

fn render(builder: QueryBuilder, dialect: Dialect) -> (String, Vec<serde_json::Value>) {
    builder
        .build()
        .apply(SelectQuery::new("test_users", dialect))
        .to_sql()
}

#[test]
fn test_empty_builder_adds_nothing() {
    let (sql, args) = render(QueryBuilder::new(), Dialect::MySql);
    assert_eq!(sql, "SELECT * FROM test_users");
    assert!(args.is_empty());
}

#[test]
fn test_prefix_and_substring_patterns() {
    let (sql, args) = render(
        QueryBuilder::new()
            .where_like("username", vec![json!("jo"), json!("al")], false)
            .where_like("email", vec![json!("example")], true),
        Dialect::MySql,
    );
    assert_eq!(
        sql,
        "SELECT * FROM test_users WHERE (username LIKE ? OR username LIKE ?) AND (email LIKE ?)"
    );
    assert_eq!(args, vec![json!("jo%"), json!("al%"), json!("%example%")]);
}

#[test]
fn test_non_string_pattern_values_are_skipped() {
    let (sql, args) = render(
        QueryBuilder::new().where_like("username", vec![json!(7), json!(null)], false),
        Dialect::Sqlite,
    );
    assert_eq!(sql, "SELECT * FROM test_users");
    assert!(args.is_empty());
}

#[test]
fn test_filters_keep_registration_order() {
    let (sql, _) = render(
        QueryBuilder::new()
            .add_filter(FilterSpec::new("status", vec![json!(1)], MatchMode::Exact))
            .add_filter(FilterSpec::in_values("shop_id", vec![json!(101), json!(102)])),
        Dialect::Postgres,
    );
    assert_eq!(
        sql,
        "SELECT * FROM test_users WHERE status IN ($1) AND shop_id IN ($2, $3)"
    );
}

#[test]
fn test_set_membership_per_dialect() {
    let builder = QueryBuilder::new().where_find_in_set("tags", &["vip", "beta"]);

    let (mysql, mysql_args) = render(builder.clone(), Dialect::MySql);
    assert_eq!(
        mysql,
        "SELECT * FROM test_users WHERE (FIND_IN_SET(?, tags) OR FIND_IN_SET(?, tags))"
    );
    assert_eq!(mysql_args, vec![json!("vip"), json!("beta")]);

    let (postgres, _) = render(builder.clone(), Dialect::Postgres);
    assert_eq!(
        postgres,
        "SELECT * FROM test_users WHERE ($1 = ANY(string_to_array(tags, ',')) \
         OR $2 = ANY(string_to_array(tags, ',')))"
    );

    let (_, sqlite_args) = render(builder, Dialect::Sqlite);
    assert_eq!(
        sqlite_args,
        vec![
            json!("vip,%"),
            json!("%,vip,%"),
            json!("%,vip"),
            json!("vip"),
            json!("beta,%"),
            json!("%,beta,%"),
            json!("%,beta"),
            json!("beta"),
        ]
    );
}

#[test]
fn test_time_ranges_compile_in_field_order() {
    let (sql, args) = render(
        QueryBuilder::new()
            .where_time_range("updated_at", "2024-03-01", "2024-03-31")
            .where_time_range("created_at", "2024-01-01", "2024-01-31"),
        Dialect::Sqlite,
    );
    assert_eq!(
        sql,
        "SELECT * FROM test_users WHERE created_at BETWEEN ? AND ? AND updated_at BETWEEN ? AND ?"
    );
    assert_eq!(args[0], json!("2024-01-01"));
    assert_eq!(args[2], json!("2024-03-01"));
}

#[test]
fn test_with_option_normalizes_bogus_values() {
    let query = QueryBuilder::new()
        .with_option(QueryOptions {
            limit: 0,
            offset: -5,
            order: "bogus".to_string(),
            by: "age".to_string(),
            ..Default::default()
        })
        .build();

    assert_eq!(query.options().limit, 10);
    assert_eq!(query.options().offset, 0);
    assert_eq!(query.options().order, "DESC");

    let (sql, _) = query.apply(SelectQuery::new("test_users", Dialect::MySql)).to_sql();
    assert_eq!(sql, "SELECT * FROM test_users ORDER BY age DESC LIMIT 10");
}

#[test]
fn test_order_injection_is_coerced() {
    let (sql, _) = render(
        QueryBuilder::new().with_order("age", "ASC; DROP TABLE test_users"),
        Dialect::MySql,
    );
    assert_eq!(sql, "SELECT * FROM test_users ORDER BY age DESC");
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: QueryOptions =
        serde_json::from_value(json!({"business_id": 3, "by": "created_at"})).unwrap();
    assert_eq!(options.business_id, 3);
    assert_eq!(options.shop_id, 0);
    assert!(!options.exclude_shop);

    let (sql, args) = render(QueryBuilder::new().with_option(options), Dialect::Sqlite);
    assert_eq!(
        sql,
        "SELECT * FROM test_users WHERE business_id = ? ORDER BY created_at DESC LIMIT 10"
    );
    assert_eq!(args, vec![json!(3)]);
}
