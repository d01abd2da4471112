use service_core::query_builder::pagination::Pagination;
use service_core::query_builder::{Dialect, SelectQuery};

#[test]
fn test_limit_then_offset() {
    let query = SelectQuery::new("test_users", Dialect::MySql).limit(10).offset(10);
    assert_eq!(
        query.pagination(),
        Some(Pagination {
            limit: Some(10),
            offset: Some(10)
        })
    );
    assert_eq!(query.to_sql().0, "SELECT * FROM test_users LIMIT 10 OFFSET 10");
}

#[test]
fn test_limit_only() {
    let (sql, _) = SelectQuery::new("test_users", Dialect::Sqlite).limit(5).to_sql();
    assert_eq!(sql, "SELECT * FROM test_users LIMIT 5");
}

#[test]
fn test_offset_only_per_dialect() {
    let render = |dialect| SelectQuery::new("t", dialect).offset(15).to_sql().0;
    assert_eq!(render(Dialect::Postgres), "SELECT * FROM t OFFSET 15");
    assert_eq!(render(Dialect::Sqlite), "SELECT * FROM t LIMIT -1 OFFSET 15");
    assert_eq!(
        render(Dialect::MySql),
        format!("SELECT * FROM t LIMIT {} OFFSET 15", u64::MAX)
    );
}

#[test]
fn test_no_pagination_without_limit_or_offset() {
    let query = SelectQuery::new("test_users", Dialect::Postgres);
    assert_eq!(query.pagination(), None);
    assert_eq!(query.to_sql().0, "SELECT * FROM test_users");
}
