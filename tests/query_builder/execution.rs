use crate::common::{setup_test_db, usernames, TestUser};
use serde_json::json;
use service_core::database::Handler;
use service_core::query_builder::{PageQuery, QueryBuilder, SimpleQuery};

#[tokio::test]
async fn test_tenant_status_age_scenario() {
    let handler = setup_test_db().await;

    let param = QueryBuilder::new()
        .with_business_id(1)
        .exclude_shop()
        .where_in("status", vec![json!(1), json!(2)])
        .with_order("age", "ASC")
        .with_pagination(10, 0)
        .build();

    let users: Vec<TestUser> = handler
        .query("test_users", &param)
        .fetch_all(handler.pool())
        .await
        .unwrap();

    assert_eq!(usernames(&users), vec!["johnny", "dave", "bob", "alice", "john"]);
    assert!(users.iter().all(|u| u.business_id == 1));
    assert!(users.iter().all(|u| u.status == 1 || u.status == 2));
}

#[tokio::test]
async fn test_shop_scope() {
    let handler = setup_test_db().await;

    let param = QueryBuilder::new()
        .with_business_id(1)
        .with_shop_id(101)
        .with_order("id", "ASC")
        .build();
    let users: Vec<TestUser> = handler
        .query("test_users", &param)
        .fetch_all(handler.pool())
        .await
        .unwrap();

    assert_eq!(usernames(&users), vec!["alice", "bob", "johnny"]);
}

#[tokio::test]
async fn test_business_id_zero_rows() {
    let handler = setup_test_db().await;

    let param = QueryBuilder::new().include_business_id_zero().build();
    let users: Vec<TestUser> = handler
        .query("test_users", &param)
        .fetch_all(handler.pool())
        .await
        .unwrap();

    assert_eq!(usernames(&users), vec!["system"]);
}

#[tokio::test]
async fn test_find_in_set_on_sqlite_matches_whole_tokens() {
    let handler = setup_test_db().await;

    let param = QueryBuilder::new()
        .where_find_in_set("tags", &["vip"])
        .with_order("id", "ASC")
        .build();
    let users: Vec<TestUser> = handler
        .query("test_users", &param)
        .fetch_all(handler.pool())
        .await
        .unwrap();

    // "vip" first, middle, last and alone; never a substring of another token
    assert_eq!(usernames(&users), vec!["alice", "carol", "erin", "john"]);

    let active = QueryBuilder::new()
        .where_find_in_set("tags", &["active"])
        .build();
    let count = handler
        .query("test_users", &active)
        .count(handler.pool())
        .await
        .unwrap();
    assert_eq!(count, 4);
}

#[tokio::test]
async fn test_like_and_time_range() {
    let handler = setup_test_db().await;

    let prefix = QueryBuilder::new()
        .where_like("username", vec![json!("jo")], false)
        .with_order("id", "ASC")
        .build();
    let users: Vec<TestUser> = handler
        .query("test_users", &prefix)
        .fetch_all(handler.pool())
        .await
        .unwrap();
    assert_eq!(usernames(&users), vec!["john", "johnny"]);

    let substring = QueryBuilder::new()
        .where_like("username", vec![json!("o")], true)
        .build();
    let count = handler
        .query("test_users", &substring)
        .count(handler.pool())
        .await
        .unwrap();
    assert_eq!(count, 4);

    let range = QueryBuilder::new()
        .where_time_range("created_at", "2024-02-01 00:00:00", "2024-04-30 23:59:59")
        .with_order("created_at", "ASC")
        .build();
    let users: Vec<TestUser> = handler
        .query("test_users", &range)
        .fetch_all(handler.pool())
        .await
        .unwrap();
    assert_eq!(usernames(&users), vec!["bob", "carol", "dave"]);
}

#[tokio::test]
async fn test_offset_pages_through_results() {
    let handler = setup_test_db().await;

    let second_page = QueryBuilder::new()
        .with_business_id(1)
        .with_order("age", "ASC")
        .with_pagination(2, 2)
        .build();
    let users: Vec<TestUser> = handler
        .query("test_users", &second_page)
        .fetch_all(handler.pool())
        .await
        .unwrap();

    assert_eq!(usernames(&users), vec!["bob", "alice"]);
}

#[tokio::test]
async fn test_simple_and_page_queries() {
    let handler = setup_test_db().await;

    let simple = SimpleQuery::new("business_id = ? AND age >= ?", vec![json!(2), json!(30)]);
    let user: Option<TestUser> = handler
        .query("test_users", &simple)
        .fetch_optional(handler.pool())
        .await
        .unwrap();
    assert_eq!(user.map(|u| u.username), Some("frank".to_string()));

    let page = PageQuery::new("status = ?", vec![json!(1)], 2, 1, "age desc");
    let users: Vec<TestUser> = handler
        .query("test_users", &page)
        .fetch_all(handler.pool())
        .await
        .unwrap();
    assert_eq!(usernames(&users), vec!["alice", "erin"]);
}

#[tokio::test]
async fn test_raw_or_fragment_stays_inside_business_scope() {
    let handler = setup_test_db().await;

    let simple = SimpleQuery::new("status = ? OR age > ?", vec![json!(1), json!(35)]);
    let users: Vec<TestUser> = handler
        .query("test_users", &simple)
        .where_eq("business_id", json!(2))
        .order_by_raw("id")
        .fetch_all(handler.pool())
        .await
        .unwrap();

    assert_eq!(usernames(&users), vec!["erin", "frank"]);
}

#[tokio::test]
async fn test_transaction_rollback() {
    let handler = setup_test_db().await;

    let mut tx = handler.begin().await.unwrap();
    sqlx::query("DELETE FROM test_users WHERE business_id = ?")
        .bind(1_i64)
        .execute(&mut *tx)
        .await
        .unwrap();
    let inside = handler
        .table("test_users")
        .count(&mut *tx)
        .await
        .unwrap();
    assert_eq!(inside, 3);
    tx.rollback().await.unwrap();

    let after = handler.table("test_users").count(handler.pool()).await.unwrap();
    assert_eq!(after, 9);
    assert!(handler.table("test_users").exists(handler.pool()).await.unwrap());
}
