//! Seeded in-memory SQLite database shared by the integration tests.

use service_core::config::DatabaseConfig;
use service_core::database::{DatabaseHandler, Handler};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TestUser {
    pub id: i64,
    pub business_id: i64,
    pub shop_id: i64,
    pub username: String,
    pub age: i64,
    pub status: i64,
    pub tags: String,
    pub created_at: String,
}

const CREATE_TEST_USERS: &str = "CREATE TABLE test_users (
    id INTEGER PRIMARY KEY,
    business_id INTEGER NOT NULL,
    shop_id INTEGER NOT NULL,
    username TEXT NOT NULL,
    age INTEGER NOT NULL,
    status INTEGER NOT NULL,
    tags TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

/// (id, business_id, shop_id, username, age, status, tags, created_at)
pub const SEED_USERS: [(i64, i64, i64, &str, i64, i64, &str, &str); 9] = [
    (1, 1, 101, "alice", 30, 1, "vip,active", "2024-01-15 10:00:00"),
    (2, 1, 101, "bob", 25, 2, "active", "2024-02-20 09:30:00"),
    (3, 1, 102, "carol", 35, 3, "vip", "2024-03-10 14:45:00"),
    (4, 1, 102, "dave", 22, 1, "inactive", "2024-04-05 08:15:00"),
    (5, 2, 201, "erin", 28, 1, "vip,active", "2024-05-12 16:20:00"),
    (6, 2, 201, "frank", 40, 2, "", "2024-06-01 11:00:00"),
    (7, 0, 0, "system", 99, 1, "internal", "2024-01-01 00:00:00"),
    (8, 1, 103, "john", 45, 2, "active,vip,beta", "2024-07-07 07:07:00"),
    (9, 1, 101, "johnny", 19, 1, "beta", "2024-08-08 08:08:00"),
];

/// A single-connection in-memory database with `test_users` created and seeded
pub async fn setup_test_db() -> DatabaseHandler {
    let handler = DatabaseHandler::connect(&DatabaseConfig::sqlite_memory())
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::query(CREATE_TEST_USERS)
        .execute(handler.pool())
        .await
        .expect("Failed to create test_users");

    for (id, business_id, shop_id, username, age, status, tags, created_at) in SEED_USERS {
        sqlx::query(
            "INSERT INTO test_users (id, business_id, shop_id, username, age, status, tags, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(business_id)
        .bind(shop_id)
        .bind(username.to_string())
        .bind(age)
        .bind(status)
        .bind(tags.to_string())
        .bind(created_at.to_string())
        .execute(handler.pool())
        .await
        .expect("Failed to seed test_users");
    }

    handler
}

pub fn usernames(users: &[TestUser]) -> Vec<&str> {
    users.iter().map(|u| u.username.as_str()).collect()
}
