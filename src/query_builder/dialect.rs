//! SQL dialect identity and the dialect-specific set-membership strategies.
//!
//! A [`Dialect`] is detected once when a connection pool is opened and then
//! travels with every [`SelectQuery`](super::SelectQuery) built from it, so the
//! compilers never compare driver names inline.

use super::conditions::Condition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Relational engine behind a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Map a driver's backend name (as reported by `AnyConnection::backend_name`)
    pub fn from_backend_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "postgres" | "postgresql" => Some(Dialect::Postgres),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Bind placeholder for the 1-based parameter `index`
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    /// Strategy used to test "delimited column contains token"
    pub fn set_membership(&self) -> &'static dyn SetMembershipStrategy {
        match self {
            Dialect::MySql => &FindInSet,
            Dialect::Postgres => &StringToArray,
            Dialect::Sqlite => &LikePatterns,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the predicate for "comma-joined `field` contains `token`"
pub trait SetMembershipStrategy: Send + Sync + fmt::Debug {
    fn contains(&self, field: &str, token: &str) -> Condition;
}

/// MySQL's native `FIND_IN_SET`
#[derive(Debug, Clone, Copy, Default)]
pub struct FindInSet;

impl SetMembershipStrategy for FindInSet {
    fn contains(&self, field: &str, token: &str) -> Condition {
        Condition::Predicate {
            sql: format!("FIND_IN_SET(?, {field})"),
            args: vec![Value::String(token.to_string())],
        }
    }
}

/// PostgreSQL array membership over the split column
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToArray;

impl SetMembershipStrategy for StringToArray {
    fn contains(&self, field: &str, token: &str) -> Condition {
        Condition::Predicate {
            sql: format!("? = ANY(string_to_array({field}, ','))"),
            args: vec![Value::String(token.to_string())],
        }
    }
}

/// Positional LIKE probes for engines without a set function.
///
/// Covers "token,…", "…,token,…", "…,token" and the whole value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikePatterns;

impl SetMembershipStrategy for LikePatterns {
    fn contains(&self, field: &str, token: &str) -> Condition {
        Condition::any(vec![
            Condition::like(field, format!("{token},%")),
            Condition::like(field, format!("%,{token},%")),
            Condition::like(field, format!("%,{token}")),
            Condition::simple(field, "=", Value::String(token.to_string())),
        ])
    }
}
