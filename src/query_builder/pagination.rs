use super::dialect::Dialect;

/// Represents pagination parameters for SQL queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    /// Convert to SQL string.
    ///
    /// MySQL and SQLite reject `OFFSET` without `LIMIT`, so an unbounded
    /// limit is written for them.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = String::new();

        match (self.limit, dialect) {
            (Some(limit), _) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Dialect::Sqlite) if self.offset.is_some() => sql.push_str(" LIMIT -1"),
            (None, Dialect::MySql) if self.offset.is_some() => {
                sql.push_str(&format!(" LIMIT {}", u64::MAX))
            }
            _ => {}
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }
}
