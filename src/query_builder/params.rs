use super::select::SelectQuery;
use serde_json::Value;

/// Anything that can add its clauses to a [`SelectQuery`]
pub trait QueryParam: Send + Sync {
    fn apply(&self, query: SelectQuery) -> SelectQuery;
}

/// A raw WHERE fragment with `?` placeholders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleQuery {
    where_clause: String,
    args: Vec<Value>,
}

impl SimpleQuery {
    pub fn new(where_clause: &str, args: Vec<Value>) -> Self {
        Self {
            where_clause: where_clause.to_string(),
            args,
        }
    }
}

impl QueryParam for SimpleQuery {
    fn apply(&self, query: SelectQuery) -> SelectQuery {
        if self.where_clause.is_empty() {
            return query;
        }
        query.where_raw(&self.where_clause, self.args.clone())
    }
}

/// A raw WHERE fragment plus ordering and paging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    where_clause: String,
    args: Vec<Value>,
    limit: i64,
    offset: i64,
    order_by: String,
}

impl PageQuery {
    pub fn new(where_clause: &str, args: Vec<Value>, limit: i64, offset: i64, order_by: &str) -> Self {
        Self {
            where_clause: where_clause.to_string(),
            args,
            limit,
            offset,
            order_by: order_by.to_string(),
        }
    }
}

impl QueryParam for PageQuery {
    fn apply(&self, mut query: SelectQuery) -> SelectQuery {
        if !self.where_clause.is_empty() {
            query = query.where_raw(&self.where_clause, self.args.clone());
        }
        if !self.order_by.is_empty() {
            query = query.order_by_raw(&self.order_by);
        }
        if self.limit > 0 {
            query = query.limit(self.limit as u64);
        }
        if self.offset > 0 {
            query = query.offset(self.offset as u64);
        }
        query
    }
}
