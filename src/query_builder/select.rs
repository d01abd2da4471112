use super::conditions::{Condition, SqlWriter, WhereClause};
use super::dialect::Dialect;
use super::options::SortDirection;
use super::pagination::Pagination;
use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use sqlx::any::{Any, AnyArguments, AnyRow};
use sqlx::{Arguments, FromRow};
use tracing::debug;

/// A single-table SELECT that clause compilers write into.
///
/// The query carries the [`Dialect`] of the connection it was created for, so
/// rendering picks the right placeholder syntax and set-membership strategy.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    dialect: Dialect,
    base_table: String,
    select_fields: Vec<String>,
    where_clauses: Vec<WhereClause>,
    or_clauses: Vec<WhereClause>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    pagination: Option<Pagination>,
}

impl SelectQuery {
    /// Create a query over `table` for the given dialect
    pub fn new(table: &str, dialect: Dialect) -> Self {
        Self {
            dialect,
            base_table: table.to_string(),
            select_fields: vec!["*".to_string()],
            where_clauses: Vec::new(),
            or_clauses: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            pagination: None,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn table(&self) -> &str {
        &self.base_table
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Add a WHERE clause, AND'd with the others
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.where_clauses.push(clause);
        self
    }

    pub fn where_condition(self, condition: Condition) -> Self {
        self.where_clause(WhereClause::single(condition))
    }

    /// Add a simple WHERE condition
    pub fn where_eq(self, field: &str, value: Value) -> Self {
        self.where_clause(WhereClause::simple(field, "=", value))
    }

    /// Add caller-written SQL with `?` placeholders
    pub fn where_raw(self, sql: &str, args: Vec<Value>) -> Self {
        self.where_clause(WhereClause::raw(sql, args))
    }

    /// Add a condition OR'd onto the end of the WHERE chain
    pub fn or_where_condition(mut self, condition: Condition) -> Self {
        self.or_clauses.push(WhereClause::single(condition));
        self
    }

    /// Add GROUP BY field
    pub fn group_by(mut self, field: &str) -> Self {
        self.group_by.push(field.to_string());
        self
    }

    /// Add ORDER BY clause
    pub fn order_by(self, field: &str, direction: SortDirection) -> Self {
        self.order_by_raw(&format!("{} {}", field, direction.as_sql()))
    }

    /// Add a pre-built ORDER BY fragment such as `age asc, id desc`
    pub fn order_by_raw(mut self, order: &str) -> Self {
        self.order_by.push(order.to_string());
        self
    }

    /// Add LIMIT clause
    pub fn limit(mut self, limit: u64) -> Self {
        self.pagination
            .get_or_insert_with(Pagination::default)
            .limit = Some(limit);
        self
    }

    /// Add OFFSET clause
    pub fn offset(mut self, offset: u64) -> Self {
        self.pagination
            .get_or_insert_with(Pagination::default)
            .offset = Some(offset);
        self
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Build the SQL text and its bound arguments
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut writer = SqlWriter::new(self.dialect);

        writer.push_str(&format!(
            "SELECT {} FROM {}",
            self.select_fields.join(", "),
            self.base_table
        ));

        let clause_count = self.where_clauses.len() + self.or_clauses.len();
        if clause_count > 0 {
            writer.push_str(" WHERE ");
            let clauses = self
                .where_clauses
                .iter()
                .map(|clause| (" AND ", clause))
                .chain(self.or_clauses.iter().map(|clause| (" OR ", clause)));
            for (index, (joiner, clause)) in clauses.enumerate() {
                if index > 0 {
                    writer.push_str(joiner);
                }
                if clause_count > 1 {
                    clause.write_joined(&mut writer);
                } else {
                    clause.write_sql(&mut writer);
                }
            }
        }

        if !self.group_by.is_empty() {
            writer.push_str(&format!(" GROUP BY {}", self.group_by.join(", ")));
        }

        if !self.order_by.is_empty() {
            writer.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        if let Some(ref pagination) = self.pagination {
            writer.push_str(&pagination.to_sql(self.dialect));
        }

        writer.finish()
    }

    /// Execute the query and return all rows
    pub async fn fetch_all<'c, T, E>(&self, executor: E) -> CoreResult<Vec<T>>
    where
        E: sqlx::Executor<'c, Database = Any>,
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let (sql, args) = self.to_sql();
        debug!(sql = %sql, args = args.len(), "Executing select");
        let arguments = bind_arguments(&args)?;
        let rows = sqlx::query_as_with::<Any, T, _>(&sql, arguments)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Execute the query and return optional row
    pub async fn fetch_optional<'c, T, E>(&self, executor: E) -> CoreResult<Option<T>>
    where
        E: sqlx::Executor<'c, Database = Any>,
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let (sql, args) = self.to_sql();
        debug!(sql = %sql, args = args.len(), "Executing select");
        let arguments = bind_arguments(&args)?;
        let row = sqlx::query_as_with::<Any, T, _>(&sql, arguments)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// Count matching rows, ignoring ordering and pagination
    pub async fn count<'c, E>(&self, executor: E) -> CoreResult<i64>
    where
        E: sqlx::Executor<'c, Database = Any>,
    {
        let mut count_query = self.clone();
        count_query.select_fields = vec!["COUNT(*)".to_string()];
        count_query.order_by.clear();
        count_query.pagination = None;

        let (sql, args) = count_query.to_sql();
        debug!(sql = %sql, args = args.len(), "Executing count");
        let arguments = bind_arguments(&args)?;
        let total = sqlx::query_scalar_with::<Any, i64, _>(&sql, arguments)
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    /// Check if any rows exist
    pub async fn exists<'c, E>(&self, executor: E) -> CoreResult<bool>
    where
        E: sqlx::Executor<'c, Database = Any>,
    {
        Ok(self.count(executor).await? > 0)
    }
}

/// Convert JSON values into driver arguments.
///
/// Integers that fit `i64` bind as integers and floats as `f64`. Unsigned
/// integers above `i64::MAX` have no lossless driver type and are rejected.
/// Arrays and objects bind as their JSON text.
fn bind_arguments<'q>(values: &[Value]) -> CoreResult<AnyArguments<'q>> {
    let mut arguments = AnyArguments::default();
    for value in values {
        let result = match value {
            Value::Null => arguments.add(Option::<String>::None),
            Value::Bool(b) => arguments.add(*b),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => arguments.add(i),
                (None, Some(f)) if n.is_f64() => arguments.add(f),
                _ => {
                    return Err(CoreError::InvalidInput(format!(
                        "integer argument {n} exceeds the signed 64-bit range"
                    )))
                }
            },
            Value::String(s) => arguments.add(s.clone()),
            other => arguments.add(other.to_string()),
        };
        result.map_err(|e| CoreError::DatabaseError(format!("Failed to bind argument: {e}")))?;
    }
    Ok(arguments)
}
