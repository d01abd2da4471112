//! Count-then-fetch paging over a [`PageRequest`].

use super::request::{FieldCondition, PageRequest};
use crate::database::Handler;
use crate::error::{CoreError, CoreResult};
use crate::logging::log_query_operation;
use crate::query_builder::SelectQuery;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::FromRow;
use std::time::Instant;

/// One page of rows plus the total across all pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBean<T> {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub rows: Vec<T>,
}

impl<T> PageBean<T> {
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 || self.total <= 0 {
            return 0;
        }
        self.total / self.page_size + i64::from(self.total % self.page_size != 0)
    }
}

/// Fetch one page of `table` filtered by the request's conditions.
///
/// The total is counted before LIMIT/OFFSET apply. A missing request is an
/// error, as are column names or an order string that are not plain
/// identifiers.
pub async fn find_page<T, H>(
    handler: &H,
    table: &str,
    request: Option<&PageRequest>,
) -> CoreResult<PageBean<T>>
where
    T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    H: Handler + ?Sized,
{
    let request = request
        .ok_or_else(|| CoreError::InvalidInput("page request must not be empty".to_string()))?;
    validate_request(request)?;
    let limit = non_negative("rowCount", request.row_count)?;
    let offset = non_negative("offset", request.offset())?;

    let started = Instant::now();
    let filtered = apply_conditions(handler.table(table), request);
    let total = filtered.count(handler.pool()).await?;

    let mut page_query = filtered.limit(limit).offset(offset);
    if !request.order_str.is_empty() {
        page_query = page_query.order_by_raw(&request.order_str);
    }

    let rows = page_query.fetch_all(handler.pool()).await?;
    let details = format!(
        "page={} page_size={} total={total} rows={}",
        request.current,
        request.row_count,
        rows.len()
    );
    log_query_operation(
        "find_page",
        table,
        handler.dialect().name(),
        "ok",
        Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
        Some(details.as_str()),
    );

    Ok(PageBean {
        page: request.current,
        page_size: request.row_count,
        total,
        rows,
    })
}

fn apply_conditions(query: SelectQuery, request: &PageRequest) -> SelectQuery {
    let query = request
        .and_conditions
        .iter()
        .map(FieldCondition::to_condition)
        .fold(query, SelectQuery::where_condition);
    request
        .or_conditions
        .iter()
        .map(FieldCondition::to_condition)
        .fold(query, SelectQuery::or_where_condition)
}

fn non_negative(name: &str, value: i64) -> CoreResult<u64> {
    u64::try_from(value)
        .map_err(|_| CoreError::InvalidInput(format!("{name} must not be negative: {value}")))
}

fn validate_request(request: &PageRequest) -> CoreResult<()> {
    for condition in request.and_conditions.iter().chain(&request.or_conditions) {
        if !is_identifier(&condition.column) {
            return Err(CoreError::InvalidInput(format!(
                "invalid column name: {}",
                condition.column
            )));
        }
    }
    if !is_order_string(&request.order_str) {
        return Err(CoreError::InvalidInput(format!(
            "invalid order string: {}",
            request.order_str
        )));
    }
    Ok(())
}

/// `name` or `table.name`, ASCII letters, digits and `_`, not starting with a digit
fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').count() <= 2
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Empty, or comma-separated `identifier [asc|desc]` items
fn is_order_string(order: &str) -> bool {
    if order.is_empty() {
        return true;
    }
    order.split(',').all(|item| {
        let mut words = item.split_whitespace();
        let column_ok = words.next().is_some_and(is_identifier);
        let direction_ok = words
            .next()
            .map_or(true, |d| d.eq_ignore_ascii_case("asc") || d.eq_ignore_ascii_case("desc"));
        column_ok && direction_ok && words.next().is_none()
    })
}
