//! Page request parsing from raw URL query strings.
//!
//! Values may carry an operator tag (`gt:18`, `orlk:jo`) selecting the
//! comparison and whether the condition is AND'd or OR'd. Keys are camelCase
//! on the wire and snake_case in SQL.

use crate::constants::{condition_tags as tags, page_keys, pagination};
use crate::query_builder::Condition;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageParseError {
    #[error("Invalid URL escape {escape:?} at byte {position}")]
    InvalidEscape { position: usize, escape: String },
    #[error("Decoded query string is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Like,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Eq => "=",
            CompareOp::Like => "LIKE",
        }
    }
}

const AND_TAGS: [(&str, CompareOp); 6] = [
    (tags::LT, CompareOp::Lt),
    (tags::LTE, CompareOp::Lte),
    (tags::GT, CompareOp::Gt),
    (tags::GTE, CompareOp::Gte),
    (tags::LIKE, CompareOp::Like),
    (tags::EQ, CompareOp::Eq),
];

const OR_TAGS: [(&str, CompareOp); 6] = [
    (tags::OR_LT, CompareOp::Lt),
    (tags::OR_LTE, CompareOp::Lte),
    (tags::OR_GTE, CompareOp::Gte),
    (tags::OR_GT, CompareOp::Gt),
    (tags::OR_LIKE, CompareOp::Like),
    (tags::OR_EQ, CompareOp::Eq),
];

/// One `column <op> value` condition taken from the query string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub column: String,
    pub operator: CompareOp,
    /// Bound value; like conditions already carry the trailing `%`
    pub value: String,
}

impl FieldCondition {
    pub fn new(column: &str, operator: CompareOp, raw_value: &str) -> Self {
        let value = match operator {
            CompareOp::Like => format!("{raw_value}%"),
            _ => raw_value.to_string(),
        };
        Self {
            column: column.to_string(),
            operator,
            value,
        }
    }

    /// The clause text this condition contributes, e.g. `user_name = ?`
    pub fn clause_key(&self) -> String {
        format!("{} {} ?", self.column, self.operator.as_sql())
    }

    pub fn to_condition(&self) -> Condition {
        Condition::simple(
            &self.column,
            self.operator.as_sql(),
            Value::String(self.value.clone()),
        )
    }
}

/// Normalized paging and filtering intent of one list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-indexed page
    pub current: i64,
    pub row_count: i64,
    pub table_name: String,
    pub and_conditions: Vec<FieldCondition>,
    pub or_conditions: Vec<FieldCondition>,
    /// SQL ORDER BY fragment after marker processing
    pub order_str: String,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            current: pagination::DEFAULT_PAGE,
            row_count: pagination::DEFAULT_PAGE_SIZE,
            table_name: String::new(),
            and_conditions: Vec::new(),
            or_conditions: Vec::new(),
            order_str: String::new(),
        }
    }
}

impl PageRequest {
    pub fn and_condition(&self, column: &str, operator: CompareOp) -> Option<&FieldCondition> {
        self.and_conditions
            .iter()
            .find(|c| c.column == column && c.operator == operator)
    }

    pub fn or_condition(&self, column: &str, operator: CompareOp) -> Option<&FieldCondition> {
        self.or_conditions
            .iter()
            .find(|c| c.column == column && c.operator == operator)
    }

    /// Row offset of the current page, saturating at `i64::MAX`
    pub fn offset(&self) -> i64 {
        self.current
            .saturating_sub(1)
            .max(0)
            .saturating_mul(self.row_count.max(0))
    }

    /// Replace the ordering with a resolved sort list
    pub fn with_sort_list(mut self, items: &[SortItem]) -> Self {
        self.order_str = resolve_sort_list(items);
        self
    }

    fn apply_basic_param(&mut self, key: &str, value: &str) -> bool {
        match key {
            page_keys::CURRENT => self.current = parse_current(value),
            page_keys::ROW_COUNT => {
                self.row_count = parse_row_count(value, pagination::MAX_PAGE_SIZE)
            }
            page_keys::ORDER_STR => self.order_str = value.to_string(),
            page_keys::TABLE_NAME => self.table_name = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// Parse a raw query string, logging and discarding decode failures.
///
/// Use [`try_parse_page_request`] to observe the failure.
pub fn parse_page_request(raw_query: &str) -> Option<PageRequest> {
    match try_parse_page_request(raw_query) {
        Ok(request) => Some(request),
        Err(error) => {
            warn!(error = %error, "Failed to decode page request query string");
            None
        }
    }
}

pub fn try_parse_page_request(raw_query: &str) -> Result<PageRequest, PageParseError> {
    let decoded = query_unescape(raw_query)?;
    let mut request = PageRequest::default();

    for pair in decoded.split('&') {
        let parts: Vec<&str> = pair.split('=').collect();
        let [key, value] = parts.as_slice() else {
            continue;
        };

        if request.apply_basic_param(key, value) {
            continue;
        }

        if key.is_empty() || page_keys::IGNORED.contains(key) {
            continue;
        }

        if parse_or_condition(key, value, &mut request.or_conditions) {
            continue;
        }

        parse_and_condition(key, value, &mut request.and_conditions);
    }

    request.order_str = process_order_string(&request.order_str);
    Ok(request)
}

/// OR conditions need an explicit tag; returns whether the pair was consumed
fn parse_or_condition(key: &str, value: &str, conditions: &mut Vec<FieldCondition>) -> bool {
    for (tag, operator) in OR_TAGS {
        if let Some(rest) = value.strip_prefix(tag) {
            if !rest.is_empty() {
                upsert(conditions, FieldCondition::new(&camel_to_snake(key), operator, rest));
            }
            return true;
        }
    }
    false
}

/// Untagged non-empty values become equality conditions
fn parse_and_condition(key: &str, value: &str, conditions: &mut Vec<FieldCondition>) {
    let column = camel_to_snake(key);
    let (operator, rest) = AND_TAGS
        .iter()
        .find_map(|(tag, operator)| value.strip_prefix(tag).map(|rest| (*operator, rest)))
        .unwrap_or((CompareOp::Eq, value));

    if !rest.is_empty() {
        upsert(conditions, FieldCondition::new(&column, operator, rest));
    }
}

/// A repeated column/operator pair keeps the last value
fn upsert(conditions: &mut Vec<FieldCondition>, condition: FieldCondition) {
    match conditions
        .iter_mut()
        .find(|c| c.column == condition.column && c.operator == condition.operator)
    {
        Some(existing) => *existing = condition,
        None => conditions.push(condition),
    }
}

/// `createdAt:pd:age:pa:` becomes `created_at desc,age asc`
pub fn process_order_string(order: &str) -> String {
    if order.is_empty() {
        return String::new();
    }
    let order = camel_to_snake(order)
        .replace(tags::ORDER_DESC, " desc,")
        .replace(tags::ORDER_ASC, " asc,");
    order.strip_suffix(',').unwrap_or(&order).to_string()
}

/// One `{"orderKey": .., "type": ..}` entry of a client-supplied sort list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortItem {
    pub order_key: String,
    #[serde(rename = "type")]
    pub sort_type: String,
}

impl SortItem {
    pub fn new(order_key: &str, sort_type: &str) -> Self {
        Self {
            order_key: order_key.to_string(),
            sort_type: sort_type.to_string(),
        }
    }
}

/// `[age desc, id asc]` becomes `age desc,id asc`; an empty list orders nothing
pub fn resolve_sort_list(items: &[SortItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", item.order_key, item.sort_type).trim_end().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Every uppercase letter becomes `_` plus its lowercase form, except at the start
pub fn camel_to_snake(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if index != 0 {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

/// Clamp raw page and page-size strings for callers outside the parser.
///
/// Same rules as the parser but with a page-size ceiling of 500.
pub fn check_page_rows(current: &str, row_count: &str) -> (i64, i64) {
    (
        parse_current(current),
        parse_row_count(row_count, pagination::LEGACY_MAX_PAGE_SIZE),
    )
}

fn parse_current(value: &str) -> i64 {
    value
        .parse::<i64>()
        .ok()
        .filter(|current| *current >= 1)
        .unwrap_or(pagination::DEFAULT_PAGE)
}

fn parse_row_count(value: &str, max: i64) -> i64 {
    match value.parse::<i64>() {
        Ok(count) if count < 1 => pagination::DEFAULT_PAGE_SIZE,
        Ok(count) => count.min(max),
        Err(_) => pagination::DEFAULT_PAGE_SIZE,
    }
}

/// Decode `+` as space and `%XX` escapes; malformed escapes are errors
fn query_unescape(raw: &str) -> Result<String, PageParseError> {
    let bytes = raw.as_bytes();
    for (position, byte) in bytes.iter().enumerate() {
        if *byte != b'%' {
            continue;
        }
        let escape = bytes.get(position + 1..position + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            let end = (position + 3).min(bytes.len());
            return Err(PageParseError::InvalidEscape {
                position,
                escape: String::from_utf8_lossy(&bytes[position..end]).into_owned(),
            });
        }
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PageParseError::InvalidUtf8)
}
