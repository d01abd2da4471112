//! Declarative filter specifications compiled by [`AdvancedQuery`](super::AdvancedQuery).
//!
//! Every filter here is permissive: an empty field or an empty value list
//! compiles to nothing instead of failing, so callers can register optional
//! filters unconditionally.

use super::conditions::{Condition, WhereClause};
use super::dialect::SetMembershipStrategy;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Layout used when time-range bounds are built from `chrono` values
pub const TIME_RANGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// `field IN (...)`
    #[default]
    Exact,
    /// `field LIKE 'v%'`, keeps a left-anchored index usable
    Prefix,
    /// `field LIKE '%v%'`
    Substring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub values: Vec<Value>,
    #[serde(default)]
    pub mode: MatchMode,
}

impl FilterSpec {
    pub fn new(field: &str, values: Vec<Value>, mode: MatchMode) -> Self {
        Self {
            field: field.to_string(),
            values,
            mode,
        }
    }

    /// Exact set-membership filter
    pub fn in_values(field: &str, values: Vec<Value>) -> Self {
        Self::new(field, values, MatchMode::Exact)
    }

    /// Pattern filter; `full_match` wraps each value in wildcards on both sides
    pub fn like(field: &str, values: Vec<Value>, full_match: bool) -> Self {
        let mode = if full_match {
            MatchMode::Substring
        } else {
            MatchMode::Prefix
        };
        Self::new(field, values, mode)
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty() || self.values.is_empty()
    }

    /// Compile to at most one condition.
    ///
    /// Pattern modes only use string values; anything else is skipped.
    pub fn to_condition(&self) -> Option<Condition> {
        if self.is_empty() {
            return None;
        }

        match self.mode {
            MatchMode::Exact => Some(Condition::In {
                field: self.field.clone(),
                values: self.values.clone(),
            }),
            MatchMode::Prefix | MatchMode::Substring => {
                let likes: Vec<Condition> = self
                    .values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|value| Condition::like(&self.field, self.pattern_for(value)))
                    .collect();

                if likes.is_empty() {
                    None
                } else {
                    Some(Condition::Group(WhereClause::or(likes)))
                }
            }
        }
    }

    fn pattern_for(&self, value: &str) -> String {
        match self.mode {
            MatchMode::Substring => format!("%{value}%"),
            _ => format!("{value}%"),
        }
    }
}

/// Inclusive `BETWEEN` range on one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub field: String,
    pub start: String,
    pub end: String,
}

impl TimeRange {
    /// `None` unless field and both bounds are non-empty
    pub fn new(field: &str, start: &str, end: &str) -> Option<Self> {
        if field.is_empty() || start.is_empty() || end.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    pub fn between(field: &str, start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        Self::new(
            field,
            &start.format(TIME_RANGE_FORMAT).to_string(),
            &end.format(TIME_RANGE_FORMAT).to_string(),
        )
    }

    pub fn to_condition(&self) -> Condition {
        Condition::Between {
            field: self.field.clone(),
            start: Value::String(self.start.clone()),
            end: Value::String(self.end.clone()),
        }
    }
}

/// "Delimited column contains any of these tokens"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMembership {
    pub field: String,
    pub tokens: Vec<String>,
}

impl SetMembership {
    /// `None` unless the field is named and at least one token is given
    pub fn new(field: &str, tokens: Vec<String>) -> Option<Self> {
        if field.is_empty() || tokens.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            tokens,
        })
    }

    pub fn to_condition(&self, strategy: &dyn SetMembershipStrategy) -> Option<Condition> {
        match self.tokens.as_slice() {
            [] => None,
            [token] => Some(strategy.contains(&self.field, token)),
            tokens => Some(Condition::any(
                tokens
                    .iter()
                    .map(|token| strategy.contains(&self.field, token))
                    .collect(),
            )),
        }
    }
}
