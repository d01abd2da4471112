use super::advanced::AdvancedQuery;
use super::filters::{FilterSpec, SetMembership, TimeRange};
use super::options::QueryOptions;
use serde_json::Value;

/// Chainable construction of an [`AdvancedQuery`].
///
/// Every method consumes the builder and returns it, so a partially built
/// value can be cloned and branched. [`QueryBuilder::build`] freezes the
/// result; the frozen query can be applied to any number of
/// [`SelectQuery`](super::SelectQuery) values.
///
/// ```rust
/// use service_core::query_builder::{Dialect, QueryBuilder, QueryParam, SelectQuery};
/// use serde_json::json;
///
/// let query = QueryBuilder::new()
///     .with_business_id(1)
///     .where_in("status", vec![json!(1), json!(2)])
///     .with_order("age", "ASC")
///     .with_pagination(10, 0)
///     .build();
///
/// let (sql, _) = query.apply(SelectQuery::new("users", Dialect::Sqlite)).to_sql();
/// assert_eq!(
///     sql,
///     "SELECT * FROM users WHERE business_id = ? AND status IN (?, ?) ORDER BY age ASC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: AdvancedQuery,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options; limit, offset and direction are normalized
    pub fn with_option(mut self, options: QueryOptions) -> Self {
        *self.query.options_mut() = options.normalized();
        self
    }

    pub fn with_business_id(mut self, business_id: i64) -> Self {
        self.query.options_mut().business_id = business_id;
        self
    }

    pub fn with_shop_id(mut self, shop_id: i64) -> Self {
        self.query.options_mut().shop_id = shop_id;
        self
    }

    pub fn with_table_prefix(mut self, prefix: &str) -> Self {
        self.query.options_mut().table_prefix = prefix.to_string();
        self
    }

    pub fn with_pagination(mut self, limit: i64, offset: i64) -> Self {
        let options = self.query.options_mut();
        options.limit = limit;
        options.offset = offset;
        self
    }

    pub fn with_order(mut self, field: &str, order: &str) -> Self {
        let options = self.query.options_mut();
        options.by = field.to_string();
        options.order = order.to_string();
        self
    }

    pub fn with_group_by(mut self, group_by: &str) -> Self {
        self.query.options_mut().group_by = group_by.to_string();
        self
    }

    pub fn exclude_business(mut self) -> Self {
        self.query.options_mut().exclude_business = true;
        self
    }

    pub fn exclude_shop(mut self) -> Self {
        self.query.options_mut().exclude_shop = true;
        self
    }

    pub fn exclude_business_and_shop(mut self) -> Self {
        self.query.options_mut().exclude_business_and_shop = true;
        self
    }

    pub fn include_business_id_zero(mut self) -> Self {
        self.query.options_mut().include_business_id_zero = true;
        self
    }

    pub fn disable_order_by(mut self) -> Self {
        self.query.options_mut().disable_order_by = true;
        self
    }

    pub fn add_filter(mut self, filter: FilterSpec) -> Self {
        self.query.add_filter(filter);
        self
    }

    /// `field IN (values)`
    pub fn where_in(self, field: &str, values: Vec<Value>) -> Self {
        self.add_filter(FilterSpec::in_values(field, values))
    }

    /// `field LIKE` each string value, prefix or (with `full_match`) substring
    pub fn where_like(self, field: &str, values: Vec<Value>, full_match: bool) -> Self {
        self.add_filter(FilterSpec::like(field, values, full_match))
    }

    /// Ignored unless field, start and end are all non-empty
    pub fn where_time_range(mut self, field: &str, start: &str, end: &str) -> Self {
        if let Some(range) = TimeRange::new(field, start, end) {
            self.query.add_time_range(range);
        }
        self
    }

    /// Ignored unless the field is named and tokens are given
    pub fn where_find_in_set(mut self, field: &str, tokens: &[&str]) -> Self {
        let tokens = tokens.iter().map(|t| t.to_string()).collect();
        if let Some(membership) = SetMembership::new(field, tokens) {
            self.query.add_set_membership(membership);
        }
        self
    }

    pub fn build(self) -> AdvancedQuery {
        self.query
    }
}
