use crate::constants::{pagination::DEFAULT_LIMIT, sort};
use serde::{Deserialize, Serialize};

/// Common list-query options: scoping, grouping, sorting and paging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Owning business (tenant) id
    pub business_id: i64,
    pub shop_id: i64,
    pub exclude_business: bool,
    pub exclude_shop: bool,
    /// Suppresses both scope predicates
    pub exclude_business_and_shop: bool,
    /// Treat `business_id == 0` as a real filter value
    pub include_business_id_zero: bool,
    pub group_by: String,
    /// Sort field
    pub by: String,
    /// Sort direction, `ASC` or `DESC`
    pub order: String,
    pub disable_order_by: bool,
    pub limit: i64,
    pub offset: i64,
    /// Prepended to `business_id`, `shop_id` and the sort field
    pub table_prefix: String,
}

impl QueryOptions {
    /// Clamp limit, offset and direction into their valid ranges.
    ///
    /// `limit < 1` becomes 10, `offset < 0` becomes 0 and any direction other
    /// than exactly `ASC` or `DESC` becomes `DESC`. Idempotent.
    pub fn normalized(mut self) -> Self {
        if self.limit < 1 {
            self.limit = DEFAULT_LIMIT;
        }
        if self.offset < 0 {
            self.offset = 0;
        }
        if self.order != sort::ASC && self.order != sort::DESC {
            self.order = sort::DESC.to_string();
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only an exact `ASC` sorts ascending
    pub fn from_order(order: &str) -> Self {
        if order == sort::ASC {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => sort::ASC,
            SortDirection::Desc => sort::DESC,
        }
    }
}
