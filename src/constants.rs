//! # System Constants
//!
//! Defaults and clamps shared by the query builder and the page request parser,
//! plus the operator tags recognized in raw query-string values.

/// Pagination defaults and ceilings
pub mod pagination {
    /// Limit used when a caller supplies one below 1
    pub const DEFAULT_LIMIT: i64 = 10;
    /// First page number
    pub const DEFAULT_PAGE: i64 = 1;
    /// Page size used when the request carries none or an invalid one
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    /// Page size ceiling applied by the page request parser
    pub const MAX_PAGE_SIZE: i64 = 100;
    /// Page size ceiling applied by [`crate::page::check_page_rows`]
    pub const LEGACY_MAX_PAGE_SIZE: i64 = 500;
}

/// Sort directions accepted verbatim by the option normalizer
pub mod sort {
    pub const ASC: &str = "ASC";
    pub const DESC: &str = "DESC";
}

/// Recognized page request keys
pub mod page_keys {
    pub const CURRENT: &str = "current";
    pub const ROW_COUNT: &str = "rowCount";
    pub const ORDER_STR: &str = "orderStr";
    pub const TABLE_NAME: &str = "tableName";

    /// Cache-busting keys that never become conditions
    pub const IGNORED: [&str; 3] = ["_t", "_time", "_timestamp"];
}

/// Operator tags prefixed to raw query-string values
pub mod condition_tags {
    pub const LT: &str = "lt:";
    pub const LTE: &str = "lte:";
    pub const GT: &str = "gt:";
    pub const GTE: &str = "gte:";
    pub const EQ: &str = "eq:";
    pub const LIKE: &str = "lk:";

    pub const OR_LT: &str = "orlt:";
    pub const OR_LTE: &str = "orlte:";
    pub const OR_GT: &str = "orgt:";
    pub const OR_GTE: &str = "orgte:";
    pub const OR_EQ: &str = "oreq:";
    pub const OR_LIKE: &str = "orlk:";

    /// Descending marker inside an order string
    pub const ORDER_DESC: &str = ":pd:";
    /// Ascending marker inside an order string
    pub const ORDER_ASC: &str = ":pa:";
}

/// Scope columns added by the advanced query compiler
pub mod columns {
    pub const BUSINESS_ID: &str = "business_id";
    pub const SHOP_ID: &str = "shop_id";
}
