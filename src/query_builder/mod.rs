//! # Query Builder System
//!
//! Dynamic query conditions for list endpoints: declarative filters, scoping,
//! ordering and paging compiled into a parameterized SELECT.
//!
//! ## Key Components
//!
//! - [`builder`] - Chainable [`QueryBuilder`] that freezes into an [`AdvancedQuery`]
//! - [`advanced`] - Clause compilers for scope, filters, time ranges and set membership
//! - [`filters`] - Filter, time-range and set-membership specifications
//! - [`options`] - [`QueryOptions`] and their normalizer
//! - [`conditions`] - WHERE clause building with bound parameters
//! - [`dialect`] - Dialect identity and set-membership strategies
//! - [`select`] - The [`SelectQuery`] the compilers write into, and its execution
//! - [`pagination`] - Dialect-aware LIMIT/OFFSET rendering
//! - [`params`] - The [`QueryParam`] seam plus raw-SQL parameter objects
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use service_core::query_builder::{QueryBuilder, QueryParam};
//!
//! let param = QueryBuilder::new()
//!     .with_business_id(1)
//!     .where_find_in_set("tags", &["vip", "active"])
//!     .with_order("created_at", "DESC")
//!     .build();
//!
//! let users: Vec<User> = handler.query("users", &param).fetch_all(handler.pool()).await?;
//! ```
//!
//! ## Dialects
//!
//! Placeholders are `$n` on PostgreSQL and `?` elsewhere. Set membership uses
//! `FIND_IN_SET` on MySQL, `string_to_array` on PostgreSQL and four positional
//! `LIKE` probes on SQLite.

pub mod advanced;
pub mod builder;
pub mod conditions;
pub mod dialect;
pub mod filters;
pub mod options;
pub mod pagination;
pub mod params;
pub mod select;

pub use advanced::AdvancedQuery;
pub use builder::QueryBuilder;
pub use conditions::{Condition, LogicalOperator, SqlWriter, WhereClause};
pub use dialect::{Dialect, SetMembershipStrategy};
pub use filters::{FilterSpec, MatchMode, SetMembership, TimeRange};
pub use options::{QueryOptions, SortDirection};
pub use pagination::Pagination;
pub use params::{PageQuery, QueryParam, SimpleQuery};
pub use select::SelectQuery;
