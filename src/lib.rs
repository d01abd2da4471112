#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Service Core
//!
//! Data-access helpers for web-backend services: declarative list filters
//! compiled into parameterized SQL, URL-driven pagination, and database
//! bootstrap from configuration.
//!
//! ## Overview
//!
//! Most list endpoints need the same handful of things: scope rows to a
//! tenant (business) and shop, filter by value sets and patterns, restrict a
//! timestamp to a range, test membership in a comma-separated column, then
//! sort and page. This crate describes those needs as values and compiles
//! them for MySQL, PostgreSQL or SQLite through the `sqlx` `Any` driver.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - Filter specs, options, the builder and clause compilers
//! - [`page`] - Query-string parsing into page requests and the paged finder
//! - [`database`] - Pool construction, dialect detection and the handler seam
//! - [`config`] - YAML plus environment configuration
//! - [`logging`] - Structured logging initialization
//! - [`error`] - Structured error handling
//! - [`constants`] - Defaults, wire keys and operator tags
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use service_core::config::DatabaseConfig;
//! use service_core::database::{DatabaseHandler, Handler};
//! use service_core::page::{find_page, parse_page_request};
//! use service_core::query_builder::QueryBuilder;
//! use serde_json::json;
//!
//! #[derive(sqlx::FromRow)]
//! struct User {
//!     id: i64,
//!     username: String,
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = DatabaseHandler::connect(&DatabaseConfig::sqlite_memory()).await?;
//!
//! // Declarative filters
//! let param = QueryBuilder::new()
//!     .with_business_id(1)
//!     .where_in("status", vec![json!(1), json!(2)])
//!     .with_order("age", "ASC")
//!     .with_pagination(10, 0)
//!     .build();
//! let users: Vec<User> = handler.query("users", &param).fetch_all(handler.pool()).await?;
//!
//! // URL-driven paging
//! let request = parse_page_request("current=2&rowCount=20&age=gt:18&orderStr=id:pd:");
//! let page = find_page::<User, _>(&handler, "users", request.as_ref()).await?;
//! println!("{} of {}", page.rows.len(), page.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod page;
pub mod query_builder;

pub use config::{ConfigManager, CoreConfig, DatabaseConfig, DatabaseDriver, LoggingConfig};
pub use database::{DatabaseHandler, Handler};
pub use error::{CoreError, CoreResult};
pub use logging::init_structured_logging;
pub use page::{find_page, parse_page_request, PageBean, PageRequest};
pub use query_builder::{
    AdvancedQuery, Dialect, PageQuery, QueryBuilder, QueryOptions, QueryParam, SelectQuery,
    SimpleQuery,
};
