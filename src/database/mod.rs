//! # Database Access
//!
//! Pool construction from [`DatabaseConfig`](crate::config::DatabaseConfig),
//! dialect detection, and the [`Handler`] seam that queries and the paged
//! finder run through.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use service_core::config::DatabaseConfig;
//! use service_core::database::{DatabaseHandler, Handler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = DatabaseHandler::connect(&DatabaseConfig::sqlite_memory()).await?;
//! assert!(handler.health_check().await?);
//!
//! let mut tx = handler.begin().await?;
//! sqlx::query("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT)")
//!     .execute(&mut *tx)
//!     .await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

pub mod handler;

pub use handler::{DatabaseHandler, Handler};
