//! Query Builder Tests Module
//!
//! SQL rendering checks for the builder, conditions and paging, plus
//! execution against the seeded in-memory SQLite database.

pub mod builder;
pub mod conditions;
pub mod execution;
pub mod pagination;
