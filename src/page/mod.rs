//! # Paged Listing
//!
//! Parses list-endpoint query strings (`current=2&rowCount=20&age=gt:18`) into
//! a [`PageRequest`] and runs it as a count plus one page fetch.

pub mod finder;
pub mod request;

pub use finder::{find_page, PageBean};
pub use request::{
    camel_to_snake, check_page_rows, parse_page_request, process_order_string, resolve_sort_list,
    try_parse_page_request, CompareOp, FieldCondition, PageParseError, PageRequest, SortItem,
};
