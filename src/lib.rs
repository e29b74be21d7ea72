//! Search-as-you-type filtering for managed object lists.
//!
//! [`search_query::parse`] compiles a query line once,
//! [`search_query::matches`] evaluates it against plain or attributed
//! candidates.

pub mod config;
pub mod objects;
pub mod search_query;
mod storage;

#[cfg(test)]
mod tests;
