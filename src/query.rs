//! Query Language
//!
//! A query describes the signs to look for: symbols in the temporal prefix,
//! symbols in the signbox (optionally near a coordinate), and whether style
//! strings may trail the match. Queries are written in either notation and go
//! through three steps:
//!
//! ```text
//! query text ──parse──► QueryObject ──compile──► regex program ──run──► results
//!            ◄─compose─
//! ```
//!
//! - [`ast`] - the parsed query
//! - [`dialect`] - what differs between FSW and SWU queries
//! - [`range`] - numeric intervals to digit patterns
//! - [`pattern`] - the regex tree that compiled queries are built from
//! - [`exec`] - the staged search over a corpus

pub mod ast;
pub mod dialect;
pub mod exec;
pub mod pattern;
pub mod range;

mod compile;
mod parse;

pub use ast::{
    Prefix, PrefixElement, QueryElement, QueryItem, QueryObject, QueryParse, SignboxElement,
    DEFAULT_VARIANCE,
};
pub use compile::{compile, regex};
pub use dialect::Dialect;
pub use exec::SearchMode;
pub use parse::{compose, from_sign, parse, QueryFlags};

use crate::error::QueryResult;

/// Compile `query` and run it over `text`.
pub fn search<D: Dialect>(query: &str, text: &str, mode: SearchMode) -> QueryResult<Vec<String>> {
    let program = regex::<D>(query)?;
    exec::run(&program, text, mode)
}
