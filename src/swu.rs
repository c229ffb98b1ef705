//! SignWriting in Unicode
//!
//! Entry points for SWU text and SWU queries. SWU writes the same grammar as
//! FSW with one reserved codepoint per token: a symbol is a single plane-4
//! character, a coordinate is two number characters. Queries use ASCII for
//! their own syntax (`Q`, `A`, `T`, `R`, `o`, `f`, `r`, `V`, `-`).

use crate::error::{ComposeError, QueryResult};
use crate::notation::Swu;
use crate::query::range;
use crate::query::{self, QueryFlags, QueryObject, QueryParse, SearchMode};
use crate::sign::{self, SignObject, SymbolObject};

pub fn parse_symbol(text: &str) -> Option<SymbolObject> {
    sign::parse_symbol::<Swu>(text)
}

pub fn parse_sign(text: &str) -> Option<SignObject> {
    sign::parse_sign::<Swu>(text)
}

pub fn parse_text(text: &str) -> Vec<String> {
    sign::parse_text::<Swu>(text)
}

pub fn compose_symbol(object: &SymbolObject) -> Result<String, ComposeError> {
    sign::compose_symbol::<Swu>(object)
}

pub fn compose_sign(object: &SignObject) -> Result<String, ComposeError> {
    sign::compose_sign::<Swu>(object)
}

pub fn is_type(symbol: &str, range: &str) -> bool {
    sign::is_type::<Swu>(symbol, range)
}

pub fn colorize(symbol: &str) -> &'static str {
    sign::colorize::<Swu>(symbol)
}

pub fn query_parse(text: &str) -> QueryParse {
    query::parse::<Swu>(text)
}

pub fn query_compose(query: &QueryObject) -> Result<String, ComposeError> {
    query::compose::<Swu>(query)
}

/// Class of the codepoints `min..=max`; empty when `min` is past `max`.
pub fn query_range(min: char, max: char) -> String {
    range::codepoints(min, max)
        .map(|pattern| pattern.render())
        .unwrap_or_default()
}

pub fn query_regex(text: &str) -> QueryResult<Vec<String>> {
    query::regex::<Swu>(text)
}

pub fn query_results(query: &str, text: &str) -> QueryResult<Vec<String>> {
    query::search::<Swu>(query, text, SearchMode::Signs)
}

pub fn query_lines(query: &str, text: &str) -> QueryResult<Vec<String>> {
    query::search::<Swu>(query, text, SearchMode::Lines)
}

pub fn to_query(sign: &str, flags: &str) -> Option<String> {
    query::from_sign::<Swu>(sign, QueryFlags::from_letters(flags))
}
