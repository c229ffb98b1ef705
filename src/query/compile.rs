//! Query to regex program
//!
//! A query compiles to one pattern per signbox element, or to a single
//! pattern when it has no signbox elements. Every pattern has the same
//! shape:
//!
//! ```text
//! prefix  signbox  element coord  spatial*  style?
//! ```
//!
//! - `prefix` is the temporal prefix. It is required and built from the query's
//!   prefix parts when the query is sortable; otherwise any prefix may appear.
//! - `signbox` is the box marker, max coordinate and leading spatials.
//! - `element coord` is the element being looked for. The coordinate is a
//!   window of `variance` around the query's coordinate, or any coordinate.
//! - `spatial*` covers the trailing spatials.
//! - `style?` appears when the query asks for styled matches.
//!
//! The patterns are stages of one search: see [`super::exec`]. A query with
//! an element that no symbol can satisfy (an empty SWU range) compiles to an
//! empty program.

use super::ast::{QueryElement, QueryItem, QueryObject};
use super::dialect::Dialect;
use super::parse::parse;
use super::pattern::Pattern;
use crate::error::{QueryResult, RangeError};
use crate::grammar::style;

fn item_pattern<D: Dialect>(item: &QueryItem) -> Result<Option<Pattern>, RangeError> {
    match item {
        QueryItem::Symbol(symbol) => D::symbol_pattern(symbol).map(Some),
        QueryItem::Range(min, max) => D::range_pattern(min, max),
    }
}

/// `None` when no symbol matches the element.
fn element_pattern<D: Dialect>(element: &QueryElement) -> Result<Option<Pattern>, RangeError> {
    match element {
        QueryElement::Symbol(symbol) => D::symbol_pattern(symbol).map(Some),
        QueryElement::Range(min, max) => D::range_pattern(min, max),
        QueryElement::OrGroup(items) => {
            let mut alternatives = Vec::with_capacity(items.len());
            for item in items {
                alternatives.extend(item_pattern::<D>(item)?);
            }
            Ok((!alternatives.is_empty()).then(|| Pattern::any_of(alternatives)))
        }
    }
}

/// Leading part of every stage: the temporal prefix, required or optional.
fn prefix_pattern<D: Dialect>(query: &QueryObject) -> Result<Option<Pattern>, RangeError> {
    let fragments = D::fragments();
    let prefix = match query.prefix.as_ref().filter(|prefix| prefix.required) {
        Some(prefix) => prefix,
        None => return Ok(Some(Pattern::fragment(fragments.prefix).optional())),
    };
    let Some(parts) = &prefix.parts else {
        return Ok(Some(Pattern::fragment(fragments.prefix)));
    };
    let mut sequence = vec![Pattern::literal(D::SORT)];
    for part in parts {
        let Some(pattern) = element_pattern::<D>(part)? else {
            return Ok(None);
        };
        sequence.push(pattern);
    }
    sequence.push(Pattern::fragment(fragments.null_or_symbol).zero_or_more());
    Ok(Some(Pattern::Concat(sequence).group()))
}

/// Compile a parsed query into its stages.
pub fn compile<D: Dialect>(query: &QueryObject) -> Result<Vec<Pattern>, RangeError> {
    let fragments = D::fragments();
    let Some(prefix) = prefix_pattern::<D>(query)? else {
        return Ok(Vec::new());
    };
    let style = query
        .style
        .then(|| Pattern::fragment(style::FULL.as_str()).optional());

    let finish = |mut parts: Vec<Pattern>| {
        parts.extend(style.clone());
        Pattern::Concat(parts)
    };

    let elements = query.signbox_elements();
    if elements.is_empty() {
        return Ok(vec![finish(vec![prefix, Pattern::fragment(fragments.signbox)])]);
    }

    let variance = query.variance();
    let mut stages = Vec::with_capacity(elements.len());
    for element in elements {
        let Some(pattern) = element_pattern::<D>(&element.element)? else {
            return Ok(Vec::new());
        };
        let coord = match element.coord {
            Some(coord) => D::coord_pattern(coord, variance)?,
            None => Pattern::fragment(fragments.coord),
        };
        stages.push(finish(vec![
            prefix.clone(),
            Pattern::fragment(fragments.signbox),
            pattern,
            coord,
            Pattern::fragment(fragments.spatial).zero_or_more(),
        ]));
    }
    Ok(stages)
}

/// Regex program for query text. Text that is not a query yields an empty
/// program.
pub fn regex<D: Dialect>(text: &str) -> QueryResult<Vec<String>> {
    let Some(query) = parse::<D>(text).into_query() else {
        tracing::debug!(notation = D::NAME, "not a query");
        return Ok(Vec::new());
    };
    let program: Vec<String> = compile::<D>(&query)?.iter().map(Pattern::render).collect();
    tracing::debug!(notation = D::NAME, stages = program.len(), "compiled query");
    Ok(program)
}
