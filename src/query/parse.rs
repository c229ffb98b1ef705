//! Query text to AST and back
//!
//! [`parse`] never fails: text outside the query grammar is
//! [`QueryParse::NotAQuery`]. [`compose`] is strict and checks every piece
//! before checking the assembled text against the full query grammar, so
//! `compose(parse(q)) == q` for every canonical query `q`.

use super::ast::{
    Prefix, PrefixElement, QueryElement, QueryItem, QueryObject, QueryParse, SignboxElement,
};
use super::dialect::Dialect;
use crate::error::ComposeError;
use crate::sign;

pub fn parse<D: Dialect>(text: &str) -> QueryParse {
    let patterns = D::query_patterns();
    let Some(caps) = patterns.full.captures(text) else {
        return QueryParse::NotAQuery;
    };
    let non_empty = |index: usize| caps.get(index).map(|m| m.as_str()).filter(|s| !s.is_empty());

    let prefix = match non_empty(1) {
        Some(prefix) => match parse_prefix::<D>(prefix) {
            Some(prefix) => Some(prefix),
            None => return QueryParse::NotAQuery,
        },
        None => None,
    };
    let signbox = match non_empty(2) {
        Some(signbox) => match parse_signbox::<D>(signbox) {
            Some(signbox) => Some(signbox),
            None => return QueryParse::NotAQuery,
        },
        None => None,
    };
    // The grammar admits only digits here, so parsing fails only on overflow.
    let variance = non_empty(3).map(|var| var[1..].parse::<u32>().unwrap_or(u32::MAX));

    QueryParse::Query(QueryObject {
        prefix,
        signbox,
        variance,
        style: non_empty(4).is_some(),
    })
}

fn parse_element<D: Dialect>(text: &str) -> Option<QueryElement> {
    let mut items = D::query_patterns()
        .item
        .find_iter(text)
        .map(|item| D::parse_item(item.as_str()))
        .collect::<Option<Vec<_>>>()?;
    match items.len() {
        0 => None,
        1 => items.pop().map(QueryElement::from),
        _ => Some(QueryElement::OrGroup(items)),
    }
}

fn parse_prefix<D: Dialect>(text: &str) -> Option<Prefix> {
    if text == "T" {
        return Some(Prefix {
            required: true,
            parts: None,
        });
    }
    let body = text.strip_prefix('A')?.strip_suffix('T')?;
    let parts = D::query_patterns()
        .list
        .find_iter(body)
        .map(|part| parse_element::<D>(part.as_str()))
        .collect::<Option<Vec<PrefixElement>>>()?;
    Some(Prefix {
        required: true,
        parts: Some(parts),
    })
}

fn parse_signbox<D: Dialect>(text: &str) -> Option<Vec<SignboxElement>> {
    D::query_patterns()
        .signbox_element
        .captures_iter(text)
        .map(|caps| {
            let element = parse_element::<D>(caps.get(1)?.as_str())?;
            let coord = match caps.get(2) {
                Some(coord) => Some(D::parse_coord(coord.as_str())?),
                None => None,
            };
            Some(SignboxElement::new(element, coord))
        })
        .collect()
}

fn compose_item<D: Dialect>(item: &QueryItem) -> Result<String, ComposeError> {
    let patterns = D::query_patterns();
    match item {
        QueryItem::Symbol(symbol) => {
            if patterns.symbol.is_match(symbol) {
                Ok(symbol.clone())
            } else {
                Err(ComposeError::InvalidSymbol(symbol.clone()))
            }
        }
        QueryItem::Range(min, max) => {
            for bound in [min, max] {
                if !patterns.bound.is_match(bound) {
                    return Err(ComposeError::InvalidRange(bound.clone()));
                }
            }
            Ok(D::format_range(min, max))
        }
    }
}

fn compose_element<D: Dialect>(element: &QueryElement) -> Result<String, ComposeError> {
    match element {
        QueryElement::Symbol(symbol) => compose_item::<D>(&QueryItem::Symbol(symbol.clone())),
        QueryElement::Range(min, max) => {
            compose_item::<D>(&QueryItem::Range(min.clone(), max.clone()))
        }
        QueryElement::OrGroup(items) => {
            if items.len() < 2 {
                return Err(ComposeError::OrGroupTooSmall(items.len()));
            }
            let items = items
                .iter()
                .map(compose_item::<D>)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items.join("o"))
        }
    }
}

pub fn compose<D: Dialect>(query: &QueryObject) -> Result<String, ComposeError> {
    let mut out = String::from("Q");

    if let Some(prefix) = query.prefix.as_ref().filter(|prefix| prefix.required) {
        if let Some(parts) = &prefix.parts {
            if parts.is_empty() {
                return Err(ComposeError::EmptyPrefix);
            }
            out.push('A');
            for part in parts {
                out.push_str(&compose_element::<D>(part)?);
            }
        }
        out.push('T');
    }

    for element in query.signbox_elements() {
        out.push_str(&compose_element::<D>(&element.element)?);
        if let Some(coord) = element.coord {
            let coord = D::format_coord(coord).ok_or(ComposeError::InvalidCoord {
                x: coord.x,
                y: coord.y,
            })?;
            out.push_str(&coord);
        }
    }

    if let Some(variance) = query.variance {
        out.push_str(&format!("V{variance}"));
    }
    if query.style {
        out.push('-');
    }

    if D::query_patterns().full.is_match(&out) {
        Ok(out)
    } else {
        Err(ComposeError::Grammar(out))
    }
}

/// Which parts of a sign a generated query keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFlags {
    /// `A`: prefix symbols, exactly.
    pub prefix_exact: bool,
    /// `a`: prefix symbols, any fill or rotation.
    pub prefix_general: bool,
    /// `S`: signbox symbols, exactly.
    pub signbox_exact: bool,
    /// `s`: signbox symbols, any fill or rotation.
    pub signbox_general: bool,
    /// `L`: signbox symbols at their location.
    pub location: bool,
}

impl QueryFlags {
    /// Read flags from letters such as `"ASL"`. Unknown letters are ignored.
    pub fn from_letters(letters: &str) -> Self {
        Self {
            prefix_exact: letters.contains('A'),
            prefix_general: letters.contains('a'),
            signbox_exact: letters.contains('S'),
            signbox_general: letters.contains('s'),
            location: letters.contains('L'),
        }
    }
}

/// Build a query matching signs like the one in `text`. `None` when the text is not a
/// sign or the flags select nothing present in it.
pub fn from_sign<D: Dialect>(text: &str, flags: QueryFlags) -> Option<String> {
    let sign = sign::parse_sign::<D>(text)?;
    let mut query = String::new();

    if flags.prefix_exact || flags.prefix_general {
        if let Some(sequence) = &sign.sequence {
            query.push('A');
            for symbol in sequence {
                if flags.prefix_general {
                    query.push_str(&D::generalize(symbol));
                } else {
                    query.push_str(symbol);
                }
            }
            query.push('T');
        }
    }

    if flags.signbox_exact || flags.signbox_general {
        for spatial in &sign.spatials {
            if flags.signbox_general {
                query.push_str(&D::generalize(&spatial.symbol));
            } else {
                query.push_str(&spatial.symbol);
            }
            if flags.location {
                query.push_str(&D::format_coord(spatial.coord)?);
            }
        }
    }

    (!query.is_empty()).then(|| format!("Q{query}"))
}
