//! Query AST
//!
//! A query has an optional temporal prefix (`A ... T`), a list of signbox
//! elements, an optional variance (`V<n>`) and a style flag (`-`):
//!
//! ```text
//! Q A S10000 R100t204 T  S20000  R100t105 500x500  V5  -
//!   └──── prefix ─────┘  └────── signbox ───────┘  var style
//! ```
//!
//! Symbols and range bounds are kept as text in the spelling of the query
//! they came from: `S100uu` and `("100", "204")` for FSW, `"\u{40001}fr"` and
//! `("\u{40001}", "\u{461E0}")` for SWU.

use crate::sign::Coord;
use serde::{Deserialize, Serialize};

/// Coordinate tolerance used when a query has no `V<n>`.
pub const DEFAULT_VARIANCE: u32 = 20;

/// One member of an OR-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryItem {
    Symbol(String),
    Range(String, String),
}

/// A symbol, a range of symbol bases, or an OR-group of those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryElement {
    Symbol(String),
    Range(String, String),
    #[serde(rename = "or_list")]
    OrGroup(Vec<QueryItem>),
}

impl From<QueryItem> for QueryElement {
    fn from(item: QueryItem) -> Self {
        match item {
            QueryItem::Symbol(symbol) => QueryElement::Symbol(symbol),
            QueryItem::Range(min, max) => QueryElement::Range(min, max),
        }
    }
}

pub type PrefixElement = QueryElement;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefix {
    pub required: bool,
    /// `None` for a bare `T`, which only asks for some prefix to be present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<PrefixElement>>,
}

/// An element of the signbox, optionally placed at a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignboxElement {
    #[serde(flatten)]
    pub element: QueryElement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coord>,
}

impl SignboxElement {
    pub fn new(element: QueryElement, coord: Option<Coord>) -> Self {
        Self { element, coord }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Prefix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signbox: Option<Vec<SignboxElement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub style: bool,
}

impl QueryObject {
    pub fn variance(&self) -> u32 {
        self.variance.unwrap_or(DEFAULT_VARIANCE)
    }

    /// Whether matching signs must carry a temporal prefix.
    pub fn is_sortable(&self) -> bool {
        self.prefix.as_ref().is_some_and(|prefix| prefix.required)
    }

    pub fn signbox_elements(&self) -> &[SignboxElement] {
        self.signbox.as_deref().unwrap_or_default()
    }
}

/// Result of parsing query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParse {
    Query(QueryObject),
    NotAQuery,
}

impl QueryParse {
    pub fn into_query(self) -> Option<QueryObject> {
        match self {
            QueryParse::Query(query) => Some(query),
            QueryParse::NotAQuery => None,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, QueryParse::Query(_))
    }
}
