//! Fragments for Formal SignWriting in ASCII and its query language.

use once_cell::sync::Lazy;

/// The null symbol, allowed only in the temporal prefix.
pub const NULL: &str = "S00000";
/// A symbol key: `S`, three hex digits of base, one fill digit, one rotation digit.
pub const SYMBOL: &str = "S[123][0-9a-f]{2}[0-5][0-9a-f]";
/// One axis of a coordinate.
pub const NUMBER: &str = "[0-9]{3}";
/// Marker introducing the temporal prefix.
pub const SORT: &str = "A";
/// Signbox and lane markers.
pub const BOX: &str = "[BLMR]";

pub static NULL_OR_SYMBOL: Lazy<String> = Lazy::new(|| format!("(?:{NULL}|{SYMBOL})"));
pub static PREFIX: Lazy<String> = Lazy::new(|| format!("(?:{SORT}{}+)", *NULL_OR_SYMBOL));
pub static COORD: Lazy<String> = Lazy::new(|| format!("{NUMBER}x{NUMBER}"));
pub static SPATIAL: Lazy<String> = Lazy::new(|| format!("{SYMBOL}{}", *COORD));
pub static SIGNBOX: Lazy<String> =
    Lazy::new(|| format!("{BOX}{}(?:{})*", *COORD, *SPATIAL));
pub static SIGN: Lazy<String> = Lazy::new(|| format!("{}?{}", *PREFIX, *SIGNBOX));
/// A sign whose temporal prefix is mandatory.
pub static SORTABLE: Lazy<String> = Lazy::new(|| format!("{}{}", *PREFIX, *SIGNBOX));

// Query language

/// Symbol base in a query (three hex digits, no fill or rotation).
pub const QUERY_BASE: &str = "[123][0-9a-f]{2}";
pub const QUERY_VAR: &str = "V[0-9]+";

pub static QUERY_COORD: Lazy<String> = Lazy::new(|| format!("(?:{})?", *COORD));
/// Query symbol; `u` in fill or rotation position is a wildcard.
pub static QUERY_SYMBOL: Lazy<String> = Lazy::new(|| format!("S{QUERY_BASE}[0-5u][0-9a-fu]"));
pub static QUERY_NULL_OR_SYMBOL: Lazy<String> =
    Lazy::new(|| format!("(?:{NULL}|{})", *QUERY_SYMBOL));
/// Closed range of symbol bases: `R100t204`.
pub static QUERY_RANGE: Lazy<String> = Lazy::new(|| format!("R{QUERY_BASE}t{QUERY_BASE}"));
pub static QUERY_ITEM: Lazy<String> =
    Lazy::new(|| format!("(?:{NULL}|{}|{})", *QUERY_SYMBOL, *QUERY_RANGE));
/// One item or an `o`-joined OR-group of items.
pub static QUERY_LIST: Lazy<String> =
    Lazy::new(|| format!("{}(?:o{})*", *QUERY_ITEM, *QUERY_ITEM));
pub static QUERY_PREFIX: Lazy<String> = Lazy::new(|| format!("(?:A(?:{})+)?T", *QUERY_LIST));
pub static QUERY_SIGNBOX: Lazy<String> =
    Lazy::new(|| format!("(?:{}{})*", *QUERY_LIST, *QUERY_COORD));
/// Whole query with four capture groups: prefix, signbox, variance, style flag.
pub static QUERY_FULL: Lazy<String> = Lazy::new(|| {
    format!(
        "Q({})?({})?({QUERY_VAR})?(-?)",
        *QUERY_PREFIX, *QUERY_SIGNBOX
    )
});
