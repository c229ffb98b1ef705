//! Fragments for SignWriting in Unicode and its query language.
//!
//! Terminals are reserved codepoints written as `\x{...}` escapes:
//! symbols live on plane 4 starting at U+40001 (U+40000 is the null symbol),
//! markers and numbers in the U+1D800 block.

use once_cell::sync::Lazy;

pub const NULL: &str = r"\x{40000}";
pub const SYMBOL: &str = r"[\x{40001}-\x{4F480}]";
/// One axis of a coordinate, 250 through 749.
pub const NUMBER: &str = r"[\x{1D80C}-\x{1D9FF}]";
pub const SORT: &str = r"\x{1D800}";
pub const BOX: &str = r"[\x{1D801}-\x{1D804}]";

pub static NULL_OR_SYMBOL: Lazy<String> = Lazy::new(|| format!("(?:{NULL}|{SYMBOL})"));
pub static PREFIX: Lazy<String> = Lazy::new(|| format!("(?:{SORT}{}+)", *NULL_OR_SYMBOL));
pub static COORD: Lazy<String> = Lazy::new(|| format!("{NUMBER}{{2}}"));
pub static SPATIAL: Lazy<String> = Lazy::new(|| format!("{SYMBOL}{}", *COORD));
pub static SIGNBOX: Lazy<String> =
    Lazy::new(|| format!("{BOX}{}(?:{})*", *COORD, *SPATIAL));
pub static SIGN: Lazy<String> = Lazy::new(|| format!("{}?{}", *PREFIX, *SIGNBOX));
pub static SORTABLE: Lazy<String> = Lazy::new(|| format!("{}{}", *PREFIX, *SIGNBOX));

// Query language

pub const QUERY_BASE: &str = SYMBOL;
pub const QUERY_VAR: &str = "V[0-9]+";

pub static QUERY_COORD: Lazy<String> = Lazy::new(|| format!("(?:{NUMBER}{{2}})?"));
/// Query symbol; a trailing `f` widens to every fill, `r` to every rotation.
pub static QUERY_SYMBOL: Lazy<String> = Lazy::new(|| format!("{QUERY_BASE}f?r?"));
pub static QUERY_NULL_OR_SYMBOL: Lazy<String> =
    Lazy::new(|| format!("(?:{NULL}|{})", *QUERY_SYMBOL));
pub static QUERY_RANGE: Lazy<String> = Lazy::new(|| format!("R{QUERY_BASE}{QUERY_BASE}"));
pub static QUERY_ITEM: Lazy<String> =
    Lazy::new(|| format!("(?:{NULL}|{}|{})", *QUERY_SYMBOL, *QUERY_RANGE));
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
