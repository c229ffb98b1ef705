//! The two spellings of the notation
//!
//! FSW and SWU share one grammar. [`Notation`] captures what differs between
//! them (terminal patterns, how a coordinate and a symbol are written) so that
//! sign parsing, composition and the query compiler can be written once.
//! [`Fsw`] and [`Swu`] are the two implementations.

use crate::convert;
use crate::grammar::{fsw, style, swu};
use crate::sign::Coord;
use crate::symbol::SymbolKey;
use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled patterns used by sign and symbol parsing.
pub struct SignPatterns {
    /// Exactly one symbol.
    pub symbol: Regex,
    /// Exactly one symbol or the null symbol.
    pub key: Regex,
    /// Exactly one box marker.
    pub marker: Regex,
    /// `^(symbol)(coord)?(style)?`
    pub symbol_object: Regex,
    /// `^(prefix)?(signbox)(style)?`
    pub sign: Regex,
    /// Signs and stand-alone spatial symbols anywhere in a text.
    pub text: Regex,
    /// `(symbol)(coord)`, unanchored.
    pub spatial: Regex,
    /// Null or symbol, unanchored.
    pub prefix_key: Regex,
}

/// Grammar fragments of one notation, as plain strings.
pub(crate) struct Fragments<'a> {
    pub null_or_symbol: &'a str,
    pub symbol: &'a str,
    pub marker: &'a str,
    pub coord: &'a str,
    pub prefix: &'a str,
    pub signbox: &'a str,
    pub spatial: &'a str,
}

impl SignPatterns {
    pub(crate) fn build(f: &Fragments<'_>) -> Self {
        let style = &*style::FULL;
        let compile = |pattern: String| Regex::new(&pattern).unwrap();
        SignPatterns {
            symbol: compile(format!("^(?:{})$", f.symbol)),
            key: compile(format!("^(?:{})$", f.null_or_symbol)),
            marker: compile(format!("^(?:{})$", f.marker)),
            symbol_object: compile(format!("^({})({})?({style})?", f.symbol, f.coord)),
            sign: compile(format!("^({})?({})({style})?", f.prefix, f.signbox)),
            text: compile(format!(
                "(?:{})?(?:{})(?:{style})?|{}(?:{style})?",
                f.prefix, f.signbox, f.spatial
            )),
            spatial: compile(format!("({})({})", f.symbol, f.coord)),
            prefix_key: compile(f.null_or_symbol.to_string()),
        }
    }
}

/// One spelling of the notation.
pub trait Notation {
    /// Short lowercase name, used in log events.
    const NAME: &'static str;
    /// Marker introducing the temporal prefix.
    const SORT: &'static str;

    fn patterns() -> &'static SignPatterns;

    /// Decode a coordinate already matched by the coordinate fragment.
    fn parse_coord(text: &str) -> Option<Coord>;

    /// Write a coordinate, or `None` if this notation cannot express it.
    fn format_coord(coord: Coord) -> Option<String>;

    /// Identify a symbol (or the null symbol) written in this notation.
    fn parse_key(text: &str) -> Option<SymbolKey>;

    fn format_key(key: SymbolKey) -> String;
}

/// Formal SignWriting in ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fsw;

/// SignWriting in Unicode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swu;

static FSW_PATTERNS: Lazy<SignPatterns> = Lazy::new(|| {
    SignPatterns::build(&Fragments {
        null_or_symbol: &fsw::NULL_OR_SYMBOL,
        symbol: fsw::SYMBOL,
        marker: fsw::BOX,
        coord: &fsw::COORD,
        prefix: &fsw::PREFIX,
        signbox: &fsw::SIGNBOX,
        spatial: &fsw::SPATIAL,
    })
});

static SWU_PATTERNS: Lazy<SignPatterns> = Lazy::new(|| {
    SignPatterns::build(&Fragments {
        null_or_symbol: &swu::NULL_OR_SYMBOL,
        symbol: swu::SYMBOL,
        marker: swu::BOX,
        coord: &swu::COORD,
        prefix: &swu::PREFIX,
        signbox: &swu::SIGNBOX,
        spatial: &swu::SPATIAL,
    })
});

impl Notation for Fsw {
    const NAME: &'static str = "fsw";
    const SORT: &'static str = "A";

    fn patterns() -> &'static SignPatterns {
        &FSW_PATTERNS
    }

    fn parse_coord(text: &str) -> Option<Coord> {
        convert::fsw_to_coord(text)
    }

    fn format_coord(coord: Coord) -> Option<String> {
        let axis = 0..=999;
        (axis.contains(&coord.x) && axis.contains(&coord.y)).then(|| convert::coord_to_fsw(coord))
    }

    fn parse_key(text: &str) -> Option<SymbolKey> {
        SymbolKey::from_fsw(text)
    }

    fn format_key(key: SymbolKey) -> String {
        key.to_fsw()
    }
}

impl Notation for Swu {
    const NAME: &'static str = "swu";
    const SORT: &'static str = "\u{1D800}";

    fn patterns() -> &'static SignPatterns {
        &SWU_PATTERNS
    }

    fn parse_coord(text: &str) -> Option<Coord> {
        convert::swu_to_coord(text)
    }

    fn format_coord(coord: Coord) -> Option<String> {
        convert::coord_to_swu(coord)
    }

    fn parse_key(text: &str) -> Option<SymbolKey> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => SymbolKey::from_swu(symbol),
            _ => None,
        }
    }

    fn format_key(key: SymbolKey) -> String {
        key.to_swu().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fsw_coordinates_are_three_digits() {
        assert_eq!(Fsw::format_coord(Coord::new(100, 999)).as_deref(), Some("100x999"));
        assert_eq!(Fsw::format_coord(Coord::new(50, 5)).as_deref(), Some("050x005"));
        assert_eq!(Fsw::format_coord(Coord::new(-1, 500)), None);
        assert_eq!(Fsw::format_coord(Coord::new(500, 1000)), None);
    }

    #[test]
    fn swu_coordinates_stay_inside_the_number_block() {
        assert!(Swu::format_coord(Coord::new(250, 749)).is_some());
        assert_eq!(Swu::format_coord(Coord::new(249, 500)), None);
        assert_eq!(Swu::parse_coord("\u{1D906}\u{1D906}"), Some(Coord::new(500, 500)));
    }

    #[test]
    fn keys_in_both_spellings() {
        let key = Fsw::parse_key("S10000").unwrap();
        assert_eq!(Swu::format_key(key), "\u{40001}");
        assert_eq!(Swu::parse_key("\u{40001}"), Some(key));
        assert_eq!(Swu::parse_key("\u{40001}\u{40001}"), None);
    }

    #[test]
    fn sign_patterns_anchor_where_expected() {
        let fsw = Fsw::patterns();
        assert!(fsw.symbol.is_match("S10000"));
        assert!(!fsw.symbol.is_match("S00000"));
        assert!(fsw.key.is_match("S00000"));
        assert!(fsw.marker.is_match("L"));
        assert!(!fsw.marker.is_match("LM"));
        let swu = Swu::patterns();
        assert!(swu.key.is_match("\u{40000}"));
        assert!(swu.marker.is_match("\u{1D804}"));
    }
}
