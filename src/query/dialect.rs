//! Query dialects
//!
//! The query language exists in both spellings of the notation. A
//! [`Dialect`] adds to [`Notation`] what the query parser, composer and
//! compiler need: the query grammar, how range items are written, and how a
//! query symbol widens into the set of symbols it stands for.
//!
//! | piece            | FSW               | SWU                          |
//! |------------------|-------------------|------------------------------|
//! | symbol wildcard  | `S100uu`          | `\u{40001}fr`                |
//! | range            | `R100t204`        | `R\u{40001}\u{461E0}`        |
//! | coordinate       | `500x500`         | two number characters        |

use super::ast::QueryItem;
use super::pattern::Pattern;
use super::range::{self, Radix};
use crate::convert;
use crate::error::RangeError;
use crate::grammar::{fsw, swu};
use crate::notation::{Fsw, Notation, Swu};
use crate::sign::Coord;
use crate::symbol::{SymbolKey, ROTATIONS, SWU_NULL, VARIANTS};
use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled query-grammar patterns of one dialect.
pub struct QueryPatterns {
    /// `^Q(prefix)?(signbox)?(var)?(-?)$`
    pub full: Regex,
    /// Items and OR-groups, unanchored.
    pub list: Regex,
    /// Single items, unanchored.
    pub item: Regex,
    /// `(list)(coord)?`, unanchored.
    pub signbox_element: Regex,
    /// Exactly one query symbol (or null).
    pub symbol: Regex,
    /// Exactly one range bound.
    pub bound: Regex,
}

impl QueryPatterns {
    fn build(full: &str, list: &str, item: &str, coord: &str, symbol: &str, bound: &str) -> Self {
        let compile = |pattern: String| Regex::new(&pattern).unwrap();
        QueryPatterns {
            full: compile(format!("^(?:{full})$")),
            list: compile(list.to_string()),
            item: compile(item.to_string()),
            signbox_element: compile(format!("({list})({coord})?")),
            symbol: compile(format!("^(?:{symbol})$")),
            bound: compile(format!("^(?:{bound})$")),
        }
    }
}

static FSW_QUERY: Lazy<QueryPatterns> = Lazy::new(|| {
    QueryPatterns::build(
        &fsw::QUERY_FULL,
        &fsw::QUERY_LIST,
        &fsw::QUERY_ITEM,
        &fsw::COORD,
        &fsw::QUERY_NULL_OR_SYMBOL,
        fsw::QUERY_BASE,
    )
});

static SWU_QUERY: Lazy<QueryPatterns> = Lazy::new(|| {
    QueryPatterns::build(
        &swu::QUERY_FULL,
        &swu::QUERY_LIST,
        &swu::QUERY_ITEM,
        &swu::COORD,
        &swu::QUERY_NULL_OR_SYMBOL,
        swu::QUERY_BASE,
    )
});

/// Regex text of the sign grammar, embedded into compiled queries.
pub struct SignFragments {
    pub prefix: &'static str,
    pub null_or_symbol: &'static str,
    pub signbox: &'static str,
    pub spatial: &'static str,
    pub coord: &'static str,
}

pub trait Dialect: Notation {
    fn query_patterns() -> &'static QueryPatterns;

    fn fragments() -> SignFragments;

    /// Split an item matched by the item pattern into a symbol or a range.
    fn parse_item(text: &str) -> Option<QueryItem>;

    fn format_range(min: &str, max: &str) -> String;

    /// Symbols matched by a query symbol.
    fn symbol_pattern(symbol: &str) -> Result<Pattern, RangeError>;

    /// Symbols whose base lies between the bases of `min` and `max`, or
    /// `None` when no symbol does.
    fn range_pattern(min: &str, max: &str) -> Result<Option<Pattern>, RangeError>;

    /// Coordinates within `variance` of `coord` on both axes.
    fn coord_pattern(coord: Coord, variance: u32) -> Result<Pattern, RangeError>;

    /// The query symbol matching every fill and rotation of `symbol`.
    fn generalize(symbol: &str) -> String;
}

/// `value ± variance`, clamped to the representable axis.
fn window(value: i32, variance: u32, lo: i32, hi: i32) -> (i32, i32) {
    let variance = i32::try_from(variance).unwrap_or(i32::MAX);
    (
        value.saturating_sub(variance).clamp(lo, hi),
        value.saturating_add(variance).clamp(lo, hi),
    )
}

impl Dialect for Fsw {
    fn query_patterns() -> &'static QueryPatterns {
        &FSW_QUERY
    }

    fn fragments() -> SignFragments {
        SignFragments {
            prefix: &fsw::PREFIX,
            null_or_symbol: &fsw::NULL_OR_SYMBOL,
            signbox: &fsw::SIGNBOX,
            spatial: &fsw::SPATIAL,
            coord: &fsw::COORD,
        }
    }

    fn parse_item(text: &str) -> Option<QueryItem> {
        match text.strip_prefix('R') {
            Some(range) => {
                let (min, max) = range.split_once('t')?;
                Some(QueryItem::Range(min.to_string(), max.to_string()))
            }
            None => Some(QueryItem::Symbol(text.to_string())),
        }
    }

    fn format_range(min: &str, max: &str) -> String {
        format!("R{min}t{max}")
    }

    fn symbol_pattern(symbol: &str) -> Result<Pattern, RangeError> {
        let invalid = || RangeError::InvalidDigit {
            value: symbol.to_string(),
        };
        if symbol.len() != 6 || !symbol.is_ascii() {
            return Err(invalid());
        }
        let (head, tail) = symbol.split_at(4);
        let mut tail = tail.chars();
        let fill = tail.next().ok_or_else(invalid)?;
        let rotation = tail.next().ok_or_else(invalid)?;
        let fill = match fill {
            'u' => Pattern::range('0', '5'),
            digit => Pattern::literal(digit),
        };
        let rotation = match rotation {
            'u' => Pattern::Class(vec![('0', '9'), ('a', 'f')]),
            digit => Pattern::literal(digit),
        };
        Ok(Pattern::Concat(vec![Pattern::literal(head), fill, rotation]))
    }

    fn range_pattern(min: &str, max: &str) -> Result<Option<Pattern>, RangeError> {
        let bases = range::compile(Radix::Hex.parse(min)?, Radix::Hex.parse(max)?, Radix::Hex)?;
        Ok(Some(Pattern::Concat(vec![
            Pattern::literal("S"),
            bases,
            Pattern::range('0', '5'),
            Pattern::Class(vec![('0', '9'), ('a', 'f')]),
        ])))
    }

    fn coord_pattern(coord: Coord, variance: u32) -> Result<Pattern, RangeError> {
        let axis = |value: i32| {
            let (lo, hi) = window(value, variance, 0, 999);
            range::compile(lo as u32, hi as u32, Radix::Decimal)
        };
        Ok(Pattern::Concat(vec![
            axis(coord.x)?,
            Pattern::literal("x"),
            axis(coord.y)?,
        ]))
    }

    fn generalize(symbol: &str) -> String {
        if symbol == fsw::NULL || symbol.len() < 4 {
            return symbol.to_string();
        }
        format!("{}uu", &symbol[..4])
    }
}

/// First codepoint of the fill/rotation block holding `symbol`.
fn block_start(symbol: SymbolKey) -> u32 {
    SWU_NULL + 1 + (symbol.id() - 1) / VARIANTS as u32 * VARIANTS as u32
}

fn codepoint(code: u32) -> Result<char, RangeError> {
    convert::code_to_swu(code).ok_or_else(|| RangeError::InvalidDigit {
        value: format!("U+{code:X}"),
    })
}

fn swu_symbol(text: &str) -> Result<SymbolKey, RangeError> {
    Swu::parse_key(text)
        .filter(|key| !key.is_null())
        .ok_or_else(|| RangeError::InvalidDigit {
            value: text.to_string(),
        })
}

impl Dialect for Swu {
    fn query_patterns() -> &'static QueryPatterns {
        &SWU_QUERY
    }

    fn fragments() -> SignFragments {
        SignFragments {
            prefix: &swu::PREFIX,
            null_or_symbol: &swu::NULL_OR_SYMBOL,
            signbox: &swu::SIGNBOX,
            spatial: &swu::SPATIAL,
            coord: &swu::COORD,
        }
    }

    fn parse_item(text: &str) -> Option<QueryItem> {
        match text.strip_prefix('R') {
            Some(range) => {
                let mut bounds = range.chars();
                let (min, max) = (bounds.next()?, bounds.next()?);
                Some(QueryItem::Range(min.to_string(), max.to_string()))
            }
            None => Some(QueryItem::Symbol(text.to_string())),
        }
    }

    fn format_range(min: &str, max: &str) -> String {
        format!("R{min}{max}")
    }

    fn symbol_pattern(symbol: &str) -> Result<Pattern, RangeError> {
        let mut chars = symbol.chars();
        let first = chars.next().unwrap_or_default();
        let suffix = chars.as_str();
        if first == '\u{40000}' && suffix.is_empty() {
            return Ok(Pattern::literal(first));
        }
        let key = swu_symbol(first.encode_utf8(&mut [0; 4]))?;
        let start = block_start(key);
        let offset = key.id() - 1 - (start - SWU_NULL - 1);
        let (fill, rotation) = (offset / ROTATIONS as u32, offset % ROTATIONS as u32);
        let rotations = ROTATIONS as u32;
        match suffix {
            "" => Ok(Pattern::literal(first)),
            "r" => {
                let lo = start + fill * rotations;
                Ok(Pattern::range(codepoint(lo)?, codepoint(lo + rotations - 1)?))
            }
            "f" => {
                let fills = (0..VARIANTS as u32 / rotations)
                    .map(|f| codepoint(start + rotation + f * rotations).map(Pattern::literal))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Pattern::Alternation(fills))
            }
            "fr" => Ok(Pattern::range(
                codepoint(start)?,
                codepoint(start + VARIANTS as u32 - 1)?,
            )),
            _ => Err(RangeError::InvalidDigit {
                value: symbol.to_string(),
            }),
        }
    }

    fn range_pattern(min: &str, max: &str) -> Result<Option<Pattern>, RangeError> {
        let lo = block_start(swu_symbol(min)?);
        let hi = block_start(swu_symbol(max)?) + VARIANTS as u32 - 1;
        Ok(range::codepoints(codepoint(lo)?, codepoint(hi)?))
    }

    fn coord_pattern(coord: Coord, variance: u32) -> Result<Pattern, RangeError> {
        let axis = |value: i32| {
            let (lo, hi) = window(value, variance, convert::NUM_MIN, convert::NUM_MAX);
            let invalid = || RangeError::InvalidDigit {
                value: value.to_string(),
            };
            let lo = convert::num_to_swu(lo).ok_or_else(invalid)?;
            let hi = convert::num_to_swu(hi).ok_or_else(invalid)?;
            range::codepoints(lo, hi).ok_or_else(invalid)
        };
        Ok(Pattern::Concat(vec![axis(coord.x)?, axis(coord.y)?]))
    }

    fn generalize(symbol: &str) -> String {
        if symbol == "\u{40000}" {
            return symbol.to_string();
        }
        format!("{symbol}fr")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("S10000", "S10000")]
    #[case("S100uu", "S100[0-5][0-9a-f]")]
    #[case("S1005u", "S1005[0-9a-f]")]
    #[case("S100u4", "S100[0-5]4")]
    #[case("S00000", "S00000")]
    fn fsw_symbol_wildcards(#[case] symbol: &str, #[case] expected: &str) {
        assert_eq!(Fsw::symbol_pattern(symbol).unwrap().render(), expected);
    }

    #[test]
    fn fsw_range_covers_every_fill_and_rotation() {
        assert_eq!(
            Fsw::range_pattern("100", "204").unwrap().unwrap().render(),
            "S(?:1[0-9a-f][0-9a-f]|20[0-4])[0-5][0-9a-f]"
        );
        assert!(Fsw::range_pattern("204", "100").is_err());
    }

    #[test]
    fn fsw_coordinate_window() {
        assert_eq!(
            Fsw::coord_pattern(Coord::new(500, 500), 20).unwrap().render(),
            "(?:4[8-9][0-9]|5(?:[0-1][0-9]|20))x(?:4[8-9][0-9]|5(?:[0-1][0-9]|20))"
        );
        assert_eq!(
            Fsw::coord_pattern(Coord::new(990, 10), 20).unwrap().render(),
            "9(?:7[0-9]|8[0-9]|9[0-9])x0(?:0[0-9]|[1-2][0-9]|30)"
        );
    }

    #[test]
    fn swu_symbol_suffixes() {
        // U+40012 is S10011: fill 1, rotation 1
        assert_eq!(Swu::symbol_pattern("\u{40012}").unwrap().render(), r"\x{40012}");
        assert_eq!(
            Swu::symbol_pattern("\u{40012}r").unwrap().render(),
            r"[\x{40011}-\x{40020}]"
        );
        assert_eq!(
            Swu::symbol_pattern("\u{40012}f").unwrap().render(),
            r"(?:\x{40002}|\x{40012}|\x{40022}|\x{40032}|\x{40042}|\x{40052})"
        );
        assert_eq!(
            Swu::symbol_pattern("\u{40012}fr").unwrap().render(),
            r"[\x{40001}-\x{40060}]"
        );
    }

    #[test]
    fn swu_range_spans_whole_base_blocks() {
        assert_eq!(
            Swu::range_pattern("\u{40012}", "\u{40070}").unwrap().unwrap().render(),
            r"[\x{40001}-\x{400C0}]"
        );
        assert_eq!(Swu::range_pattern("\u{40070}", "\u{40012}"), Ok(None));
    }

    #[test]
    fn swu_coordinate_window_is_clamped() {
        assert_eq!(
            Swu::coord_pattern(Coord::new(500, 260), 20).unwrap().render(),
            r"[\x{1D8F2}-\x{1D91A}][\x{1D80C}-\x{1D82A}]"
        );
    }

    #[test]
    fn items_split_into_symbols_and_ranges() {
        assert_eq!(
            Fsw::parse_item("R100t204"),
            Some(QueryItem::Range("100".into(), "204".into()))
        );
        assert_eq!(Fsw::parse_item("S100uu"), Some(QueryItem::Symbol("S100uu".into())));
        assert_eq!(
            Swu::parse_item("R\u{40001}\u{461E0}"),
            Some(QueryItem::Range("\u{40001}".into(), "\u{461E0}".into()))
        );
        assert_eq!(Fsw::generalize("S10011"), "S100uu");
        assert_eq!(Swu::generalize("\u{40012}"), "\u{40012}fr");
    }
}
