//! Conversion between FSW and SWU
//!
//! Every token of the notation has an ASCII spelling (FSW) and a codepoint
//! spelling (SWU). The mappings are affine:
//!
//! | token   | FSW        | SWU                          |
//! |---------|------------|------------------------------|
//! | marker  | `A B L M R`| U+1D800 .. U+1D804           |
//! | number  | `250..749` | U+1D80C + (n - 250)          |
//! | symbol  | `S10000`   | U+40000 + id (see [`SymbolKey`]) |
//!
//! Value conversions return `Option` and yield `None` for malformed fragments.
//! Text conversions rewrite every well-formed token they find and leave
//! everything else untouched.

use crate::grammar::{fsw, swu};
use crate::sign::Coord;
use crate::symbol::SymbolKey;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const MARKS: [(char, char); 5] = [
    ('A', '\u{1D800}'),
    ('B', '\u{1D801}'),
    ('L', '\u{1D802}'),
    ('M', '\u{1D803}'),
    ('R', '\u{1D804}'),
];

/// Smallest coordinate value representable in SWU.
pub const NUM_MIN: i32 = 250;
/// Largest coordinate value representable in SWU.
pub const NUM_MAX: i32 = 749;
const NUM_ZERO: u32 = 0x1D80C;

pub fn mark_to_swu(mark: char) -> Option<char> {
    MARKS.iter().find(|(fsw, _)| *fsw == mark).map(|(_, swu)| *swu)
}

pub fn swu_to_mark(mark: char) -> Option<char> {
    MARKS.iter().find(|(_, swu)| *swu == mark).map(|(fsw, _)| *fsw)
}

pub fn num_to_swu(num: i32) -> Option<char> {
    if !(NUM_MIN..=NUM_MAX).contains(&num) {
        return None;
    }
    char::from_u32(NUM_ZERO + (num - NUM_MIN) as u32)
}

pub fn swu_to_num(num: char) -> Option<i32> {
    let offset = (num as u32).checked_sub(NUM_ZERO)?;
    let value = NUM_MIN + offset as i32;
    (value <= NUM_MAX).then_some(value)
}

pub fn coord_to_swu(coord: Coord) -> Option<String> {
    Some([num_to_swu(coord.x)?, num_to_swu(coord.y)?].iter().collect())
}

/// Decode exactly two number characters.
pub fn swu_to_coord(text: &str) -> Option<Coord> {
    let mut chars = text.chars();
    let (x, y) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    Some(Coord::new(swu_to_num(x)?, swu_to_num(y)?))
}

/// Parse `"500x500"`.
pub fn fsw_to_coord(text: &str) -> Option<Coord> {
    let (x, y) = text.split_once('x')?;
    let axis = |part: &str| -> Option<i32> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    Some(Coord::new(axis(x)?, axis(y)?))
}

/// Write `"500x500"`, each axis padded to three digits.
pub fn coord_to_fsw(coord: Coord) -> String {
    format!("{:03}x{:03}", coord.x, coord.y)
}

pub fn swu_to_code(symbol: char) -> u32 {
    symbol as u32
}

pub fn code_to_swu(code: u32) -> Option<char> {
    char::from_u32(code)
}

/// Dense ID of an SWU symbol character, `None` outside the symbol block.
pub fn swu_to_id(symbol: char) -> Option<u32> {
    SymbolKey::from_swu(symbol).map(SymbolKey::id)
}

pub fn id_to_swu(id: u32) -> Option<char> {
    SymbolKey::from_id(id).map(SymbolKey::to_swu)
}

pub fn key_to_id(key: &str) -> Option<u32> {
    SymbolKey::from_fsw(key).map(SymbolKey::id)
}

pub fn id_to_key(id: u32) -> Option<String> {
    SymbolKey::from_id(id).map(SymbolKey::to_fsw)
}

pub fn key_to_swu(key: &str) -> Option<char> {
    SymbolKey::from_fsw(key).map(SymbolKey::to_swu)
}

pub fn swu_to_key(symbol: char) -> Option<String> {
    SymbolKey::from_swu(symbol).map(SymbolKey::to_fsw)
}

static FSW_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(&fsw::PREFIX).unwrap());
static FSW_BOX_COORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("({})({})", fsw::BOX, *fsw::COORD)).unwrap()
});
static FSW_SPATIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("({})({})", fsw::SYMBOL, *fsw::COORD)).unwrap()
});
static FSW_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(&fsw::NULL_OR_SYMBOL).unwrap());

static SWU_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{1D800}-\x{1D804}]").unwrap());
static SWU_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(&swu::NULL_OR_SYMBOL).unwrap());
static SWU_COORD: Lazy<Regex> = Lazy::new(|| Regex::new(&swu::COORD).unwrap());

/// Convert FSW text to SWU.
///
/// Prefixes are rewritten first, then box markers with their max coordinate,
/// then spatial symbols. Coordinates outside `250..=749` have no SWU form and
/// are left as they are.
pub fn fsw_to_swu(text: &str) -> String {
    let text = FSW_PREFIX.replace_all(text, |caps: &Captures| {
        let mut out = String::from('\u{1D800}');
        out.extend(
            FSW_KEY
                .find_iter(&caps[0])
                .filter_map(|key| key_to_swu(key.as_str())),
        );
        out
    });
    let text = FSW_BOX_COORD.replace_all(&text, |caps: &Captures| {
        let converted = mark_to_swu(caps[1].chars().next().unwrap_or_default())
            .zip(fsw_to_coord(&caps[2]).and_then(coord_to_swu));
        match converted {
            Some((mark, coord)) => format!("{mark}{coord}"),
            None => caps[0].to_string(),
        }
    });
    let text = FSW_SPATIAL.replace_all(&text, |caps: &Captures| {
        let converted =
            key_to_swu(&caps[1]).zip(fsw_to_coord(&caps[2]).and_then(coord_to_swu));
        match converted {
            Some((symbol, coord)) => format!("{symbol}{coord}"),
            None => caps[0].to_string(),
        }
    });
    text.into_owned()
}

/// Convert SWU text to FSW.
///
/// Markers are rewritten first, then symbols, then pairs of number characters.
pub fn swu_to_fsw(text: &str) -> String {
    let text = SWU_MARK.replace_all(text, |caps: &Captures| {
        let mark = caps[0].chars().next().and_then(swu_to_mark);
        mark.map(String::from).unwrap_or_else(|| caps[0].to_string())
    });
    let text = SWU_KEY.replace_all(&text, |caps: &Captures| {
        let key = caps[0].chars().next().and_then(swu_to_key);
        key.unwrap_or_else(|| caps[0].to_string())
    });
    let text = SWU_COORD.replace_all(&text, |caps: &Captures| {
        swu_to_coord(&caps[0])
            .map(coord_to_fsw)
            .unwrap_or_else(|| caps[0].to_string())
    });
    text.into_owned()
}
