//! Symbol keys and the symbol structure
//!
//! A symbol is identified by a base (its category position, `0x100..=0x38b`),
//! a fill (`0..=5`) and a rotation (`0..=15`). The same symbol is written
//! `S10000` in FSW and as U+40001 in SWU. Both spellings map to one dense ID:
//!
//! ```text
//! id = 1 + (base - 0x100) * 96 + fill * 16 + rotation
//! ```
//!
//! with ID 0 reserved for the null symbol (`S00000`, U+40000).
//!
//! The symbol set is divided into kinds, categories and groups. Named ranges
//! ([`SymbolRange`]) answer "is this a hand shape?" style questions.

use serde::Serialize;
use std::fmt;

pub const BASE_MIN: u16 = 0x100;
pub const BASE_MAX: u16 = 0x38b;
pub const FILLS: u8 = 6;
pub const ROTATIONS: u8 = 16;
/// Number of fill/rotation variants of one base symbol.
pub const VARIANTS: u16 = FILLS as u16 * ROTATIONS as u16;
/// Highest dense ID (`S38b5f`).
pub const ID_MAX: u32 = (BASE_MAX - BASE_MIN + 1) as u32 * VARIANTS as u32;
/// Codepoint of the null symbol; symbol `id` lives at `SWU_NULL + id`.
pub const SWU_NULL: u32 = 0x40000;

/// A symbol identity, stored as its dense ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SymbolKey(u32);

impl SymbolKey {
    pub const NULL: SymbolKey = SymbolKey(0);

    pub fn from_parts(base: u16, fill: u8, rotation: u8) -> Option<Self> {
        if !(BASE_MIN..=BASE_MAX).contains(&base) || fill >= FILLS || rotation >= ROTATIONS {
            return None;
        }
        let id = 1
            + (base - BASE_MIN) as u32 * VARIANTS as u32
            + fill as u32 * ROTATIONS as u32
            + rotation as u32;
        Some(Self(id))
    }

    pub fn from_id(id: u32) -> Option<Self> {
        (id <= ID_MAX).then_some(Self(id))
    }

    /// Parse an FSW key such as `S2e748` (or the null key `S00000`).
    pub fn from_fsw(key: &str) -> Option<Self> {
        if key == "S00000" {
            return Some(Self::NULL);
        }
        let bytes = key.as_bytes();
        if bytes.len() != 6 || bytes[0] != b'S' || !key.is_ascii() {
            return None;
        }
        let hex = |range: std::ops::Range<usize>| -> Option<u32> {
            let digits = &key[range];
            if digits.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
                u32::from_str_radix(digits, 16).ok()
            } else {
                None
            }
        };
        let base = hex(1..4)?;
        let fill = hex(4..5)?;
        let rotation = hex(5..6)?;
        Self::from_parts(u16::try_from(base).ok()?, fill as u8, rotation as u8)
    }

    pub fn from_swu(symbol: char) -> Option<Self> {
        (symbol as u32)
            .checked_sub(SWU_NULL)
            .and_then(Self::from_id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Base, fill and rotation; `None` for the null symbol.
    pub fn parts(self) -> Option<(u16, u8, u8)> {
        if self.is_null() {
            return None;
        }
        let code = self.0 - 1;
        let base = code / VARIANTS as u32;
        let fill = (code - base * VARIANTS as u32) / ROTATIONS as u32;
        let rotation = code - base * VARIANTS as u32 - fill * ROTATIONS as u32;
        Some((base as u16 + BASE_MIN, fill as u8, rotation as u8))
    }

    pub fn base(self) -> Option<u16> {
        self.parts().map(|(base, _, _)| base)
    }

    pub fn to_fsw(self) -> String {
        match self.parts() {
            Some((base, fill, rotation)) => format!("S{base:x}{fill:x}{rotation:x}"),
            None => "S00000".to_string(),
        }
    }

    pub fn to_swu(self) -> char {
        // ids are bounded by ID_MAX, so every key lands inside plane 4
        char::from_u32(SWU_NULL + self.0).unwrap_or('\u{40000}')
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fsw())
    }
}

/// Symbol kinds: writing, location, punctuation.
pub const KINDS: [u16; 3] = [0x100, 0x37f, 0x387];

/// Symbol categories: hand, movement, dynamics, head, trunk & limb, location, punctuation.
pub const CATEGORIES: [u16; 7] = [0x100, 0x205, 0x2f7, 0x2ff, 0x36d, 0x37f, 0x387];

/// First base of each of the 30 symbol groups.
pub const GROUPS: [u16; 30] = [
    0x100, 0x10e, 0x11e, 0x144, 0x14c, 0x186, 0x1a4, 0x1ba, 0x1cd, 0x1f5, 0x205, 0x216, 0x22a,
    0x255, 0x265, 0x288, 0x2a6, 0x2b7, 0x2d5, 0x2e3, 0x2f7, 0x2ff, 0x30a, 0x32a, 0x33b, 0x359,
    0x36d, 0x376, 0x37f, 0x387,
];

/// Standard colours per category, in [`CATEGORIES`] order.
pub const COLORS: [&str; 7] = [
    "#0000CC", "#CC0000", "#FF0099", "#006600", "#000000", "#884411", "#FF9900",
];

/// Named ranges of symbol bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolRange {
    /// Every symbol.
    All,
    /// Symbols usable in the signbox or the temporal prefix.
    Writing,
    Hand,
    /// Contact symbols, finger movements, arrows and circles.
    Movement,
    Dynamic,
    Head,
    /// Used to find the horizontal centre of a sign (same as head).
    HCenter,
    /// Used to find the vertical centre of a sign (head and trunk).
    VCenter,
    Trunk,
    Limb,
    /// Detailed locations, only used in the temporal prefix.
    Location,
    Punctuation,
}

impl SymbolRange {
    pub const ALL: [SymbolRange; 12] = [
        SymbolRange::All,
        SymbolRange::Writing,
        SymbolRange::Hand,
        SymbolRange::Movement,
        SymbolRange::Dynamic,
        SymbolRange::Head,
        SymbolRange::HCenter,
        SymbolRange::VCenter,
        SymbolRange::Trunk,
        SymbolRange::Limb,
        SymbolRange::Location,
        SymbolRange::Punctuation,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            SymbolRange::All => "all",
            SymbolRange::Writing => "writing",
            SymbolRange::Hand => "hand",
            SymbolRange::Movement => "movement",
            SymbolRange::Dynamic => "dynamic",
            SymbolRange::Head => "head",
            SymbolRange::HCenter => "hcenter",
            SymbolRange::VCenter => "vcenter",
            SymbolRange::Trunk => "trunk",
            SymbolRange::Limb => "limb",
            SymbolRange::Location => "location",
            SymbolRange::Punctuation => "punctuation",
        }
    }

    /// Inclusive bounds of the range, as symbol bases.
    pub fn bases(self) -> (u16, u16) {
        match self {
            SymbolRange::All => (0x100, 0x38b),
            SymbolRange::Writing => (0x100, 0x37e),
            SymbolRange::Hand => (0x100, 0x204),
            SymbolRange::Movement => (0x205, 0x2f6),
            SymbolRange::Dynamic => (0x2f7, 0x2fe),
            SymbolRange::Head | SymbolRange::HCenter => (0x2ff, 0x36c),
            SymbolRange::VCenter => (0x2ff, 0x375),
            SymbolRange::Trunk => (0x36d, 0x375),
            SymbolRange::Limb => (0x376, 0x37e),
            SymbolRange::Location => (0x37f, 0x386),
            SymbolRange::Punctuation => (0x387, 0x38b),
        }
    }

    /// Inclusive bounds of the range as SWU codepoints, covering every
    /// fill and rotation of the last base.
    pub fn codepoints(self) -> (u32, u32) {
        let (start, end) = self.bases();
        let first = SWU_NULL + 1 + (start - BASE_MIN) as u32 * VARIANTS as u32;
        let last = SWU_NULL + (end - BASE_MIN + 1) as u32 * VARIANTS as u32;
        (first, last)
    }

    pub fn contains(self, key: SymbolKey) -> bool {
        let (start, end) = self.bases();
        key.base().is_some_and(|base| (start..=end).contains(&base))
    }
}

impl fmt::Display for SymbolRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Standard colour of the category a symbol belongs to. The null symbol is black.
pub fn colorize(key: SymbolKey) -> &'static str {
    let Some(base) = key.base() else {
        return "#000000";
    };
    match CATEGORIES.iter().position(|&start| start > base) {
        Some(index) => COLORS[index - 1],
        None => COLORS[COLORS.len() - 1],
    }
}
