//! Signs, symbols and their parse/compose operations
//!
//! Parsing is forgiving: text that does not start with a well-formed symbol or
//! sign yields `None`, and a trailing style string is carried along opaquely.
//! Composing is strict about the pieces a string cannot exist without (the
//! symbol of a symbol, the box and max of a sign) and skips optional pieces
//! that do not fit the grammar.
//!
//! Symbols are kept in the spelling they were written in: `"S10000"` for FSW,
//! `"\u{40001}"` for SWU. Both operations are generic over [`Notation`];
//! the [`fsw`](crate::fsw) and [`swu`](crate::swu) modules expose them
//! per spelling.

use crate::error::ComposeError;
use crate::grammar::style;
use crate::notation::Notation;
use crate::symbol::{self, SymbolRange};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in signbox space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// A symbol with an optional position and style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolObject {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// A symbol placed in the signbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spatial {
    pub symbol: String,
    pub coord: Coord,
}

/// The parts of a sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignObject {
    /// Temporal prefix, if the sign is sortable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<String>>,
    /// Box or lane marker.
    #[serde(rename = "box")]
    pub marker: String,
    pub max: Coord,
    pub spatials: Vec<Spatial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

pub fn parse_symbol<N: Notation>(text: &str) -> Option<SymbolObject> {
    let caps = N::patterns().symbol_object.captures(text)?;
    Some(SymbolObject {
        symbol: caps[1].to_string(),
        coord: caps.get(2).and_then(|m| N::parse_coord(m.as_str())),
        style: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

pub fn parse_sign<N: Notation>(text: &str) -> Option<SignObject> {
    let patterns = N::patterns();
    let caps = patterns.sign.captures(text)?;
    let sequence = caps.get(1).map(|prefix| {
        patterns
            .prefix_key
            .find_iter(prefix.as_str())
            .map(|key| key.as_str().to_string())
            .collect()
    });

    // The signbox is the marker, the max coordinate, then spatials. The max
    // is the first coordinate-shaped run after the one-character marker.
    let signbox = caps.get(2)?.as_str();
    let marker_len = signbox.chars().next()?.len_utf8();
    let (marker, rest) = signbox.split_at(marker_len);
    let first_spatial = patterns
        .spatial
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());
    let max = N::parse_coord(&rest[..first_spatial])?;
    let spatials = patterns
        .spatial
        .captures_iter(&rest[first_spatial..])
        .filter_map(|spatial| {
            Some(Spatial {
                symbol: spatial[1].to_string(),
                coord: N::parse_coord(&spatial[2])?,
            })
        })
        .collect();

    Some(SignObject {
        sequence,
        marker: marker.to_string(),
        max,
        spatials,
        style: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Split a text into its signs and stand-alone spatial symbols (punctuation).
pub fn parse_text<N: Notation>(text: &str) -> Vec<String> {
    N::patterns()
        .text
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^(?:{})$", *style::FULL)).unwrap());

/// The style string if it is well formed, otherwise nothing.
fn compose_style(style: Option<&str>) -> &str {
    style.filter(|style| STYLE.is_match(style)).unwrap_or_default()
}

pub fn compose_symbol<N: Notation>(object: &SymbolObject) -> Result<String, ComposeError> {
    if !N::patterns().symbol.is_match(&object.symbol) {
        return Err(ComposeError::InvalidSymbol(object.symbol.clone()));
    }
    let mut out = object.symbol.clone();
    if let Some(coord) = object.coord {
        let coord = N::format_coord(coord).ok_or(ComposeError::InvalidCoord {
            x: coord.x,
            y: coord.y,
        })?;
        out.push_str(&coord);
    }
    out.push_str(compose_style(object.style.as_deref()));
    Ok(out)
}

/// Compose a sign. Prefix keys and spatials that do not fit the grammar are
/// left out; a bad marker or max coordinate is an error.
pub fn compose_sign<N: Notation>(object: &SignObject) -> Result<String, ComposeError> {
    let patterns = N::patterns();
    if !patterns.marker.is_match(&object.marker) {
        let marker = object.marker.chars().next().unwrap_or(' ');
        return Err(ComposeError::InvalidBox(marker));
    }
    let max = N::format_coord(object.max).ok_or(ComposeError::InvalidCoord {
        x: object.max.x,
        y: object.max.y,
    })?;

    let mut out = String::new();
    let keys: Vec<&str> = object
        .sequence
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|key| patterns.key.is_match(key))
        .collect();
    if !keys.is_empty() {
        out.push_str(N::SORT);
        out.extend(keys);
    }

    out.push_str(&object.marker);
    out.push_str(&max);
    for spatial in &object.spatials {
        if !patterns.symbol.is_match(&spatial.symbol) {
            continue;
        }
        if let Some(coord) = N::format_coord(spatial.coord) {
            out.push_str(&spatial.symbol);
            out.push_str(&coord);
        }
    }
    out.push_str(compose_style(object.style.as_deref()));
    Ok(out)
}

/// Whether a symbol belongs to a named range. Unknown names and malformed
/// symbols are never of any type.
pub fn is_type<N: Notation>(symbol: &str, range: &str) -> bool {
    match (N::parse_key(symbol), SymbolRange::from_name(range)) {
        (Some(key), Some(range)) => range.contains(key),
        _ => false,
    }
}

/// Standard colour of a symbol's category; black for anything that is not a symbol.
pub fn colorize<N: Notation>(symbol: &str) -> &'static str {
    match parse_symbol::<N>(symbol).and_then(|object| N::parse_key(&object.symbol)) {
        Some(key) => symbol::colorize(key),
        None => "#000000",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{Fsw, Swu};

    #[test]
    fn sign_parse_then_compose_is_identity() {
        let text = "AS10011S10019S2e704S2e748M525x535S2e748483x510S10011501x466S2e704510x500S10019476x475-C";
        let sign = parse_sign::<Fsw>(text).unwrap();
        assert_eq!(sign.spatials.len(), 4);
        assert_eq!(sign.style.as_deref(), Some("-C"));
        assert_eq!(compose_sign::<Fsw>(&sign).unwrap(), text);
    }

    #[test]
    fn compose_sign_skips_malformed_optional_parts() {
        let sign = SignObject {
            sequence: Some(vec!["S10011".into(), "bogus".into()]),
            marker: "M".into(),
            max: Coord::new(525, 535),
            spatials: vec![
                Spatial { symbol: "S10011".into(), coord: Coord::new(501, 466) },
                Spatial { symbol: "S10011".into(), coord: Coord::new(1501, 466) },
                Spatial { symbol: "S00000".into(), coord: Coord::new(501, 466) },
            ],
            style: Some("not a style".into()),
        };
        assert_eq!(compose_sign::<Fsw>(&sign).unwrap(), "AS10011M525x535S10011501x466");
    }

    #[test]
    fn compose_sign_requires_marker_and_max() {
        let mut sign = parse_sign::<Fsw>("M525x535").unwrap();
        sign.marker = "Q".into();
        assert_eq!(compose_sign::<Fsw>(&sign), Err(ComposeError::InvalidBox('Q')));
        sign.marker = "M".into();
        sign.max = Coord::new(200, 500);
        assert_eq!(compose_sign::<Swu>(&sign), Err(ComposeError::InvalidBox('M')));
        sign.marker = "\u{1D803}".into();
        assert_eq!(
            compose_sign::<Swu>(&sign),
            Err(ComposeError::InvalidCoord { x: 200, y: 500 })
        );
    }

    #[test]
    fn sign_object_serializes_box_under_its_notation_name() {
        let sign = parse_sign::<Fsw>("M525x535S2e748483x510").unwrap();
        let json = serde_json::to_value(&sign).unwrap();
        assert_eq!(json["box"], "M");
        assert_eq!(json["max"]["x"], 525);
        assert!(json.get("sequence").is_none());
    }
}
