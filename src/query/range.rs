//! Range-to-regex compilation
//!
//! [`compile`] turns a closed interval of three-digit numbers, decimal or hex,
//! into a pattern matching exactly the digit strings inside it. The interval
//! is split on its leading digit:
//!
//! ```text
//! 480..=520   =>   4 [8-9][0-9]   |   5 (?:[0-1][0-9]|20)
//!                  a, rest >= 80      d, rest <= 20
//! ```
//!
//! with a full wildcard block for any leading digits strictly between the
//! two ends. When both ends share a leading digit, the same split is applied
//! to the two-digit remainder. Hex classes never straddle the gap between
//! `9` and `a`.
//!
//! SWU needs none of this: its numbers and symbols are dense codepoint runs,
//! so [`codepoints`] yields a single class. An inverted codepoint interval
//! is empty rather than an error.

use super::pattern::Pattern;
use crate::error::RangeError;

/// Digit alphabet of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

impl Radix {
    fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    fn last(self) -> u8 {
        (self.base() - 1) as u8
    }

    fn digit(self, value: u8) -> char {
        DIGITS[value as usize] as char
    }

    fn literal(self, value: u8) -> Pattern {
        Pattern::literal(self.digit(value))
    }

    /// Digits `lo..=hi` as one class, split at the `9`/`a` boundary.
    fn class(self, lo: u8, hi: u8) -> Pattern {
        if lo == hi {
            return self.literal(lo);
        }
        let mut ranges = Vec::with_capacity(2);
        if lo <= 9 {
            ranges.push((self.digit(lo), self.digit(hi.min(9))));
        }
        if hi >= 10 {
            ranges.push((self.digit(lo.max(10)), self.digit(hi)));
        }
        Pattern::Class(ranges)
    }

    fn any(self) -> Pattern {
        self.class(0, self.last())
    }

    /// Parse a bound of one to three digits.
    pub fn parse(self, text: &str) -> Result<u32, RangeError> {
        let invalid = || RangeError::InvalidDigit {
            value: text.to_string(),
        };
        if text.is_empty() || text.len() > 3 {
            return Err(invalid());
        }
        let valid = text.chars().all(|c| match self {
            Radix::Decimal => c.is_ascii_digit(),
            Radix::Hex => c.is_ascii_digit() || ('a'..='f').contains(&c),
        });
        if !valid {
            return Err(invalid());
        }
        u32::from_str_radix(text, self.base()).map_err(|_| invalid())
    }

    /// Three-digit spelling of a value.
    pub fn format(self, value: u32) -> String {
        match self {
            Radix::Decimal => format!("{value:03}"),
            Radix::Hex => format!("{value:03x}"),
        }
    }
}

/// Compile the closed interval `min..=max` of three-digit numbers.
pub fn compile(min: u32, max: u32, radix: Radix) -> Result<Pattern, RangeError> {
    let limit = radix.base().pow(3);
    for bound in [min, max] {
        if bound >= limit {
            return Err(RangeError::InvalidDigit {
                value: bound.to_string(),
            });
        }
    }
    if min > max {
        return Err(RangeError::Inverted {
            min: radix.format(min),
            max: radix.format(max),
        });
    }

    let [a, b, c] = digits(min, radix);
    let [d, e, f] = digits(max, radix);
    if a == d {
        return Ok(Pattern::Concat(vec![
            radix.literal(a),
            between(radix, (b, c), (e, f)),
        ]));
    }

    let mut parts = vec![Pattern::Concat(vec![radix.literal(a), at_least(radix, b, c)])];
    if a + 1 < d {
        parts.push(Pattern::Concat(vec![
            radix.class(a + 1, d - 1),
            radix.any(),
            radix.any(),
        ]));
    }
    parts.push(Pattern::Concat(vec![radix.literal(d), at_most(radix, e, f)]));
    Ok(Pattern::Alternation(parts))
}

fn digits(value: u32, radix: Radix) -> [u8; 3] {
    let base = radix.base();
    [
        (value / (base * base)) as u8,
        (value / base % base) as u8,
        (value % base) as u8,
    ]
}

/// Two-digit values `>= pq`.
fn at_least(radix: Radix, p: u8, q: u8) -> Pattern {
    if q == 0 {
        return Pattern::Concat(vec![radix.class(p, radix.last()), radix.any()]);
    }
    let exact = Pattern::Concat(vec![radix.literal(p), radix.class(q, radix.last())]);
    if p == radix.last() {
        return exact;
    }
    Pattern::Alternation(vec![
        exact,
        Pattern::Concat(vec![radix.class(p + 1, radix.last()), radix.any()]),
    ])
}

/// Two-digit values `<= rs`.
fn at_most(radix: Radix, r: u8, s: u8) -> Pattern {
    let exact = Pattern::Concat(vec![radix.literal(r), radix.class(0, s)]);
    if r == 0 {
        return exact;
    }
    Pattern::Alternation(vec![
        Pattern::Concat(vec![radix.class(0, r - 1), radix.any()]),
        exact,
    ])
}

/// Two-digit values between `low` and `high`, inclusive.
fn between(radix: Radix, low: (u8, u8), high: (u8, u8)) -> Pattern {
    let ((s1, s2), (t1, t2)) = (low, high);
    if s1 == t1 {
        return Pattern::Concat(vec![radix.literal(s1), radix.class(s2, t2)]);
    }
    let mut parts = vec![Pattern::Concat(vec![
        radix.literal(s1),
        radix.class(s2, radix.last()),
    ])];
    if s1 + 1 < t1 {
        parts.push(Pattern::Concat(vec![radix.class(s1 + 1, t1 - 1), radix.any()]));
    }
    parts.push(Pattern::Concat(vec![radix.literal(t1), radix.class(0, t2)]));
    Pattern::Alternation(parts)
}

/// Codepoints `min..=max` as one class, or nothing when `min` is past `max`.
pub fn codepoints(min: char, max: char) -> Option<Pattern> {
    (min <= max).then(|| Pattern::range(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;
    use rstest::rstest;

    fn decimal(min: u32, max: u32) -> String {
        compile(min, max, Radix::Decimal).unwrap().render()
    }

    fn hex(min: &str, max: &str) -> String {
        let min = Radix::Hex.parse(min).unwrap();
        let max = Radix::Hex.parse(max).unwrap();
        compile(min, max, Radix::Hex).unwrap().render()
    }

    #[rstest]
    #[case(480, 520, "(?:4[8-9][0-9]|5(?:[0-1][0-9]|20))")]
    #[case(460, 500, "(?:4[6-9][0-9]|500)")]
    #[case(520, 540, "5(?:2[0-9]|3[0-9]|40)")]
    #[case(500, 750, "(?:5[0-9][0-9]|6[0-9][0-9]|7(?:[0-4][0-9]|50))")]
    #[case(500, 500, "500")]
    #[case(123, 129, "12[3-9]")]
    #[case(100, 999, "(?:1[0-9][0-9]|[2-8][0-9][0-9]|9(?:[0-8][0-9]|9[0-9]))")]
    fn decimal_ranges(#[case] min: u32, #[case] max: u32, #[case] expected: &str) {
        assert_eq!(decimal(min, max), expected);
    }

    #[rstest]
    #[case("100", "10e", "10[0-9a-e]")]
    #[case("100", "204", "(?:1[0-9a-f][0-9a-f]|20[0-4])")]
    #[case("105", "105", "105")]
    #[case("1f9", "20b", "(?:1f[9a-f]|20[0-9a-b])")]
    #[case("2ff", "304", "(?:2ff|30[0-4])")]
    fn hex_ranges(#[case] min: &str, #[case] max: &str, #[case] expected: &str) {
        assert_eq!(hex(min, max), expected);
    }

    #[test]
    fn equal_bounds_have_no_alternation() {
        for value in [100, 250, 509, 999] {
            let pattern = decimal(value, value);
            assert!(!pattern.contains('|'));
            assert_eq!(pattern, format!("{value:03}"));
        }
    }

    #[test]
    fn inverted_interval_is_an_error() {
        assert_eq!(
            compile(520, 480, Radix::Decimal),
            Err(RangeError::Inverted {
                min: "520".into(),
                max: "480".into()
            })
        );
        assert!(matches!(
            compile(0x205, 0x204, Radix::Hex),
            Err(RangeError::Inverted { .. })
        ));
    }

    #[test]
    fn bounds_must_fit_three_digits() {
        assert!(matches!(
            compile(0, 1000, Radix::Decimal),
            Err(RangeError::InvalidDigit { .. })
        ));
        assert!(Radix::Hex.parse("10g").is_err());
        assert!(Radix::Decimal.parse("1a").is_err());
        assert!(Radix::Decimal.parse("").is_err());
        assert_eq!(Radix::Decimal.parse("7"), Ok(7));
    }

    #[test]
    fn codepoint_ranges() {
        let pattern = codepoints('\u{40001}', '\u{401E0}').unwrap();
        assert_eq!(pattern.render(), r"[\x{40001}-\x{401E0}]");
        assert_eq!(codepoints('\u{401E0}', '\u{40001}'), None);
    }

    proptest! {
        #[test]
        fn decimal_pattern_matches_exactly_the_interval(
            a in 0u32..1000,
            b in 0u32..1000,
            probe in 0u32..1000,
        ) {
            let (min, max) = (a.min(b), a.max(b));
            let regex = Regex::new(&format!("^(?:{})$", decimal(min, max))).unwrap();
            prop_assert_eq!(regex.is_match(&format!("{probe:03}")), (min..=max).contains(&probe));
            let (min_text, max_text) = (format!("{min:03}"), format!("{max:03}"));
            prop_assert!(regex.is_match(&min_text));
            prop_assert!(regex.is_match(&max_text));
        }

        #[test]
        fn hex_pattern_matches_exactly_the_interval(
            a in 0u32..0x1000,
            b in 0u32..0x1000,
            probe in 0u32..0x1000,
        ) {
            let (min, max) = (a.min(b), a.max(b));
            let pattern = compile(min, max, Radix::Hex).unwrap().render();
            let regex = Regex::new(&format!("^(?:{pattern})$")).unwrap();
            prop_assert_eq!(regex.is_match(&format!("{probe:03x}")), (min..=max).contains(&probe));
        }
    }
}
