//! Formal SignWriting in ASCII
//!
//! Entry points for FSW text (`AS10011S10019M525x535S10011501x466`) and FSW
//! queries (`QAS10011TS100uu500x500V5`). Everything here is the
//! notation-generic code of [`crate::sign`] and [`crate::query`] fixed to
//! [`Fsw`].

use crate::error::{ComposeError, QueryResult, RangeError};
use crate::notation::Fsw;
use crate::query::range::{self, Radix};
use crate::query::{self, QueryFlags, QueryObject, QueryParse, SearchMode};
use crate::sign::{self, SignObject, SymbolObject};

pub fn parse_symbol(text: &str) -> Option<SymbolObject> {
    sign::parse_symbol::<Fsw>(text)
}

pub fn parse_sign(text: &str) -> Option<SignObject> {
    sign::parse_sign::<Fsw>(text)
}

pub fn parse_text(text: &str) -> Vec<String> {
    sign::parse_text::<Fsw>(text)
}

pub fn compose_symbol(object: &SymbolObject) -> Result<String, ComposeError> {
    sign::compose_symbol::<Fsw>(object)
}

pub fn compose_sign(object: &SignObject) -> Result<String, ComposeError> {
    sign::compose_sign::<Fsw>(object)
}

/// Whether `symbol` (e.g. `S10000`) lies in the named range (`hand`, `head`, ...).
pub fn is_type(symbol: &str, range: &str) -> bool {
    sign::is_type::<Fsw>(symbol, range)
}

pub fn colorize(symbol: &str) -> &'static str {
    sign::colorize::<Fsw>(symbol)
}

pub fn query_parse(text: &str) -> QueryParse {
    query::parse::<Fsw>(text)
}

pub fn query_compose(query: &QueryObject) -> Result<String, ComposeError> {
    query::compose::<Fsw>(query)
}

/// Regex for the interval `min..=max` of three-digit numbers, decimal or hex.
///
/// `query_range("500", "750", false)` is `(?:5[0-9][0-9]|6[0-9][0-9]|7(?:[0-4][0-9]|50))`.
pub fn query_range(min: &str, max: &str, hex: bool) -> Result<String, RangeError> {
    let radix = if hex { Radix::Hex } else { Radix::Decimal };
    let pattern = range::compile(radix.parse(min)?, radix.parse(max)?, radix)?;
    Ok(pattern.render())
}

pub fn query_regex(text: &str) -> QueryResult<Vec<String>> {
    query::regex::<Fsw>(text)
}

/// Signs in `text` matching the query.
pub fn query_results(query: &str, text: &str) -> QueryResult<Vec<String>> {
    query::search::<Fsw>(query, text, SearchMode::Signs)
}

/// Lines of `text` starting with a sign matching the query.
pub fn query_lines(query: &str, text: &str) -> QueryResult<Vec<String>> {
    query::search::<Fsw>(query, text, SearchMode::Lines)
}

/// Query for signs like `sign`; `flags` is a combination of `A`, `a`, `S`, `s` and `L`.
pub fn to_query(sign: &str, flags: &str) -> Option<String> {
    query::from_sign::<Fsw>(sign, QueryFlags::from_letters(flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::Coord;
    use rstest::rstest;

    const TEXT: &str = include_str!("../tests/fixtures/text.fsw");
    const LINES: &str = include_str!("../tests/fixtures/lines.fsw");

    const SIGN_1EB20_A: &str = "AS1eb20S15a37S26507S26507S15a10S15a18S22b04S22b14M530x550S15a37470x456S15a10515x523S15a18481x523S1eb20490x468S22b14479x488S26507504x450S22b04514x489S26507516x460";
    const SIGN_1EB20_B: &str = "AS1eb20S15a06S29b0bM516x531S15a06484x468S1eb20492x483S29b0b484x496";
    const SIGN_20350: &str = "AS20350S20358S22f04S22f14S30114M528x565S20350508x530S20358477x530S22f04503x551S22f14471x551S30114482x477";

    #[test]
    fn results_by_prefix_symbol() {
        assert_eq!(
            query_results("QAS1eb20T", TEXT).unwrap(),
            vec![SIGN_1EB20_A, SIGN_1EB20_B]
        );
    }

    #[test]
    fn results_by_prefix_and_located_signbox_symbols() {
        assert_eq!(
            query_results("QAS20350S203uuTS22f04S301uu480x480", TEXT).unwrap(),
            vec![SIGN_20350]
        );
    }

    #[test]
    fn lines_keep_their_trailing_text() {
        assert_eq!(
            query_lines("QAS1eb20T", LINES).unwrap(),
            vec![
                format!("{SIGN_1EB20_A} this line here"),
                format!("{SIGN_1EB20_B} this line here"),
            ]
        );
        assert_eq!(
            query_lines("QAS20350S203uuTS22f04S301uu480x480", LINES).unwrap(),
            vec![format!("{SIGN_20350} this line here")]
        );
    }

    #[test]
    fn results_are_unique_and_ordered() {
        let results = query_results("QAS10011T", TEXT).unwrap();
        assert_eq!(
            results,
            vec![
                "AS10011S10019S2e704S2e748M525x535S2e748483x510S10011501x466S2e704510x500S10019476x475",
                "AS10011S28108S30a00M540x519S30a00482x482S10011519x489S28108519x461",
                "AS10011S10019S2eb04S2eb48M523x536S2eb48485x504S10011502x463S2eb04507x497S10019477x472",
            ]
        );
    }

    #[test]
    fn no_match_and_not_a_query_give_nothing() {
        assert!(query_results("QAS3ff00T", TEXT).unwrap().is_empty());
        assert!(query_results("not a query", TEXT).unwrap().is_empty());
        assert!(query_results("Q", "").unwrap().is_empty());
    }

    #[test]
    fn empty_query_finds_every_sign() {
        let text = "AS10011M525x535S10011501x466 S38800464x496 M508x515S10020493x485";
        let signs = query_results("Q", text).unwrap();
        assert_eq!(
            signs,
            vec!["AS10011M525x535S10011501x466", "M508x515S10020493x485"]
        );
    }

    #[rstest]
    #[case("500", "750", false, "(?:5[0-9][0-9]|6[0-9][0-9]|7(?:[0-4][0-9]|50))")]
    #[case("100", "10e", true, "10[0-9a-e]")]
    #[case("7", "9", false, "00[7-9]")]
    fn ranges(#[case] min: &str, #[case] max: &str, #[case] hex: bool, #[case] expected: &str) {
        assert_eq!(query_range(min, max, hex).unwrap(), expected);
    }

    #[test]
    fn inverted_range_is_an_error() {
        assert!(matches!(
            query_range("750", "500", false),
            Err(RangeError::Inverted { .. })
        ));
        assert!(query_range("1x0", "200", true).is_err());
    }

    #[test]
    fn symbols_and_types() {
        let symbol = parse_symbol("S10000500x500-C").unwrap();
        assert_eq!(symbol.coord, Some(Coord::new(500, 500)));
        assert_eq!(compose_symbol(&symbol).unwrap(), "S10000500x500-C");
        assert!(is_type("S10000", "hand"));
        assert!(!is_type("S10000", "head"));
        assert_eq!(colorize("S10000"), "#0000CC");
    }

    #[test]
    fn text_splits_into_signs_and_punctuation() {
        assert_eq!(
            parse_text("AS10011M525x535S10011501x466 S38800464x496"),
            vec!["AS10011M525x535S10011501x466", "S38800464x496"]
        );
    }

    #[test]
    fn sign_to_query_round_trip() {
        let query = to_query(SIGN_1EB20_B, "a").unwrap();
        assert_eq!(query, "QAS1ebuuS15auuS29buuT");
        assert_eq!(query_results(&query, TEXT).unwrap(), vec![SIGN_1EB20_B]);
    }

    #[test]
    fn coordinates_below_one_hundred_keep_their_padding() {
        let query = query_parse("QS10000050x050").into_query().unwrap();
        assert_eq!(
            query.signbox_elements()[0].coord,
            Some(Coord::new(50, 50))
        );
        assert_eq!(query_compose(&query).unwrap(), "QS10000050x050");

        let sign = "M518x518S10000050x050";
        assert_eq!(compose_sign(&parse_sign(sign).unwrap()).unwrap(), sign);
        assert_eq!(to_query(sign, "SL").unwrap(), "QS10000050x050");
        assert_eq!(query_results("QS10000050x050", sign).unwrap(), vec![sign]);
    }

    #[test]
    fn oversized_variance_saturates() {
        let query = query_parse("QV99999999999").into_query().unwrap();
        assert_eq!(query.variance, Some(u32::MAX));
        assert_eq!(query_regex("QS10000500x500V99999999999").unwrap().len(), 1);
    }
}
