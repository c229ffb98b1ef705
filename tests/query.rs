use proptest::prelude::*;
use rstest::rstest;
use signwriting::query::{self, QueryParse, SearchMode};
use signwriting::{convert, fsw, swu, Fsw, Swu};

const TEXT: &str = include_str!("fixtures/text.fsw");

fn query_symbol() -> impl Strategy<Value = String> {
    (
        0x100u16..=0x38b,
        prop::sample::select(vec!['0', '3', '5', 'u']),
        prop::sample::select(vec!['0', '7', 'f', 'u']),
    )
        .prop_map(|(base, fill, rotation)| format!("S{base:03x}{fill}{rotation}"))
}

fn query_range() -> impl Strategy<Value = String> {
    (0x100u16..=0x38b, 0x100u16..=0x38b)
        .prop_map(|(a, b)| format!("R{:03x}t{:03x}", a.min(b), a.max(b)))
}

fn query_list() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![query_symbol(), query_range()], 1..3)
        .prop_map(|items| items.join("o"))
}

fn fsw_query() -> impl Strategy<Value = String> {
    (
        prop::option::of(prop::collection::vec(query_list(), 0..3)),
        prop::collection::vec(
            (query_list(), prop::option::of((0i32..=999, 0i32..=999))),
            0..3,
        ),
        prop::option::of(0u32..100),
        any::<bool>(),
    )
        .prop_map(|(prefix, signbox, variance, style)| {
            let mut text = String::from("Q");
            if let Some(parts) = prefix {
                if !parts.is_empty() {
                    text.push('A');
                    text.push_str(&parts.concat());
                }
                text.push('T');
            }
            for (list, coord) in signbox {
                text.push_str(&list);
                if let Some((x, y)) = coord {
                    text.push_str(&format!("{x:03}x{y:03}"));
                }
            }
            if let Some(variance) = variance {
                text.push_str(&format!("V{variance}"));
            }
            if style {
                text.push('-');
            }
            text
        })
}

proptest! {
    #[test]
    fn canonical_queries_round_trip(text in fsw_query()) {
        let parsed = fsw::query_parse(&text).into_query().unwrap();
        prop_assert_eq!(fsw::query_compose(&parsed).unwrap(), text);
    }

    #[test]
    fn canonical_queries_compile(text in fsw_query()) {
        let program = fsw::query_regex(&text).unwrap();
        prop_assert!(!program.is_empty());
        for stage in &program {
            prop_assert!(regex::Regex::new(stage).is_ok());
        }
    }

    #[test]
    fn search_is_idempotent(
        index in 0usize..40,
        flags in prop::sample::select(vec!["A", "a", "S", "s", "sL", "aS"]),
    ) {
        let signs = fsw::parse_text(TEXT);
        let sign = &signs[index % signs.len()];
        if let Some(query) = fsw::to_query(sign, flags) {
            let first = fsw::query_results(&query, TEXT).unwrap();
            prop_assert!(first.contains(sign));
            prop_assert!(first.iter().all(|found| signs.contains(found)));
            let again = fsw::query_results(&query, &first.join(" ")).unwrap();
            prop_assert_eq!(again, first);
        }
    }
}

#[rstest]
#[case("QAS10011T")]
#[case("QAS100uuTS2e7uu")]
#[case("QS10011501x466")]
#[case("QR100t204")]
#[case("Q")]
fn both_spellings_find_the_same_signs(#[case] fsw_query: &str) {
    let expected: Vec<String> = fsw::query_results(fsw_query, TEXT)
        .unwrap()
        .iter()
        .map(|sign| convert::fsw_to_swu(sign))
        .collect();
    assert!(!expected.is_empty());

    let swu_query = to_swu_query(fsw_query);
    let swu_text = convert::fsw_to_swu(TEXT);
    assert_eq!(swu::query_results(&swu_query, &swu_text).unwrap(), expected);
}

/// Rewrite an FSW query in SWU. Wildcards widen to whole blocks on both sides
/// only when both fill and rotation are wildcards.
fn to_swu_query(fsw_query: &str) -> String {
    let parsed = match query::parse::<Fsw>(fsw_query) {
        QueryParse::Query(parsed) => parsed,
        QueryParse::NotAQuery => panic!("{fsw_query} is not a query"),
    };
    let symbol = |text: &str| match text.strip_suffix("uu") {
        Some(base) => format!("{}fr", convert::key_to_swu(&format!("{base}00")).unwrap()),
        None => convert::key_to_swu(text).unwrap().to_string(),
    };
    let bound = |text: &str| convert::key_to_swu(&format!("S{text}00")).unwrap().to_string();
    let element = |element: &query::QueryElement| match element {
        query::QueryElement::Symbol(text) => symbol(text),
        query::QueryElement::Range(min, max) => format!("R{}{}", bound(min), bound(max)),
        query::QueryElement::OrGroup(_) => unreachable!("no OR-groups in these cases"),
    };

    let mut text = String::from("Q");
    if let Some(prefix) = &parsed.prefix {
        text.push('A');
        for part in prefix.parts.iter().flatten() {
            text.push_str(&element(part));
        }
        text.push('T');
    }
    for item in parsed.signbox_elements() {
        text.push_str(&element(&item.element));
        if let Some(coord) = item.coord {
            text.push_str(&convert::coord_to_swu(coord).unwrap());
        }
    }
    assert!(query::parse::<Swu>(&text).is_query(), "{text}");
    text
}

#[test]
fn lines_mode_matches_only_at_line_start() {
    let lines = include_str!("fixtures/lines.fsw");
    let program = fsw::query_regex("QS10011").unwrap();
    let results = query::exec::run(&program, lines, SearchMode::Lines).unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|line| line.ends_with(" this line here")));
}
