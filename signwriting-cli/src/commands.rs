//! CLI commands
//!
//! Every command takes its arguments as text and returns the text to print,
//! already formatted for the requested output. Both spellings are accepted
//! everywhere; the spelling is read off the input (any non-ASCII character
//! means SWU).

use serde::Serialize;
use signwriting::convert;
use signwriting::notation::{Fsw, Swu};
use signwriting::query::{self, Dialect, QueryParse, SearchMode};
use signwriting::{fsw, swu};
use signwriting_config::OutputFormat;

/// Which spelling some input is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Fsw,
    Swu,
}

impl Spelling {
    pub fn detect(text: &str) -> Self {
        if text.is_ascii() {
            Spelling::Fsw
        } else {
            Spelling::Swu
        }
    }

    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "fsw" => Ok(Spelling::Fsw),
            "swu" => Ok(Spelling::Swu),
            other => Err(format!("Unknown notation '{}' (expected fsw or swu)", other)),
        }
    }
}

fn render<T: Serialize>(
    value: &T,
    text: impl FnOnce() -> String,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {}", e)),
    }
}

fn render_list(items: &[String], format: OutputFormat) -> Result<String, String> {
    render(&items, || items.join("\n"), format)
}

/// Full-text conversion to the target spelling.
pub fn convert_text(text: &str, to: Spelling, format: OutputFormat) -> Result<String, String> {
    let converted = match to {
        Spelling::Swu => convert::fsw_to_swu(text),
        Spelling::Fsw => convert::swu_to_fsw(text),
    };
    render(&converted, || converted.clone(), format)
}

fn parse_query(text: &str) -> Result<signwriting::QueryObject, String> {
    let parsed = match Spelling::detect(text) {
        Spelling::Fsw => fsw::query_parse(text),
        Spelling::Swu => swu::query_parse(text),
    };
    match parsed {
        QueryParse::Query(query) => Ok(query),
        QueryParse::NotAQuery => Err(format!("'{}' is not a query", text)),
    }
}

pub fn parse(text: &str, format: OutputFormat) -> Result<String, String> {
    let query = parse_query(text)?;
    render(&query, || format!("{:#?}", query), format)
}

/// Apply a default variance to a query that does not carry its own.
fn with_variance<D: Dialect>(text: &str, variance: u32) -> Result<String, String> {
    let mut parsed = match query::parse::<D>(text) {
        QueryParse::Query(parsed) => parsed,
        QueryParse::NotAQuery => return Ok(text.to_string()),
    };
    if parsed.variance.is_some() || variance == query::DEFAULT_VARIANCE {
        return Ok(text.to_string());
    }
    parsed.variance = Some(variance);
    tracing::debug!(variance, "applying configured variance");
    query::compose::<D>(&parsed).map_err(|e| e.to_string())
}

/// Stages of a query. A query that can match nothing has no stages.
fn program(text: &str, variance: u32) -> Result<Vec<String>, String> {
    parse_query(text)?;
    let stages = match Spelling::detect(text) {
        Spelling::Fsw => query::regex::<Fsw>(&with_variance::<Fsw>(text, variance)?),
        Spelling::Swu => query::regex::<Swu>(&with_variance::<Swu>(text, variance)?),
    };
    stages.map_err(|e| e.to_string())
}

pub fn regex(text: &str, variance: u32, format: OutputFormat) -> Result<String, String> {
    render_list(&program(text, variance)?, format)
}

/// Range regex. Single non-ASCII characters are an SWU codepoint range,
/// anything else is a three-digit decimal or hex range. An inverted SWU range
/// is empty; an inverted numeric range is an error.
pub fn range(min: &str, max: &str, hex: bool, format: OutputFormat) -> Result<String, String> {
    let single = |text: &str| {
        let mut chars = text.chars();
        chars.next().filter(|c| !c.is_ascii() && chars.next().is_none())
    };
    let pattern = match (single(min), single(max)) {
        (Some(min), Some(max)) => swu::query_range(min, max),
        _ => fsw::query_range(min, max, hex).map_err(|e| e.to_string())?,
    };
    render(&pattern, || pattern.clone(), format)
}

pub fn search(
    text: &str,
    corpus: &str,
    mode: SearchMode,
    variance: u32,
    format: OutputFormat,
) -> Result<String, String> {
    let stages = program(text, variance)?;
    let results = query::exec::run(&stages, corpus, mode).map_err(|e| e.to_string())?;
    tracing::info!(results = results.len(), "search finished");
    render_list(&results, format)
}

pub fn to_query(sign: &str, flags: &str, format: OutputFormat) -> Result<String, String> {
    let generated = match Spelling::detect(sign) {
        Spelling::Fsw => fsw::to_query(sign, flags),
        Spelling::Swu => swu::to_query(sign, flags),
    };
    let generated =
        generated.ok_or_else(|| format!("No query for '{}' with flags '{}'", sign, flags))?;
    render(&generated, || generated.clone(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_variance_is_applied_when_missing() {
        assert_eq!(with_variance::<Fsw>("QS10000500x500", 5).unwrap(), "QS10000500x500V5");
        assert_eq!(with_variance::<Fsw>("QS10000500x500V9", 5).unwrap(), "QS10000500x500V9");
        assert_eq!(with_variance::<Fsw>("QS10000500x500", 20).unwrap(), "QS10000500x500");
    }

    #[test]
    fn spelling_is_detected_from_text() {
        assert_eq!(Spelling::detect("QS10000"), Spelling::Fsw);
        assert_eq!(Spelling::detect("Q\u{40001}"), Spelling::Swu);
        assert!(Spelling::from_name("ascii").is_err());
    }

    #[test]
    fn json_lists() {
        let out = regex("QS10000", 20, OutputFormat::Json).unwrap();
        let stages: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(stages.len(), 1);
    }

    #[test]
    fn swu_range_from_single_characters() {
        assert_eq!(
            range("\u{40001}", "\u{401E1}", false, OutputFormat::Text).unwrap(),
            r"[\x{40001}-\x{401E1}]"
        );
        assert_eq!(range("\u{401E1}", "\u{40001}", false, OutputFormat::Text).unwrap(), "");
        assert!(range("750", "500", false, OutputFormat::Text).is_err());
    }

    #[test]
    fn empty_swu_range_query_has_no_stages() {
        assert!(regex("QR\u{40070}\u{40012}", 20, OutputFormat::Text).unwrap().is_empty());
        let found = search(
            "QR\u{40070}\u{40012}",
            "\u{1D803}\u{1D91F}\u{1D929}\u{40012}\u{1D907}\u{1D8E4}",
            SearchMode::Signs,
            20,
            OutputFormat::Text,
        );
        assert_eq!(found.unwrap(), "");
        assert!(regex("S10000", 20, OutputFormat::Text).is_err());
    }
}
