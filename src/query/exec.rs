//! Staged search
//!
//! A regex program is run as a chain of filters: every stage is matched
//! against the text the previous stage left behind, and its matches,
//! joined, become the text for the next stage.
//!
//! ```text
//! corpus ──stage 1──► "m1 m2 m3" ──stage 2──► "m2" ──► [m2]
//! ```
//!
//! A stage with no match ends the search with no results. Each stage checks
//! one signbox element of the query; a sign survives when every stage finds
//! it, although the stages do not check that they agree on which symbol of
//! the sign they matched.
//!
//! In [`SearchMode::Lines`] every stage is anchored at a line start and takes
//! the rest of the line along, so the results are whole corpus lines.

use crate::error::QueryResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a corpus is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Signs anywhere in the text, results are the signs themselves.
    #[default]
    Signs,
    /// One entry per line starting with a sign, results are whole lines.
    Lines,
}

impl SearchMode {
    fn separator(self) -> &'static str {
        match self {
            SearchMode::Signs => " ",
            SearchMode::Lines => "\n",
        }
    }

    fn stage(self, pattern: &str) -> QueryResult<Regex> {
        let regex = match self {
            SearchMode::Signs => Regex::new(pattern)?,
            SearchMode::Lines => Regex::new(&format!("(?m)^(?:{pattern}).*"))?,
        };
        Ok(regex)
    }
}

/// Run a regex program over `text`.
///
/// Results keep the order of their first occurrence and appear once.
pub fn run(program: &[String], text: &str, mode: SearchMode) -> QueryResult<Vec<String>> {
    if program.is_empty() || text.is_empty() {
        return Ok(Vec::new());
    }

    let mut current = text.to_string();
    let mut matches: Vec<String> = Vec::new();
    for (index, pattern) in program.iter().enumerate() {
        let regex = mode.stage(pattern)?;
        matches = regex
            .find_iter(&current)
            .map(|m| m.as_str().to_string())
            .collect();
        tracing::trace!(stage = index, matches = matches.len(), "query stage");
        if matches.is_empty() {
            tracing::debug!(stage = index, "query stage matched nothing");
            return Ok(Vec::new());
        }
        current = matches.join(mode.separator());
    }

    let mut seen = HashSet::new();
    matches.retain(|entry| !entry.is_empty() && seen.insert(entry.clone()));
    tracing::debug!(results = matches.len(), "query finished");
    Ok(matches)
}
