//! # signwriting
//!
//! Codec and query language for Sutton SignWriting in its two plain-text
//! spellings:
//!
//! - FSW, Formal SignWriting in ASCII: `AS10011S10019M525x535S10011501x466`
//! - SWU, SignWriting in Unicode: the same grammar written with reserved
//!   codepoints, one character per token
//!
//! ## Layout
//!
//! - [`grammar`] - regex fragments for both spellings and the query language
//! - [`symbol`] - symbol keys, ids and the named ranges of symbol bases
//! - [`convert`] - token and full-text conversion between FSW and SWU
//! - [`notation`] - the [`Notation`](notation::Notation) trait shared by both spellings
//! - [`sign`] - parse and compose symbols and signs
//! - [`query`] - query AST, parser, composer, regex compiler and staged search
//! - [`fsw`], [`swu`] - the operations above for one spelling each
//!
//! ## Example
//!
//! ```text
//! fsw::query_results("QAS10011T", corpus)    // signs whose prefix starts with S10011
//! fsw::query_regex("QS100uu500x500V5")       // one regex per signbox element
//! convert::fsw_to_swu("AS10011M525x535...")  // same sign, SWU spelling
//! ```

pub mod convert;
pub mod error;
pub mod fsw;
pub mod grammar;
pub mod notation;
pub mod query;
pub mod sign;
pub mod swu;
pub mod symbol;

pub use error::{ComposeError, QueryError, QueryResult, RangeError};
pub use notation::{Fsw, Notation, Swu};
pub use query::{QueryObject, QueryParse, SearchMode};
pub use sign::{Coord, SignObject, Spatial, SymbolObject};
pub use symbol::{SymbolKey, SymbolRange};
