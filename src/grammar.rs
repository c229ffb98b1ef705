//! Grammar Fragment Definitions
//!
//! Named regular-expression fragments for both notations and for the query
//! language built on top of them. Larger fragments are assembled once, on
//! first use, by templating smaller ones:
//!
//! symbol → coordinate → spatial → signbox → sign → query
//!
//! # Encodings
//!
//! - [`fsw`] - Formal SignWriting in ASCII (`AS10011M525x535S10011501x466`)
//! - [`swu`] - SignWriting in Unicode, the same grammar over reserved codepoints
//! - [`style`] - the trailing style string, matched opaquely by both
//!
//! All fragments are unanchored, and all but `QUERY_FULL` are free of capture
//! groups so they can be embedded into larger expressions. Anchored, compiled
//! forms live next to the code that uses them.

pub mod fsw;
pub mod style;
pub mod swu;
