//! Style string fragments.
//!
//! A style string trails a sign or symbol (`-CP10G_white_Z2`). Its contents are
//! not interpreted here; the fragments only let signs, symbols and query
//! results carry one along.

use once_cell::sync::Lazy;

pub const COLORIZE: &str = "C";
pub const COLORHEX: &str = "(?:[0-9a-fA-F]{3}){1,2}";
pub const COLORNAME: &str = "[a-zA-Z]+";
pub const PADDING: &str = "P[0-9]{2}";
pub const ZOOM: &str = r"Z(?:[0-9]+(?:\.[0-9]+)?|x)";
pub const CLASSBASE: &str = "-?[_a-zA-Z][_a-zA-Z0-9-]{0,100}";
pub const ID: &str = "[a-zA-Z][_a-zA-Z0-9-]{0,100}";

pub static COLORBASE: Lazy<String> = Lazy::new(|| format!("(?:{COLORHEX}|{COLORNAME})"));
pub static COLOR: Lazy<String> = Lazy::new(|| format!("_{}_", *COLORBASE));
pub static COLORS: Lazy<String> =
    Lazy::new(|| format!("_{}(?:,{})?_", *COLORBASE, *COLORBASE));
pub static BACKGROUND: Lazy<String> = Lazy::new(|| format!("G{}", *COLOR));
pub static DETAIL: Lazy<String> = Lazy::new(|| format!("D{}", *COLORS));
pub static DETAILSYM: Lazy<String> = Lazy::new(|| format!("D[0-9]{{2}}{}", *COLORS));
pub static CLASSES: Lazy<String> = Lazy::new(|| format!("{CLASSBASE}(?: {CLASSBASE})*"));

/// The complete style string, without capture groups.
pub static FULL: Lazy<String> = Lazy::new(|| {
    format!(
        "-(?:{COLORIZE})?(?:{PADDING})?(?:{})?(?:{})?(?:{ZOOM})?(?:-(?:(?:{})*))?(?:-(?:{})?!(?:(?:{ID})!)?)?",
        *BACKGROUND, *DETAIL, *DETAILSYM, *CLASSES
    )
});
