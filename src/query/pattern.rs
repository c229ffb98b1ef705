//! Regex intermediate representation
//!
//! Compiled queries are built as [`Pattern`] trees and rendered to regex text
//! as a last step. Rendering owns the dialect details: non-capturing groups
//! appear only where an alternation or a repetition needs them, and every
//! non-ASCII character is written as a `\x{...}` escape so SWU patterns stay
//! readable and independent of source encoding.
//!
//! Grammar fragments that already exist as regex text are embedded with
//! [`Pattern::Fragment`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Regex text embedded verbatim.
    Fragment(String),
    /// Text matched literally.
    Literal(String),
    /// One character from a set of inclusive ranges.
    Class(Vec<(char, char)>),
    Concat(Vec<Pattern>),
    Alternation(Vec<Pattern>),
    Repeat(Box<Pattern>, Repetition),
    /// Explicit non-capturing group.
    Group(Box<Pattern>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Optional,
    ZeroOrMore,
    OneOrMore,
    Exactly(u32),
}

impl Pattern {
    pub fn fragment(text: impl Into<String>) -> Self {
        Pattern::Fragment(text.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::Literal(text.into())
    }

    /// A class of one inclusive range.
    pub fn range(lo: char, hi: char) -> Self {
        Pattern::Class(vec![(lo, hi)])
    }

    pub fn optional(self) -> Self {
        Pattern::Repeat(Box::new(self), Repetition::Optional)
    }

    pub fn zero_or_more(self) -> Self {
        Pattern::Repeat(Box::new(self), Repetition::ZeroOrMore)
    }

    pub fn one_or_more(self) -> Self {
        Pattern::Repeat(Box::new(self), Repetition::OneOrMore)
    }

    pub fn group(self) -> Self {
        Pattern::Group(Box::new(self))
    }

    /// Alternation of the given patterns, collapsed to the pattern itself when
    /// there is only one.
    pub fn any_of(mut alternatives: Vec<Pattern>) -> Self {
        if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            Pattern::Alternation(alternatives)
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Pattern::Fragment(text) => out.push_str(text),
            Pattern::Literal(text) => text.chars().for_each(|c| push_escaped(out, c)),
            Pattern::Class(ranges) => match ranges.as_slice() {
                [(lo, hi)] if lo == hi => push_escaped(out, *lo),
                _ => {
                    out.push('[');
                    for &(lo, hi) in ranges {
                        push_escaped(out, lo);
                        if hi != lo {
                            out.push('-');
                            push_escaped(out, hi);
                        }
                    }
                    out.push(']');
                }
            },
            Pattern::Concat(parts) => parts.iter().for_each(|part| part.render_into(out)),
            Pattern::Alternation(alternatives) => match alternatives.as_slice() {
                [] => {}
                [single] => single.render_into(out),
                _ => {
                    out.push_str("(?:");
                    for (i, alternative) in alternatives.iter().enumerate() {
                        if i > 0 {
                            out.push('|');
                        }
                        alternative.render_into(out);
                    }
                    out.push(')');
                }
            },
            Pattern::Repeat(inner, repetition) => {
                if inner.is_atomic() {
                    inner.render_into(out);
                } else {
                    out.push_str("(?:");
                    inner.render_into(out);
                    out.push(')');
                }
                match repetition {
                    Repetition::Optional => out.push('?'),
                    Repetition::ZeroOrMore => out.push('*'),
                    Repetition::OneOrMore => out.push('+'),
                    Repetition::Exactly(n) => out.push_str(&format!("{{{n}}}")),
                }
            }
            Pattern::Group(inner) => {
                out.push_str("(?:");
                inner.render_into(out);
                out.push(')');
            }
        }
    }

    /// Whether a quantifier can follow the rendered text directly.
    fn is_atomic(&self) -> bool {
        match self {
            Pattern::Fragment(text) => fragment_is_atomic(text),
            Pattern::Literal(text) => text.chars().count() == 1,
            Pattern::Class(_) | Pattern::Group(_) => true,
            Pattern::Alternation(alternatives) => match alternatives.as_slice() {
                [single] => single.is_atomic(),
                _ => true,
            },
            Pattern::Concat(parts) => match parts.as_slice() {
                [single] => single.is_atomic(),
                _ => false,
            },
            Pattern::Repeat(..) => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn push_escaped(out: &mut String, c: char) {
    if c.is_ascii_alphanumeric() || c == '_' || c == ' ' {
        out.push(c);
    } else if c.is_ascii() {
        out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
    } else {
        out.push_str(&format!("\\x{{{:X}}}", c as u32));
    }
}

/// A fragment is atomic when it is one group, one class or one escape.
fn fragment_is_atomic(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'(') => closing_index(bytes, b'(', b')') == Some(bytes.len() - 1),
        Some(b'[') => closing_index(bytes, b'[', b']') == Some(bytes.len() - 1),
        Some(b'\\') if text.starts_with("\\x{") => text.find('}') == Some(text.len() - 1),
        Some(b'\\') => text.len() == 2,
        Some(_) => text.chars().count() == 1,
        None => false,
    }
}

/// Index of the bracket closing the one at position 0, skipping escapes and,
/// for groups, whole character classes.
fn closing_index(bytes: &[u8], open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            i += 2;
            continue;
        }
        if open == b'(' && in_class {
            in_class = b != b']';
        } else if open == b'(' && b == b'[' {
            in_class = true;
        } else if b == open && (open == b'(' || depth == 0) {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_classes_render_bare() {
        assert_eq!(Pattern::range('5', '5').render(), "5");
        assert_eq!(Pattern::range('8', '9').render(), "[8-9]");
        assert_eq!(Pattern::Class(vec![('0', '9'), ('a', 'f')]).render(), "[0-9a-f]");
        assert_eq!(Pattern::Class(vec![('9', '9'), ('a', 'b')]).render(), "[9a-b]");
    }

    #[test]
    fn non_ascii_is_escaped() {
        assert_eq!(Pattern::literal("\u{40012}").render(), r"\x{40012}");
        assert_eq!(
            Pattern::range('\u{40001}', '\u{4F480}').render(),
            r"[\x{40001}-\x{4F480}]"
        );
        assert_eq!(Pattern::literal("a.b").render(), r"a\.b");
    }

    #[test]
    fn alternation_groups_only_when_needed() {
        let one = Pattern::any_of(vec![Pattern::literal("S10000")]);
        assert_eq!(one.render(), "S10000");
        let two = Pattern::any_of(vec![Pattern::literal("a"), Pattern::literal("b")]);
        assert_eq!(two.render(), "(?:a|b)");
        let concat = Pattern::Concat(vec![Pattern::literal("4"), two]);
        assert_eq!(concat.render(), "4(?:a|b)");
    }

    #[test]
    fn repetition_wraps_non_atomic_inner_patterns() {
        assert_eq!(Pattern::literal("ab").zero_or_more().render(), "(?:ab)*");
        assert_eq!(Pattern::literal("a").one_or_more().render(), "a+");
        assert_eq!(Pattern::fragment("(?:A[0-9])").optional().render(), "(?:A[0-9])?");
        assert_eq!(Pattern::fragment("(?:A)[0-9]").optional().render(), "(?:(?:A)[0-9])?");
        assert_eq!(Pattern::fragment("[0-9]{3}").zero_or_more().render(), "(?:[0-9]{3})*");
        assert_eq!(
            Pattern::fragment(r"[\x{40001}-\x{4F480}]").one_or_more().render(),
            r"[\x{40001}-\x{4F480}]+"
        );
        assert_eq!(
            Pattern::Repeat(Box::new(Pattern::range('0', '9')), Repetition::Exactly(3)).render(),
            "[0-9]{3}"
        );
    }

    #[test]
    fn groups_are_explicit() {
        let group = Pattern::Concat(vec![Pattern::literal("A"), Pattern::literal("B")]).group();
        assert_eq!(group.render(), "(?:AB)");
        assert_eq!(group.optional().render(), "(?:AB)?");
    }

    #[test]
    fn fragments_with_classes_containing_parens() {
        assert!(fragment_is_atomic("(?:[()]x)"));
        assert!(!fragment_is_atomic("(?:a)(?:b)"));
        assert!(fragment_is_atomic(r"\x{1D800}"));
        assert!(!fragment_is_atomic(r"\x{1D800}\x{1D801}"));
    }
}
