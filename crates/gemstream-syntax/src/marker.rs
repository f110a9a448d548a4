//! # Line Markers
//!
//! Gemtext decides the meaning of a line from its first few bytes only. The
//! [Logos] lexer below recognises those prefixes; the parser never needs more
//! than the first token of a line, so [`classify`] lexes exactly one token and
//! hands back the untouched remainder.
//!
//! ```
//! use gemstream_syntax::marker::{classify, Line};
//! use gemstream_syntax::HeadingLevel;
//!
//! assert_eq!(
//!     classify("## Section "),
//!     Line::Heading { level: HeadingLevel::H2, text: "Section" }
//! );
//! assert_eq!(classify("*not a list"), Line::Text("*not a list"));
//! ```
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

use crate::fragment::HeadingLevel;

/// Line prefixes with syntactic meaning.
///
/// Logos picks the longest matching token, which gives `###` precedence over
/// `##` and `#` without any ordering tricks.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Preformatted toggle
    #[token("```")]
    Fence,

    /// Unordered list item; the space is part of the marker
    #[token("* ")]
    ListItem,

    #[token(">")]
    Quote,

    #[token("###")]
    Heading3,

    #[token("##")]
    Heading2,

    #[token("#")]
    Heading1,

    #[token("=>")]
    Link,
}

/// Block types a line can open or continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Quote,
    List,
    Preformatted,
}

/// A classified line. Text slices borrow from the line that was classified and
/// are already trimmed of horizontal whitespace, except for `Fence::rest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Fence line; `rest` is everything after the three backticks.
    Fence { rest: &'a str },
    ListItem(&'a str),
    Quote(&'a str),
    Heading { level: HeadingLevel, text: &'a str },
    Link { href: &'a str, title: Option<&'a str> },
    Blank,
    Text(&'a str),
}

impl<'a> Line<'a> {
    /// The block this line belongs to, if any.
    pub fn block(&self) -> Option<BlockKind> {
        match self {
            Line::Fence { .. } => Some(BlockKind::Preformatted),
            Line::ListItem(_) => Some(BlockKind::List),
            Line::Quote(_) => Some(BlockKind::Quote),
            _ => None,
        }
    }

    /// Alt text of a fence line: the trimmed rest, `None` when empty.
    pub fn alt_text(&self) -> Option<&'a str> {
        match self {
            Line::Fence { rest } => non_empty(trim(rest)),
            _ => None,
        }
    }
}

/// Returns true when `line` opens or closes a preformatted block.
pub fn is_fence(line: &str) -> bool {
    line.starts_with("```")
}

/// Classifies one line. `line` must not contain its terminator.
pub fn classify(line: &str) -> Line<'_> {
    let mut lexer = Marker::lexer(line);
    let marker = match lexer.next() {
        Some(Ok(marker)) => marker,
        _ => return classify_plain(line),
    };
    let rest = lexer.remainder();

    match marker {
        Marker::Fence => Line::Fence { rest },
        Marker::ListItem => Line::ListItem(trim(rest)),
        Marker::Quote => Line::Quote(trim(rest)),
        Marker::Heading1 => heading(HeadingLevel::H1, rest),
        Marker::Heading2 => heading(HeadingLevel::H2, rest),
        Marker::Heading3 => heading(HeadingLevel::H3, rest),
        Marker::Link => link(rest),
    }
}

fn classify_plain(line: &str) -> Line<'_> {
    match trim(line) {
        "" => Line::Blank,
        text => Line::Text(text),
    }
}

fn heading(level: HeadingLevel, rest: &str) -> Line<'_> {
    Line::Heading {
        level,
        text: trim(rest),
    }
}

fn link(rest: &str) -> Line<'_> {
    let rest = trim(rest);
    match rest.split_once(is_horizontal_space) {
        Some((href, title)) => Line::Link {
            href,
            title: non_empty(trim(title)),
        },
        None => Line::Link {
            href: rest,
            title: None,
        },
    }
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Trims spaces and tabs on both ends.
pub fn trim(text: &str) -> &str {
    text.trim_matches(is_horizontal_space)
}

fn non_empty(text: &str) -> Option<&str> {
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("# A", HeadingLevel::H1, "A")]
    #[case("#A", HeadingLevel::H1, "A")]
    #[case("## B  ", HeadingLevel::H2, "B")]
    #[case("###\tC", HeadingLevel::H3, "C")]
    #[case("#### D", HeadingLevel::H3, "# D")]
    #[case("#", HeadingLevel::H1, "")]
    fn headings(#[case] input: &str, #[case] level: HeadingLevel, #[case] text: &str) {
        assert_eq!(classify(input), Line::Heading { level, text });
    }

    #[rstest]
    #[case("=> gemini://x/ T", "gemini://x/", Some("T"))]
    #[case("=>gemini://x/", "gemini://x/", None)]
    #[case("=>  /a \t  title with  spaces  ", "/a", Some("title with  spaces"))]
    #[case("=> /a   ", "/a", None)]
    #[case("=>", "", None)]
    fn links(#[case] input: &str, #[case] href: &str, #[case] title: Option<&str>) {
        assert_eq!(classify(input), Line::Link { href, title });
    }

    #[test]
    fn list_marker_needs_space() {
        assert_eq!(classify("* item "), Line::ListItem("item"));
        assert_eq!(classify("*   "), Line::ListItem(""));
        assert_eq!(classify("*item"), Line::Text("*item"));
        assert_eq!(classify("**bold**"), Line::Text("**bold**"));
    }

    #[test]
    fn quote_marker_without_space() {
        assert_eq!(classify(">quoted"), Line::Quote("quoted"));
        assert_eq!(classify(">  spaced "), Line::Quote("spaced"));
        assert_eq!(classify(">"), Line::Quote(""));
    }

    #[test]
    fn fence_keeps_raw_rest() {
        let line = classify("```  rust ");
        assert_eq!(line, Line::Fence { rest: "  rust " });
        assert_eq!(line.alt_text(), Some("rust"));
        assert_eq!(classify("```").alt_text(), None);
        assert_eq!(classify("`` not a fence"), Line::Text("`` not a fence"));
    }

    #[test]
    fn blank_and_text() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify(" \t "), Line::Blank);
        assert_eq!(classify("  hello world "), Line::Text("hello world"));
        assert_eq!(classify(" # indented"), Line::Text("# indented"));
    }

    #[test]
    fn block_membership() {
        assert_eq!(classify("```").block(), Some(BlockKind::Preformatted));
        assert_eq!(classify("* a").block(), Some(BlockKind::List));
        assert_eq!(classify("> a").block(), Some(BlockKind::Quote));
        assert_eq!(classify("# a").block(), None);
        assert_eq!(classify("=> a").block(), None);
    }

    #[test]
    fn fence_detection_is_prefix_only() {
        assert!(is_fence("```"));
        assert!(is_fence("```trailing"));
        assert!(!is_fence(" ```"));
    }
}
