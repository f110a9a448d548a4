//! # Fragments - The Parser's Output
//!
//! A [`Fragment`] is one semantic unit of a gemtext document. Single-line
//! fragments (paragraphs, headings, links, empty lines) map to exactly one input
//! line; block fragments (quotes, lists, preformatted text) collect several
//! consecutive lines into a [`TextLines`].
//!
//! Every fragment owns its text. Nothing in here borrows from the input chunk or
//! from the parser's scratch buffers, so a fragment can outlive the parser that
//! produced it.

use std::collections::TryReserveError;
use std::fmt;

/// Heading depth. Gemtext only knows three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    /// Numeric level, `1..=3`.
    pub fn get(self) -> u8 {
        self as u8
    }

    /// Level from its numeric value.
    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

/// Ordered, owned lines of a block fragment.
///
/// Order is document order. An empty collection is valid (e.g. a preformatted
/// block with nothing between its fences).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextLines(Vec<String>);

impl TextLines {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Empty collection with room for `count` lines, or an allocation error.
    pub fn try_with_capacity(count: usize) -> Result<Self, TryReserveError> {
        let mut lines = Vec::new();
        lines.try_reserve_exact(count)?;
        Ok(Self(lines))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Appends a line. Fails without touching `self` when memory runs out.
    pub fn try_push(&mut self, line: &str) -> Result<(), TryReserveError> {
        let owned = try_to_owned(line)?;
        self.0.try_reserve(1)?;
        self.0.push(owned);
        Ok(())
    }

    /// Deep copy that either succeeds completely or allocates nothing that
    /// outlives the call.
    pub fn try_clone(&self) -> Result<Self, TryReserveError> {
        let mut copy = Self::try_with_capacity(self.0.len())?;
        for line in &self.0 {
            copy.try_push(line)?;
        }
        Ok(copy)
    }
}

impl From<Vec<String>> for TextLines {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl<S: Into<String>> FromIterator<S> for TextLines {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for TextLines {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TextLines {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Discriminant of a [`Fragment`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Empty,
    Paragraph,
    Heading,
    Link,
    Quote,
    List,
    Preformatted,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Empty => "empty",
            FragmentKind::Paragraph => "paragraph",
            FragmentKind::Heading => "heading",
            FragmentKind::Link => "link",
            FragmentKind::Quote => "quote",
            FragmentKind::List => "list",
            FragmentKind::Preformatted => "preformatted",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured unit of a gemtext document.
///
/// Dropping a fragment releases exactly what it owns: its strings and, for the
/// block variants, the line array. `Empty` owns nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// A blank line.
    Empty,
    /// A plain text line.
    Paragraph(String),
    /// `#`, `##` or `###` line.
    Heading { level: HeadingLevel, text: String },
    /// `=>` line.
    Link { href: String, title: Option<String> },
    /// Consecutive `>` lines.
    Quote(TextLines),
    /// Consecutive `* ` lines.
    List(TextLines),
    /// Lines between two ```` ``` ```` fences, verbatim.
    Preformatted {
        alt_text: Option<String>,
        lines: TextLines,
    },
}

impl Fragment {
    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Empty => FragmentKind::Empty,
            Fragment::Paragraph(_) => FragmentKind::Paragraph,
            Fragment::Heading { .. } => FragmentKind::Heading,
            Fragment::Link { .. } => FragmentKind::Link,
            Fragment::Quote(_) => FragmentKind::Quote,
            Fragment::List(_) => FragmentKind::List,
            Fragment::Preformatted { .. } => FragmentKind::Preformatted,
        }
    }

    /// The line collection of a block fragment.
    pub fn lines(&self) -> Option<&TextLines> {
        match self {
            Fragment::Quote(lines) | Fragment::List(lines) => Some(lines),
            Fragment::Preformatted { lines, .. } => Some(lines),
            _ => None,
        }
    }

    /// All-or-nothing deep copy.
    ///
    /// Every buffer of the copy is reserved through `try_reserve`; on failure the
    /// pieces allocated so far are dropped before the error is returned.
    pub fn try_clone(&self) -> Result<Self, TryReserveError> {
        Ok(match self {
            Fragment::Empty => Fragment::Empty,
            Fragment::Paragraph(text) => Fragment::Paragraph(try_to_owned(text)?),
            Fragment::Heading { level, text } => Fragment::Heading {
                level: *level,
                text: try_to_owned(text)?,
            },
            Fragment::Link { href, title } => Fragment::Link {
                href: try_to_owned(href)?,
                title: title.as_deref().map(try_to_owned).transpose()?,
            },
            Fragment::Quote(lines) => Fragment::Quote(lines.try_clone()?),
            Fragment::List(lines) => Fragment::List(lines.try_clone()?),
            Fragment::Preformatted { alt_text, lines } => Fragment::Preformatted {
                alt_text: alt_text.as_deref().map(try_to_owned).transpose()?,
                lines: lines.try_clone()?,
            },
        })
    }
}

/// `str::to_owned` that reports allocation failure instead of aborting.
pub(crate) fn try_to_owned(text: &str) -> Result<String, TryReserveError> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}
