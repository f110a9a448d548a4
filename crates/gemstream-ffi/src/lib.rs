//! UniFFI bindings for gemstream
//!
//! Exposes the incremental parser to foreign runtimes as a handle with
//! `feed` and `finalize`, plus a function that renders fragments handed back
//! from the foreign side. Fragments cross the boundary as plain records, so
//! releasing one is the foreign runtime's business.

use gemstream_engine::{Format, render_to_string};
use gemstream_syntax::{Fragment, HeadingLevel, ParseError, Parser, TextLines};
use std::sync::Mutex;

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Out of memory: {reason}")]
    OutOfMemory { reason: String },
    #[error("Render error: {reason}")]
    Render { reason: String },
}

impl From<ParseError> for FfiError {
    fn from(e: ParseError) -> Self {
        FfiError::OutOfMemory {
            reason: e.to_string(),
        }
    }
}

// ============ Parser Handle ============

/// One incremental parse. Feed chunks in order, then drain `finalize`.
#[derive(uniffi::Object)]
pub struct ParserHandle {
    inner: Mutex<Parser>,
}

#[uniffi::export]
impl ParserHandle {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Parser::new()),
        }
    }

    /// Consume a prefix of `chunk`. Re-feed `chunk[consumed..]` afterwards.
    pub fn feed(&self, chunk: Vec<u8>) -> Result<FeedResultDto, FfiError> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        let mut parser = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let feed = parser.feed(&chunk)?;
        let status = if feed.fragment.is_some() {
            FeedStatus::OkWithFragment
        } else {
            FeedStatus::Ok
        };
        Ok(FeedResultDto {
            consumed: feed.consumed as u64,
            status,
            fragment: feed.fragment.map(FragmentDto::from_engine),
        })
    }

    /// Next trailing fragment at end of input, `None` once drained.
    pub fn finalize(&self) -> Result<Option<FragmentDto>, FfiError> {
        let mut parser = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(parser.finalize()?.map(FragmentDto::from_engine))
    }

    /// Discard buffered input and start over.
    pub fn reset(&self) {
        let mut parser = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        parser.reset();
    }
}

impl Default for ParserHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ============ DTOs ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FeedStatus {
    /// Input consumed, nothing completed yet.
    Ok,
    /// A fragment is attached to the result.
    OkWithFragment,
}

#[derive(Debug, uniffi::Record)]
pub struct FeedResultDto {
    pub consumed: u64,
    pub status: FeedStatus,
    pub fragment: Option<FragmentDto>,
}

/// A fragment flattened into one record.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FragmentDto {
    /// "empty", "paragraph", "heading", "link", "quote", "list" or "preformatted"
    pub kind: String,
    /// Heading level (1-3) if this is a heading, 0 otherwise
    pub level: u8,
    /// Paragraph or heading text
    pub text: Option<String>,
    pub href: Option<String>,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    /// Lines of a quote, list or preformatted block
    pub lines: Vec<String>,
}

impl FragmentDto {
    fn empty(fragment: &Fragment) -> Self {
        Self {
            kind: fragment.kind().as_str().to_string(),
            level: 0,
            text: None,
            href: None,
            title: None,
            alt_text: None,
            lines: Vec::new(),
        }
    }

    fn from_engine(fragment: Fragment) -> Self {
        let dto = Self::empty(&fragment);
        match fragment {
            Fragment::Empty => dto,
            Fragment::Paragraph(text) => Self {
                text: Some(text),
                ..dto
            },
            Fragment::Heading { level, text } => Self {
                level: level.get(),
                text: Some(text),
                ..dto
            },
            Fragment::Link { href, title } => Self {
                href: Some(href),
                title,
                ..dto
            },
            Fragment::Quote(lines) | Fragment::List(lines) => Self {
                lines: lines.into_vec(),
                ..dto
            },
            Fragment::Preformatted { alt_text, lines } => Self {
                alt_text,
                lines: lines.into_vec(),
                ..dto
            },
        }
    }

    fn into_engine(self) -> Result<Fragment, FfiError> {
        let invalid = |reason: String| FfiError::Render { reason };
        Ok(match self.kind.as_str() {
            "empty" => Fragment::Empty,
            "paragraph" => Fragment::Paragraph(self.text.unwrap_or_default()),
            "heading" => Fragment::Heading {
                level: HeadingLevel::from_u8(self.level)
                    .ok_or_else(|| invalid(format!("invalid heading level {}", self.level)))?,
                text: self.text.unwrap_or_default(),
            },
            "link" => Fragment::Link {
                href: self
                    .href
                    .ok_or_else(|| invalid("link without href".to_string()))?,
                title: self.title,
            },
            "quote" => Fragment::Quote(TextLines::from(self.lines)),
            "list" => Fragment::List(TextLines::from(self.lines)),
            "preformatted" => Fragment::Preformatted {
                alt_text: self.alt_text,
                lines: TextLines::from(self.lines),
            },
            other => return Err(invalid(format!("unknown fragment kind {other:?}"))),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum OutputFormat {
    Gemtext,
    Html,
    Markdown,
    Rtf,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Gemtext => Format::Gemtext,
            OutputFormat::Html => Format::Html,
            OutputFormat::Markdown => Format::Markdown,
            OutputFormat::Rtf => Format::Rtf,
        }
    }
}

// ============ Standalone Functions ============

/// Render a whole fragment sequence, header and footer included.
#[uniffi::export]
pub fn render_fragments(
    format: OutputFormat,
    fragments: Vec<FragmentDto>,
) -> Result<String, FfiError> {
    let fragments = fragments
        .into_iter()
        .map(FragmentDto::into_engine)
        .collect::<Result<Vec<_>, _>>()?;
    render_to_string(format.into(), &fragments).map_err(|e| FfiError::Render {
        reason: e.to_string(),
    })
}
