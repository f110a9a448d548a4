//! # Renderers
//!
//! Pure formatting of fragment sequences into other syntaxes. A renderer only
//! reads fragments and writes bytes; it never talks to the parser, so the same
//! renderer serves a whole [`Document`](crate::Document) or a stream of
//! fragments rendered as they arrive:
//!
//! ```
//! use gemstream_engine::{Document, Format, render_to_string};
//!
//! let doc = Document::from_bytes(b"# Hi\n=> /about About\n").unwrap();
//! let html = render_to_string(Format::Html, doc.fragments()).unwrap();
//! assert_eq!(html, "<h1>Hi</h1>\n<p><a href=\"/about\">About</a></p>\n");
//! ```

mod gemtext;
mod html;
mod markdown;
mod rtf;

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use gemstream_syntax::Fragment;
use serde::{Deserialize, Serialize};

pub use gemtext::GemtextRenderer;
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use rtf::RtfRenderer;

/// Output syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Canonical gemtext with `\r\n` line endings.
    #[default]
    Gemtext,
    Html,
    Markdown,
    /// Rich Text Format.
    Rtf,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Gemtext, Format::Html, Format::Markdown, Format::Rtf];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Gemtext => "gemtext",
            Format::Html => "html",
            Format::Markdown => "markdown",
            Format::Rtf => "rtf",
        }
    }

    pub fn renderer(self) -> &'static dyn Renderer {
        match self {
            Format::Gemtext => &GemtextRenderer,
            Format::Html => &HtmlRenderer,
            Format::Markdown => &MarkdownRenderer,
            Format::Rtf => &RtfRenderer,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format `{0}` (expected gemtext, html, markdown or rtf)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemtext" | "gmi" | "gemini" => Ok(Format::Gemtext),
            "html" => Ok(Format::Html),
            "markdown" | "md" => Ok(Format::Markdown),
            "rtf" => Ok(Format::Rtf),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Writes fragments in one target syntax.
///
/// `header` and `footer` wrap a whole output; streaming consumers call them
/// once around any number of `fragment` calls.
pub trait Renderer {
    fn header(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn fragment(&self, fragment: &Fragment, out: &mut dyn Write) -> io::Result<()>;

    fn footer(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// Renders a complete fragment sequence.
pub fn render<W: Write>(format: Format, fragments: &[Fragment], out: &mut W) -> io::Result<()> {
    let renderer = format.renderer();
    renderer.header(out)?;
    for fragment in fragments {
        renderer.fragment(fragment, out)?;
    }
    renderer.footer(out)
}

/// [`render`] into a `String`.
pub fn render_to_string(format: Format, fragments: &[Fragment]) -> io::Result<String> {
    let mut out = Vec::new();
    render(format, fragments, &mut out)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
