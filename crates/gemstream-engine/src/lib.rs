//! # gemstream-engine
//!
//! Everything above the scanner: collecting fragments into a [`Document`],
//! pulling them lazily out of a reader with [`FragmentStream`], and rendering
//! them as gemtext, HTML, Markdown or RTF.
//!
//! ```
//! use gemstream_engine::{Document, Format};
//!
//! let doc = Document::from_bytes(b"# Title\r\n* one\r\n* two\r\n").unwrap();
//! let mut out = Vec::new();
//! doc.render(Format::Gemtext, &mut out).unwrap();
//! assert_eq!(out, b"# Title\r\n* one\r\n* two\r\n");
//! ```

pub mod document;
pub mod error;
pub mod render;
pub mod stream;

pub use document::{DEFAULT_CHUNK_SIZE, Document};
pub use error::DocumentError;
pub use render::{Format, Renderer, UnknownFormat, render, render_to_string};
pub use stream::FragmentStream;

pub use gemstream_syntax::{Fragment, FragmentKind, HeadingLevel, ParseError, TextLines};
