//! # gemstream-syntax
//!
//! An incremental parser for gemtext, the line-oriented markup of the Gemini
//! protocol. Bytes go in as chunks of any size; structured [`Fragment`]s come
//! out one at a time.
//!
//! ## Architecture Overview
//!
//! ```text
//! byte chunks → Parser::feed → line scratch → marker::classify → block scratch → Fragment
//!                                              (Logos)
//! ```
//!
//! ### 1. Fragments ([`fragment`] module)
//!
//! The output type. A sum type with one variant per gemtext construct; block
//! variants carry their lines as [`TextLines`].
//!
//! ### 2. Markers ([`marker`] module)
//!
//! Gemtext line types are decided by a short prefix (`#`, `=>`, `* `, `>`,
//! ```` ``` ````). A [Logos] lexer recognises the prefix of each completed
//! line and [`marker::classify`] returns a borrowed, trimmed view of it.
//!
//! ### 3. Parser ([`parser`] module)
//!
//! The resumable state machine. It buffers the current line across chunk
//! boundaries, collects quote, list and preformatted blocks, and returns as
//! soon as one fragment is complete.
//!
//! ## Quick Start
//!
//! ```
//! use gemstream_syntax::{Fragment, HeadingLevel, Parser};
//!
//! let mut parser = Parser::new();
//! let feed = parser.feed(b"# Hello\n").unwrap();
//!
//! assert_eq!(feed.consumed, 8);
//! assert_eq!(
//!     feed.fragment,
//!     Some(Fragment::Heading { level: HeadingLevel::H1, text: "Hello".into() })
//! );
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! gemstream-syntax/
//! ├── lib.rs          # This file - public API
//! ├── error.rs        # ParseError
//! ├── fragment.rs     # Fragment, TextLines, HeadingLevel
//! ├── marker.rs       # Logos line-prefix lexer and line classification
//! └── parser/
//!     ├── mod.rs      # Parser, Feed, feed/finalize state machine
//!     └── scratch.rs  # Reusable block buffer
//! ```
//!
//! [Logos]: https://docs.rs/logos

pub mod error;
pub mod fragment;
pub mod marker;
pub mod parser;

pub use error::ParseError;
pub use fragment::{Fragment, FragmentKind, HeadingLevel, TextLines};
pub use parser::{Feed, Parser};
