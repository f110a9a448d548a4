//! # Parser - Incremental Line Scanner
//!
//! [`Parser`] turns a byte stream into [`Fragment`]s without ever seeing the
//! whole stream. Input arrives in chunks of any size, split anywhere (inside a
//! line, inside a `\r\n` pair, inside a multi-byte character); the fragment
//! sequence is the same as if the whole text had been fed at once.
//!
//! ## The Feed Loop
//!
//! ```
//! use gemstream_syntax::{Fragment, Parser};
//!
//! let input = b"# Title\n* one\n* two\nclosing words";
//! let mut parser = Parser::new();
//! let mut fragments = Vec::new();
//!
//! let mut rest = &input[..];
//! while !rest.is_empty() {
//!     let feed = parser.feed(rest)?;
//!     rest = &rest[feed.consumed..];
//!     fragments.extend(feed.fragment);
//! }
//! while let Some(fragment) = parser.finalize()? {
//!     fragments.push(fragment);
//! }
//!
//! assert_eq!(fragments.len(), 3);
//! assert!(matches!(fragments[2], Fragment::Paragraph(ref text) if text == "closing words"));
//! # Ok::<(), gemstream_syntax::ParseError>(())
//! ```
//!
//! Each call to [`Parser::feed`] returns as soon as one fragment is ready, so
//! the caller sees at most one fragment per call and must re-feed the
//! unconsumed tail of its chunk.
//!
//! ## Blocks and Hand-off
//!
//! Quotes and lists end when a line of any other kind shows up. That line is
//! not part of the block, so the block is emitted and the line is reported as
//! *not consumed*: the caller feeds it again and it is classified with no block
//! open. Preformatted blocks end on their closing fence, which belongs to the
//! block and is consumed with it.
//!
//! ## Memory
//!
//! Two kinds of memory are kept apart:
//!
//! - **Scratch**: the current line and the lines of the open block. Owned by
//!   the parser, cleared but never shrunk, never handed out.
//! - **Fragments**: every returned fragment is built from fresh allocations
//!   and owned by the caller.
//!
//! All growth goes through `try_reserve`. When an allocation fails the parser
//! rewinds to the state it had when the call began, so the same call can be
//! retried once memory is available.

mod scratch;

use std::collections::TryReserveError;

use crate::error::ParseError;
use crate::fragment::{Fragment, try_to_owned};
use crate::marker::{self, BlockKind, Line};
use scratch::{BlockScratch, ScratchMark};

/// Result of one [`Parser::feed`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// Number of leading bytes of the chunk the parser has taken. The caller
    /// passes the rest of the chunk to the next call.
    pub consumed: usize,
    /// The fragment completed by this call, if any.
    pub fragment: Option<Fragment>,
}

impl Feed {
    fn pending(consumed: usize) -> Self {
        Self {
            consumed,
            fragment: None,
        }
    }

    fn fragment(consumed: usize, fragment: Fragment) -> Self {
        Self {
            consumed,
            fragment: Some(fragment),
        }
    }
}

/// What a completed line did to the parser.
enum Step {
    /// The line went into the open block (or opened one).
    Absorbed,
    /// The line produced a fragment of its own, or closed a preformatted block.
    Emit(Fragment),
    /// The line ended the open block; the block is returned and the line has to
    /// be scanned again with no block open.
    HandOff(Fragment),
}

/// The block currently being collected.
#[derive(Debug, Default)]
struct BlockState {
    /// `None` while no block is open.
    open: Option<BlockKind>,
    scratch: BlockScratch,
}

impl BlockState {
    fn accept(&mut self, text: &str) -> Result<Step, TryReserveError> {
        match self.open {
            None => self.open_or_emit(marker::classify(text)),
            Some(BlockKind::Preformatted) => {
                if marker::is_fence(text) {
                    return Ok(Step::Emit(self.close(BlockKind::Preformatted)?));
                }
                self.scratch.push_line(text)?;
                Ok(Step::Absorbed)
            }
            Some(kind) => match (kind, marker::classify(text)) {
                (BlockKind::List, Line::ListItem(item)) | (BlockKind::Quote, Line::Quote(item)) => {
                    self.scratch.push_line(item)?;
                    Ok(Step::Absorbed)
                }
                _ => {
                    log::trace!(
                        "handing off {kind:?} block after {} lines",
                        self.scratch.line_count()
                    );
                    Ok(Step::HandOff(self.close(kind)?))
                }
            },
        }
    }

    fn open_or_emit(&mut self, line: Line<'_>) -> Result<Step, TryReserveError> {
        if let Some(kind) = line.block() {
            return self.open(kind, line);
        }
        let fragment = match line {
            Line::Text(text) => Fragment::Paragraph(try_to_owned(text)?),
            Line::Heading { level, text } => Fragment::Heading {
                level,
                text: try_to_owned(text)?,
            },
            Line::Link { href, title } => Fragment::Link {
                href: try_to_owned(href)?,
                title: title.map(try_to_owned).transpose()?,
            },
            // Blank; block lines were opened above.
            _ => Fragment::Empty,
        };
        Ok(Step::Emit(fragment))
    }

    fn open(&mut self, kind: BlockKind, line: Line<'_>) -> Result<Step, TryReserveError> {
        match line {
            Line::Fence { .. } => self.scratch.set_alt_text(line.alt_text())?,
            Line::ListItem(item) | Line::Quote(item) => self.scratch.push_line(item)?,
            _ => {}
        }
        log::trace!("opened {kind:?} block");
        self.open = Some(kind);
        Ok(Step::Absorbed)
    }

    /// Builds the fragment for the open block, then resets to no open block.
    /// Scratch is only cleared once the fragment exists.
    fn close(&mut self, kind: BlockKind) -> Result<Fragment, TryReserveError> {
        let lines = self.scratch.to_text_lines()?;
        let fragment = match kind {
            BlockKind::Quote => Fragment::Quote(lines),
            BlockKind::List => Fragment::List(lines),
            BlockKind::Preformatted => Fragment::Preformatted {
                alt_text: self.scratch.to_alt_text()?,
                lines,
            },
        };
        log::trace!("closed {kind:?} block");
        self.scratch.clear();
        self.open = None;
        Ok(fragment)
    }
}

/// Parser state captured at the start of a call.
struct Checkpoint {
    open: Option<BlockKind>,
    line_len: usize,
    scratch: ScratchMark,
}

/// Incremental gemtext parser.
///
/// One parser serves one stream: feed it chunks in order, then drain
/// [`Parser::finalize`]. It is not meant to be shared between threads while
/// in use; independent parsers share nothing.
#[derive(Debug, Default)]
pub struct Parser {
    /// Bytes of the line that has not seen its terminator yet.
    line: Vec<u8>,
    block: BlockState,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `chunk` until a fragment is ready or the chunk runs out.
    ///
    /// `consumed` never exceeds `chunk.len()`. It is `chunk.len()` whenever no
    /// fragment is returned. It can be `0` together with a fragment when an open
    /// block is handed off by a line that arrived entirely in earlier calls.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Feed, ParseError> {
        let checkpoint = self.checkpoint();
        match self.scan(chunk) {
            Ok(feed) => Ok(feed),
            Err(err) => {
                self.restore(checkpoint);
                Err(err.into())
            }
        }
    }

    /// Flushes whatever is left at end of input.
    ///
    /// A dangling unterminated line is treated as if it had a terminator, and
    /// a block still open afterwards is emitted. End of input can hold two
    /// fragments (an open block plus a dangling line that hands it off), so
    /// call this until it returns `Ok(None)`; from then on it keeps returning
    /// `Ok(None)`.
    pub fn finalize(&mut self) -> Result<Option<Fragment>, ParseError> {
        let checkpoint = self.checkpoint();
        match self.flush() {
            Ok(fragment) => Ok(fragment),
            Err(err) => {
                self.restore(checkpoint);
                Err(err.into())
            }
        }
    }

    /// Drops all pending input so the parser can start a new stream. Scratch
    /// capacity is kept.
    pub fn reset(&mut self) {
        self.line.clear();
        self.block.scratch.clear();
        self.block.open = None;
    }

    /// True when no partial line and no open block are buffered.
    pub fn is_idle(&self) -> bool {
        self.line.is_empty() && self.block.open.is_none()
    }

    fn scan(&mut self, chunk: &[u8]) -> Result<Feed, TryReserveError> {
        // Bytes carried over from earlier calls stay at the front of `line`
        // until the call returns, so a failed call can put them back. Lines
        // completed by this call are dropped from the buffer as they go.
        let carried = self.line.len();
        // Start of the current line inside `self.line`.
        let mut line_start = 0;
        // Start of this call's share of the current line inside `chunk`.
        let mut cursor = 0;

        while let Some(newline) = chunk[cursor..].iter().position(|&b| b == b'\n') {
            let end = cursor + newline;
            self.line.try_reserve(end - cursor)?;
            self.line.extend_from_slice(&chunk[cursor..end]);

            match self.complete_line(line_start)? {
                Step::Absorbed => {
                    cursor = end + 1;
                    self.line.truncate(carried);
                    line_start = carried;
                }
                Step::Emit(fragment) => {
                    self.line.clear();
                    return Ok(Feed::fragment(end + 1, fragment));
                }
                Step::HandOff(fragment) => {
                    // Keep only the bytes that earlier calls already reported as
                    // consumed; the caller feeds the rest of the line again.
                    self.line.truncate(if cursor == 0 { carried } else { 0 });
                    return Ok(Feed::fragment(cursor, fragment));
                }
            }
        }

        let tail = &chunk[cursor..];
        self.line.try_reserve(tail.len())?;
        self.line.extend_from_slice(tail);
        self.line.drain(..line_start);
        Ok(Feed::pending(chunk.len()))
    }

    fn flush(&mut self) -> Result<Option<Fragment>, TryReserveError> {
        if !self.line.is_empty() {
            match self.complete_line(0)? {
                Step::Emit(fragment) => {
                    self.line.clear();
                    return Ok(Some(fragment));
                }
                // The dangling line stays buffered and is flushed by the next call.
                Step::HandOff(fragment) => return Ok(Some(fragment)),
                Step::Absorbed => {}
            }
        }

        let fragment = match self.block.open {
            Some(kind) => Some(self.block.close(kind)?),
            None => None,
        };
        self.line.clear();
        Ok(fragment)
    }

    /// Classifies `self.line[start..]` as one complete line.
    fn complete_line(&mut self, start: usize) -> Result<Step, TryReserveError> {
        let raw = &self.line[start..];
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let text = String::from_utf8_lossy(raw);
        self.block.accept(&text)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            open: self.block.open,
            line_len: self.line.len(),
            scratch: self.block.scratch.mark(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        log::debug!("allocation failed, rewinding parser state");
        self.line.truncate(checkpoint.line_len);
        self.block.open = checkpoint.open;
        self.block.scratch.rewind(checkpoint.scratch);
    }
}
