use std::io::{ErrorKind, Read};

use gemstream_syntax::{Fragment, Parser};

use crate::document::DEFAULT_CHUNK_SIZE;
use crate::error::DocumentError;

/// Pulls fragments out of a reader as soon as the parser completes them.
///
/// Each read fills one chunk; the chunk is fed until the parser has consumed
/// all of it, then the next read happens. After the reader reports end of
/// input the trailing fragments are drained from [`Parser::finalize`].
///
/// A read error ends the iteration. A parse error does not: the parser is
/// left as it was before the failing call, so calling `next` again retries.
pub struct FragmentStream<R> {
    reader: R,
    parser: Parser,
    buffer: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
    done: bool,
}

impl<R: Read> FragmentStream<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// A zero chunk size is treated as one byte.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            parser: Parser::new(),
            buffer: vec![0; chunk_size.max(1)],
            start: 0,
            end: 0,
            eof: false,
            done: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for FragmentStream<R> {
    type Item = Result<Fragment, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.start < self.end {
                match self.parser.feed(&self.buffer[self.start..self.end]) {
                    Ok(feed) => {
                        self.start += feed.consumed;
                        if let Some(fragment) = feed.fragment {
                            return Some(Ok(fragment));
                        }
                        continue;
                    }
                    Err(e) => return Some(Err(e.into())),
                }
            }

            if self.eof {
                return match self.parser.finalize() {
                    Ok(Some(fragment)) => Some(Ok(fragment)),
                    Ok(None) => {
                        self.done = true;
                        None
                    }
                    Err(e) => Some(Err(e.into())),
                };
            }

            match self.reader.read(&mut self.buffer) {
                Ok(0) => self.eof = true,
                Ok(n) => {
                    log::trace!("read {n} byte chunk");
                    self.start = 0;
                    self.end = n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
