use std::collections::TryReserveError;
use std::ops::Range;

use crate::fragment::{TextLines, try_to_owned};

/// Reusable storage for the lines of the block that is currently open.
///
/// All lines live back to back in one `String`; `lines` holds their byte
/// spans. Clearing keeps both allocations, so a long document with many small
/// blocks settles on a single pair of buffers.
#[derive(Debug, Default)]
pub(crate) struct BlockScratch {
    text: String,
    lines: Vec<Range<usize>>,
    alt_text: Option<Range<usize>>,
}

/// Lengths to rewind a [`BlockScratch`] to.
#[derive(Debug, Clone)]
pub(crate) struct ScratchMark {
    text_len: usize,
    line_count: usize,
    alt_text: Option<Range<usize>>,
}

impl BlockScratch {
    pub(crate) fn push_line(&mut self, line: &str) -> Result<(), TryReserveError> {
        self.text.try_reserve(line.len())?;
        self.lines.try_reserve(1)?;
        let start = self.text.len();
        self.text.push_str(line);
        self.lines.push(start..self.text.len());
        Ok(())
    }

    pub(crate) fn set_alt_text(&mut self, alt_text: Option<&str>) -> Result<(), TryReserveError> {
        let Some(alt_text) = alt_text else {
            self.alt_text = None;
            return Ok(());
        };
        self.text.try_reserve(alt_text.len())?;
        let start = self.text.len();
        self.text.push_str(alt_text);
        self.alt_text = Some(start..self.text.len());
        Ok(())
    }

    pub(crate) fn alt_text(&self) -> Option<&str> {
        self.alt_text.clone().map(|span| &self.text[span])
    }

    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|span| &self.text[span.clone()])
    }

    /// Copies the buffered lines into freshly allocated, caller-owned storage.
    pub(crate) fn to_text_lines(&self) -> Result<TextLines, TryReserveError> {
        let mut lines = TextLines::try_with_capacity(self.lines.len())?;
        for line in self.lines() {
            lines.try_push(line)?;
        }
        Ok(lines)
    }

    pub(crate) fn to_alt_text(&self) -> Result<Option<String>, TryReserveError> {
        self.alt_text().map(try_to_owned).transpose()
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.lines.clear();
        self.alt_text = None;
    }

    pub(crate) fn mark(&self) -> ScratchMark {
        ScratchMark {
            text_len: self.text.len(),
            line_count: self.lines.len(),
            alt_text: self.alt_text.clone(),
        }
    }

    pub(crate) fn rewind(&mut self, mark: ScratchMark) {
        self.text.truncate(mark.text_len);
        self.lines.truncate(mark.line_count);
        self.alt_text = mark.alt_text;
    }
}
