use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use gemstream_syntax::Fragment;

use crate::error::DocumentError;
use crate::render::{self, Format};
use crate::stream::FragmentStream;

/// Bytes requested from the reader per `read` call unless told otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// An ordered sequence of fragments that owns every fragment in it.
///
/// Fragments move in on [`insert`](Self::insert)/[`append`](Self::append) and
/// back out on [`remove`](Self::remove); dropping the document drops whatever
/// is left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fragments: Vec<Fragment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Parses everything `reader` yields, in [`DEFAULT_CHUNK_SIZE`] reads.
    pub fn parse<R: Read>(reader: R) -> Result<Self, DocumentError> {
        Self::parse_with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    pub fn parse_with_chunk_size<R: Read>(
        reader: R,
        chunk_size: usize,
    ) -> Result<Self, DocumentError> {
        let fragments = FragmentStream::with_chunk_size(reader, chunk_size)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "parsed document of {} fragments (chunk size {chunk_size})",
            fragments.len()
        );
        Ok(Self { fragments })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        Self::parse(bytes)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        Self::parse(File::open(path)?)
    }

    /// Places `fragment` before the one currently at `index`. `index == len`
    /// appends.
    pub fn insert(&mut self, index: usize, fragment: Fragment) -> Result<(), DocumentError> {
        let len = self.fragments.len();
        if index > len {
            return Err(DocumentError::OutOfBounds { index, len });
        }
        self.fragments.insert(index, fragment);
        Ok(())
    }

    pub fn append(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Takes the fragment at `index` out of the document.
    pub fn remove(&mut self, index: usize) -> Result<Fragment, DocumentError> {
        let len = self.fragments.len();
        if index >= len {
            return Err(DocumentError::OutOfBounds { index, len });
        }
        Ok(self.fragments.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    pub fn render<W: Write>(&self, format: Format, out: &mut W) -> io::Result<()> {
        render::render(format, &self.fragments, out)
    }
}

impl From<Vec<Fragment>> for Document {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::from_fragments(fragments)
    }
}

impl FromIterator<Fragment> for Document {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self::from_fragments(iter.into_iter().collect())
    }
}

impl IntoIterator for Document {
    type Item = Fragment;
    type IntoIter = std::vec::IntoIter<Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
