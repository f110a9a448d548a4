use gemstream_syntax::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("index {index} is out of bounds for a document of {len} fragments")]
    OutOfBounds { index: usize, len: usize },
}
