use std::collections::TryReserveError;

/// Errors reported by [`Parser::feed`](crate::Parser::feed) and
/// [`Parser::finalize`](crate::Parser::finalize).
///
/// Input itself can never be rejected: every byte sequence is some gemtext.
/// The only failure is running out of memory, after which the parser is back
/// in the state it had before the failing call.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("out of memory while parsing: {0}")]
    OutOfMemory(#[from] TryReserveError),
}
