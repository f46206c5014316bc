//! Errors surfaced by the one fallible entry point in this crate.
//!
//! Everything else treats misuse as a contract violation (see the crate's
//! design notes) and panics; decoding untrusted bytes as UTF-8 is ordinary
//! fallible input handling, not a programming error, so it gets a real
//! error type instead.

use thiserror::Error;

/// Failure decoding a byte sequence as UTF-8 text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RopeError {
    /// The input contained a byte sequence that is not valid UTF-8.
    #[error("invalid UTF-8 sequence starting at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },
}
