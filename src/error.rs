//! Error types for cellterm.

use std::io;
use std::path::PathBuf;

/// Result type alias for cellterm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cellterm operations.
///
/// Source errors (missing or malformed terminal descriptions) are returned by
/// the individual readers. [`CapabilitySet::load`](crate::CapabilitySet::load)
/// recovers from them with the bundled fallback entry unless fallback was
/// disabled.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from reading a description or writing to the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No terminfo file or termcap entry exists for the terminal name.
    #[error("no terminal description found for {term:?}")]
    NotFound { term: String },

    /// A terminfo file is not readable at the given path.
    #[error("cannot read terminfo file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The binary header declares a magic number we do not understand.
    #[error("bad terminfo magic number {0:#o}")]
    BadMagic(u16),

    /// A header count is negative or otherwise unusable.
    #[error("invalid terminfo header field {field}: {value}")]
    InvalidHeader { field: &'static str, value: i32 },

    /// A declared section runs past the end of the buffer.
    #[error("terminfo {section} section truncated: need {needed} bytes, have {available}")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    /// A termcap entry could not be parsed.
    #[error("invalid termcap entry at line {line}: {reason}")]
    InvalidTermcap { line: usize, reason: String },

    /// No description could be located and fallback was disabled.
    #[error("no usable terminal description source for {term:?}")]
    NoSource { term: String },

    /// Buffer dimension error (e.g., zero width/height).
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
}
