//! Error type shared by every stage of the huffzip codec.

use std::io;

use thiserror::Error;

/// Everything that can go wrong while compressing or decompressing.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The source could not be read.
    #[error("unable to read input: {0}")]
    InputRead(#[source] io::Error),

    /// The compressed stream is not laid out the way the compressor writes it.
    #[error("invalid compressed data: {0}")]
    Format(String),

    /// The sink rejected a write.
    #[error("unable to write output: {0}")]
    OutputWrite(#[source] io::Error),

    /// A symbol occurs more often than a 4 byte header count can hold.
    #[error("symbol {symbol:#04x} occurs {count} times, more than a header count can hold")]
    CountOverflow { symbol: u8, count: u64 },
}

impl HuffError {
    /// Convenience constructor for format errors.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        HuffError::Format(msg.into())
    }
}
