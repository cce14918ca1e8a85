//! Error type shared by the encoder and decoder wrappers.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OpusError>;

#[derive(Error, Debug)]
pub enum OpusError {
    #[error("opus: encoder create failed: {0}")]
    EncoderCreate(String),

    #[error("opus: decoder create failed: {0}")]
    DecoderCreate(String),

    #[error("opus: encode failed: {0}")]
    Encode(String),

    #[error("opus: decode failed: {0}")]
    Decode(String),

    #[error("opus: set option failed: {0}")]
    SetOption(String),

    #[error("opus: buffer holds {len} elements, operation needs {needed}")]
    ShortBuffer { needed: usize, len: usize },
}
