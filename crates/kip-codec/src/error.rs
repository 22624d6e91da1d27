use thiserror::Error;

/// Errors produced while encoding or decoding a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
