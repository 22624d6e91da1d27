use thiserror::Error;

/// Errors from setting up a file watch.
///
/// Reading a watched file never fails; only configuration can.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WatchResult<T> = Result<T, WatchError>;
