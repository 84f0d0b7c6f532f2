use thiserror::Error;

/// Errors raised by [`BufferedStream`](crate::BufferedStream) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// An extension needed more elements than the configured hard limit.
    #[error("request for {needed} elements exceeds hard limit of {hard_limit}")]
    RequestTooLarge {
        /// Elements the extension would have had to pull.
        needed: usize,
        /// The configured ceiling.
        hard_limit: usize,
    },
    /// A search drained every source without a match.
    #[error("value not found in stream")]
    NotFound,
    /// The sources ran dry before the requested index could be buffered.
    #[error("index {index} out of range, only {available} elements available")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Buffer length once every source was drained.
        available: usize,
    },
}
