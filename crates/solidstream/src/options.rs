/// Buffering policy for a [`BufferedStream`](crate::BufferedStream).
///
/// # Examples
///
/// ```rust
/// use solidstream::{BufferedStream, StreamOptions};
///
/// let options = StreamOptions {
///     default_capacity: 16,
///     hard_limit: Some(4096),
///     ..Default::default()
/// };
/// let stream = BufferedStream::new(0..10_000, options);
/// assert_eq!(stream.buffered_len(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamOptions {
    /// Minimum buffer length targeted by every extension.
    ///
    /// Small requests are rounded up to this length so that repeated
    /// look-ahead near the head of the stream does not pull one element at a
    /// time. Searches also grow the buffer in steps of this size.
    ///
    /// # Default
    ///
    /// `200`
    pub default_capacity: usize,

    /// Factor applied to an index before extending for a point read.
    ///
    /// Reading index `i` asks for `i * growth_multiplier` buffered elements,
    /// so that later reads a little further ahead are already materialized.
    ///
    /// # Default
    ///
    /// `5`
    pub growth_multiplier: usize,

    /// Largest over-fetch allowed for an amortized request.
    ///
    /// When the amortized request would pull more than this many elements,
    /// the stream falls back to the caller's true minimum instead.
    ///
    /// # Default
    ///
    /// `1000`
    pub soft_limit: usize,

    /// Absolute ceiling on the number of elements a single extension may
    /// pull. Exceeding it fails with
    /// [`StreamError::RequestTooLarge`](crate::StreamError::RequestTooLarge).
    ///
    /// # Default
    ///
    /// `None` (no limit)
    pub hard_limit: Option<usize>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            default_capacity: 200,
            growth_multiplier: 5,
            soft_limit: 1000,
            hard_limit: None,
        }
    }
}
