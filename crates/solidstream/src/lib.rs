//! Random access over single-pass iterators.
//!
//! A [`BufferedStream`] queues one or more forward-only sources and pulls
//! from them on demand into a materialized prefix buffer. Callers can then
//! index, peek, slice and search the logical sequence without consuming it,
//! drop a prefix explicitly with [`BufferedStream::consume`], and finally
//! hand the remainder off as a plain iterator with
//! [`BufferedStream::finalize`].
//!
//! ```rust
//! use solidstream::{BufferedStream, StreamOptions};
//!
//! let mut stream = BufferedStream::new(0..300, StreamOptions::default());
//! assert_eq!(stream.get(30), Ok(&30));
//!
//! let every_third: Vec<i32> = stream.collect_slice(0..20, 3).unwrap();
//! assert_eq!(every_third, [0, 3, 6, 9, 12, 15, 18]);
//!
//! // Nothing above consumed the stream.
//! assert_eq!(stream.peek(), Ok(&0));
//! stream.consume(30).unwrap();
//! assert_eq!(stream.peek(), Ok(&30));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod finalized;
mod options;
mod probe;
mod slice;
mod stream;

#[cfg(test)]
mod tests;

pub use error::StreamError;
pub use finalized::Finalized;
pub use options::StreamOptions;
pub use probe::{Probe, PushedBack, probe};
pub use slice::SliceView;
pub use stream::BufferedStream;
