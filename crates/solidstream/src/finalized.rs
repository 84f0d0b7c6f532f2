use alloc::collections::{VecDeque, vec_deque};
use core::{
    fmt,
    iter::{Chain, Flatten},
};

use crate::stream::Source;

/// The remainder of a [`BufferedStream`](crate::BufferedStream) after
/// [`finalize`](crate::BufferedStream::finalize): the buffered elements
/// followed by every queued source, in order.
pub struct Finalized<'a, T> {
    inner: Chain<vec_deque::IntoIter<T>, Flatten<vec_deque::IntoIter<Source<'a, T>>>>,
}

impl<'a, T> Finalized<'a, T> {
    pub(crate) fn new(buffer: VecDeque<T>, pending: VecDeque<Source<'a, T>>) -> Self {
        Self {
            inner: buffer.into_iter().chain(pending.into_iter().flatten()),
        }
    }
}

impl<T> Iterator for Finalized<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> fmt::Debug for Finalized<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finalized").finish_non_exhaustive()
    }
}
