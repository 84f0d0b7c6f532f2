use alloc::{boxed::Box, collections::VecDeque};
use core::{
    fmt,
    ops::{Bound, RangeBounds},
};

use log::{debug, trace};

use crate::{
    error::StreamError, finalized::Finalized, options::StreamOptions, probe::PushedBack,
    slice::SliceView,
};

/// A queued source. The push-back slot lets the stream test for exhaustion
/// without losing the element it had to pull.
pub(crate) type Source<'a, T> = PushedBack<Box<dyn Iterator<Item = T> + 'a>>;

/// Random access over a queue of single-pass sources.
///
/// The stream keeps two views of one logical sequence: `buffer`, the prefix
/// already pulled into memory, and `pending`, the sources not yet drained.
/// Reads extend the buffer on demand; only [`consume`](Self::consume),
/// consuming slices and [`Iterator::next`] ever drop elements, and always
/// from the head.
pub struct BufferedStream<'a, T> {
    buffer: VecDeque<T>,
    pending: VecDeque<Source<'a, T>>,
    options: StreamOptions,
}

impl<'a, T: 'a> BufferedStream<'a, T> {
    /// Create a stream over `source`. Nothing is pulled until a read needs it.
    #[must_use]
    pub fn new<S>(source: S, options: StreamOptions) -> Self
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        let mut stream = Self {
            buffer: VecDeque::new(),
            pending: VecDeque::new(),
            options,
        };
        stream.extend(source);
        stream
    }

    fn source<S>(source: S) -> Source<'a, T>
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        PushedBack::new(Box::new(source.into_iter()))
    }

    /// The buffering policy this stream was built with.
    #[must_use]
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Number of elements currently materialized.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of sources still queued behind the buffer.
    #[must_use]
    pub fn pending_sources(&self) -> usize {
        self.pending.len()
    }

    /// Queue `source` after everything already in the stream.
    pub fn extend<S>(&mut self, source: S)
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        self.pending.push_back(Self::source(source));
    }

    /// Queue `source` in front of every element not yet consumed.
    ///
    /// Buffered elements are moved back into a queued source so that the
    /// buffer remains a prefix of the logical sequence.
    pub fn extend_front<S>(&mut self, source: S)
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        if !self.buffer.is_empty() {
            let spilled = core::mem::take(&mut self.buffer);
            self.pending.push_front(Self::source(spilled));
        }
        self.pending.push_front(Self::source(source));
    }

    /// Add a single value at the end of the stream.
    pub fn append(&mut self, value: T) {
        self.extend(core::iter::once(value));
    }

    /// Insert `value` at `index`, materializing the stream up to `index`
    /// first. Elements at `index` and beyond shift up by one.
    ///
    /// # Errors
    ///
    /// [`StreamError::IndexOutOfRange`] if the sources end before `index`,
    /// or [`StreamError::RequestTooLarge`] if reaching it breaks the hard
    /// limit.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), StreamError> {
        self.ensure_length(index, None)?;
        let available = self.buffer.len();
        if index > available {
            return Err(StreamError::IndexOutOfRange { index, available });
        }
        self.buffer.insert(index, value);
        Ok(())
    }

    /// Grow the buffer towards `target_length` elements.
    ///
    /// The target is rounded up to `default_capacity`. When reaching it would
    /// pull more than `soft_limit` elements and `min_length` is given, only
    /// `min_length` is guaranteed instead. Returns `Ok(false)` if the sources
    /// ran dry first; everything pulled so far stays buffered.
    ///
    /// # Errors
    ///
    /// [`StreamError::RequestTooLarge`] if the extension would pull more than
    /// `hard_limit` elements. Nothing is pulled in that case.
    pub fn ensure_length(
        &mut self,
        target_length: usize,
        min_length: Option<usize>,
    ) -> Result<bool, StreamError> {
        let StreamOptions {
            default_capacity,
            soft_limit,
            hard_limit,
            ..
        } = self.options;

        let mut target = target_length.max(default_capacity);
        if let Some(min_length) = min_length {
            target = target.max(min_length);
        }
        let mut needed = target.saturating_sub(self.buffer.len());

        if let Some(min_length) = min_length {
            if needed > soft_limit {
                debug!("request for {needed} exceeds soft limit {soft_limit}, narrowing to {min_length}");
                target = min_length;
                needed = target.saturating_sub(self.buffer.len());
            }
        }

        if let Some(hard_limit) = hard_limit {
            if needed > hard_limit {
                return Err(StreamError::RequestTooLarge { needed, hard_limit });
            }
        }

        while needed > 0 {
            let Some(source) = self.pending.front_mut() else {
                return Ok(false);
            };
            let before = self.buffer.len();
            self.buffer.extend(source.by_ref().take(needed));
            let pulled = self.buffer.len() - before;
            trace!("pulled {pulled} of {needed} elements");

            if pulled < needed {
                debug!("source exhausted, {} left queued", self.pending.len() - 1);
                self.pending.pop_front();
            }
            needed = target.saturating_sub(self.buffer.len());
        }
        Ok(true)
    }

    /// Drop the first `n` elements, returning how many were removed.
    ///
    /// Fewer than `n` are removed only when the stream holds fewer.
    ///
    /// # Errors
    ///
    /// [`StreamError::RequestTooLarge`] if materializing `n` elements breaks
    /// the hard limit.
    pub fn consume(&mut self, n: usize) -> Result<usize, StreamError> {
        self.ensure_length(n, None)?;
        let removed = n.min(self.buffer.len());
        self.buffer.drain(..removed);
        Ok(removed)
    }

    /// Read the element at `index` without consuming anything.
    ///
    /// # Errors
    ///
    /// [`StreamError::IndexOutOfRange`] if the stream ends before `index`,
    /// or [`StreamError::RequestTooLarge`] under the hard limit.
    pub fn get(&mut self, index: usize) -> Result<&T, StreamError> {
        let target = index.saturating_mul(self.options.growth_multiplier);
        self.ensure_length(target, Some(index.saturating_add(1)))?;
        let available = self.buffer.len();
        self.buffer
            .get(index)
            .ok_or(StreamError::IndexOutOfRange { index, available })
    }

    /// Read the first element without consuming it.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn peek(&mut self) -> Result<&T, StreamError> {
        self.get(0)
    }

    /// Remove and return the element at `index`, dropping everything before
    /// it as well.
    pub(crate) fn take_at(&mut self, index: usize) -> Result<T, StreamError> {
        self.get(index)?;
        self.buffer.drain(..index);
        let available = self.buffer.len();
        self.buffer
            .pop_front()
            .ok_or(StreamError::IndexOutOfRange { index, available })
    }

    /// Index of the first element matching `predicate` within
    /// `start..stop`, extending the buffer by `default_capacity` elements (at
    /// least one) at a time until a match is found or the sources run out.
    ///
    /// # Errors
    ///
    /// [`StreamError::NotFound`] if nothing in range matches, or
    /// [`StreamError::RequestTooLarge`] under the hard limit.
    pub fn find_index<F>(
        &mut self,
        mut predicate: F,
        start: usize,
        stop: Option<usize>,
    ) -> Result<usize, StreamError>
    where
        F: FnMut(&T) -> bool,
    {
        let batch = self.options.default_capacity.max(1);
        let mut from = start;
        loop {
            let searched = self.buffer.len();
            let end = stop.map_or(searched, |stop| stop.min(searched));
            if let Some(offset) = self.buffer.range(from.min(end)..end).position(&mut predicate) {
                return Ok(from + offset);
            }
            if stop.is_some_and(|stop| stop <= searched) {
                return Err(StreamError::NotFound);
            }

            from = from.max(searched);
            self.ensure_length(searched + batch, None)?;
            if self.buffer.len() == searched {
                return Err(StreamError::NotFound);
            }
        }
    }

    /// Index of the first element equal to `value` within `start..stop`.
    ///
    /// Values that are not equal to themselves, such as a floating-point
    /// NaN, match any element that is likewise unequal to itself.
    ///
    /// # Errors
    ///
    /// Same as [`find_index`](Self::find_index).
    pub fn index_of(
        &mut self,
        value: &T,
        start: usize,
        stop: Option<usize>,
    ) -> Result<usize, StreamError>
    where
        T: PartialEq,
    {
        if is_unordered(value) {
            self.find_index(is_unordered, start, stop)
        } else {
            self.find_index(|item| item == value, start, stop)
        }
    }

    /// A non-consuming view over `range`, stepping by `step`.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn slice<R>(&mut self, range: R, step: usize) -> SliceView<'_, 'a, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, stop) = bounds(&range);
        SliceView::new(self, start, stop, step, false)
    }

    /// A view over `range` that removes elements from the stream as it
    /// advances, including the ones it steps over.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn slice_consuming<R>(&mut self, range: R, step: usize) -> SliceView<'_, 'a, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, stop) = bounds(&range);
        SliceView::new(self, start, stop, step, true)
    }

    /// Materialize a non-consuming slice into any collection.
    ///
    /// # Errors
    ///
    /// [`StreamError::RequestTooLarge`] if the slice breaks the hard limit.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn collect_slice<C, R>(&mut self, range: R, step: usize) -> Result<C, StreamError>
    where
        C: FromIterator<T>,
        R: RangeBounds<usize>,
        T: Clone,
    {
        self.slice(range, step).collect()
    }

    /// Whether no element is left, buffered or queued. Probing a source may
    /// pull one element, which is held back for later reads.
    pub fn is_exhausted(&mut self) -> bool {
        if !self.buffer.is_empty() {
            return false;
        }
        while let Some(source) = self.pending.front_mut() {
            if !source.is_exhausted() {
                return false;
            }
            self.pending.pop_front();
        }
        true
    }

    /// Give up random access and turn the remaining elements, buffered then
    /// queued, into a plain iterator.
    #[must_use]
    pub fn finalize(self) -> Finalized<'a, T> {
        Finalized::new(self.buffer, self.pending)
    }
}

/// Consuming iteration: pops the buffer head, then pulls straight from the
/// queued sources once the buffer is empty.
impl<'a, T: 'a> Iterator for BufferedStream<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(value) = self.buffer.pop_front() {
            return Some(value);
        }
        while let Some(source) = self.pending.front_mut() {
            if let Some(value) = source.next() {
                return Some(value);
            }
            self.pending.pop_front();
        }
        None
    }
}

impl<T: fmt::Debug> fmt::Debug for BufferedStream<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedStream")
            .field("buffer", &self.buffer)
            .field("pending", &self.pending.len())
            .field("options", &self.options)
            .finish()
    }
}

#[allow(clippy::eq_op)]
fn is_unordered<T: PartialEq>(value: &T) -> bool {
    value != value
}

fn bounds<R: RangeBounds<usize>>(range: &R) -> (usize, Option<usize>) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let stop = match range.end_bound() {
        Bound::Included(&stop) => Some(stop.saturating_add(1)),
        Bound::Excluded(&stop) => Some(stop),
        Bound::Unbounded => None,
    };
    (start, stop)
}
