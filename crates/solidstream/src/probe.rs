use core::iter::FusedIterator;

/// Outcome of [`probe`]: either the source had nothing left, or the element
/// pulled to find out together with the rest of the source.
#[derive(Debug)]
pub enum Probe<I: Iterator> {
    /// The source signalled end-of-sequence.
    Exhausted(I),
    /// The source yielded a value; the remainder follows it.
    HasNext(I::Item, I),
}

impl<I: Iterator> Probe<I> {
    /// Whether the probed source was empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Probe::Exhausted(_))
    }

    /// Rebuild a source that reproduces the original sequence exactly.
    #[must_use]
    pub fn into_source(self) -> PushedBack<I> {
        match self {
            Probe::Exhausted(rest) => PushedBack { front: None, rest },
            Probe::HasNext(value, rest) => PushedBack {
                front: Some(value),
                rest,
            },
        }
    }
}

/// Test whether `source` has more elements by pulling at most one.
///
/// The pulled element is never lost: [`Probe::into_source`] pushes it back in
/// front of the remaining sequence.
///
/// ```rust
/// use solidstream::probe;
///
/// let probed = probe([1, 2, 3].into_iter());
/// assert!(!probed.is_exhausted());
/// assert_eq!(probed.into_source().collect::<Vec<_>>(), [1, 2, 3]);
///
/// assert!(probe(core::iter::empty::<u8>()).is_exhausted());
/// ```
pub fn probe<I: Iterator>(mut source: I) -> Probe<I> {
    match source.next() {
        Some(value) => Probe::HasNext(value, source),
        None => Probe::Exhausted(source),
    }
}

/// A source with room for one element pushed back in front of it.
#[derive(Debug, Clone)]
pub struct PushedBack<I: Iterator> {
    front: Option<I::Item>,
    rest: I,
}

impl<I: Iterator> PushedBack<I> {
    pub(crate) fn new(rest: I) -> Self {
        Self { front: None, rest }
    }

    /// In-place form of [`probe`]. At most one element is pulled from the
    /// inner source and it is held in front until the next call to `next`.
    pub fn is_exhausted(&mut self) -> bool {
        if self.front.is_some() {
            return false;
        }
        match probe(&mut self.rest) {
            Probe::Exhausted(_) => true,
            Probe::HasNext(value, _) => {
                self.front = Some(value);
                false
            }
        }
    }
}

impl<I: Iterator> Iterator for PushedBack<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.front.take().or_else(|| self.rest.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let extra = usize::from(self.front.is_some());
        let (lower, upper) = self.rest.size_hint();
        (
            lower.saturating_add(extra),
            upper.and_then(|bound| bound.checked_add(extra)),
        )
    }
}

impl<I: FusedIterator> FusedIterator for PushedBack<I> {}
