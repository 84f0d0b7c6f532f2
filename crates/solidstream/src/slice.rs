use core::fmt;

use crate::{error::StreamError, stream::BufferedStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Advancing { position: usize },
    Done,
}

/// A strided walk over part of a [`BufferedStream`].
///
/// Positions are absolute indices into the stream as it was when the view
/// was created. A non-consuming view re-reads those positions and leaves the
/// stream untouched apart from extending its buffer. A consuming view removes
/// everything up to and including each element it yields.
///
/// The view ends when the next position reaches `stop` or the stream runs out
/// of elements. Any other error is yielded once, after which the view is
/// done.
pub struct SliceView<'s, 'a, T> {
    stream: &'s mut BufferedStream<'a, T>,
    start: usize,
    stop: Option<usize>,
    step: usize,
    consuming: bool,
    // Elements this view has removed from the head of the stream.
    consumed: usize,
    state: State,
}

impl<'s, 'a, T: 'a> SliceView<'s, 'a, T> {
    pub(crate) fn new(
        stream: &'s mut BufferedStream<'a, T>,
        start: usize,
        stop: Option<usize>,
        step: usize,
        consuming: bool,
    ) -> Self {
        assert!(step > 0, "slice step cannot be zero");
        Self {
            stream,
            start,
            stop,
            step,
            consuming,
            consumed: 0,
            state: State::NotStarted,
        }
    }

    fn read(&mut self, index: usize) -> Result<T, StreamError>
    where
        T: Clone,
    {
        if self.consuming {
            let value = self.stream.take_at(index - self.consumed)?;
            self.consumed = index + 1;
            Ok(value)
        } else {
            self.stream.get(index).cloned()
        }
    }
}

impl<'a, T: Clone + 'a> Iterator for SliceView<'_, 'a, T> {
    type Item = Result<T, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        let target = match self.state {
            State::NotStarted => self.start,
            State::Advancing { position } => position.checked_add(self.step)?,
            State::Done => return None,
        };
        if self.stop.is_some_and(|stop| target >= stop) {
            self.state = State::Done;
            return None;
        }

        match self.read(target) {
            Ok(value) => {
                self.state = State::Advancing { position: target };
                Some(Ok(value))
            }
            Err(StreamError::IndexOutOfRange { .. }) => {
                self.state = State::Done;
                None
            }
            Err(err) => {
                self.state = State::Done;
                Some(Err(err))
            }
        }
    }
}

impl<T> fmt::Debug for SliceView<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceView")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .field("step", &self.step)
            .field("consuming", &self.consuming)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
