use std::{
    collections::TryReserveError,
    fmt::{self, Debug, Formatter},
};

/// Error returned when trying to read from an empty queue.
#[derive(Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("queue is empty")]
pub struct EmptyQueueError(());

impl Debug for EmptyQueueError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "EmptyQueueError")
    }
}

impl EmptyQueueError {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Error returned when a push needed a new block and the allocator could not provide one.
///
/// The queue is left exactly as it was before the push, and the rejected value
/// can be recovered with [`into_inner`](Self::into_inner).
#[derive(Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to allocate a new queue block")]
pub struct AllocError<T> {
    value: T,
    #[source]
    source: TryReserveError,
}

impl<T> AllocError<T> {
    pub(crate) const fn new(value: T, source: TryReserveError) -> Self {
        Self { value, source }
    }

    /// Returns the value that could not be pushed.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Returns the underlying allocation error.
    pub fn reserve_error(&self) -> &TryReserveError {
        &self.source
    }
}

// Not derived, so that `T` is not required to be `Debug`.
impl<T> Debug for AllocError<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("AllocError")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Any failure a queue operation can report, without the rejected value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error(transparent)]
    Empty(#[from] EmptyQueueError),
    #[error("failed to allocate a new queue block")]
    Alloc(#[source] TryReserveError),
}

impl<T> From<AllocError<T>> for QueueError {
    fn from(err: AllocError<T>) -> Self {
        Self::Alloc(err.source)
    }
}
