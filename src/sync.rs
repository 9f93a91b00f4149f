//! Thread-safe queue: a [`RawQueue`] behind a single mutex.
//!
//! Every operation holds the lock for its whole body and never calls another
//! locking operation while holding it. Operations are linearized in lock
//! acquisition order, so FIFO order holds across threads. There is no timeout;
//! a caller waiting on the lock blocks until it is released.

use std::fmt::{self, Debug, Formatter};

use parking_lot::Mutex;

use crate::{AllocError, EmptyQueueError, RawQueue, DEFAULT_BLOCK_CAPACITY};

/// A FIFO queue of blocks of `BLOCK` slots, shareable between threads.
///
/// # Examples
/// ```
/// # use block_queue::BlockQueue;
/// let queue = BlockQueue::<_, 4>::new();
/// for value in [10, 20, 30, 40, 50] {
///     queue.push(value);
/// }
/// assert_eq!(queue.len(), 5);
/// assert_eq!(queue.front(), Ok(10));
/// for expected in [10, 20, 30, 40, 50] {
///     assert_eq!(queue.pop(), Ok(expected));
/// }
/// assert!(queue.is_empty());
/// ```
pub struct BlockQueue<T, const BLOCK: usize = DEFAULT_BLOCK_CAPACITY> {
    inner: Mutex<RawQueue<T, BLOCK>>,
}

impl<T, const BLOCK: usize> Default for BlockQueue<T, BLOCK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const BLOCK: usize> BlockQueue<T, BLOCK> {
    /// Creates a new empty queue holding a single block.
    pub fn new() -> Self {
        Self::from(RawQueue::new())
    }

    /// Adds an item to the end of the queue, growing it if necessary.
    ///
    /// # Panics
    /// Panics if a new block is needed and cannot be allocated. The lock is released first.
    #[track_caller]
    pub fn push(&self, item: T) {
        if let Err(err) = self.try_push(item) {
            panic!("{}: {:?}", err, err.reserve_error());
        }
    }

    /// Tries to add an item to the end of the queue.
    ///
    /// On allocation failure, the queue is unchanged and the item is returned inside the error.
    pub fn try_push(&self, item: T) -> Result<(), AllocError<T>> {
        self.inner.lock().try_push(item)
    }

    /// Removes the first item from the queue and returns it.
    pub fn pop(&self) -> Result<T, EmptyQueueError> {
        self.inner.lock().pop()
    }

    /// Calls `f` with a reference to the first item, without removing it.
    ///
    /// The lock is held while `f` runs, so `f` must not use this queue.
    ///
    /// # Examples
    /// ```
    /// # use block_queue::BlockQueue;
    /// let queue = BlockQueue::<String, 8>::new();
    /// assert!(queue.with_front(String::len).is_err());
    /// queue.push("hello".to_owned());
    /// assert_eq!(queue.with_front(String::len), Ok(5));
    /// ```
    pub fn with_front<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, EmptyQueueError> {
        self.inner.lock().front().map(f)
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the number of items in the queue.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns the number of blocks currently allocated.
    pub fn block_count(&self) -> usize {
        self.inner.lock().block_count()
    }

    /// Drops every item and every block, leaving the queue as if freshly created.
    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Returns a mutable reference to the underlying queue. No locking is needed,
    /// since the exclusive borrow guarantees no other access.
    pub fn get_mut(&mut self) -> &mut RawQueue<T, BLOCK> {
        self.inner.get_mut()
    }

    /// Consumes the lock, returning the underlying queue.
    pub fn into_inner(self) -> RawQueue<T, BLOCK> {
        self.inner.into_inner()
    }
}

impl<T: Clone, const BLOCK: usize> BlockQueue<T, BLOCK> {
    /// Returns a copy of the first item, without removing it.
    pub fn front(&self) -> Result<T, EmptyQueueError> {
        self.inner.lock().front().cloned()
    }

    /// Copies the contents of the queue into a `Vec`, front first.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.lock().to_vec()
    }
}

impl<T, const BLOCK: usize> From<RawQueue<T, BLOCK>> for BlockQueue<T, BLOCK> {
    fn from(queue: RawQueue<T, BLOCK>) -> Self {
        Self {
            inner: Mutex::new(queue),
        }
    }
}

impl<T, const BLOCK: usize> FromIterator<T> for BlockQueue<T, BLOCK> {
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(RawQueue::from_iter(iter))
    }
}

impl<T: Debug, const BLOCK: usize> Debug for BlockQueue<T, BLOCK> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.inner.try_lock() {
            Some(queue) => f.debug_tuple("BlockQueue").field(&*queue).finish(),
            None => f.write_str("BlockQueue(<locked>)"),
        }
    }
}
