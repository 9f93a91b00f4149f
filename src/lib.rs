//! A FIFO queue backed by a circular list of fixed-capacity blocks.
//!
//! When the tail catches up with the head, a fresh block is inserted in front of the
//! head block. Only block pointers move, so growth costs O(blocks) instead of
//! O(elements), and push/pop stay amortized O(1).
//!
//! [`RawQueue`] is the unsynchronized structure. [`BlockQueue`] wraps it in a lock
//! and can be shared between threads.

mod block;
pub mod error;
pub mod iter;
mod pos;
pub mod sync;

use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
};

pub use self::{
    error::{AllocError, EmptyQueueError, QueueError},
    iter::{IntoIter, Iter},
    sync::BlockQueue,
};

use self::{block::Block, pos::Cursor};

/// Number of slots per block when no capacity is given.
pub const DEFAULT_BLOCK_CAPACITY: usize = 4096;

/// Unsynchronized FIFO queue storing items of type `T` in blocks of `BLOCK` slots.
pub struct RawQueue<T, const BLOCK: usize = DEFAULT_BLOCK_CAPACITY> {
    // Invariant: never empty, and every block has exactly `BLOCK` slots.
    // Slots from `head` up to (excluding) `tail` are `Some`, every other slot is `None`.
    blocks: Vec<Block<T>>,
    head: Cursor<BLOCK>,
    tail: Cursor<BLOCK>,
}

impl<T, const BLOCK: usize> Default for RawQueue<T, BLOCK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const BLOCK: usize> RawQueue<T, BLOCK> {
    /// Number of slots in every block.
    pub const BLOCK_CAPACITY: usize = {
        assert!(BLOCK > 0, "block capacity must be greater than 0");
        BLOCK
    };

    /// Creates a new empty queue holding a single block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(Self::BLOCK_CAPACITY)],
            head: Cursor::zero(),
            tail: Cursor::zero(),
        }
    }

    /// Returns the number of items in the queue.
    ///
    /// # Examples
    /// ```
    /// # use block_queue::RawQueue;
    /// let mut queue = RawQueue::<_, 2>::new();
    /// queue.extend([1, 2, 3]);
    /// assert_eq!(queue.len(), 3);
    /// queue.pop().unwrap();
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        Cursor::distance(&self.head, &self.tail, self.blocks.len())
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns the number of blocks currently allocated.
    ///
    /// The block list never shrinks until [`reset`](Self::reset).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the total number of slots across all blocks.
    pub fn capacity(&self) -> usize {
        self.blocks.len() * BLOCK
    }

    /// Returns a reference to the first item, or an error if the queue [is empty](Self::is_empty).
    ///
    /// # Examples
    /// ```
    /// # use block_queue::RawQueue;
    /// let mut queue = RawQueue::<_, 4>::new();
    /// assert!(queue.front().is_err());
    /// queue.push("a");
    /// queue.push("b");
    /// assert_eq!(queue.front(), Ok(&"a"));
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn front(&self) -> Result<&T, EmptyQueueError> {
        if self.is_empty() {
            return Err(EmptyQueueError::new());
        }
        self.blocks[self.head.block()]
            .get(self.head.offset())
            .ok_or(EmptyQueueError::new())
    }

    /// Returns a mutable reference to the first item, or an error if the queue [is empty](Self::is_empty).
    pub fn front_mut(&mut self) -> Result<&mut T, EmptyQueueError> {
        if self.is_empty() {
            return Err(EmptyQueueError::new());
        }
        self.blocks[self.head.block()]
            .get_mut(self.head.offset())
            .ok_or(EmptyQueueError::new())
    }

    /// Removes the first item from the queue and returns it, or an error if the queue [is empty](Self::is_empty).
    ///
    /// The slot the item occupied is cleared, so the queue does not keep it alive.
    ///
    /// # Examples
    /// ```
    /// # use block_queue::RawQueue;
    /// let mut queue = RawQueue::<_, 2>::new();
    /// assert!(queue.pop().is_err());
    /// queue.extend([0, 1, 2]);
    /// assert_eq!(queue.pop(), Ok(0));
    /// assert_eq!(queue.pop(), Ok(1));
    /// assert_eq!(queue.pop(), Ok(2));
    /// assert!(queue.pop().is_err());
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Result<T, EmptyQueueError> {
        if self.is_empty() {
            return Err(EmptyQueueError::new());
        }

        let item = self.blocks[self.head.block()]
            .take(self.head.offset())
            .ok_or(EmptyQueueError::new())?;
        self.head.advance(self.blocks.len());
        self.debug_check();
        Ok(item)
    }

    /// Tries to add an item to the end of the queue.
    ///
    /// If the item fills the last free slot before the head block, a new block is inserted
    /// in front of the head. When that block cannot be allocated, the queue is left untouched
    /// and the item is handed back inside the error.
    ///
    /// # Examples
    /// ```
    /// # use block_queue::RawQueue;
    /// let mut queue = RawQueue::<_, 2>::new();
    /// assert!(queue.try_push(1).is_ok());
    /// assert!(queue.try_push(2).is_ok());
    /// assert_eq!(queue.block_count(), 2);
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn try_push(&mut self, item: T) -> Result<(), AllocError<T>> {
        let blocks = self.blocks.len();
        let grows = self.tail.at_block_end() && self.tail.next_block(blocks) == self.head.block();

        // Everything that can fail happens before the first write.
        let spare = if grows {
            match self.reserve_block() {
                Ok(block) => Some(block),
                Err(err) => return Err(AllocError::new(item, err)),
            }
        } else {
            None
        };

        self.blocks[self.tail.block()].put(self.tail.offset(), item);
        self.tail.advance(blocks);

        if let Some(block) = spare {
            debug_assert_eq!(self.tail.block(), self.head.block());
            let at = self.head.block();
            self.blocks.insert(at, block);
            self.head.shift_block();
            tracing::debug!(
                target: "block_queue",
                blocks = self.blocks.len(),
                head_block = self.head.block(),
                block_capacity = BLOCK,
                "inserted block ahead of head"
            );
        }
        self.debug_check();
        Ok(())
    }

    /// Adds an item to the end of the queue, growing it if necessary.
    ///
    /// # Panics
    /// Panics if a new block is needed and cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// # use block_queue::RawQueue;
    /// let mut queue = RawQueue::<_, 4>::new();
    /// for i in 0..10 {
    ///     queue.push(i);
    /// }
    /// assert_eq!(queue.len(), 10);
    /// assert_eq!(queue.block_count(), 3);
    /// ```
    #[track_caller]
    #[inline]
    pub fn push(&mut self, item: T) {
        if let Err(err) = self.try_push(item) {
            panic!("{}: {:?}", err, err.reserve_error());
        }
    }

    /// Drops every item and every block, leaving the queue as if freshly created.
    ///
    /// # Examples
    /// ```
    /// # use block_queue::RawQueue;
    /// let mut queue = RawQueue::<_, 2>::from_iter([1, 2, 3, 4, 5]);
    /// assert_eq!(queue.block_count(), 3);
    /// queue.reset();
    /// assert!(queue.is_empty());
    /// assert_eq!(queue.block_count(), 1);
    /// ```
    pub fn reset(&mut self) {
        tracing::trace!(
            target: "block_queue",
            dropped_blocks = self.blocks.len(),
            "reset queue"
        );
        *self = Self::new();
    }

    /// Returns an iterator over the items in the queue, from front to back.
    pub fn iter(&self) -> Iter<'_, T, BLOCK> {
        Iter::new(&self.blocks, self.head, self.len())
    }

    /// Allocates a block and makes room for one more block pointer, without touching the queue.
    fn reserve_block(&mut self) -> Result<Block<T>, std::collections::TryReserveError> {
        let block = Block::try_new(Self::BLOCK_CAPACITY)?;
        self.blocks.try_reserve(1)?;
        Ok(block)
    }

    #[inline(always)]
    fn debug_check(&self) {
        debug_assert!(self.head.block() < self.blocks.len());
        debug_assert!(self.tail.block() < self.blocks.len());
        debug_assert!(
            self.head.block() != self.tail.block() || self.head.offset() <= self.tail.offset()
        );
    }
}

impl<T: Clone, const BLOCK: usize> RawQueue<T, BLOCK> {
    /// Copies the contents of the queue into a `Vec`, front first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone, const BLOCK: usize> Clone for RawQueue<T, BLOCK> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            head: self.head,
            tail: self.tail,
        }
    }
}

/// Pushes every item of the iterator, growing the queue as needed.
///
/// # Panics
/// Panics if a new block cannot be allocated.
///
/// # Examples
/// ```
/// # use block_queue::RawQueue;
/// let mut queue = RawQueue::<_, 2>::new();
/// queue.extend([0, 1]);
/// queue.extend([2, 3]);
/// assert_eq!(queue, [0, 1, 2, 3]);
/// ```
impl<T, const BLOCK: usize> Extend<T> for RawQueue<T, BLOCK> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// # Examples
/// ```
/// # use block_queue::RawQueue;
/// let queue: RawQueue<_, 3> = (0..5).collect();
/// assert_eq!(queue.len(), 5);
/// assert!(queue.iter().eq(&[0, 1, 2, 3, 4]));
/// ```
impl<T, const BLOCK: usize> FromIterator<T> for RawQueue<T, BLOCK> {
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: PartialEq, const BLOCK: usize> PartialEq for RawQueue<T, BLOCK> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq, const BLOCK: usize> Eq for RawQueue<T, BLOCK> {}

impl<T: Hash, const BLOCK: usize> Hash for RawQueue<T, BLOCK> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|item| item.hash(state))
    }
}

impl<T: PartialEq, B: AsRef<[T]> + ?Sized, const BLOCK: usize> PartialEq<B>
    for RawQueue<T, BLOCK>
{
    fn eq(&self, other: &B) -> bool {
        self.iter().eq(other.as_ref())
    }
}

impl<T: Debug, const BLOCK: usize> Debug for RawQueue<T, BLOCK> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'q, T, const BLOCK: usize> IntoIterator for &'q RawQueue<T, BLOCK> {
    type Item = &'q T;
    type IntoIter = Iter<'q, T, BLOCK>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const BLOCK: usize> IntoIterator for RawQueue<T, BLOCK> {
    type Item = T;
    type IntoIter = IntoIter<T, BLOCK>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u32),
        Pop,
        Front,
        Reset,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => any::<u32>().prop_map(Op::Push),
            4 => Just(Op::Pop),
            1 => Just(Op::Front),
            1 => Just(Op::Reset),
        ]
    }

    fn check_invariants<T, const BLOCK: usize>(queue: &RawQueue<T, BLOCK>) {
        assert!(!queue.blocks.is_empty());
        assert!(queue.head.block() < queue.blocks.len());
        assert!(queue.tail.block() < queue.blocks.len());
        assert!(queue.head.offset() < BLOCK);
        assert!(queue.tail.offset() < BLOCK);
        if queue.head.block() == queue.tail.block() {
            assert!(queue.head.offset() <= queue.tail.offset());
        }
        assert_eq!(queue.is_empty(), queue.len() == 0);
        assert_eq!(queue.iter().len(), queue.len());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// FIFO ordering is preserved regardless of how many blocks are needed.
        #[test]
        fn fifo(values in prop::collection::vec(any::<u32>(), 0..100)) {
            let mut queue = RawQueue::<_, 4>::new();
            for &value in &values {
                queue.push(value);
            }
            prop_assert_eq!(queue.len(), values.len());
            for &expected in &values {
                prop_assert_eq!(queue.pop(), Ok(expected));
            }
            prop_assert!(queue.is_empty());
        }

        /// Small blocks give the same results as one large block.
        #[test]
        fn block_size_is_transparent(ops in prop::collection::vec(op(), 0..300)) {
            let mut small = RawQueue::<u32, 3>::new();
            let mut large = RawQueue::<u32, DEFAULT_BLOCK_CAPACITY>::new();
            for op in ops {
                match op {
                    Op::Push(value) => {
                        small.push(value);
                        large.push(value);
                    }
                    Op::Pop => prop_assert_eq!(small.pop(), large.pop()),
                    Op::Front => prop_assert_eq!(small.front(), large.front()),
                    Op::Reset => {
                        small.reset();
                        large.reset();
                    }
                }
                prop_assert_eq!(small.len(), large.len());
            }
            prop_assert!(small.iter().eq(large.iter()));
        }

        /// Length, emptiness, and cursor invariants match a `VecDeque` model after every step.
        #[test]
        fn matches_model(ops in prop::collection::vec(op(), 0..300)) {
            let mut queue = RawQueue::<u32, 2>::new();
            let mut model = VecDeque::new();
            let mut max_blocks = queue.block_count();
            for op in ops {
                match op {
                    Op::Push(value) => {
                        queue.push(value);
                        model.push_back(value);
                    }
                    Op::Pop => prop_assert_eq!(queue.pop().ok(), model.pop_front()),
                    Op::Front => prop_assert_eq!(queue.front().ok(), model.front()),
                    Op::Reset => {
                        queue.reset();
                        model.clear();
                        max_blocks = 1;
                    }
                }
                check_invariants(&queue);
                prop_assert_eq!(queue.len(), model.len());
                prop_assert!(queue.block_count() >= max_blocks);
                max_blocks = queue.block_count();
            }
            prop_assert!(queue.into_iter().eq(model));
        }
    }
}
