use std::iter::FusedIterator;

use crate::{block::Block, pos::Cursor, RawQueue};

/// Iterator over references to the items of a [`RawQueue`], front to back.
pub struct Iter<'q, T, const BLOCK: usize> {
    blocks: &'q [Block<T>],
    pos: Cursor<BLOCK>,
    // Invariant: the `len` slots starting at `pos` hold items
    len: usize,
}

impl<'q, T, const BLOCK: usize> Iter<'q, T, BLOCK> {
    pub(crate) fn new(blocks: &'q [Block<T>], pos: Cursor<BLOCK>, len: usize) -> Self {
        Self { blocks, pos, len }
    }
}

impl<T, const BLOCK: usize> Clone for Iter<'_, T, BLOCK> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks,
            pos: self.pos,
            len: self.len,
        }
    }
}

impl<'q, T, const BLOCK: usize> Iterator for Iter<'q, T, BLOCK> {
    type Item = &'q T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let blocks = self.blocks;
        let item = blocks[self.pos.block()].get(self.pos.offset());
        debug_assert!(item.is_some());
        self.pos.advance(blocks.len());
        self.len -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, const BLOCK: usize> ExactSizeIterator for Iter<'_, T, BLOCK> {}

impl<T, const BLOCK: usize> FusedIterator for Iter<'_, T, BLOCK> {}

/// Owning iterator that pops the items of a [`RawQueue`] in FIFO order.
///
/// # Examples
/// ```
/// # use block_queue::RawQueue;
/// let queue = RawQueue::<_, 2>::from_iter(["a", "b", "c"]);
/// let items: Vec<_> = queue.into_iter().collect();
/// assert_eq!(items, ["a", "b", "c"]);
/// ```
pub struct IntoIter<T, const BLOCK: usize> {
    queue: RawQueue<T, BLOCK>,
}

impl<T, const BLOCK: usize> IntoIter<T, BLOCK> {
    pub(crate) fn new(queue: RawQueue<T, BLOCK>) -> Self {
        Self { queue }
    }
}

impl<T, const BLOCK: usize> Iterator for IntoIter<T, BLOCK> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T, const BLOCK: usize> ExactSizeIterator for IntoIter<T, BLOCK> {}

impl<T, const BLOCK: usize> FusedIterator for IntoIter<T, BLOCK> {}
