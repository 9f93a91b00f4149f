/// A position inside the block list: which block, and which slot within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Cursor<const BLOCK: usize> {
    // Invariant: `block` < number of blocks in the owning queue
    block: usize,
    // Invariant: `offset` < `BLOCK`
    offset: usize,
}

impl<const BLOCK: usize> Cursor<BLOCK> {
    pub const fn zero() -> Self {
        Self {
            block: 0,
            offset: 0,
        }
    }

    #[inline(always)]
    pub const fn block(&self) -> usize {
        self.block
    }

    #[inline(always)]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` if advancing this cursor by one slot moves it into the next block.
    #[inline(always)]
    pub const fn at_block_end(&self) -> bool {
        self.offset + 1 == BLOCK
    }

    /// Returns the block index that follows this cursor's block in a circular list of `blocks` blocks.
    #[inline(always)]
    pub const fn next_block(&self, blocks: usize) -> usize {
        (self.block + 1) % blocks
    }

    /// Moves the cursor one slot forward, wrapping to the start of the next block
    /// (circularly among `blocks` blocks) at the end of a block.
    ///
    /// Returns `true` if the cursor crossed into another block.
    #[inline]
    pub fn advance(&mut self, blocks: usize) -> bool {
        debug_assert!(self.block < blocks);
        if self.at_block_end() {
            self.offset = 0;
            self.block = self.next_block(blocks);
            true
        } else {
            self.offset += 1;
            false
        }
    }

    /// Shifts the block index by one, to follow its block after a block was inserted in front of it.
    #[inline]
    pub fn shift_block(&mut self) {
        self.block += 1;
    }

    /// Number of slots between `head` and `tail` in a circular list of `blocks` blocks.
    pub const fn distance(head: &Self, tail: &Self, blocks: usize) -> usize {
        if tail.block > head.block {
            (tail.block - head.block) * BLOCK - head.offset + tail.offset
        } else if tail.block < head.block {
            (blocks - head.block + tail.block) * BLOCK - head.offset + tail.offset
        } else {
            debug_assert!(head.offset <= tail.offset);
            tail.offset - head.offset
        }
    }
}
