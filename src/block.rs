use std::collections::TryReserveError;

/// A fixed-capacity run of slots. A slot is `None` when it holds no item.
#[derive(Clone)]
pub(crate) struct Block<T>(Box<[Option<T>]>);

impl<T> Block<T> {
    pub fn new(capacity: usize) -> Self {
        Self(std::iter::repeat_with(|| None).take(capacity).collect())
    }

    /// Allocates a block, reporting allocation failure instead of aborting.
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self(slots.into_boxed_slice()))
    }

    #[inline(always)]
    pub fn get(&self, offset: usize) -> Option<&T> {
        self.0[offset].as_ref()
    }

    #[inline(always)]
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.0[offset].as_mut()
    }

    #[inline(always)]
    pub fn take(&mut self, offset: usize) -> Option<T> {
        self.0[offset].take()
    }

    #[inline(always)]
    pub fn put(&mut self, offset: usize, item: T) {
        let previous = self.0[offset].replace(item);
        debug_assert!(previous.is_none(), "overwrote a live queue slot");
    }

    #[cfg(test)]
    pub fn is_vacant(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}
