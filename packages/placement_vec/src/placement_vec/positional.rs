//! Insertion and removal in the middle of the collection, implemented by shifting live items
//! one slot at a time.

use std::any::type_name;

use super::PlacementVec;
use crate::{Error, Result};

impl<T> PlacementVec<T> {
    /// Inserts `value` at `index`, shifting all items after it one slot to the right, and returns
    /// a reference to the inserted item.
    ///
    /// If the storage is full, it grows by exactly one slot regardless of the growth policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage needs to grow and cannot, in which case the collection is
    /// unchanged and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items: PlacementVec<u32> = (1..=3).collect();
    ///
    /// let inserted = items.insert(1, 42)?;
    /// assert_eq!(*inserted, 42);
    ///
    /// assert_eq!(items, [1, 42, 2, 3]);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        self.emplace(index, || value)
    }

    /// Constructs an item produced by `f` directly at `index`, shifting all items after it one
    /// slot to the right, and returns a reference to it.
    ///
    /// `f` is only called once room for the item is secured. If the storage is full, it grows by
    /// exactly one slot regardless of the growth policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage needs to grow and cannot, in which case the collection is
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace<F>(&mut self, index: usize, f: F) -> Result<&mut T>
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "insertion index {index} is out of bounds in PlacementVec of {} with len {}",
            type_name::<T>(),
            self.len
        );

        let required = self
            .len
            .checked_add(1)
            .ok_or(Error::CapacityOverflow {
                requested: self.len,
            })?;
        self.reserve(required)?;

        // The value must exist before the gap opens: a panic in `f` must not leave a vacant slot
        // inside the live range.
        let value = f();

        self.open_gap(index);

        // SAFETY: `open_gap()` left the slot at `index` vacant and it is within capacity because
        // we reserved room for one more item.
        let item = unsafe { self.buffer.construct_at(index, value) };

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity after reserving");

        Ok(item)
    }

    /// Destroys the item at `index`, shifting all items after it one slot to the left.
    ///
    /// Returns a reference to the item that now occupies `index`, or `None` if the destroyed
    /// item was the last one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items: PlacementVec<u32> = [1, 42, 2, 3].as_slice().into();
    ///
    /// assert_eq!(items.erase(1), Some(&mut 2));
    /// assert_eq!(items, [1, 2, 3]);
    ///
    /// assert_eq!(items.erase(2), None);
    /// assert_eq!(items, [1, 2]);
    /// ```
    pub fn erase(&mut self, index: usize) -> Option<&mut T> {
        self.shift_to_back(index);
        self.pop_back();

        self.as_mut_slice().get_mut(index)
    }

    /// Removes the item at `index` and returns it, shifting all items after it one slot to the
    /// left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    pub fn remove(&mut self, index: usize) -> T {
        self.shift_to_back(index);

        self.pop()
            .expect("guarded by index < len in shift_to_back()")
    }

    /// Moves every live item from the end backward to `index` one slot to the right, leaving the
    /// slot at `index` vacant. Processing from the end ensures no item is overwritten before it
    /// has moved.
    ///
    /// The capacity must exceed the length.
    fn open_gap(&mut self, index: usize) {
        debug_assert!(self.len < self.capacity());

        let mut vacant = self.len;

        while vacant > index {
            let previous = vacant
                .checked_sub(1)
                .expect("guarded by vacant > index in loop condition");

            // SAFETY: `previous` is live because it is in [index, len) and `vacant` is the
            // currently vacant slot, at most `len`, which is within capacity.
            unsafe {
                self.buffer.relocate(previous, vacant);
            }

            vacant = previous;
        }
    }

    /// Walks the item at `index` to the last slot by exchanging it with its right neighbour
    /// step by step, preserving the order of all other items.
    fn shift_to_back(&mut self, index: usize) {
        assert!(
            index < self.len,
            "removal index {index} is out of bounds in PlacementVec of {} with len {}",
            type_name::<T>(),
            self.len
        );

        let last = self
            .len
            .checked_sub(1)
            .expect("guarded by index < len above");

        for position in index..last {
            let next = position
                .checked_add(1)
                .expect("guarded by position < last < usize::MAX");

            // SAFETY: Both `position` and `next` are in [index, len), so both are live.
            unsafe {
                self.buffer.swap_slots(position, next);
            }
        }
    }
}
