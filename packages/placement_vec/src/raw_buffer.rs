use std::alloc::{Layout, alloc, dealloc};
use std::any::type_name;
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};

use tracing::debug;

use crate::{Error, Result};

/// An exclusively owned block of uninitialized memory with room for `capacity` items of type `T`.
///
/// This is the backing storage of a [`PlacementVec`][crate::PlacementVec]. The buffer itself does
/// not know which of its slots hold live items - it only hands out the memory and offers the
/// primitives for constructing and destroying items in individual slots. Tracking which slots are
/// live is the responsibility of the owner.
///
/// Dropping the buffer releases the memory block without running any item destructors. Any
/// items still live at that point are leaked.
///
/// A buffer cannot be cloned; every block has exactly one owner. Ownership can be transferred by
/// moving the buffer, by [`take()`][Self::take] which leaves the source empty, or by
/// [`swap()`][Self::swap].
///
/// # Zero-sized types
///
/// For zero-sized `T` no memory is ever acquired and the capacity is tracked only logically.
///
/// # Examples
///
/// ```
/// use placement_vec::RawBuffer;
///
/// let mut buffer = RawBuffer::<String>::with_capacity(2)?;
///
/// // SAFETY: Slot 0 is within capacity and vacant.
/// let hello = unsafe { buffer.construct_at(0, "hello".to_string()) };
/// hello.push_str(" world");
///
/// // SAFETY: Slot 0 was constructed above.
/// assert_eq!(unsafe { buffer.slot_ptr(0).as_ref() }, "hello world");
///
/// // SAFETY: Slot 0 is live and nothing references it any more.
/// unsafe { buffer.destroy_at(0) };
/// # Ok::<(), placement_vec::Error>(())
/// ```
pub struct RawBuffer<T> {
    /// Start of the block. Dangling when no memory is owned, which is the case when the capacity
    /// is zero or `T` is zero-sized.
    ptr: NonNull<T>,

    capacity: usize,
}

impl<T> RawBuffer<T> {
    /// Creates an empty buffer that owns no memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Creates a buffer holding a freshly acquired block with room for `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the block size is not representable and
    /// [`Error::AllocationFailed`] if the memory source cannot satisfy the request.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let ptr = Self::acquire(capacity)?;

        Ok(Self { ptr, capacity })
    }

    /// Acquires a block of uninitialized memory with room for `capacity` items.
    ///
    /// The block must be returned via [`release()`][Self::release] with the same capacity.
    /// Prefer [`with_capacity()`][Self::with_capacity], which pairs the two automatically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the block size is not representable and
    /// [`Error::AllocationFailed`] if the memory source cannot satisfy the request.
    pub fn acquire(capacity: usize) -> Result<NonNull<T>> {
        let layout = Self::layout(capacity)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: The layout is valid for an array of `T` and has a non-zero size.
        let block = unsafe { alloc(layout) };

        NonNull::new(block.cast::<T>()).ok_or_else(|| {
            debug!(
                item_type = type_name::<T>(),
                capacity,
                bytes = layout.size(),
                "storage acquisition failed"
            );

            Error::AllocationFailed { layout }
        })
    }

    /// Returns a block obtained from [`acquire()`][Self::acquire] to the memory source.
    ///
    /// No destructors are run for any items still in the block.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by `acquire(capacity)` with this exact `capacity` and must
    /// not have been released already.
    pub unsafe fn release(block: NonNull<T>, capacity: usize) {
        let layout = Self::layout(capacity)
            .expect("layout was calculable when the block was acquired with the same capacity");

        if layout.size() == 0 {
            // Nothing was acquired, so there is nothing to give back.
            return;
        }

        // SAFETY: The caller guarantees the block came from `acquire()` with the same capacity,
        // so it was allocated with this exact layout.
        unsafe {
            dealloc(block.as_ptr().cast(), layout);
        }
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_layout_error| Error::CapacityOverflow {
            requested: capacity,
        })
    }

    /// The number of item slots in the buffer, live or not.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer has zero slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// A pointer to the first slot. Dangling if the buffer owns no memory.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// A mutable pointer to the first slot. Dangling if the buffer owns no memory.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// A pointer to the slot at `index`.
    ///
    /// # Safety
    ///
    /// `index` must not exceed the capacity. An index equal to the capacity yields the
    /// one-past-the-end pointer, which must not be dereferenced.
    #[must_use]
    pub unsafe fn slot_ptr(&self, index: usize) -> NonNull<T> {
        debug_assert!(
            index <= self.capacity,
            "slot {index} out of bounds in buffer of {} with capacity {}",
            type_name::<T>(),
            self.capacity
        );

        // SAFETY: The caller guarantees the index is within the block (or one past its end).
        unsafe { self.ptr.add(index) }
    }

    /// Constructs a live item in the slot at `index`, returning a reference to it.
    ///
    /// # Safety
    ///
    /// `index` must be less than the capacity and the slot must be vacant. Constructing over a
    /// live item leaks it.
    pub unsafe fn construct_at(&mut self, index: usize, value: T) -> &mut T {
        debug_assert!(index < self.capacity);

        // SAFETY: Forwarding the caller's guarantee that the slot is within capacity.
        let mut slot = unsafe { self.slot_ptr(index) };

        // SAFETY: The slot is within the block, suitably aligned and vacant, so writing into it
        // does not overwrite a live item.
        unsafe {
            slot.write(value);
        }

        // SAFETY: We just initialized the slot and the returned reference borrows `self`
        // exclusively, so nothing else can touch the slot while it is alive.
        unsafe { slot.as_mut() }
    }

    /// Runs the destructor of the live item at `index`, leaving the slot vacant.
    ///
    /// # Safety
    ///
    /// `index` must be less than the capacity and the slot must hold a live item that is not
    /// referenced from anywhere else.
    pub unsafe fn destroy_at(&mut self, index: usize) {
        debug_assert!(index < self.capacity);

        // SAFETY: Forwarding the caller's guarantee that the slot is within capacity.
        let slot = unsafe { self.slot_ptr(index) };

        // SAFETY: The caller guarantees the slot holds a live, unreferenced item.
        unsafe {
            slot.drop_in_place();
        }
    }

    /// Moves the live item out of the slot at `index`, leaving the slot vacant.
    ///
    /// # Safety
    ///
    /// `index` must be less than the capacity and the slot must hold a live item. The slot must
    /// be treated as vacant afterwards.
    #[must_use]
    pub unsafe fn take_at(&mut self, index: usize) -> T {
        debug_assert!(index < self.capacity);

        // SAFETY: Forwarding the caller's guarantee that the slot is within capacity.
        let slot = unsafe { self.slot_ptr(index) };

        // SAFETY: The caller guarantees the slot is live and will treat it as vacant from now on,
        // so ownership of the item passes to us exactly once.
        unsafe { slot.read() }
    }

    /// Move-constructs the live item at `from` into the vacant slot `to`. Afterwards `from` is
    /// vacant and `to` is live.
    ///
    /// # Safety
    ///
    /// Both indexes must be less than the capacity and must differ. `from` must be live and `to`
    /// must be vacant.
    pub unsafe fn relocate(&mut self, from: usize, to: usize) {
        debug_assert!(from < self.capacity && to < self.capacity && from != to);

        // SAFETY: Forwarding the caller's guarantee that both slots are within capacity.
        let source = unsafe { self.slot_ptr(from) };
        // SAFETY: Forwarding the caller's guarantee that both slots are within capacity.
        let target = unsafe { self.slot_ptr(to) };

        // SAFETY: Distinct slots of the same block never overlap. The source is live and the
        // target vacant, so the copy transfers the item without duplicating ownership.
        unsafe {
            source.copy_to_nonoverlapping(target, 1);
        }
    }

    /// Exchanges the live items at `a` and `b`.
    ///
    /// # Safety
    ///
    /// Both indexes must be less than the capacity and both slots must be live and unreferenced.
    pub unsafe fn swap_slots(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.capacity && b < self.capacity);

        // SAFETY: Forwarding the caller's guarantee that both slots are within capacity.
        let first = unsafe { self.slot_ptr(a) };
        // SAFETY: Forwarding the caller's guarantee that both slots are within capacity.
        let second = unsafe { self.slot_ptr(b) };

        // SAFETY: Both slots are live, aligned and valid for reads and writes. `ptr::swap`
        // tolerates `a == b`.
        unsafe {
            ptr::swap(first.as_ptr(), second.as_ptr());
        }
    }

    /// Move-constructs the first `count` items of this buffer into the first `count` slots of
    /// `target`, in index order. Afterwards the source slots are vacant and the target slots
    /// live.
    ///
    /// # Safety
    ///
    /// `count` must not exceed the capacity of either buffer. Slots `[0, count)` must be live
    /// here and vacant in `target`.
    pub unsafe fn relocate_prefix_to(&mut self, target: &mut Self, count: usize) {
        debug_assert!(count <= self.capacity && count <= target.capacity);

        // SAFETY: Two distinct buffers never share a block (exclusive ownership). The caller
        // guarantees both ranges are in bounds and have the required liveness.
        unsafe {
            self.ptr.copy_to_nonoverlapping(target.ptr, count);
        }
    }

    /// Transfers the block out of this buffer, leaving it empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut taken = Self::new();
        taken.swap(self);
        taken
    }

    /// Exchanges the blocks of two buffers. Never fails and never touches the items.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        // SAFETY: The block was acquired with this capacity (or is the dangling empty block,
        // which release() treats as a no-op) and is released exactly once, here.
        unsafe {
            Self::release(self.ptr, self.capacity);
        }
    }
}

impl<T> fmt::Debug for RawBuffer<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

// SAFETY: The buffer exclusively owns its block, so moving it to another thread moves the block
// along with whatever `T` values its owner keeps there. That is fine as long as `T` is `Send`.
unsafe impl<T: Send> Send for RawBuffer<T> {}

// SAFETY: Shared access only exposes pointers; reading through them from several threads is
// fine as long as `T` is `Sync`.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_not_impl_any!(RawBuffer<u32>: Clone, Copy);
    assert_impl_all!(RawBuffer<u32>: Send, Sync);
    assert_not_impl_any!(RawBuffer<Rc<u32>>: Send, Sync);

    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn new_is_empty() {
        let buffer = RawBuffer::<u64>::new();

        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn zero_capacity_acquires_nothing() {
        let buffer = RawBuffer::<u64>::with_capacity(0).unwrap();

        assert!(buffer.is_empty());
        assert_eq!(buffer.as_ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn construct_and_destroy_in_place() {
        let mut buffer = RawBuffer::<u32>::with_capacity(3).unwrap();
        assert_eq!(buffer.capacity(), 3);

        // SAFETY: All three slots are within capacity and vacant.
        unsafe {
            _ = buffer.construct_at(0, 10);
            _ = buffer.construct_at(2, 30);
        }

        // SAFETY: Slots 0 and 2 were constructed above.
        unsafe {
            assert_eq!(*buffer.slot_ptr(0).as_ref(), 10);
            assert_eq!(*buffer.slot_ptr(2).as_ref(), 30);
        }

        // SAFETY: Slots 0 and 2 are live.
        unsafe {
            buffer.destroy_at(0);
            buffer.destroy_at(2);
        }
    }

    #[test]
    fn construct_returns_reference_to_slot() {
        let mut buffer = RawBuffer::<String>::with_capacity(1).unwrap();

        // SAFETY: Slot 0 is within capacity and vacant.
        let value = unsafe { buffer.construct_at(0, "abc".to_string()) };
        value.push('d');

        // SAFETY: Slot 0 is live.
        let value = unsafe { buffer.take_at(0) };
        assert_eq!(value, "abcd");
    }

    #[test]
    fn destroy_runs_destructor_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        let mut buffer = RawBuffer::<DropCounter>::with_capacity(2).unwrap();

        // SAFETY: Slot 1 is within capacity and vacant.
        unsafe {
            _ = buffer.construct_at(
                1,
                DropCounter {
                    drops: Rc::clone(&drops),
                },
            );
        }
        assert_eq!(drops.get(), 0);

        // SAFETY: Slot 1 is live.
        unsafe {
            buffer.destroy_at(1);
        }
        assert_eq!(drops.get(), 1);

        // Releasing the buffer must not run any more destructors.
        drop(buffer);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn relocate_moves_without_destroying() {
        let drops = Rc::new(Cell::new(0));
        let mut buffer = RawBuffer::<DropCounter>::with_capacity(2).unwrap();

        // SAFETY: Slot 0 is within capacity and vacant.
        unsafe {
            _ = buffer.construct_at(
                0,
                DropCounter {
                    drops: Rc::clone(&drops),
                },
            );
        }

        // SAFETY: Slot 0 is live, slot 1 is vacant.
        unsafe {
            buffer.relocate(0, 1);
        }
        assert_eq!(drops.get(), 0);

        // SAFETY: The item now lives in slot 1.
        unsafe {
            buffer.destroy_at(1);
        }
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn swap_slots_exchanges_items() {
        let mut buffer = RawBuffer::<u8>::with_capacity(2).unwrap();

        // SAFETY: Both slots are within capacity and vacant.
        unsafe {
            _ = buffer.construct_at(0, b'a');
            _ = buffer.construct_at(1, b'b');
        }

        // SAFETY: Both slots are live.
        unsafe {
            buffer.swap_slots(0, 1);
            buffer.swap_slots(1, 1);
        }

        // SAFETY: Both slots are live.
        unsafe {
            assert_eq!(buffer.take_at(0), b'b');
            assert_eq!(buffer.take_at(1), b'a');
        }
    }

    #[test]
    fn relocate_prefix_preserves_order() {
        let mut old = RawBuffer::<u16>::with_capacity(3).unwrap();
        let mut new = RawBuffer::<u16>::with_capacity(6).unwrap();

        for index in 0..3 {
            // SAFETY: Slots 0..3 are within capacity and vacant.
            unsafe {
                _ = old.construct_at(index, u16::try_from(index).unwrap() * 100);
            }
        }

        // SAFETY: Slots 0..3 are live in `old` and vacant in `new`.
        unsafe {
            old.relocate_prefix_to(&mut new, 3);
        }

        for index in 0..3 {
            // SAFETY: Slots 0..3 of `new` are now live.
            let value = unsafe { new.take_at(index) };
            assert_eq!(value, u16::try_from(index).unwrap() * 100);
        }
    }

    #[test]
    fn take_empties_source() {
        let mut source = RawBuffer::<u64>::with_capacity(4).unwrap();
        let block = source.as_ptr();

        let target = source.take();

        assert_eq!(target.capacity(), 4);
        assert_eq!(target.as_ptr(), block);
        assert_eq!(source.capacity(), 0);
        assert!(source.is_empty());

        // Both must be safe to drop.
        drop(source);
        drop(target);
    }

    #[test]
    fn swap_exchanges_blocks() {
        let mut a = RawBuffer::<u64>::with_capacity(2).unwrap();
        let mut b = RawBuffer::<u64>::with_capacity(5).unwrap();
        let a_block = a.as_ptr();
        let b_block = b.as_ptr();

        a.swap(&mut b);

        assert_eq!(a.capacity(), 5);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_ptr(), b_block);
        assert_eq!(b.as_ptr(), a_block);
    }

    #[test]
    fn release_of_empty_block_is_noop() {
        // SAFETY: A zero-capacity block is the dangling pointer, which release() ignores.
        unsafe {
            RawBuffer::<u64>::release(NonNull::dangling(), 0);
        }
    }

    #[test]
    fn acquire_and_release_pair() {
        let block = RawBuffer::<u64>::acquire(8).unwrap();

        // SAFETY: The block was acquired with the same capacity above.
        unsafe {
            RawBuffer::release(block, 8);
        }
    }

    #[test]
    fn capacity_overflow_is_error() {
        let result = RawBuffer::<u64>::with_capacity(usize::MAX);

        assert_eq!(
            result.unwrap_err(),
            Error::CapacityOverflow {
                requested: usize::MAX
            }
        );
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Miri aborts on huge allocations instead of returning null.
    fn unsatisfiable_request_is_error() {
        // Within the layout limits but far beyond any real address space.
        let capacity = usize::try_from(isize::MAX).unwrap() / 16;

        let result = RawBuffer::<u64>::with_capacity(capacity);

        assert!(matches!(result, Err(Error::AllocationFailed { .. })));
    }

    #[test]
    fn zero_sized_items_need_no_memory() {
        let mut buffer = RawBuffer::<()>::with_capacity(usize::MAX).unwrap();
        assert_eq!(buffer.capacity(), usize::MAX);

        // SAFETY: Slot 5 is within capacity and vacant.
        unsafe {
            _ = buffer.construct_at(5, ());
            buffer.destroy_at(5);
        }
    }
}
