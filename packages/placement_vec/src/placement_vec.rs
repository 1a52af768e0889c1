use std::any::type_name;
use std::borrow::{Borrow, BorrowMut};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::{self, SliceIndex};

use tracing::trace;

use crate::{Error, GrowthPolicy, PlacementVecBuilder, RawBuffer, Result};

mod positional;

/// A contiguous growable array that manages its own uninitialized storage.
///
/// The collection owns exactly one [`RawBuffer`] and a count of live items. Slots
/// `[0, len)` of the buffer always hold live items and slots `[len, capacity)` are always
/// uninitialized. Every operation constructs and destroys items in place, one slot at a time,
/// without touching surrounding slots.
///
/// # Capacity
///
/// Storage is only ever replaced through [`reserve()`][Self::reserve], which acquires a block of
/// exactly the requested size, moves the live items over in order and releases the old block.
/// When an append finds the storage full, the [`GrowthPolicy`] decides the next capacity
/// (doubling by default: 1, 2, 4, 8, ...). Positional insertion into full storage grows it by
/// exactly one slot.
///
/// # Errors
///
/// Every operation that may acquire storage returns a [`Result`]. On error the collection is left
/// exactly as it was before the call. Trait implementations that cannot return an error
/// ([`Clone`], [`Extend`], [`FromIterator`]) escalate allocation failure the same way the
/// standard collections do.
///
/// # Invalidation
///
/// References into the collection are tied to a borrow of it, so the compiler rejects any use of
/// a reference across an operation that may move items. Raw pointers obtained via
/// [`as_ptr()`][Self::as_ptr] or [`as_mut_ptr()`][Self::as_mut_ptr] are not protected this way:
///
/// * Any operation that reallocates (`reserve()`, and `push()`, `emplace_back()`, `resize()`,
///   `insert()` or `emplace()` when they need to grow) invalidates every pointer into the
///   collection.
/// * `insert()`, `emplace()`, `erase()` and `remove()` invalidate pointers at and after the
///   affected index even when no reallocation takes place, because items are moved between slots.
///
/// # Examples
///
/// ```
/// use placement_vec::PlacementVec;
///
/// let mut items = PlacementVec::new();
///
/// items.push(1)?;
/// items.push(2)?;
/// items.push(3)?;
/// assert_eq!(items, [1, 2, 3]);
/// assert_eq!(items.capacity(), 4);
///
/// items.insert(1, 42)?;
/// assert_eq!(items, [1, 42, 2, 3]);
///
/// items.erase(1);
/// assert_eq!(items, [1, 2, 3]);
/// # Ok::<(), placement_vec::Error>(())
/// ```
pub struct PlacementVec<T> {
    buffer: RawBuffer<T>,

    /// Number of live items, all of them at the start of the buffer.
    len: usize,

    growth_policy: GrowthPolicy,
}

impl<T> PlacementVec<T> {
    /// Creates an empty collection with the default configuration. No storage is acquired.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let items = PlacementVec::<String>::new();
    ///
    /// assert_eq!(items.len(), 0);
    /// assert_eq!(items.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::new(),
            len: 0,
            growth_policy: GrowthPolicy::Doubling,
        }
    }

    /// Starts building a new [`PlacementVec`].
    ///
    /// Use this when you want to customize the configuration beyond the defaults.
    pub fn builder() -> PlacementVecBuilder<T> {
        PlacementVecBuilder::new()
    }

    pub(crate) fn from_parts(buffer: RawBuffer<T>, growth_policy: GrowthPolicy) -> Self {
        Self {
            buffer,
            len: 0,
            growth_policy,
        }
    }

    /// Creates an empty collection with room for exactly `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::builder().capacity(capacity).build()
    }

    /// Creates a collection of `len` default-valued items, with a capacity of exactly `len`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let items = PlacementVec::<u8>::with_len(3)?;
    ///
    /// assert_eq!(items, [0, 0, 0]);
    /// assert_eq!(items.capacity(), 3);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    pub fn with_len(len: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::with_len_with(len, T::default)
    }

    /// Creates a collection of `len` items produced by `f`, with a capacity of exactly `len`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired.
    pub fn with_len_with<F>(len: usize, f: F) -> Result<Self>
    where
        F: FnMut() -> T,
    {
        let mut items = Self::with_capacity(len)?;
        items.fill_tail(len, f);
        Ok(items)
    }

    /// Creates an independent copy of the collection, with a capacity of exactly `self.len()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        let mut copy = Self::builder()
            .capacity(self.len)
            .growth_policy(self.growth_policy)
            .build()?;
        copy.clone_tail_from(self.as_slice());
        Ok(copy)
    }

    /// Replaces the contents of the collection with a copy of the contents of `source`.
    ///
    /// If the current capacity cannot hold all of `source`, a complete copy is built in new
    /// storage first and only then swapped in, so on error the collection is untouched.
    ///
    /// Otherwise the existing storage is reused: the overlapping prefix is overwritten item by
    /// item via [`Clone::clone_from()`], then the remainder of `source` is cloned onto the end or
    /// the surplus items are destroyed. If an item clone panics on this path, each item is left
    /// either overwritten or at its previous value.
    ///
    /// The growth policy of `self` is retained.
    ///
    /// # Errors
    ///
    /// Returns an error if new storage is needed and cannot be acquired.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let source: PlacementVec<u32> = (0..10).collect();
    /// let mut target: PlacementVec<u32> = [7, 8].as_slice().into();
    ///
    /// target.try_clone_from(&source)?;
    ///
    /// assert_eq!(target, source);
    /// assert!(target.capacity() >= 10);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    ///
    /// Assigning a collection to itself is rejected at compile time:
    ///
    /// ```compile_fail
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items = PlacementVec::<u32>::new();
    /// items.try_clone_from(&items).unwrap();
    /// ```
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()>
    where
        T: Clone,
    {
        if source.len > self.capacity() {
            let mut replacement = source.try_clone()?;
            replacement.growth_policy = self.growth_policy;

            // Our former contents are destroyed when `replacement` goes out of scope.
            self.swap(&mut replacement);
            return Ok(());
        }

        for (target, item) in self.as_mut_slice().iter_mut().zip(source.iter()) {
            target.clone_from(item);
        }

        match source.as_slice().get(self.len..) {
            Some(tail) => self.clone_tail_from(tail),
            None => self.truncate(source.len),
        }

        Ok(())
    }

    /// Transfers the contents into a new collection, leaving this one empty with zero capacity.
    ///
    /// The returned collection has the same growth policy as this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut source: PlacementVec<u32> = (1..=3).collect();
    /// let target = source.take();
    ///
    /// assert_eq!(target, [1, 2, 3]);
    /// assert_eq!(source.len(), 0);
    /// assert_eq!(source.capacity(), 0);
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut taken = Self::from_parts(RawBuffer::new(), self.growth_policy);
        taken.swap(self);
        taken
    }

    /// Exchanges the contents (storage and items) of two collections in constant time. Each
    /// collection keeps its own growth policy.
    ///
    /// This is the move-assignment primitive: after `a.swap(&mut b)` the former contents of `a`
    /// are owned by `b` and are destroyed when `b` is dropped.
    ///
    /// Swapping a collection with itself is rejected at compile time:
    ///
    /// ```compile_fail
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items = PlacementVec::<u32>::new();
    /// items.swap(&mut items);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// The number of live items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the collection has no live items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of items the collection can hold without acquiring new storage.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The growth policy applied when an append finds the storage full.
    #[must_use]
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth_policy
    }

    /// Ensures the capacity is at least `capacity` items.
    ///
    /// Does nothing if the capacity is already sufficient. Otherwise acquires storage for
    /// exactly `capacity` items, moves all live items over in order and releases the old storage.
    /// This invalidates all pointers into the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired, in which case the collection is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items: PlacementVec<u32> = (0..3).collect();
    ///
    /// items.reserve(10)?;
    /// assert_eq!(items.capacity(), 10);
    ///
    /// items.reserve(5)?;
    /// assert_eq!(items.capacity(), 10);
    /// assert_eq!(items, [0, 1, 2]);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        let mut replacement = RawBuffer::with_capacity(capacity)?;

        trace!(
            item_type = type_name::<T>(),
            old_capacity = self.capacity(),
            new_capacity = capacity,
            len = self.len,
            "reallocating storage"
        );

        // SAFETY: Slots [0, len) are live in our buffer and vacant in the replacement, whose
        // capacity exceeds ours and thus our len.
        unsafe {
            self.buffer.relocate_prefix_to(&mut replacement, self.len);
        }

        self.buffer.swap(&mut replacement);

        // `replacement` now holds the old block with every slot vacant, so dropping it only
        // releases the memory.
        Ok(())
    }

    /// Makes room for one more item at the end, following the growth policy if the storage is
    /// full.
    fn reserve_for_one(&mut self) -> Result<()> {
        if self.len < self.capacity() {
            return Ok(());
        }

        let capacity = self.growth_policy.next_capacity(self.len)?;
        self.reserve(capacity)
    }

    /// Changes the number of live items to `len`.
    ///
    /// First ensures the capacity via [`reserve(len)`][Self::reserve]. Surplus items are
    /// destroyed from the end and new slots are filled with default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired, in which case the collection is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items = PlacementVec::<u32>::with_len(5)?;
    ///
    /// items.resize(2)?;
    /// assert_eq!(items.len(), 2);
    ///
    /// items[1] = 7;
    /// items.resize(4)?;
    /// assert_eq!(items, [0, 7, 0, 0]);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    pub fn resize(&mut self, len: usize) -> Result<()>
    where
        T: Default,
    {
        self.resize_with(len, T::default)
    }

    /// Changes the number of live items to `len`, filling new slots with values produced by `f`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be acquired, in which case the collection is
    /// unchanged.
    pub fn resize_with<F>(&mut self, len: usize, f: F) -> Result<()>
    where
        F: FnMut() -> T,
    {
        self.reserve(len)?;

        if len < self.len {
            self.truncate(len);
        } else {
            self.fill_tail(len, f);
        }

        Ok(())
    }

    /// Destroys all items after the first `len`. Does nothing if there are not more than `len`.
    ///
    /// The capacity is not changed.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            // Shrink first: if the destructor panics, the item no longer counts as live.
            self.len = self
                .len
                .checked_sub(1)
                .expect("guarded by len > target len in loop condition");

            // SAFETY: The slot at the old last index was live and is no longer counted.
            unsafe {
                self.buffer.destroy_at(self.len);
            }
        }
    }

    /// Destroys all items. The capacity is not changed.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends an item to the end, growing the storage per the growth policy if it is full.
    ///
    /// With the default policy this is amortized constant time.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage needs to grow and cannot, in which case the collection is
    /// unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.push_mut(value)?;
        Ok(())
    }

    /// Appends an item to the end and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage needs to grow and cannot, in which case the collection is
    /// unchanged and `value` is dropped.
    pub fn push_mut(&mut self, value: T) -> Result<&mut T> {
        self.emplace_back(|| value)
    }

    /// Constructs an item directly in the slot after the last item and returns a reference to it.
    ///
    /// `f` is only called once the slot is secured, so if the storage cannot grow no item is
    /// produced at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage needs to grow and cannot, in which case the collection is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut names = PlacementVec::new();
    ///
    /// let name = names.emplace_back(|| String::with_capacity(16))?;
    /// name.push_str("Alice");
    ///
    /// assert_eq!(names, ["Alice"]);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    pub fn emplace_back<F>(&mut self, f: F) -> Result<&mut T>
    where
        F: FnOnce() -> T,
    {
        self.reserve_for_one()?;

        let value = f();
        let index = self.len;

        // SAFETY: We reserved room for one more item, so the slot at `len` is within capacity,
        // and it is vacant because it is outside the live range.
        let item = unsafe { self.buffer.construct_at(index, value) };

        self.len = index
            .checked_add(1)
            .expect("guarded by len < capacity after reserving");

        Ok(item)
    }

    /// Removes the last item and returns it, or `None` if the collection is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.len = self.len.checked_sub(1)?;

        // SAFETY: The slot at the old last index was live and is no longer counted as such.
        Some(unsafe { self.buffer.take_at(self.len) })
    }

    /// Destroys the last item in place.
    ///
    /// # Panics
    ///
    /// Panics if the collection is empty.
    pub fn pop_back(&mut self) {
        self.len = self.len.checked_sub(1).unwrap_or_else(|| {
            panic!(
                "pop_back() called on an empty PlacementVec of {}",
                type_name::<T>()
            )
        });

        // SAFETY: The slot at the old last index was live and is no longer counted as such.
        unsafe {
            self.buffer.destroy_at(self.len);
        }
    }

    /// Clones every item of `items` onto the end, reserving exactly the required capacity first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage needs to grow and cannot, in which case the collection is
    /// unchanged.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<()>
    where
        T: Clone,
    {
        let required = self
            .len
            .checked_add(items.len())
            .ok_or(Error::CapacityOverflow {
                requested: usize::MAX,
            })?;

        self.reserve(required)?;
        self.clone_tail_from(items);
        Ok(())
    }

    /// The live items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots [0, len) are live and the pointer is non-null and aligned even when
        // no memory is owned.
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.len) }
    }

    /// The live items as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Slots [0, len) are live and the pointer is non-null and aligned even when
        // no memory is owned. The slice borrows `self` exclusively.
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr(), self.len) }
    }

    /// A pointer to the first slot of the storage. Dangling if no storage is owned.
    ///
    /// See the type-level documentation for when the pointer is invalidated.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    /// A mutable pointer to the first slot of the storage. Dangling if no storage is owned.
    ///
    /// See the type-level documentation for when the pointer is invalidated.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_mut_ptr()
    }

    /// Constructs items produced by `f` until there are `len` live items.
    ///
    /// The capacity must already be at least `len`.
    fn fill_tail<F>(&mut self, len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        debug_assert!(len <= self.capacity());

        while self.len < len {
            let value = f();

            // SAFETY: The caller guarantees `len <= capacity`, so the slot at our current len is
            // within capacity and it is vacant because it is outside the live range.
            unsafe {
                _ = self.buffer.construct_at(self.len, value);
            }

            // Grow one at a time so a panic in `f` leaves exactly the constructed items live.
            self.len = self
                .len
                .checked_add(1)
                .expect("guarded by len < target len <= capacity");
        }
    }

    /// Clones `items` into the vacant slots after the live range.
    ///
    /// The capacity must already have room for all of them.
    fn clone_tail_from(&mut self, items: &[T])
    where
        T: Clone,
    {
        debug_assert!(
            self.len
                .checked_add(items.len())
                .is_some_and(|required| required <= self.capacity())
        );

        for item in items {
            let value = item.clone();

            // SAFETY: The caller guarantees there is room for all items, so the slot at our
            // current len is within capacity and vacant.
            unsafe {
                _ = self.buffer.construct_at(self.len, value);
            }

            self.len = self
                .len
                .checked_add(1)
                .expect("guarded by len + items.len() <= capacity");
        }
    }
}

impl<T> Drop for PlacementVec<T> {
    fn drop(&mut self) {
        // SAFETY: Slots [0, len) are live and are destroyed exactly once, here. The buffer then
        // releases the memory in its own destructor.
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Default for PlacementVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for PlacementVec<T> {
    /// # Panics
    ///
    /// Escalates allocation failure via [`std::alloc::handle_alloc_error()`], or panics if the
    /// capacity overflows. Use [`try_clone()`][PlacementVec::try_clone] to handle these.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| error.escalate())
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source)
            .unwrap_or_else(|error| error.escalate());
    }
}

impl<T: fmt::Debug> fmt::Debug for PlacementVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Deref for PlacementVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for PlacementVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for PlacementVec<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for PlacementVec<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> AsRef<[T]> for PlacementVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for PlacementVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for PlacementVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for PlacementVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a PlacementVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PlacementVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Extend<T> for PlacementVec<T> {
    /// # Panics
    ///
    /// Escalates allocation failure via [`std::alloc::handle_alloc_error()`], or panics if the
    /// capacity overflows.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();

        let (lower_bound, _) = iter.size_hint();
        if let Some(required) = self.len.checked_add(lower_bound) {
            self.reserve(required)
                .unwrap_or_else(|error| error.escalate());
        }

        for item in iter {
            self.push(item).unwrap_or_else(|error| error.escalate());
        }
    }
}

impl<T> FromIterator<T> for PlacementVec<T> {
    /// # Panics
    ///
    /// Escalates allocation failure via [`std::alloc::handle_alloc_error()`], or panics if the
    /// capacity overflows.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items = Self::new();
        items.extend(iter);
        items
    }
}

impl<T: Clone> From<&[T]> for PlacementVec<T> {
    /// # Panics
    ///
    /// Escalates allocation failure via [`std::alloc::handle_alloc_error()`].
    fn from(items: &[T]) -> Self {
        let mut result = Self::new();
        result
            .extend_from_slice(items)
            .unwrap_or_else(|error| error.escalate());
        result
    }
}

impl<T, U> PartialEq<PlacementVec<U>> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &PlacementVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for PlacementVec<T> {}

impl<T, U> PartialEq<[U]> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

// SAFETY: The collection exclusively owns its items, exactly like `Vec<T>`.
unsafe impl<T: Send> Send for PlacementVec<T> {}

// SAFETY: Shared access only hands out shared references to items, exactly like `Vec<T>`.
unsafe impl<T: Sync> Sync for PlacementVec<T> {}
