use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{GrowthPolicy, PlacementVec, RawBuffer, Result};

/// Builder for creating an instance of [`PlacementVec`].
///
/// You only need to use this builder if you want to customize the collection configuration.
/// [`PlacementVec::new()`][1] creates an empty collection with the default configuration and
/// without acquiring any storage.
///
/// # Examples
///
/// ```
/// use placement_vec::{GrowthPolicy, PlacementVec};
///
/// let items = PlacementVec::<u32>::builder()
///     .capacity(16)
///     .growth_policy(GrowthPolicy::Doubling)
///     .build()?;
///
/// assert_eq!(items.capacity(), 16);
/// assert!(items.is_empty());
/// # Ok::<(), placement_vec::Error>(())
/// ```
///
/// [1]: PlacementVec::new
#[must_use]
pub struct PlacementVecBuilder<T> {
    capacity: usize,
    growth_policy: GrowthPolicy,

    _item: PhantomData<T>,
}

impl<T> fmt::Debug for PlacementVecBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementVecBuilder")
            .field(
                "item_type",
                &format_args!("{}", type_name::<T>()),
            )
            .field("capacity", &self.capacity)
            .field("growth_policy", &self.growth_policy)
            .finish()
    }
}

impl<T> PlacementVecBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            growth_policy: GrowthPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the number of item slots to acquire up front. Defaults to zero, in which case no
    /// storage is acquired until the first item is inserted.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the [growth policy][GrowthPolicy] for the collection. This governs how much
    /// capacity is requested when an append finds the storage full.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::{GrowthPolicy, PlacementVec};
    ///
    /// let items = PlacementVec::<u32>::builder()
    ///     .growth_policy(GrowthPolicy::Exact)
    ///     .build()?;
    ///
    /// assert_eq!(items.growth_policy(), GrowthPolicy::Exact);
    /// # Ok::<(), placement_vec::Error>(())
    /// ```
    pub fn growth_policy(mut self, policy: GrowthPolicy) -> Self {
        self.growth_policy = policy;
        self
    }

    /// Builds the collection with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested capacity cannot be acquired.
    pub fn build(self) -> Result<PlacementVec<T>> {
        let buffer = RawBuffer::with_capacity(self.capacity)?;

        Ok(PlacementVec::from_parts(buffer, self.growth_policy))
    }
}
