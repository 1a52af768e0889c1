use crate::{Error, Result};

/// Determines how much capacity a [`PlacementVec`][crate::PlacementVec] requests when an
/// append finds its storage full.
///
/// By default, the capacity doubles (starting from one), which makes appending amortized
/// constant time.
///
/// # Examples
///
/// ```
/// use placement_vec::{GrowthPolicy, PlacementVec};
///
/// let mut items = PlacementVec::<u32>::builder()
///     .growth_policy(GrowthPolicy::Exact)
///     .build()?;
///
/// items.push(1)?;
/// items.push(2)?;
/// items.push(3)?;
///
/// assert_eq!(items.capacity(), 3);
/// # Ok::<(), placement_vec::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum GrowthPolicy {
    /// The capacity is set to twice the current length, or to one if the collection is empty.
    /// This is the default.
    #[default]
    Doubling,

    /// The capacity grows by exactly one slot. This never over-allocates but every append to a
    /// full collection moves all existing items, so a sequence of appends is quadratic.
    Exact,
}

impl GrowthPolicy {
    /// Calculates the capacity to reserve so that one more item fits after `len` items.
    pub(crate) fn next_capacity(self, len: usize) -> Result<usize> {
        let next = match self {
            Self::Doubling => {
                if len == 0 {
                    Some(1)
                } else {
                    len.checked_mul(2)
                }
            }
            Self::Exact => len.checked_add(1),
        };

        next.ok_or(Error::CapacityOverflow { requested: len })
    }
}
