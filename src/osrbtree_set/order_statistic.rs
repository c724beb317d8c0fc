use core::borrow::Borrow;
use core::ops::Index;

use super::OSRBTreeSet;
use crate::Rank;
use crate::error::Result;

impl<T> OSRBTreeSet<T> {
    /// Returns the number of items strictly less than the value.
    ///
    /// The query value need not be present; for an absent value this is the
    /// position it would occupy after insertion.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let set = OSRBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.rank(&10), 0);
    /// assert_eq!(set.rank(&25), 2);
    /// assert_eq!(set.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.rank(value)
    }

    /// Returns the item with the given zero-based rank in ascending order.
    ///
    /// The result has the property that exactly `rank` items in the set
    /// compare strictly smaller, so `set.rank(set.select(k)?) == k`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`](crate::Error::RankOutOfRange)
    /// unless `rank` is in `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeSet};
    ///
    /// let set = OSRBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.select(0), Ok(&10));
    /// assert_eq!(set.select(3), Err(Error::RankOutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&T> {
        self.map.select(rank).map(|(item, _)| item)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeSet, Rank};
///
/// let set = OSRBTreeSet::from(["a", "c", "b"]);
/// assert_eq!(set[Rank(2)], "c");
/// ```
impl<T> Index<Rank> for OSRBTreeSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select(rank.0).expect("rank out of bounds")
    }
}
