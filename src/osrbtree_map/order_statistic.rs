use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::OSRBTreeMap;
use crate::Rank;
use crate::error::{Error, Result};

impl<K, V> OSRBTreeMap<K, V> {
    /// Returns the number of keys strictly less than `key`.
    ///
    /// The query key need not be present; for an absent key this is the
    /// position it would occupy after insertion.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the entry whose key has the given zero-based rank in sorted
    /// order.
    ///
    /// The result key has the property that exactly `rank` keys in the map
    /// compare strictly smaller, so `map.rank(map.select(k)?.0) == k`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] unless `rank` is in `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.select(1), Ok((&20, &"b")));
    /// assert_eq!(map.select(3), Err(Error::RankOutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<(&K, &V)> {
        let h = self.raw.select(rank).ok_or(Error::RankOutOfRange { rank, len: self.len() })?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the key at the given rank and a mutable reference to its
    /// value. The key stays shared because mutating it would violate the
    /// map's ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] unless `rank` is in `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::from([(5, "b"), (10, "a")]);
    /// if let Ok((key, value)) = map.select_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Ok(&"updated"));
    /// ```
    pub fn select_mut(&mut self, rank: usize) -> Result<(&K, &mut V)> {
        let len = self.len();
        let h = self.raw.select(rank).ok_or(Error::RankOutOfRange { rank, len })?;
        let node = self.raw.node_mut(h);
        Ok((&node.key, &mut node.value))
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for OSRBTreeMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select(rank.0).map(|(_, value)| value).expect("rank out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Ok(&5));
/// ```
impl<K, V> IndexMut<Rank> for OSRBTreeMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.select_mut(rank.0).map(|(_, value)| value).expect("rank out of bounds")
    }
}
