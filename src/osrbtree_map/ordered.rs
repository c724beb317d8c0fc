use core::borrow::Borrow;

use super::OSRBTreeMap;
use crate::error::{Error, Result};

impl<K, V> OSRBTreeMap<K, V> {
    /// Returns the entry with the smallest key in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyTree));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok((&1, &"a")));
    /// ```
    pub fn min(&self) -> Result<(&K, &V)> {
        let h = self.raw.first().ok_or(Error::EmptyTree)?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the largest key in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.max(), Err(Error::EmptyTree));
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.max(), Ok((&2, &"b")));
    /// ```
    pub fn max(&self) -> Result<(&K, &V)> {
        let h = self.raw.last().ok_or(Error::EmptyTree)?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    /// The query key need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`] if every key is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([(3, "c"), (7, "g")]);
    /// assert_eq!(map.floor(&7), Ok((&7, &"g")));
    /// assert_eq!(map.floor(&6), Ok((&3, &"c")));
    /// assert_eq!(map.floor(&2), Err(Error::NoSuchKey));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let h = self.raw.floor(key).ok_or(Error::NoSuchKey)?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the smallest key greater than or equal to
    /// `key`. The query key need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`] if every key is less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([(3, "c"), (7, "g")]);
    /// assert_eq!(map.ceiling(&3), Ok((&3, &"c")));
    /// assert_eq!(map.ceiling(&4), Ok((&7, &"g")));
    /// assert_eq!(map.ceiling(&8), Err(Error::NoSuchKey));
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let h = self.raw.ceiling(key).ok_or(Error::NoSuchKey)?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    /// The query key need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`] if every key is at least `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([(3, "c"), (7, "g")]);
    /// assert_eq!(map.predecessor(&7), Ok((&3, &"c")));
    /// assert_eq!(map.predecessor(&3), Err(Error::NoSuchKey));
    /// ```
    pub fn predecessor<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let h = self.raw.predecessor(key).ok_or(Error::NoSuchKey)?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    /// The query key need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`] if every key is at most `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([(3, "c"), (7, "g")]);
    /// assert_eq!(map.successor(&3), Ok((&7, &"g")));
    /// assert_eq!(map.successor(&7), Err(Error::NoSuchKey));
    /// ```
    pub fn successor<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let h = self.raw.successor(key).ok_or(Error::NoSuchKey)?;
        let node = self.raw.node(h);
        Ok((&node.key, &node.value))
    }

    /// Returns the number of keys in the inclusive range `[lo, hi]`.
    /// Neither endpoint needs to be present.
    ///
    /// # Complexity
    ///
    /// O(log n) - two rank queries, no traversal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from([(1, "a"), (3, "c"), (7, "g"), (9, "i")]);
    /// assert_eq!(map.range_count(&2, &7), Ok(2));
    /// assert_eq!(map.range_count(&1, &9), Ok(4));
    /// assert_eq!(map.range_count(&9, &1), Err(Error::InvalidRange));
    /// ```
    pub fn range_count<Q>(&self, lo: &Q, hi: &Q) -> Result<usize>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return Err(Error::InvalidRange);
        }
        Ok(self.raw.range_count(lo, hi))
    }
}
