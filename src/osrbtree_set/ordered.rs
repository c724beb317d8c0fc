use core::borrow::Borrow;

use super::OSRBTreeSet;
use crate::error::Result;

impl<T> OSRBTreeSet<T> {
    /// Returns the smallest item in the set.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`](crate::Error::EmptyTree) if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeSet};
    ///
    /// let mut set = OSRBTreeSet::new();
    /// assert_eq!(set.min(), Err(Error::EmptyTree));
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        self.map.min().map(|(item, _)| item)
    }

    /// Returns the largest item in the set.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`](crate::Error::EmptyTree) if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let set = OSRBTreeSet::from([1, 2]);
    /// assert_eq!(set.max(), Ok(&2));
    /// ```
    pub fn max(&self) -> Result<&T> {
        self.map.max().map(|(item, _)| item)
    }

    /// Returns the largest item less than or equal to the value. The query
    /// value need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`](crate::Error::NoSuchKey) if every item
    /// is greater than the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeSet};
    ///
    /// let set = OSRBTreeSet::from([3, 7]);
    /// assert_eq!(set.floor(&7), Ok(&7));
    /// assert_eq!(set.floor(&6), Ok(&3));
    /// assert_eq!(set.floor(&2), Err(Error::NoSuchKey));
    /// ```
    pub fn floor<Q>(&self, value: &Q) -> Result<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.floor(value).map(|(item, _)| item)
    }

    /// Returns the smallest item greater than or equal to the value. The
    /// query value need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`](crate::Error::NoSuchKey) if every item
    /// is less than the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeSet};
    ///
    /// let set = OSRBTreeSet::from([3, 7]);
    /// assert_eq!(set.ceiling(&4), Ok(&7));
    /// assert_eq!(set.ceiling(&8), Err(Error::NoSuchKey));
    /// ```
    pub fn ceiling<Q>(&self, value: &Q) -> Result<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.ceiling(value).map(|(item, _)| item)
    }

    /// Returns the largest item strictly less than the value. The query
    /// value need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`](crate::Error::NoSuchKey) if every item
    /// is at least the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeSet};
    ///
    /// let set = OSRBTreeSet::from([3, 7]);
    /// assert_eq!(set.predecessor(&7), Ok(&3));
    /// assert_eq!(set.predecessor(&3), Err(Error::NoSuchKey));
    /// ```
    pub fn predecessor<Q>(&self, value: &Q) -> Result<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.predecessor(value).map(|(item, _)| item)
    }

    /// Returns the smallest item strictly greater than the value. The query
    /// value need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchKey`](crate::Error::NoSuchKey) if every item
    /// is at most the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeSet};
    ///
    /// let set = OSRBTreeSet::from([3, 7]);
    /// assert_eq!(set.successor(&3), Ok(&7));
    /// assert_eq!(set.successor(&7), Err(Error::NoSuchKey));
    /// ```
    pub fn successor<Q>(&self, value: &Q) -> Result<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.successor(value).map(|(item, _)| item)
    }

    /// Returns the number of items in the inclusive range `[lo, hi]`.
    /// Neither endpoint needs to be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if
    /// `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let set = OSRBTreeSet::from([1, 3, 7, 9]);
    /// assert_eq!(set.range_count(&2, &7), Ok(2));
    /// assert_eq!(set.range_count(&1, &9), Ok(4));
    /// ```
    pub fn range_count<Q>(&self, lo: &Q, hi: &Q) -> Result<usize>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.range_count(lo, hi)
    }
}
