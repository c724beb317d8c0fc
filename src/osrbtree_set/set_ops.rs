use core::ops::{BitAnd, BitOr};

use super::OSRBTreeSet;

impl<T: Ord> OSRBTreeSet<T> {
    /// Returns `true` if every item of `self` is also in `other`.
    ///
    /// # Complexity
    ///
    /// O(n log m), where n and m are the lengths of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let sup = OSRBTreeSet::from([1, 2, 3]);
    /// assert!(OSRBTreeSet::from([1, 2]).is_subset(&sup));
    /// assert!(!OSRBTreeSet::from([1, 4]).is_subset(&sup));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &OSRBTreeSet<T>) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Ord + Clone> BitAnd<&OSRBTreeSet<T>> for &OSRBTreeSet<T> {
    type Output = OSRBTreeSet<T>;

    /// Returns the intersection of `self` and `rhs` as a new `OSRBTreeSet<T>`.
    ///
    /// Iterates the smaller operand and probes the larger, so the cost is
    /// O(a log b) with a the smaller and b the larger length.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let a = OSRBTreeSet::from([1, 2, 3]);
    /// let b = OSRBTreeSet::from([2, 3, 4]);
    /// assert_eq!(&a & &b, OSRBTreeSet::from([2, 3]));
    /// ```
    fn bitand(self, rhs: &OSRBTreeSet<T>) -> OSRBTreeSet<T> {
        let (small, large) = if self.len() <= rhs.len() { (self, rhs) } else { (rhs, self) };
        small.iter().filter(|&item| large.contains(item)).cloned().collect()
    }
}

impl<T: Ord + Clone> BitOr<&OSRBTreeSet<T>> for &OSRBTreeSet<T> {
    type Output = OSRBTreeSet<T>;

    /// Returns the union of `self` and `rhs` as a new `OSRBTreeSet<T>`.
    ///
    /// Clones the larger operand and inserts the smaller one's items.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let a = OSRBTreeSet::from([1, 2, 3]);
    /// let b = OSRBTreeSet::from([3, 4, 5]);
    /// assert_eq!(&a | &b, OSRBTreeSet::from([1, 2, 3, 4, 5]));
    /// ```
    fn bitor(self, rhs: &OSRBTreeSet<T>) -> OSRBTreeSet<T> {
        let (small, large) = if self.len() <= rhs.len() { (self, rhs) } else { (rhs, self) };
        let mut union = large.clone();
        union.extend(small.iter().cloned());
        union
    }
}
