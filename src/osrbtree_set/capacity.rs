use super::OSRBTreeSet;
use crate::OSRBTreeMap;

impl<T> OSRBTreeSet<T> {
    /// Makes a new, empty `OSRBTreeSet` with room for `capacity` items
    /// before the node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeSet;
    ///
    /// let set: OSRBTreeSet<i32> = OSRBTreeSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: OSRBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of items the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
}
