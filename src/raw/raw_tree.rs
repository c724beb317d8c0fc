use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;
use core::ops::Bound;

use smallvec::SmallVec;

use super::arena::{Arena, NodeId};
use super::node::{Color, RbNode};

/// In-order traversal stack. Inline capacity covers trees up to tens of
/// thousands of entries before spilling to the heap.
pub(crate) type Spine = SmallVec<[NodeId; 16]>;

/// The core left-leaning red-black tree backing `OSRBTreeMap`.
///
/// Every mutation restores the red-black shape invariant before returning,
/// and keeps each node's subtree `size` exact, so rank and select never need
/// a full traversal. The public wrappers only translate the `Option`s
/// returned here into their error surface.
///
/// The rebalancing scheme follows Sedgewick's left-leaning formulation:
/// red links lean left, no node has two red links, and every root-to-leaf
/// path crosses the same number of black links. Insertion adds a red node at
/// the bottom and fixes violations on the way back up; deletion pushes a red
/// link down the search path so the node removed at the bottom is red.
#[derive(Clone)]
pub(crate) struct RawOSRBTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<RbNode<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<NodeId>,
}

impl<K, V> RawOSRBTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of entries in the tree. The root's subtree size is
    /// the total count, so this is O(1).
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no entries.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears all entries from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the root id, if the tree is non-empty.
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns a reference to a node by id.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &RbNode<K, V> {
        self.nodes.get(id)
    }

    /// Returns a mutable reference to a node by id.
    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut RbNode<K, V> {
        self.nodes.get_mut(id)
    }

    /// Returns a reference to a node by id from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawOSRBTree<K, V>`.
    /// - No mutable reference to the node at `id` may be live.
    pub(crate) unsafe fn node_ptr<'a>(ptr: *const Self, id: NodeId) -> &'a RbNode<K, V> {
        // SAFETY: We only read through the `nodes` field; the caller
        // guarantees the node at `id` is not mutably borrowed.
        unsafe { Arena::get_ptr(core::ptr::addr_of!((*ptr).nodes), id) }
    }

    /// Returns the key and a mutable value reference for a node from a raw
    /// pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawOSRBTree<K, V>`.
    /// - The caller must have logical exclusive access to the node at `id`.
    pub(crate) unsafe fn entry_mut_ptr<'a>(ptr: *mut Self, id: NodeId) -> (&'a K, &'a mut V) {
        // SAFETY: Caller guarantees exclusive access to this node. Key and
        // value are disjoint fields, so the shared key borrow cannot alias
        // the unique value borrow.
        let node = unsafe { Arena::get_mut_ptr(core::ptr::addr_of_mut!((*ptr).nodes), id) };
        (&node.key, &mut node.value)
    }

    /// Subtree size of an optional node; absent subtrees count zero.
    #[inline]
    pub(crate) fn size_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).size as usize)
    }

    /// Is the link to this node red? Absent children are black.
    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).color == Color::Red)
    }

    /// Is the link to this node black (or absent)?
    #[inline]
    fn is_black(&self, id: Option<NodeId>) -> bool {
        !self.is_red(id)
    }

    /// The left child of the left child, if both exist.
    #[inline]
    fn left_left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left.and_then(|left| self.node(left).left)
    }

    /// The left child of the right child, if both exist.
    #[inline]
    fn right_left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right.and_then(|right| self.node(right).left)
    }

    /// Recomputes a node's subtree size from its children.
    fn update_size(&mut self, h: NodeId) {
        let node = self.node(h);
        let size = 1 + self.size_of(node.left) + self.size_of(node.right);
        // Entry count is capped by the arena id width, so this cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        {
            self.node_mut(h).size = size as u32;
        }
    }

    /// Returns the leftmost (smallest) node, if any.
    pub(crate) fn first(&self) -> Option<NodeId> {
        let mut h = self.root?;
        while let Some(left) = self.node(h).left {
            h = left;
        }
        Some(h)
    }

    /// Returns the rightmost (largest) node, if any.
    pub(crate) fn last(&self) -> Option<NodeId> {
        let mut h = self.root?;
        while let Some(right) = self.node(h).right {
            h = right;
        }
        Some(h)
    }

    /// Pushes `start` and its left spine onto `stack`, leaving the in-order
    /// first node of the subtree on top.
    pub(crate) fn push_left_spine(&self, stack: &mut Spine, start: Option<NodeId>) {
        let mut cursor = start;
        while let Some(h) = cursor {
            stack.push(h);
            cursor = self.node(h).left;
        }
    }

    /// Pushes `start` and its right spine onto `stack`, leaving the in-order
    /// last node of the subtree on top.
    pub(crate) fn push_right_spine(&self, stack: &mut Spine, start: Option<NodeId>) {
        let mut cursor = start;
        while let Some(h) = cursor {
            stack.push(h);
            cursor = self.node(h).right;
        }
    }

    /// Removes every entry in ascending key order, leaving the tree empty.
    pub(crate) fn drain_in_order(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut stack = Spine::new();
        let mut cursor = self.root;
        loop {
            while let Some(h) = cursor {
                stack.push(h);
                cursor = self.node(h).left;
            }
            let Some(h) = stack.pop() else { break };
            cursor = self.node(h).right;
            let node = self.nodes.take(h);
            entries.push((node.key, node.value));
        }
        self.root = None;
        self.nodes.clear();
        entries
    }
}

// ─── Search and ordered queries ──────────────────────────────────────────────

impl<K, V> RawOSRBTree<K, V> {
    /// Finds the node holding `key`, if present.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            cursor = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Returns true if the tree contains `key`.
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).is_some()
    }

    /// Returns the number of keys strictly less than `key`. The key need not
    /// be present; for an absent key this is its insertion position.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = node.left,
                Ordering::Greater => {
                    rank += self.size_of(node.left) + 1;
                    cursor = node.right;
                }
                Ordering::Equal => {
                    rank += self.size_of(node.left);
                    break;
                }
            }
        }
        rank
    }

    /// Returns the node whose key has the given zero-based rank, or `None`
    /// if `rank` is not in `[0, len)`.
    pub(crate) fn select(&self, rank: usize) -> Option<NodeId> {
        if rank >= self.len() {
            return None;
        }
        let mut h = self.root.expect("a non-zero length implies a root");
        let mut rank = rank;
        loop {
            let node = self.node(h);
            let left_len = self.size_of(node.left);
            match rank.cmp(&left_len) {
                Ordering::Less => h = node.left.expect("rank below the left subtree size"),
                Ordering::Greater => {
                    rank -= left_len + 1;
                    h = node.right.expect("remaining rank lies in the right subtree");
                }
                Ordering::Equal => return Some(h),
            }
        }
    }

    /// Returns the node with the largest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut champ = None;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = node.left,
                Ordering::Greater => {
                    champ = Some(h);
                    cursor = node.right;
                }
                Ordering::Equal => return Some(h),
            }
        }
        champ
    }

    /// Returns the node with the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut champ = None;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    champ = Some(h);
                    cursor = node.left;
                }
                Ordering::Greater => cursor = node.right,
                Ordering::Equal => return Some(h),
            }
        }
        champ
    }

    /// Returns the node with the largest key strictly less than `key`.
    /// Identical to [`floor`](Self::floor) except an equal key goes left.
    pub(crate) fn predecessor<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut champ = None;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            if node.key.borrow() < key {
                champ = Some(h);
                cursor = node.right;
            } else {
                cursor = node.left;
            }
        }
        champ
    }

    /// Returns the node with the smallest key strictly greater than `key`.
    /// Identical to [`ceiling`](Self::ceiling) except an equal key goes right.
    pub(crate) fn successor<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut champ = None;
        let mut cursor = self.root;
        while let Some(h) = cursor {
            let node = self.node(h);
            if key < node.key.borrow() {
                champ = Some(h);
                cursor = node.left;
            } else {
                cursor = node.right;
            }
        }
        champ
    }

    /// Returns the number of keys in the inclusive range `[lo, hi]`.
    /// Requires `lo <= hi`; computed from two rank queries.
    pub(crate) fn range_count<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        debug_assert!(lo <= hi);
        self.rank(hi) - self.rank(lo) + usize::from(self.contains(hi))
    }

    /// Number of keys before the start of a range bound.
    pub(crate) fn count_before<Q>(&self, bound: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match bound {
            Bound::Unbounded => 0,
            Bound::Included(lo) => self.rank(lo),
            Bound::Excluded(lo) => self.rank(lo) + usize::from(self.contains(lo)),
        }
    }

    /// Number of keys at or before the end of a range bound.
    pub(crate) fn count_through<Q>(&self, bound: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match bound {
            Bound::Unbounded => self.len(),
            Bound::Included(hi) => self.rank(hi) + usize::from(self.contains(hi)),
            Bound::Excluded(hi) => self.rank(hi),
        }
    }

    /// Frontier stack positioned at the first key inside a range start
    /// bound: the stack holds every ancestor still to the right of the
    /// bound, first in-range node on top.
    pub(crate) fn lower_spine<Q>(&self, bound: Bound<&Q>) -> Spine
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut stack = Spine::new();
        match bound {
            Bound::Unbounded => self.push_left_spine(&mut stack, self.root),
            Bound::Included(lo) => {
                let mut cursor = self.root;
                while let Some(h) = cursor {
                    let node = self.node(h);
                    if node.key.borrow() >= lo {
                        stack.push(h);
                        cursor = node.left;
                    } else {
                        cursor = node.right;
                    }
                }
            }
            Bound::Excluded(lo) => {
                let mut cursor = self.root;
                while let Some(h) = cursor {
                    let node = self.node(h);
                    if node.key.borrow() > lo {
                        stack.push(h);
                        cursor = node.left;
                    } else {
                        cursor = node.right;
                    }
                }
            }
        }
        stack
    }

    /// Mirror of [`lower_spine`](Self::lower_spine) for the end bound: the
    /// stack holds every ancestor still to the left of the bound, last
    /// in-range node on top.
    pub(crate) fn upper_spine<Q>(&self, bound: Bound<&Q>) -> Spine
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut stack = Spine::new();
        match bound {
            Bound::Unbounded => self.push_right_spine(&mut stack, self.root),
            Bound::Included(hi) => {
                let mut cursor = self.root;
                while let Some(h) = cursor {
                    let node = self.node(h);
                    if node.key.borrow() <= hi {
                        stack.push(h);
                        cursor = node.right;
                    } else {
                        cursor = node.left;
                    }
                }
            }
            Bound::Excluded(hi) => {
                let mut cursor = self.root;
                while let Some(h) = cursor {
                    let node = self.node(h);
                    if node.key.borrow() < hi {
                        stack.push(h);
                        cursor = node.right;
                    } else {
                        cursor = node.left;
                    }
                }
            }
        }
        stack
    }
}

// ─── Insertion ───────────────────────────────────────────────────────────────

impl<K: Ord, V> RawOSRBTree<K, V> {
    /// Inserts a key-value pair, returning the displaced value if the key
    /// was already present. An equal key replaces its value in place, so
    /// shape, colors, and sizes are untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(key, value).0
    }

    /// Like [`insert`](Self::insert), but also reports the id the entry
    /// ended up at. Ids are stable across rebalancing, so callers may hold
    /// on to it until the entry is removed.
    pub(crate) fn insert_entry(&mut self, key: K, value: V) -> (Option<V>, NodeId) {
        let mut dest = None;
        let mut replaced = None;
        let root = self.insert_at(self.root, key, value, &mut dest, &mut replaced);
        self.root = Some(root);
        self.node_mut(root).color = Color::Black;
        (replaced, dest.expect("insertion records the destination node"))
    }

    /// Search for the key; update the value if found, grow the tree if new.
    fn insert_at(
        &mut self,
        h: Option<NodeId>,
        key: K,
        value: V,
        dest: &mut Option<NodeId>,
        replaced: &mut Option<V>,
    ) -> NodeId {
        let Some(h) = h else {
            let id = self.nodes.alloc(RbNode::new(key, value, Color::Red));
            *dest = Some(id);
            return id;
        };

        match key.cmp(&self.node(h).key) {
            Ordering::Less => {
                let left = self.node(h).left;
                let left = self.insert_at(left, key, value, dest, replaced);
                self.node_mut(h).left = Some(left);
            }
            Ordering::Greater => {
                let right = self.node(h).right;
                let right = self.insert_at(right, key, value, dest, replaced);
                self.node_mut(h).right = Some(right);
            }
            Ordering::Equal => {
                *replaced = Some(mem::replace(&mut self.node_mut(h).value, value));
                *dest = Some(h);
                return h;
            }
        }

        self.fix_up(h)
    }

    /// Builds a tree from entries in strictly increasing key order in linear
    /// time with zero key compares. The caller must guarantee the ordering.
    pub(crate) fn from_sorted(entries: Vec<(K, V)>) -> Self {
        let fence = entries.len();
        let mut tree = Self {
            nodes: Arena::with_capacity(fence),
            root: None,
        };
        let mut entries = entries.into_iter();
        tree.root = tree.build_sorted(&mut entries, fence, 1);
        if let Some(root) = tree.root {
            tree.node_mut(root).color = Color::Black;
        }
        tree
    }

    /// Consumes the iterator in-order into a complete binary tree using heap
    /// indices; nodes on the bottom level start red and doubled reds are
    /// flipped away on the way back up.
    fn build_sorted<I>(&mut self, entries: &mut I, fence: usize, index: usize) -> Option<NodeId>
    where
        I: Iterator<Item = (K, V)>,
    {
        if fence < index {
            return None;
        }

        let left = self.build_sorted(entries, fence, index * 2);
        let (key, value) = entries.next().expect("iterator yields `fence` entries");
        let bit_length = (usize::BITS - fence.leading_zeros()) as usize;
        let on_bottom_level = index >= (1 << (bit_length - 1));
        let color = if on_bottom_level { Color::Red } else { Color::Black };
        let h = self.nodes.alloc(RbNode::new(key, value, color));
        self.node_mut(h).left = left;
        let right = self.build_sorted(entries, fence, index * 2 + 1);
        self.node_mut(h).right = right;

        if self.is_red(left) && self.is_red(right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        Some(h)
    }
}

// ─── Deletion ────────────────────────────────────────────────────────────────

impl<K, V> RawOSRBTree<K, V> {
    /// Removes `key` and returns its entry, or `None` if absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // Establish membership first: the top-down deletion recolors the
        // search path, which an absent key must not do.
        if !self.contains(key) {
            return None;
        }

        let root = self.root.expect("membership implies a root");
        if self.is_black(self.node(root).left) && self.is_black(self.node(root).right) {
            self.node_mut(root).color = Color::Red;
        }

        let mut removed = None;
        self.root = self.remove_at(root, key, &mut removed);
        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }

        debug_assert!(removed.is_some());
        removed
    }

    /// Deletes the node holding `key` in the subtree rooted at `h`. The key
    /// must be present in that subtree.
    fn remove_at<Q>(&mut self, mut h: NodeId, key: &Q, removed: &mut Option<(K, V)>) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if key < self.node(h).key.borrow() {
            if self.is_black(self.node(h).left) && self.is_black(self.left_left(h)) {
                h = self.move_red_left(h);
            }
            let left = self.node(h).left.expect("the key lies in the left subtree");
            let left = self.remove_at(left, key, removed);
            self.node_mut(h).left = left;
            return Some(self.fix_up(h));
        }

        if self.is_red(self.node(h).left) {
            h = self.rotate_right(h);
        } else {
            if self.node(h).right.is_none() {
                // Bottom of the search path; this is the node to delete and
                // it has no children.
                debug_assert!(key == self.node(h).key.borrow());
                let node = self.nodes.take(h);
                debug_assert!(node.left.is_none());
                *removed = Some((node.key, node.value));
                return None;
            }
            if self.is_black(self.node(h).right) && self.is_black(self.right_left(h)) {
                h = self.move_red_right(h);
            }
            if key == self.node(h).key.borrow() {
                // Swap in the in-order successor's entry and delete the
                // node it came from; the shape change is the same as
                // splicing the successor in, with simpler ownership.
                let right = self.node(h).right.expect("the equal case keeps a right subtree");
                let mut successor = None;
                let right = self.remove_min_at(right, &mut successor);
                let (succ_key, succ_value) = successor.expect("a non-empty subtree yields its minimum");
                let node = self.node_mut(h);
                node.right = right;
                let old_key = mem::replace(&mut node.key, succ_key);
                let old_value = mem::replace(&mut node.value, succ_value);
                *removed = Some((old_key, old_value));
                return Some(self.fix_up(h));
            }
        }

        let right = self.node(h).right.expect("the key lies in the right subtree");
        let right = self.remove_at(right, key, removed);
        self.node_mut(h).right = right;
        Some(self.fix_up(h))
    }

    /// Removes and returns the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        if self.is_black(self.node(root).left) && self.is_black(self.node(root).right) {
            self.node_mut(root).color = Color::Red;
        }

        let mut removed = None;
        self.root = self.remove_min_at(root, &mut removed);
        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
        removed
    }

    /// Removes and returns the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        if self.is_black(self.node(root).left) && self.is_black(self.node(root).right) {
            self.node_mut(root).color = Color::Red;
        }

        let mut removed = None;
        self.root = self.remove_max_at(root, &mut removed);
        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
        removed
    }

    /// Deletes the smallest node in the subtree rooted at `h`.
    fn remove_min_at(&mut self, mut h: NodeId, removed: &mut Option<(K, V)>) -> Option<NodeId> {
        if self.node(h).left.is_none() {
            let node = self.nodes.take(h);
            // A lone right child would be a right-leaning red link.
            debug_assert!(node.right.is_none());
            *removed = Some((node.key, node.value));
            return None;
        }

        if self.is_black(self.node(h).left) && self.is_black(self.left_left(h)) {
            h = self.move_red_left(h);
        }

        let left = self.node(h).left.expect("move_red_left keeps the left child");
        let left = self.remove_min_at(left, removed);
        self.node_mut(h).left = left;
        Some(self.fix_up(h))
    }

    /// Deletes the largest node in the subtree rooted at `h`.
    fn remove_max_at(&mut self, mut h: NodeId, removed: &mut Option<(K, V)>) -> Option<NodeId> {
        if self.is_red(self.node(h).left) {
            h = self.rotate_right(h);
        }

        if self.node(h).right.is_none() {
            let node = self.nodes.take(h);
            debug_assert!(node.left.is_none());
            *removed = Some((node.key, node.value));
            return None;
        }

        if self.is_black(self.node(h).right) && self.is_black(self.right_left(h)) {
            h = self.move_red_right(h);
        }

        let right = self.node(h).right.expect("move_red_right keeps the right child");
        let right = self.remove_max_at(right, removed);
        self.node_mut(h).right = right;
        Some(self.fix_up(h))
    }
}

// ─── Rebalancing primitives ──────────────────────────────────────────────────

impl<K, V> RawOSRBTree<K, V> {
    /// Makes a right-leaning red link lean left. Preserves in-order key
    /// sequence; the rotated-in node inherits the old root's color and size.
    fn rotate_left(&mut self, h: NodeId) -> NodeId {
        let x = self.node(h).right.expect("rotate_left: right child exists");
        debug_assert!(self.is_red(Some(x)));

        let x_left = self.node(x).left;
        let (h_color, h_size) = {
            let node = self.node(h);
            (node.color, node.size)
        };

        self.node_mut(h).right = x_left;
        {
            let x_node = self.node_mut(x);
            x_node.left = Some(h);
            x_node.color = h_color;
            x_node.size = h_size;
        }
        self.node_mut(h).color = Color::Red;
        self.update_size(h);
        x
    }

    /// Makes a left-leaning red link lean right.
    fn rotate_right(&mut self, h: NodeId) -> NodeId {
        let x = self.node(h).left.expect("rotate_right: left child exists");
        debug_assert!(self.is_red(Some(x)));

        let x_right = self.node(x).right;
        let (h_color, h_size) = {
            let node = self.node(h);
            (node.color, node.size)
        };

        self.node_mut(h).left = x_right;
        {
            let x_node = self.node_mut(x);
            x_node.right = Some(h);
            x_node.color = h_color;
            x_node.size = h_size;
        }
        self.node_mut(h).color = Color::Red;
        self.update_size(h);
        x
    }

    /// Flips the colors of a node and its two children.
    fn flip_colors(&mut self, h: NodeId) {
        let (left, right) = {
            let node = self.node(h);
            (
                node.left.expect("flip_colors: left child exists"),
                node.right.expect("flip_colors: right child exists"),
            )
        };
        for id in [h, left, right] {
            let node = self.node_mut(id);
            node.color = node.color.toggled();
        }
    }

    /// Moves a red link to the left by coloring `h.left` or one of its
    /// children red.
    fn move_red_left(&mut self, mut h: NodeId) -> NodeId {
        self.flip_colors(h);
        let right = self.node(h).right.expect("move_red_left: right child exists");
        if self.is_red(self.node(right).left) {
            // Two consecutive red links appeared; rotate them apart.
            let right = self.rotate_right(right);
            self.node_mut(h).right = Some(right);
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    /// Moves a red link to the right by coloring `h.right` or one of its
    /// children red.
    fn move_red_right(&mut self, mut h: NodeId) -> NodeId {
        self.flip_colors(h);
        if self.is_red(self.left_left(h)) {
            // Two consecutive red links appeared; rotate them apart.
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    /// Restores the left-leaning invariant around a node and refreshes its
    /// subtree size. Called on the way back up from every mutation.
    fn fix_up(&mut self, mut h: NodeId) -> NodeId {
        if self.is_red(self.node(h).right) && self.is_black(self.node(h).left) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.node(h).left) && self.is_red(self.left_left(h)) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.node(h).left) && self.is_red(self.node(h).right) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<K: Ord, V> RawOSRBTree<K, V> {
        /// Validates every red-black and order-statistic invariant, panicking
        /// with a description of the first violation. Test-only; runs a full
        /// traversal.
        pub(crate) fn validate_invariants(&self) {
            let Some(root) = self.root else {
                assert_eq!(self.len(), 0, "empty tree must report length 0");
                return;
            };
            assert!(self.is_black(Some(root)), "root must be black");

            let (_, size) = self.validate_node(root, None, None);
            assert_eq!(size, self.len(), "root size must equal the entry count");

            // Height bound of the red-black scheme: height <= 2 log2(n + 1).
            let height = self.height(self.root);
            let ceil_log2 = (self.len() + 1).next_power_of_two().trailing_zeros() as usize;
            assert!(
                height <= 2 * ceil_log2,
                "height {height} exceeds the red-black bound for {} entries",
                self.len()
            );
        }

        /// Checks one subtree; returns its black height and entry count.
        fn validate_node(&self, h: NodeId, lo: Option<&K>, hi: Option<&K>) -> (usize, usize) {
            let node = self.node(h);
            if let Some(lo) = lo {
                assert!(lo < &node.key, "left subtree key out of order");
            }
            if let Some(hi) = hi {
                assert!(&node.key < hi, "right subtree key out of order");
            }

            assert!(!self.is_red(node.right), "red link leans right");
            if self.is_red(Some(h)) {
                assert!(!self.is_red(node.left), "two consecutive red links");
            }

            let (left_black, left_size) = node.left.map_or((0, 0), |left| self.validate_node(left, lo, Some(&node.key)));
            let (right_black, right_size) =
                node.right.map_or((0, 0), |right| self.validate_node(right, Some(&node.key), hi));

            assert_eq!(left_black, right_black, "black height differs between subtrees");
            let size = left_size + 1 + right_size;
            assert_eq!(node.size as usize, size, "size field is stale");

            (left_black + usize::from(self.is_black(Some(h))), size)
        }

        fn height(&self, h: Option<NodeId>) -> usize {
            h.map_or(0, |h| {
                let node = self.node(h);
                1 + core::cmp::max(self.height(node.left), self.height(node.right))
            })
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i64, u32),
        Remove(i64),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let key = -512i64..512i64;
        prop_oneof![
            6 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => key.prop_map(Op::Remove),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        /// Replays random op sequences against a `BTreeMap` model and
        /// revalidates every invariant after each mutation.
        #[test]
        fn tree_matches_model_and_keeps_invariants(ops in prop::collection::vec(op_strategy(), 0..512)) {
            let mut tree: RawOSRBTree<i64, u32> = RawOSRBTree::new();
            let mut model: BTreeMap<i64, u32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(tree.remove(&k), model.remove_entry(&k));
                    }
                    Op::PopFirst => {
                        prop_assert_eq!(tree.pop_first(), model.pop_first());
                    }
                    Op::PopLast => {
                        prop_assert_eq!(tree.pop_last(), model.pop_last());
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            let drained = tree.drain_in_order();
            let expected: Vec<(i64, u32)> = model.into_iter().collect();
            prop_assert_eq!(drained, expected);
            prop_assert_eq!(tree.len(), 0);
        }

        /// `rank` and `select` are inverse for every rank, and `rank` agrees
        /// with the model's position for absent keys too.
        #[test]
        fn rank_select_inverse(keys in prop::collection::btree_set(-512i64..512i64, 0..256), probe in -600i64..600i64) {
            let mut tree: RawOSRBTree<i64, ()> = RawOSRBTree::new();
            for &k in &keys {
                tree.insert(k, ());
            }

            for (position, &k) in keys.iter().enumerate() {
                prop_assert_eq!(tree.rank(&k), position);
                let selected = tree.select(position).expect("rank in range");
                prop_assert_eq!(&tree.node(selected).key, &k);
            }
            prop_assert!(tree.select(keys.len()).is_none());
            prop_assert_eq!(tree.rank(&probe), keys.iter().filter(|&&k| k < probe).count());
        }

        /// Linear-time construction from sorted entries produces a valid
        /// tree equal to the incremental one.
        #[test]
        fn from_sorted_matches_incremental(keys in prop::collection::btree_set(-10_000i64..10_000i64, 0..512)) {
            let entries: Vec<(i64, i64)> = keys.iter().map(|&k| (k, k * 2)).collect();
            let mut built = RawOSRBTree::from_sorted(entries.clone());
            built.validate_invariants();

            let mut incremental: RawOSRBTree<i64, i64> = RawOSRBTree::new();
            for &(k, v) in &entries {
                incremental.insert(k, v);
            }

            prop_assert_eq!(built.len(), incremental.len());
            prop_assert_eq!(built.drain_in_order(), incremental.drain_in_order());
        }
    }

    /// Adversarial monotone insertions stay within the height bound.
    #[test]
    fn monotone_insertions_stay_balanced() {
        let mut ascending: RawOSRBTree<u32, ()> = RawOSRBTree::new();
        let mut descending: RawOSRBTree<u32, ()> = RawOSRBTree::new();
        for i in 0..4_096 {
            ascending.insert(i, ());
            descending.insert(4_096 - i, ());
        }
        ascending.validate_invariants();
        descending.validate_invariants();
    }

    /// Removing an absent key is a pure no-op, including colors and sizes.
    #[test]
    fn absent_remove_does_not_touch_the_tree() {
        let mut tree: RawOSRBTree<i64, ()> = RawOSRBTree::new();
        for k in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(k, ());
        }

        let snapshot = tree.clone();
        assert!(tree.remove(&6).is_none());
        tree.validate_invariants();
        assert_eq!(tree.len(), snapshot.len());
        for rank in 0..tree.len() {
            let a = tree.select(rank).expect("rank in range");
            let b = snapshot.select(rank).expect("rank in range");
            assert_eq!(tree.node(a).key, snapshot.node(b).key);
            assert_eq!(tree.node(a).color, snapshot.node(b).color);
        }
    }
}
