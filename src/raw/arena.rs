use alloc::vec::Vec;
use core::num::NonZero;

#[cfg(test)]
type RawId = u16;
#[cfg(not(test))]
type RawId = u32;

/// A stable handle to an occupied slot in an [`Arena`].
///
/// Ids are `NonZero` so that `Option<NodeId>` is the same size as `NodeId`;
/// the child links of tree nodes rely on that niche. An id stays valid until
/// the slot it names is freed, no matter how the tree around it is rewired.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZero<RawId>);

impl NodeId {
    pub(crate) const MAX: usize = (RawId::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`NodeId::from_index()` - `index` > `NodeId::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawId).unwrap())
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// A slot arena with a free list.
///
/// Freed slots are recycled before the backing vector grows, so a tree that
/// churns entries settles into a fixed footprint.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        if let Some(id) = self.free.pop() {
            // Reuse a free slot/id.
            self.slots[id.index()] = Some(element);
            id
        } else {
            // Strict less-than so the slot count never exceeds the id range.
            assert!(
                self.slots.len() < NodeId::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                NodeId::MAX
            );
            self.slots.push(Some(element));
            NodeId::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        self.slots[id.index()].as_ref().expect("`Arena::get()` - `id` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.index()].as_mut().expect("`Arena::get_mut()` - `id` is invalid!")
    }

    /// Returns a reference to an element by id from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `Arena<T>`.
    /// - No mutable reference to the element at `id` may be live.
    #[inline]
    pub(crate) unsafe fn get_ptr<'a>(ptr: *const Self, id: NodeId) -> &'a T {
        // SAFETY: Caller guarantees ptr is valid. We only read from the slots field.
        unsafe { (&(*ptr).slots)[id.index()].as_ref().expect("`Arena::get_ptr()` - `id` is invalid!") }
    }

    /// Returns a mutable reference to an element by id from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `Arena<T>`.
    /// - The caller must have logical exclusive access to the element at `id`.
    #[inline]
    pub(crate) unsafe fn get_mut_ptr<'a>(ptr: *mut Self, id: NodeId) -> &'a mut T {
        // SAFETY: Caller guarantees ptr is valid and access to the slot is exclusive.
        unsafe {
            (&mut *core::ptr::addr_of_mut!((*ptr).slots))[id.index()]
                .as_mut()
                .expect("`Arena::get_mut_ptr()` - `id` is invalid!")
        }
    }

    pub(crate) fn take(&mut self, id: NodeId) -> T {
        let element = self.slots[id.index()].take().expect("`Arena::take()` - `id` is invalid!");
        self.free.push(id);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
