//! # Instance Pool
//!
//! Fixed-capacity generational slot pool for live swing instances.

/// Handle to an object in an [`InstancePool`].
///
/// A handle stays valid until its object is freed. Freed slots bump their
/// generation, so a stale handle never resolves to the slot's next occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceHandle {
    /// Slot index.
    index: u32,
    /// Generation the slot had when this handle was issued.
    generation: u32,
}

impl InstanceHandle {
    /// Rebuilds a handle from its parts (e.g. a host-side id table).
    #[must_use]
    pub const fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index (stable for the handle's lifetime).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// A pool allocator for live objects of one type.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. The swing engine is driven from a single
/// simulation thread.
///
/// # Example
///
/// ```rust
/// use bladeworks_core::InstancePool;
///
/// let mut pool: InstancePool<u32> = InstancePool::new(4);
/// let handle = pool.allocate(7).unwrap();
/// assert_eq!(pool.get(handle), Some(&7));
/// assert_eq!(pool.free(handle), Some(7));
/// assert!(pool.get(handle).is_none());
/// ```
#[derive(Debug)]
pub struct InstancePool<T> {
    /// The storage array.
    storage: Box<[Slot<T>]>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of allocated objects.
    allocated_count: usize,
}

impl<T> InstancePool<T> {
    /// Creates a new pool with the specified capacity (at least 1).
    ///
    /// All slot memory is pre-allocated upfront.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, u32::MAX as usize);

        let storage: Vec<Slot<T>> = (0..capacity)
            .map(|_| Slot {
                value: None,
                generation: 0,
            })
            .collect();

        #[allow(clippy::cast_possible_truncation)]
        let free_list: Vec<u32> = (0..capacity as u32).rev().collect();

        Self {
            storage: storage.into_boxed_slice(),
            free_list,
            allocated_count: 0,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the number of currently allocated objects.
    #[inline]
    #[must_use]
    pub const fn allocated_count(&self) -> usize {
        self.allocated_count
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.allocated_count
    }

    /// Handle the next [`InstancePool::allocate`] will return, if any slot is
    /// free.
    #[must_use]
    pub fn next_handle(&self) -> Option<InstanceHandle> {
        let index = *self.free_list.last()?;
        Some(InstanceHandle {
            index,
            generation: self.storage[index as usize].generation,
        })
    }

    /// Stores `value` in a free slot.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**. Returns
    /// `None` if the pool is full.
    pub fn allocate(&mut self, value: T) -> Option<InstanceHandle> {
        let index = self.free_list.pop()?;
        let slot = &mut self.storage[index as usize];
        slot.value = Some(value);
        self.allocated_count += 1;

        Some(InstanceHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Frees an allocated object and returns it.
    ///
    /// Returns `None` for stale or foreign handles.
    pub fn free(&mut self, handle: InstanceHandle) -> Option<T> {
        let slot = self.storage.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.allocated_count -= 1;

        Some(value)
    }

    /// Gets a reference to an allocated object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: InstanceHandle) -> Option<&T> {
        let slot = self.storage.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Gets a mutable reference to an allocated object.
    #[inline]
    pub fn get_mut(&mut self, handle: InstanceHandle) -> Option<&mut T> {
        let slot = self.storage.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// True if `handle` still refers to a live object.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: InstanceHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Iterates over all allocated objects.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceHandle, &T)> {
        self.storage.iter().enumerate().filter_map(|(index, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let handle = InstanceHandle {
                index: index as u32,
                generation: slot.generation,
            };
            slot.value.as_ref().map(|v| (handle, v))
        })
    }
}
