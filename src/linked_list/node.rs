use alloc::vec::Vec;
use core::fmt;

use log::trace;

use super::error::ListError;

/// Sentinel slot index used for "no neighbor" in internal links.
pub(crate) const NONE: u32 = u32::MAX;

/// A handle to a node living in a [`NodePool`].
///
/// Handles are `Copy` and stay valid while the node is alive, across any
/// number of insertions and deletions elsewhere in the pool. Once the node
/// is released its slot moves to a new generation, so a stale handle no
/// longer resolves even if the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Slot index of this node inside its pool.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

/// A single list element: the value plus its neighbor links.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: u32,
    pub(crate) next: u32,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: u32 },
}

#[derive(Debug)]
struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

/// Arena owning the storage of list nodes.
///
/// A pool may back any number of lists. Lists sharing a pool can exchange
/// nodes (see [`List::join`](super::list::List::join)) without copying or
/// reallocating anything. Released slots are recycled through an internal
/// free list, so steady-state insert/delete traffic does not allocate.
pub struct NodePool<T> {
    entries: Vec<Entry<T>>,
    free_head: u32,
    live: usize,
    #[cfg(test)]
    alloc_budget: Option<usize>,
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodePool<T> {
    /// Creates an empty pool. Does not allocate.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: NONE,
            live: 0,
            #[cfg(test)]
            alloc_budget: None,
        }
    }

    /// Creates a pool with room for `capacity` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::AllocFailed`] if the storage cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ListError> {
        let mut pool = Self::new();
        pool.try_reserve(capacity)?;
        Ok(pool)
    }

    /// Reserves room for at least `additional` more nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::AllocFailed`] if the storage cannot be reserved.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ListError> {
        self.entries.try_reserve(additional).map_err(|_| ListError::AllocFailed {
            capacity: self.entries.capacity(),
        })?;
        trace!("node pool reserved {} slots", self.entries.capacity());
        Ok(())
    }

    /// Number of live nodes across every list using this pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots the pool can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns `true` if `id` refers to a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.resolve(id).is_some()
    }

    /// Returns the value stored in a live node.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.resolve(id).map(|index| &self.node(index).value)
    }

    /// Returns the value stored in a live node, mutably.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.resolve(id)?;
        Some(&mut self.node_mut(index).value)
    }

    /// Returns the node following `id` in its list.
    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        let index = self.resolve(id)?;
        self.id_at(self.node(index).next)
    }

    /// Returns the node preceding `id` in its list.
    pub fn prev_of(&self, id: NodeId) -> Option<NodeId> {
        let index = self.resolve(id)?;
        self.id_at(self.node(index).prev)
    }

    /// Lets `successes` more allocations through, then fails every one
    /// until [`reset_alloc_faults`](Self::reset_alloc_faults).
    #[cfg(test)]
    pub(crate) fn fail_allocs_after(&mut self, successes: usize) {
        self.alloc_budget = Some(successes);
    }

    #[cfg(test)]
    pub(crate) fn reset_alloc_faults(&mut self) {
        self.alloc_budget = None;
    }

    #[cfg(test)]
    fn take_injected_failure(&mut self) -> bool {
        match &mut self.alloc_budget {
            None => false,
            Some(0) => true,
            Some(left) => {
                *left -= 1;
                false
            }
        }
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn take_injected_failure(&mut self) -> bool {
        false
    }

    /// Maps a handle to its slot index if the node is still alive.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<u32> {
        match self.entries.get(id.index as usize) {
            Some(Entry {
                generation,
                slot: Slot::Occupied(_),
            }) if *generation == id.generation => Some(id.index),
            _ => None,
        }
    }

    /// Like [`resolve`](Self::resolve) but for handles the caller promised
    /// are alive.
    ///
    /// # Panics
    ///
    /// Panics if the node has been released.
    pub(crate) fn expect_live(&self, id: NodeId) -> u32 {
        match self.resolve(id) {
            Some(index) => index,
            None => panic!("stale node handle {id:?}"),
        }
    }

    /// Builds the current handle for an occupied slot.
    pub(crate) fn id_of(&self, index: u32) -> NodeId {
        NodeId {
            index,
            generation: self.entries[index as usize].generation,
        }
    }

    /// Like [`id_of`](Self::id_of), mapping the sentinel to `None`.
    pub(crate) fn id_at(&self, index: u32) -> Option<NodeId> {
        (index != NONE).then(|| self.id_of(index))
    }

    pub(crate) fn node(&self, index: u32) -> &Node<T> {
        match &self.entries[index as usize].slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {index} linked into a list"),
        }
    }

    pub(crate) fn node_mut(&mut self, index: u32) -> &mut Node<T> {
        match &mut self.entries[index as usize].slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {index} linked into a list"),
        }
    }

    /// Stores `value` in a fresh unlinked node.
    ///
    /// On failure the value is handed back and the pool is unchanged.
    pub(crate) fn alloc(&mut self, value: T) -> Result<u32, (T, ListError)> {
        if self.take_injected_failure() {
            let capacity = self.entries.len();
            return Err((value, ListError::AllocFailed { capacity }));
        }

        let node = Node {
            value,
            prev: NONE,
            next: NONE,
        };

        if self.free_head != NONE {
            let index = self.free_head;
            let entry = &mut self.entries[index as usize];
            if let Slot::Vacant { next_free } = entry.slot {
                self.free_head = next_free;
            }
            entry.slot = Slot::Occupied(node);
            self.live += 1;
            return Ok(index);
        }

        // The last index is reserved for the sentinel.
        if self.entries.len() >= NONE as usize {
            let capacity = self.entries.len();
            return Err((node.value, ListError::AllocFailed { capacity }));
        }
        if self.entries.len() == self.entries.capacity() {
            if let Err(error) = self.try_reserve(1) {
                return Err((node.value, error));
            }
        }

        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            slot: Slot::Occupied(node),
        });
        self.live += 1;
        Ok(index)
    }

    /// Frees an unlinked node's slot and returns its value.
    pub(crate) fn release(&mut self, index: u32) -> T {
        let entry = &mut self.entries[index as usize];
        let slot = core::mem::replace(
            &mut entry.slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        match slot {
            Slot::Occupied(node) => {
                entry.generation = entry.generation.wrapping_add(1);
                self.free_head = index;
                self.live -= 1;
                node.value
            }
            Slot::Vacant { .. } => unreachable!("double release of slot {index}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodePool")
            .field("live", &self.live)
            .field("capacity", &self.entries.capacity())
            .finish()
    }
}
