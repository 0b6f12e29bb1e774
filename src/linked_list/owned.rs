//! A list that owns its node pool.

use core::fmt;
use core::mem;

use log::debug;

use super::error::{InsertError, ListError};
use super::hooks::{Hooks, Identity};
use super::iter::{Cursor, Direction, Iter};
use super::list::{List, Side};
use super::node::{NodeId, NodePool};

/// A [`List`] bundled with a private [`NodePool`].
///
/// Convenient when nodes never move between lists. Dropping an
/// `OwnedList` releases every value through the free hook.
///
/// ```
/// use mola_adlist::linked_list::prelude::*;
///
/// let mut list = OwnedList::new();
/// let b = list.add_tail("b").unwrap();
/// list.add_head("a").unwrap();
/// list.insert(b, "c", Side::After).unwrap();
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert_eq!(list.get(list.index(-1).unwrap()), Some(&"c"));
/// ```
pub struct OwnedList<T> {
    pool: NodePool<T>,
    list: List<T>,
}

impl<T> Default for OwnedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OwnedList<T> {
    pub const fn new() -> Self {
        Self::with_hooks(Hooks::new())
    }

    pub const fn with_hooks(hooks: Hooks<T>) -> Self {
        Self {
            pool: NodePool::new(),
            list: List::with_hooks(hooks),
        }
    }

    /// Creates a list with room for `capacity` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::AllocFailed`] if the storage cannot be reserved.
    pub fn try_with_capacity(capacity: usize, hooks: Hooks<T>) -> Result<Self, ListError> {
        Ok(Self {
            pool: NodePool::try_with_capacity(capacity)?,
            list: List::with_hooks(hooks),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn list(&self) -> &List<T> {
        &self.list
    }

    pub fn pool(&self) -> &NodePool<T> {
        &self.pool
    }

    /// Both halves, for operations not mirrored on `OwnedList`.
    pub fn parts_mut(&mut self) -> (&mut List<T>, &mut NodePool<T>) {
        (&mut self.list, &mut self.pool)
    }

    /// Splits into the list and its pool without releasing anything.
    pub fn into_parts(mut self) -> (List<T>, NodePool<T>) {
        let list = mem::take(&mut self.list);
        let pool = mem::take(&mut self.pool);
        (list, pool)
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks<T> {
        self.list.hooks_mut()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.list.first(&self.pool)
    }

    pub fn last(&self) -> Option<NodeId> {
        self.list.last(&self.pool)
    }

    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.pool.get(node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.pool.get_mut(node)
    }

    pub fn add_head(&mut self, value: T) -> Result<NodeId, InsertError<T>> {
        self.list.add_head(&mut self.pool, value)
    }

    pub fn add_tail(&mut self, value: T) -> Result<NodeId, InsertError<T>> {
        self.list.add_tail(&mut self.pool, value)
    }

    pub fn insert(&mut self, anchor: NodeId, value: T, side: Side) -> Result<NodeId, InsertError<T>> {
        self.list.insert(&mut self.pool, anchor, value, side)
    }

    pub fn del_node(&mut self, node: NodeId) {
        self.list.del_node(&mut self.pool, node);
    }

    pub fn unlink_node(&mut self, node: NodeId) -> T {
        self.list.unlink_node(&mut self.pool, node)
    }

    pub fn pop_head(&mut self) -> Option<T> {
        self.list.pop_head(&mut self.pool)
    }

    pub fn pop_tail(&mut self) -> Option<T> {
        self.list.pop_tail(&mut self.pool)
    }

    pub fn clear(&mut self) {
        self.list.clear(&mut self.pool);
    }

    pub fn cursor(&self, direction: Direction) -> Cursor {
        self.list.cursor(&self.pool, direction)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter(&self.pool)
    }

    pub fn search_key(&self, key: &T) -> Option<NodeId>
    where
        T: Identity,
    {
        self.list.search_key(&self.pool, key)
    }

    pub fn search_by<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> bool,
    {
        self.list.search_by(&self.pool, predicate)
    }

    pub fn index(&self, index: isize) -> Option<NodeId> {
        self.list.index(&self.pool, index)
    }

    pub fn rotate(&mut self) {
        self.list.rotate(&mut self.pool);
    }

    pub fn rotate_head_to_tail(&mut self) {
        self.list.rotate_head_to_tail(&mut self.pool);
    }

    /// Copies the list into a fresh private pool.
    ///
    /// # Errors
    ///
    /// Same as [`List::dup`]; the partial copy is released before returning.
    pub fn dup(&self) -> Result<OwnedList<T>, ListError>
    where
        T: Clone,
    {
        self.dup_with(|value| Some(value.clone()))
    }

    /// Copies the list into a fresh private pool, see [`List::dup_with`].
    ///
    /// # Errors
    ///
    /// Same as [`List::dup_with`]; the partial copy is released before
    /// returning.
    pub fn dup_with<F>(&self, mut copy: F) -> Result<OwnedList<T>, ListError>
    where
        F: FnMut(&T) -> Option<T>,
    {
        let hooks = self.list.hooks().clone();
        let mut dup = OwnedList::try_with_capacity(self.len(), hooks)?;
        for (position, value) in self.iter().enumerate() {
            let Some(value) = dup.list.hooks().duplicate_or(value, &mut copy) else {
                debug!("owned list dup aborted: dup hook failed at position {position}");
                return Err(ListError::DupFailed { position });
            };
            if let Err(err) = dup.add_tail(value) {
                debug!("owned list dup aborted at position {position}: {}", err.error);
                dup.list.hooks().release(err.value);
                return Err(err.error);
            }
        }
        Ok(dup)
    }
}

impl<T> Drop for OwnedList<T> {
    fn drop(&mut self) {
        self.list.clear(&mut self.pool);
    }
}

impl<'a, T> IntoIterator for &'a OwnedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for OwnedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
