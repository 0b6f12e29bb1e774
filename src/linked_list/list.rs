use core::fmt;

use log::{debug, trace};

use super::error::{InsertError, ListError};
use super::hooks::{Hooks, Identity};
use super::iter::{Cursor, Direction, Iter, Nodes};
use super::node::{NONE, NodeId, NodePool};

/// Which side of an anchor node a new value goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// A doubly linked list whose nodes live in a [`NodePool`].
///
/// The list itself only records head, tail, length and its [`Hooks`].
/// Every operation that reads or relinks nodes takes the pool the list
/// was filled from; passing a different pool is a logic error.
///
/// Dropping a `List` without calling [`release`](Self::release) leaves its
/// nodes in the pool, where they are dropped together with the pool and
/// without the free hook. [`OwnedList`](super::owned::OwnedList) bundles
/// a list with a private pool and releases on drop.
///
/// # Example
///
/// ```
/// use mola_adlist::linked_list::prelude::*;
///
/// let mut pool = NodePool::new();
/// let mut list = List::new();
///
/// list.add_tail(&mut pool, 2).unwrap();
/// list.add_tail(&mut pool, 3).unwrap();
/// let one = list.add_head(&mut pool, 1).unwrap();
///
/// assert_eq!(list.iter(&pool).copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(list.index(&pool, 0), Some(one));
///
/// list.rotate(&mut pool);
/// assert_eq!(list.iter(&pool).copied().collect::<Vec<_>>(), [3, 1, 2]);
/// ```
pub struct List<T> {
    head: u32,
    tail: u32,
    len: usize,
    hooks: Hooks<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Creates an empty list with no hooks. Does not allocate.
    pub const fn new() -> Self {
        Self::with_hooks(Hooks::new())
    }

    /// Creates an empty list using `hooks`.
    pub const fn with_hooks(hooks: Hooks<T>) -> Self {
        Self {
            head: NONE,
            tail: NONE,
            len: 0,
            hooks,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the head node.
    #[inline]
    pub fn first(&self, pool: &NodePool<T>) -> Option<NodeId> {
        pool.id_at(self.head)
    }

    /// Handle of the tail node.
    #[inline]
    pub fn last(&self, pool: &NodePool<T>) -> Option<NodeId> {
        pool.id_at(self.tail)
    }

    pub fn hooks(&self) -> &Hooks<T> {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks<T> {
        &mut self.hooks
    }

    /// Sets the hook used by [`dup`](Self::dup) to copy values.
    pub fn set_dup<F>(&mut self, f: F)
    where
        F: Fn(&T) -> Option<T> + Send + Sync + 'static,
    {
        self.hooks.set_dup(f);
    }

    /// Sets the hook receiving values removed from the list.
    pub fn set_free<F>(&mut self, f: F)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.hooks.set_free(f);
    }

    /// Sets the hook used by [`search_key`](Self::search_key).
    pub fn set_match<F>(&mut self, f: F)
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.hooks.set_match(f);
    }

    /// Removes every node, passing each value to the free hook.
    ///
    /// The list stays usable and keeps its hooks.
    pub fn clear(&mut self, pool: &mut NodePool<T>) {
        let mut current = self.head;
        self.head = NONE;
        self.tail = NONE;
        self.len = 0;

        while current != NONE {
            let next = pool.node(current).next;
            let value = pool.release(current);
            self.hooks.release(value);
            current = next;
        }
    }

    /// Clears the list and consumes it.
    pub fn release(mut self, pool: &mut NodePool<T>) {
        self.clear(pool);
    }

    /// Inserts `value` as the new head.
    ///
    /// # Errors
    ///
    /// If no node can be allocated the value is returned inside the error
    /// and the list is left untouched.
    pub fn add_head(&mut self, pool: &mut NodePool<T>, value: T) -> Result<NodeId, InsertError<T>> {
        let index = Self::alloc(pool, value)?;
        self.link(pool, index, NONE, self.head);
        Ok(pool.id_of(index))
    }

    /// Inserts `value` as the new tail.
    ///
    /// # Errors
    ///
    /// If no node can be allocated the value is returned inside the error
    /// and the list is left untouched.
    pub fn add_tail(&mut self, pool: &mut NodePool<T>, value: T) -> Result<NodeId, InsertError<T>> {
        let index = Self::alloc(pool, value)?;
        self.link(pool, index, self.tail, NONE);
        Ok(pool.id_of(index))
    }

    /// Inserts `value` next to `anchor`, on the given side.
    ///
    /// `anchor` must be a node of this list. That is not checked: a live
    /// node of another list sharing the pool gets relinked there while
    /// this list's bookkeeping is updated, corrupting both.
    ///
    /// # Errors
    ///
    /// If no node can be allocated the value is returned inside the error
    /// and the list is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` has been released.
    pub fn insert(
        &mut self,
        pool: &mut NodePool<T>,
        anchor: NodeId,
        value: T,
        side: Side,
    ) -> Result<NodeId, InsertError<T>> {
        let anchor = pool.expect_live(anchor);
        let index = Self::alloc(pool, value)?;
        let (prev, next) = match side {
            Side::After => (anchor, pool.node(anchor).next),
            Side::Before => (pool.node(anchor).prev, anchor),
        };
        self.link(pool, index, prev, next);
        Ok(pool.id_of(index))
    }

    /// Shorthand for [`insert`](Self::insert) with [`Side::After`].
    pub fn insert_after(
        &mut self,
        pool: &mut NodePool<T>,
        anchor: NodeId,
        value: T,
    ) -> Result<NodeId, InsertError<T>> {
        self.insert(pool, anchor, value, Side::After)
    }

    /// Shorthand for [`insert`](Self::insert) with [`Side::Before`].
    pub fn insert_before(
        &mut self,
        pool: &mut NodePool<T>,
        anchor: NodeId,
        value: T,
    ) -> Result<NodeId, InsertError<T>> {
        self.insert(pool, anchor, value, Side::Before)
    }

    /// Removes `node` and passes its value to the free hook.
    ///
    /// # Panics
    ///
    /// Panics if `node` has already been released, is detached, or is the
    /// head or tail of another list.
    pub fn del_node(&mut self, pool: &mut NodePool<T>, node: NodeId) {
        let value = self.unlink_node(pool, node);
        self.hooks.release(value);
    }

    /// Removes `node` and returns its value without calling the free hook.
    ///
    /// # Panics
    ///
    /// Panics if `node` has already been released, is detached, or is the
    /// head or tail of another list.
    pub fn unlink_node(&mut self, pool: &mut NodePool<T>, node: NodeId) -> T {
        let index = pool.expect_live(node);
        self.unlink(pool, index);
        pool.release(index)
    }

    /// Takes `node` out of the chain but keeps it alive in the pool.
    ///
    /// The handle stays valid and the node can be linked into any list
    /// sharing the pool with [`link_head`](Self::link_head) or
    /// [`link_tail`](Self::link_tail).
    ///
    /// # Panics
    ///
    /// Panics if `node` has already been released, is detached, or is the
    /// head or tail of another list.
    pub fn detach_node(&mut self, pool: &mut NodePool<T>, node: NodeId) {
        let index = pool.expect_live(node);
        self.unlink(pool, index);
    }

    /// Links a detached node as the new head.
    ///
    /// # Panics
    ///
    /// Panics if `node` has been released or is still linked.
    pub fn link_head(&mut self, pool: &mut NodePool<T>, node: NodeId) {
        let index = pool.expect_live(node);
        self.assert_detached(pool, index);
        self.link(pool, index, NONE, self.head);
    }

    /// Links a detached node as the new tail.
    ///
    /// # Panics
    ///
    /// Panics if `node` has been released or is still linked.
    pub fn link_tail(&mut self, pool: &mut NodePool<T>, node: NodeId) {
        let index = pool.expect_live(node);
        self.assert_detached(pool, index);
        self.link(pool, index, self.tail, NONE);
    }

    /// Removes the head and returns its value; the free hook is not called.
    pub fn pop_head(&mut self, pool: &mut NodePool<T>) -> Option<T> {
        if self.head == NONE {
            return None;
        }
        let index = self.head;
        self.unlink(pool, index);
        Some(pool.release(index))
    }

    /// Removes the tail and returns its value; the free hook is not called.
    pub fn pop_tail(&mut self, pool: &mut NodePool<T>) -> Option<T> {
        if self.tail == NONE {
            return None;
        }
        let index = self.tail;
        self.unlink(pool, index);
        Some(pool.release(index))
    }

    /// Returns a cursor starting at the head or tail.
    ///
    /// The cursor does not borrow the list, so the node it just returned
    /// may be deleted between two calls to [`Cursor::next`].
    pub fn cursor(&self, pool: &NodePool<T>, direction: Direction) -> Cursor {
        let start = match direction {
            Direction::FromHead => self.head,
            Direction::FromTail => self.tail,
        };
        Cursor::new(pool.id_at(start), direction)
    }

    /// Iterates over the values from head to tail.
    pub fn iter<'a>(&self, pool: &'a NodePool<T>) -> Iter<'a, T> {
        Iter::new(pool, self.head, self.tail, self.len)
    }

    /// Iterates over the node handles from head to tail.
    pub fn nodes<'a>(&self, pool: &'a NodePool<T>) -> Nodes<'a, T> {
        Nodes::new(pool, self.head, self.tail, self.len)
    }

    /// Copies the list into new nodes of the same pool.
    ///
    /// The copy gets the same hooks. Values come from the dup hook, or are
    /// cloned when none is set. `self` is never modified.
    ///
    /// # Errors
    ///
    /// [`ListError::DupFailed`] if the dup hook returns `None`,
    /// [`ListError::AllocFailed`] if a node cannot be allocated. In both
    /// cases everything copied so far is released through the free hook.
    pub fn dup(&self, pool: &mut NodePool<T>) -> Result<List<T>, ListError>
    where
        T: Clone,
    {
        self.dup_with(pool, |value| Some(value.clone()))
    }

    /// Like [`dup`](Self::dup), but values are copied by `copy` when no dup
    /// hook is set, so `T` need not be `Clone`.
    ///
    /// A list of non-`Clone` values with a dup hook can pass `|_| None`.
    ///
    /// # Errors
    ///
    /// Same as [`dup`](Self::dup); `copy` returning `None` counts as a
    /// failed dup hook.
    pub fn dup_with<F>(&self, pool: &mut NodePool<T>, mut copy: F) -> Result<List<T>, ListError>
    where
        F: FnMut(&T) -> Option<T>,
    {
        let mut dup = List::with_hooks(self.hooks.clone());
        let mut current = self.head;
        let mut position = 0;

        while current != NONE {
            let node = pool.node(current);
            let next = node.next;
            let Some(value) = self.hooks.duplicate_or(&node.value, &mut copy) else {
                debug!("list dup aborted: dup hook failed at position {position}");
                dup.clear(pool);
                return Err(ListError::DupFailed { position });
            };
            if let Err(err) = dup.add_tail(pool, value) {
                debug!("list dup aborted at position {position}: {}", err.error);
                dup.hooks.release(err.value);
                dup.clear(pool);
                return Err(err.error);
            }
            current = next;
            position += 1;
        }

        Ok(dup)
    }

    /// Finds the first node, from the head, whose value matches `key`.
    ///
    /// Uses the match hook if one is set, otherwise [`Identity`].
    pub fn search_key(&self, pool: &NodePool<T>, key: &T) -> Option<NodeId>
    where
        T: Identity,
    {
        self.find_index(pool, |value| {
            self.hooks.matches_or(value, key, |value, key| value.is_same(key))
        })
        .map(|index| pool.id_of(index))
    }

    /// Finds the first node, from the head, whose value satisfies `predicate`.
    pub fn search_by<F>(&self, pool: &NodePool<T>, predicate: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> bool,
    {
        self.find_index(pool, predicate).map(|index| pool.id_of(index))
    }

    /// Returns the node at a zero-based position.
    ///
    /// Negative positions count from the tail: `-1` is the last node,
    /// `-len` the first. Out of range positions return `None`.
    pub fn index(&self, pool: &NodePool<T>, index: isize) -> Option<NodeId> {
        let (mut current, steps, forward) = if index < 0 {
            (self.tail, index.unsigned_abs() - 1, false)
        } else {
            (self.head, index.unsigned_abs(), true)
        };
        if steps >= self.len {
            return None;
        }

        for _ in 0..steps {
            let node = pool.node(current);
            current = if forward { node.next } else { node.prev };
        }
        pool.id_at(current)
    }

    /// Moves the tail node to the head.
    pub fn rotate(&mut self, pool: &mut NodePool<T>) {
        if self.len <= 1 {
            return;
        }
        let tail = self.tail;
        self.unlink(pool, tail);
        self.link(pool, tail, NONE, self.head);
    }

    /// Moves the head node to the tail.
    pub fn rotate_head_to_tail(&mut self, pool: &mut NodePool<T>) {
        if self.len <= 1 {
            return;
        }
        let head = self.head;
        self.unlink(pool, head);
        self.link(pool, head, self.tail, NONE);
    }

    /// Moves every node of `other` after this list's tail.
    ///
    /// Both lists must use `pool`. Runs in constant time: no node is
    /// allocated or copied and no hook runs. `other` is left empty but
    /// keeps its hooks; handles into it now belong to `self`.
    pub fn join(&mut self, pool: &mut NodePool<T>, other: &mut List<T>) {
        if other.head == NONE {
            return;
        }

        pool.node_mut(other.head).prev = self.tail;
        if self.tail != NONE {
            pool.node_mut(self.tail).next = other.head;
        } else {
            self.head = other.head;
        }
        self.tail = other.tail;
        self.len += other.len;
        trace!("joined {} nodes, list length now {}", other.len, self.len);

        other.head = NONE;
        other.tail = NONE;
        other.len = 0;
    }

    fn alloc(pool: &mut NodePool<T>, value: T) -> Result<u32, InsertError<T>> {
        pool.alloc(value).map_err(|(value, error)| {
            debug!("list insertion rejected: {error}");
            InsertError::new(value, error)
        })
    }

    /// A detached node has no neighbors and is not an endpoint of `self`.
    fn assert_detached(&self, pool: &NodePool<T>, index: u32) {
        let node = pool.node(index);
        assert!(
            node.prev == NONE && node.next == NONE && self.head != index && self.tail != index,
            "node {index} is already linked into a list"
        );
    }

    /// Links node `index` between `prev` and `next`, either of which may be
    /// the sentinel for the corresponding end of the list.
    fn link(&mut self, pool: &mut NodePool<T>, index: u32, prev: u32, next: u32) {
        let node = pool.node_mut(index);
        node.prev = prev;
        node.next = next;

        if prev == NONE {
            self.head = index;
        } else {
            pool.node_mut(prev).next = index;
        }
        if next == NONE {
            self.tail = index;
        } else {
            pool.node_mut(next).prev = index;
        }
        self.len += 1;
    }

    /// Takes node `index` out of the chain.
    ///
    /// A missing neighbor must mean the node is the matching endpoint of
    /// `self`; a detached node or the head of another list fails that.
    fn unlink(&mut self, pool: &mut NodePool<T>, index: u32) {
        let node = pool.node_mut(index);
        let (prev, next) = (node.prev, node.next);
        assert!(
            (prev != NONE || self.head == index) && (next != NONE || self.tail == index),
            "node {index} is not linked into this list"
        );
        node.prev = NONE;
        node.next = NONE;

        if prev == NONE {
            self.head = next;
        } else {
            pool.node_mut(prev).next = next;
        }
        if next == NONE {
            self.tail = prev;
        } else {
            pool.node_mut(next).prev = prev;
        }
        self.len -= 1;
    }

    fn find_index<F>(&self, pool: &NodePool<T>, mut predicate: F) -> Option<u32>
    where
        F: FnMut(&T) -> bool,
    {
        let mut current = self.head;
        while current != NONE {
            let node = pool.node(current);
            if predicate(&node.value) {
                return Some(current);
            }
            current = node.next;
        }
        None
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
