use core::iter::FusedIterator;

use super::list::List;
use super::node::{NONE, Node, NodeId, NodePool};

/// The end a [`Cursor`] starts from, and so the way it walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Head to tail, following `next` links.
    FromHead,
    /// Tail to head, following `prev` links.
    FromTail,
}

/// A detached traversal cursor.
///
/// The cursor holds the handle of the node it will return next, read from
/// the node it returned last *before* handing that node out. Deleting the
/// node just returned is therefore safe:
///
/// ```
/// use mola_adlist::linked_list::prelude::*;
///
/// let mut pool = NodePool::new();
/// let mut list = List::new();
/// for v in 0..6 {
///     list.add_tail(&mut pool, v).unwrap();
/// }
///
/// let mut cursor = list.cursor(&pool, Direction::FromHead);
/// while let Some(node) = cursor.next(&pool) {
///     if pool.get(node).is_some_and(|v| v % 2 == 1) {
///         list.del_node(&mut pool, node);
///     }
/// }
/// assert_eq!(list.iter(&pool).copied().collect::<Vec<_>>(), [0, 2, 4]);
/// ```
///
/// Removing any other node may leave the cursor pointing at a released
/// slot. It then stops instead of reading whatever reuses the slot.
#[derive(Debug, Clone)]
pub struct Cursor {
    next: Option<NodeId>,
    direction: Direction,
}

impl Cursor {
    pub(crate) fn new(next: Option<NodeId>, direction: Direction) -> Self {
        Self { next, direction }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The node the next call to [`next`](Self::next) will return.
    #[inline]
    pub fn peek(&self) -> Option<NodeId> {
        self.next
    }

    /// Restarts at the head of `list`, walking forward.
    pub fn rewind<T>(&mut self, list: &List<T>, pool: &NodePool<T>) {
        self.next = list.first(pool);
        self.direction = Direction::FromHead;
    }

    /// Restarts at the tail of `list`, walking backward.
    pub fn rewind_tail<T>(&mut self, list: &List<T>, pool: &NodePool<T>) {
        self.next = list.last(pool);
        self.direction = Direction::FromTail;
    }

    /// Returns the current node and steps past it.
    pub fn next<T>(&mut self, pool: &NodePool<T>) -> Option<NodeId> {
        let current = self.next?;
        let Some(index) = pool.resolve(current) else {
            self.next = None;
            return None;
        };

        let node = pool.node(index);
        let following = match self.direction {
            Direction::FromHead => node.next,
            Direction::FromTail => node.prev,
        };
        self.next = pool.id_at(following);
        Some(current)
    }
}

/// Walks `remaining` nodes of a chain from both ends.
struct Span<'a, T> {
    pool: &'a NodePool<T>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, T> Span<'a, T> {
    fn next_front(&mut self) -> Option<(u32, &'a Node<T>)> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front;
        let node = self.pool.node(index);
        self.front = node.next;
        self.remaining -= 1;
        Some((index, node))
    }

    fn next_back(&mut self) -> Option<(u32, &'a Node<T>)> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back;
        let node = self.pool.node(index);
        self.back = node.prev;
        self.remaining -= 1;
        Some((index, node))
    }
}

impl<T> Clone for Span<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Iterator over the values of a [`List`].
pub struct Iter<'a, T> {
    span: Span<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(pool: &'a NodePool<T>, head: u32, tail: u32, len: usize) -> Self {
        debug_assert!(len == 0 || (head != NONE && tail != NONE));
        Self {
            span: Span {
                pool,
                front: head,
                back: tail,
                remaining: len,
            },
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.span.next_front().map(|(_, node)| &node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.span.next_back().map(|(_, node)| &node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            span: self.span.clone(),
        }
    }
}

/// Iterator over the node handles of a [`List`].
pub struct Nodes<'a, T> {
    span: Span<'a, T>,
}

impl<'a, T> Nodes<'a, T> {
    pub(crate) fn new(pool: &'a NodePool<T>, head: u32, tail: u32, len: usize) -> Self {
        Self {
            span: Span {
                pool,
                front: head,
                back: tail,
                remaining: len,
            },
        }
    }
}

impl<T> Iterator for Nodes<'_, T> {
    type Item = NodeId;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (index, _) = self.span.next_front()?;
        Some(self.span.pool.id_of(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }
}

impl<T> DoubleEndedIterator for Nodes<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let (index, _) = self.span.next_back()?;
        Some(self.span.pool.id_of(index))
    }
}

impl<T> ExactSizeIterator for Nodes<'_, T> {}
impl<T> FusedIterator for Nodes<'_, T> {}
