//! A generic doubly linked list over an arena of nodes.
//!
//! Values live in nodes owned by a [`node::NodePool`]; nodes refer to their
//! neighbors by slot index, and callers hold [`node::NodeId`] handles that
//! stay valid until the node is removed. A [`list::List`] only tracks its
//! head, tail and length, so several lists can share one pool and splice
//! into each other in constant time.
//!
//! How values are copied, released and compared is configured per list
//! with optional [`hooks::Hooks`].
//!
//! # Examples
//!
//! ```
//! use mola_adlist::linked_list::prelude::*;
//!
//! let mut pool = NodePool::new();
//! let mut left = List::new();
//! let mut right = List::new();
//!
//! for v in [1, 2] {
//!     left.add_tail(&mut pool, v).unwrap();
//! }
//! for v in [3, 4] {
//!     right.add_tail(&mut pool, v).unwrap();
//! }
//!
//! left.join(&mut pool, &mut right);
//! assert!(right.is_empty());
//! assert_eq!(left.iter(&pool).copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
//!
//! let copy = left.dup(&mut pool).unwrap();
//! left.release(&mut pool);
//! assert_eq!(copy.iter(&pool).rev().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);
//! ```
//!
//! ## Safety
//!
//! No `unsafe` is involved. Handles are generation checked: a handle to a
//! removed node never resolves again, even after its slot is reused.
//! What is *not* checked is that a handle belongs to the list it is passed
//! to, when several lists share a pool.

pub mod builder;
pub mod error;
pub mod hooks;
pub mod iter;
pub mod list;
pub mod locked;
pub mod node;
pub mod owned;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::builder::ListBuilder;
    pub use super::error::{InsertError, ListError};
    pub use super::hooks::{Hooks, Identity};
    pub use super::iter::{Cursor, Direction};
    pub use super::list::{List, Side};
    pub use super::locked::LockedList;
    pub use super::node::{NodeId, NodePool};
    pub use super::owned::OwnedList;
}
