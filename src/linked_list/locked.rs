//! A lock around an [`OwnedList`] for hosts sharing a list between threads.
//!
//! The list itself never synchronizes. `LockedList` puts a single
//! `spin::Mutex` around the whole list so a caller holds the lock for an
//! entire operation sequence, traversal included.

use spin::{Mutex, MutexGuard};

use super::hooks::Hooks;
use super::owned::OwnedList;

/// An [`OwnedList`] behind a spin lock.
///
/// ```
/// use mola_adlist::linked_list::prelude::*;
///
/// let shared = LockedList::new();
/// std::thread::scope(|s| {
///     for t in 0..4u64 {
///         let shared = &shared;
///         s.spawn(move || {
///             for i in 0..10 {
///                 shared.lock().add_tail(t * 10 + i).unwrap();
///             }
///         });
///     }
/// });
/// assert_eq!(shared.len(), 40);
/// ```
pub struct LockedList<T> {
    inner: Mutex<OwnedList<T>>,
}

impl<T> Default for LockedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<OwnedList<T>> for LockedList<T> {
    fn from(list: OwnedList<T>) -> Self {
        Self {
            inner: Mutex::new(list),
        }
    }
}

impl<T> LockedList<T> {
    pub const fn new() -> Self {
        Self::with_hooks(Hooks::new())
    }

    pub const fn with_hooks(hooks: Hooks<T>) -> Self {
        Self {
            inner: Mutex::new(OwnedList::with_hooks(hooks)),
        }
    }

    /// Spins until the lock is acquired.
    pub fn lock(&self) -> MutexGuard<'_, OwnedList<T>> {
        self.inner.lock()
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, OwnedList<T>>> {
        self.inner.try_lock()
    }

    /// Runs `f` with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&mut OwnedList<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Mutable access without locking; `&mut self` already proves exclusivity.
    pub fn get_mut(&mut self) -> &mut OwnedList<T> {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> OwnedList<T> {
        self.inner.into_inner()
    }
}
