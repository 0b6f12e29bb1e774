use super::error::ListError;
use super::hooks::Hooks;
use super::list::List;
use super::locked::LockedList;
use super::node::NodePool;
use super::owned::OwnedList;

/// Collects hooks and an initial pool capacity.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use mola_adlist::linked_list::prelude::*;
///
/// let freed = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&freed);
///
/// let mut list = ListBuilder::new()
///     .free(move |_: String| {
///         counter.fetch_add(1, Ordering::Relaxed);
///     })
///     .capacity(16)
///     .build_owned()
///     .unwrap();
///
/// list.add_tail("Alpha".to_string()).unwrap();
/// list.add_tail("Beta".to_string()).unwrap();
/// assert!(list.search_by(|v| v == "Beta").is_some());
///
/// drop(list);
/// assert_eq!(freed.load(Ordering::Relaxed), 2);
/// ```
#[derive(Debug)]
pub struct ListBuilder<T> {
    hooks: Hooks<T>,
    capacity: usize,
}

impl<T> Default for ListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListBuilder<T> {
    pub const fn new() -> Self {
        Self {
            hooks: Hooks::new(),
            capacity: 0,
        }
    }

    pub fn dup<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Option<T> + Send + Sync + 'static,
    {
        self.hooks.set_dup(f);
        self
    }

    pub fn free<F>(mut self, f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.hooks.set_free(f);
        self
    }

    pub fn matches<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.hooks.set_match(f);
        self
    }

    /// Replaces every hook at once.
    pub fn hooks(mut self, hooks: Hooks<T>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Node slots reserved up front by the pool-creating builds.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds a bare list; the capacity setting does not apply.
    pub fn build(self) -> List<T> {
        List::with_hooks(self.hooks)
    }

    /// Builds a list together with a fresh pool.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::AllocFailed`] if the capacity cannot be reserved.
    pub fn build_with_pool(self) -> Result<(List<T>, NodePool<T>), ListError> {
        let pool = NodePool::try_with_capacity(self.capacity)?;
        Ok((List::with_hooks(self.hooks), pool))
    }

    /// # Errors
    ///
    /// Returns [`ListError::AllocFailed`] if the capacity cannot be reserved.
    pub fn build_owned(self) -> Result<OwnedList<T>, ListError> {
        OwnedList::try_with_capacity(self.capacity, self.hooks)
    }

    /// # Errors
    ///
    /// Returns [`ListError::AllocFailed`] if the capacity cannot be reserved.
    pub fn build_locked(self) -> Result<LockedList<T>, ListError> {
        self.build_owned().map(LockedList::from)
    }
}
