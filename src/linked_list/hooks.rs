use alloc::rc::Rc;
use alloc::sync::Arc;
use core::fmt;
use core::ptr::NonNull;

/// Deep-copies a value during list duplication. `None` signals failure.
pub type DupFn<T> = Arc<dyn Fn(&T) -> Option<T> + Send + Sync>;

/// Takes ownership of a value leaving the list.
pub type FreeFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Compares a stored value against a search key.
pub type MatchFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// The value-lifecycle hooks of a list.
///
/// Every hook is optional and can be set independently:
///
/// - **dup**: used by [`List::dup`](super::list::List::dup). Without it
///   values are cloned, which for shared handles such as `Arc`, `Rc` or
///   references is a shallow copy of the handle.
/// - **free**: invoked with each value removed by `del_node`, `clear` or
///   `release`. Without it the value is dropped.
/// - **matches**: used by [`List::search_key`](super::list::List::search_key).
///   Without it the [`Identity`] of the value is compared.
///
/// Cloning a `Hooks` shares the underlying closures.
pub struct Hooks<T> {
    dup: Option<DupFn<T>>,
    free: Option<FreeFn<T>>,
    matches: Option<MatchFn<T>>,
}

impl<T> Hooks<T> {
    /// Hooks with nothing set.
    pub const fn new() -> Self {
        Self {
            dup: None,
            free: None,
            matches: None,
        }
    }

    pub fn set_dup<F>(&mut self, f: F)
    where
        F: Fn(&T) -> Option<T> + Send + Sync + 'static,
    {
        self.dup = Some(Arc::new(f));
    }

    pub fn set_free<F>(&mut self, f: F)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.free = Some(Arc::new(f));
    }

    pub fn set_match<F>(&mut self, f: F)
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.matches = Some(Arc::new(f));
    }

    pub fn clear_dup(&mut self) {
        self.dup = None;
    }

    pub fn clear_free(&mut self) {
        self.free = None;
    }

    pub fn clear_match(&mut self) {
        self.matches = None;
    }

    pub fn dup_fn(&self) -> Option<&DupFn<T>> {
        self.dup.as_ref()
    }

    pub fn free_fn(&self) -> Option<&FreeFn<T>> {
        self.free.as_ref()
    }

    pub fn match_fn(&self) -> Option<&MatchFn<T>> {
        self.matches.as_ref()
    }

    /// Produces the copy of `value` placed in a duplicated list, using
    /// `copy` when no dup hook is set.
    pub(crate) fn duplicate_or(&self, value: &T, copy: impl FnOnce(&T) -> Option<T>) -> Option<T> {
        match &self.dup {
            Some(dup) => dup(value),
            None => copy(value),
        }
    }

    /// Hands a value leaving the list to the free hook, or drops it.
    pub(crate) fn release(&self, value: T) {
        if let Some(free) = &self.free {
            free(value);
        }
    }

    /// Compares with the match hook if set, otherwise falls back to `fallback`.
    pub(crate) fn matches_or(&self, value: &T, key: &T, fallback: impl FnOnce(&T, &T) -> bool) -> bool {
        match &self.matches {
            Some(matches) => matches(value, key),
            None => fallback(value, key),
        }
    }
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Hooks<T> {
    fn clone(&self) -> Self {
        Self {
            dup: self.dup.clone(),
            free: self.free.clone(),
            matches: self.matches.clone(),
        }
    }
}

impl<T> fmt::Debug for Hooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("dup", &self.dup.is_some())
            .field("free", &self.free.is_some())
            .field("matches", &self.matches.is_some())
            .finish()
    }
}

/// The comparison `search_key` uses when no match hook is installed.
///
/// Handles compare by address, so two `Arc`s pointing at equal but distinct
/// allocations are different values. Scalars are their own identity.
pub trait Identity {
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for &T {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for NonNull<T> {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::addr_eq(self.as_ptr(), other.as_ptr())
    }
}

impl<T: ?Sized> Identity for *const T {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::addr_eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for *mut T {
    #[inline]
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::addr_eq(*self, *other)
    }
}

macro_rules! impl_identity_by_value {
    ($($ty:ty),*) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_identity_by_value!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);
