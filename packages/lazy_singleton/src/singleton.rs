use std::fmt;
use std::sync::{Arc, Mutex};

// A poisoned lock means the process is in an unrecoverable/unsafe state and must exit (we panic).
const ERR_POISONED_LOCK: &str = "encountered poisoned lock - program validity cannot be guaranteed";

/// A thread-safe, lazily-constructed holder for exactly one process-wide instance of `T`.
///
/// The holder starts unset. The first call to [`instance()`][Self::instance] constructs the
/// instance via `T`'s [`Default`] implementation; every later call returns a handle to the same
/// instance. [`clear()`][Self::clear] returns the holder to its unset state, after which the
/// next [`instance()`][Self::instance] call constructs a fresh instance. This cycle may repeat.
///
/// The check-and-create step runs entirely under one mutex, so concurrent first accesses race
/// safely: exactly one construction occurs and every caller receives a handle to the same
/// resulting instance. There is no unsynchronized fast path.
///
/// # Example
///
/// ```rust
/// use lazy_singleton::LazySingleton;
///
/// #[derive(Default)]
/// struct AssetCache {
///     // ...
/// }
///
/// static ASSET_CACHE: LazySingleton<AssetCache> = LazySingleton::new();
///
/// let cache = ASSET_CACHE.instance();
/// assert!(ASSET_CACHE.is_initialized());
/// ```
///
/// # Thread safety
///
/// The holder is thread-safe ([`Send`] and [`Sync`]) whenever `T` is, which is what allows it
/// to live in a `static`. Handles are [`Arc`]s; the instance itself is shared, so types that
/// need mutation behind a holder use interior mutability.
pub struct LazySingleton<T> {
    /// The slot holding the current instance, or `None` while the holder is unset.
    ///
    /// One mutex guards both the emptiness check and the construction, which is what makes the
    /// first-access race produce exactly one instance.
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> LazySingleton<T> {
    /// Creates a new, unset holder.
    ///
    /// This is a `const fn` so holders can be `static` items.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns a handle to the process-wide instance, constructing it if the holder is unset.
    ///
    /// Under concurrent first access, exactly one construction occurs and all callers receive
    /// handles to the same instance. Callers block only for the duration of the mutex hold
    /// (which includes the construction itself, on the winning caller).
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use lazy_singleton::LazySingleton;
    ///
    /// static VALUE: LazySingleton<String> = LazySingleton::new();
    ///
    /// let first = VALUE.instance();
    /// let second = VALUE.instance();
    /// assert!(Arc::ptr_eq(&first, &second));
    /// ```
    #[must_use]
    pub fn instance(&self) -> Arc<T>
    where
        T: Default,
    {
        let mut slot = self.slot.lock().expect(ERR_POISONED_LOCK);

        Arc::clone(slot.get_or_insert_with(|| Arc::new(T::default())))
    }

    /// Returns the holder to its unset state.
    ///
    /// A subsequent [`instance()`][Self::instance] call constructs a new instance. The previous
    /// instance is not torn down by this call: outstanding handles keep it alive until they are
    /// dropped, and any teardown beyond [`Drop`] must be performed by the caller before
    /// clearing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use lazy_singleton::LazySingleton;
    ///
    /// static VALUE: LazySingleton<String> = LazySingleton::new();
    ///
    /// let before = VALUE.instance();
    /// VALUE.clear();
    /// let after = VALUE.instance();
    ///
    /// // The holder constructed a fresh instance; the old one lives on in `before`.
    /// assert!(!Arc::ptr_eq(&before, &after));
    /// ```
    pub fn clear(&self) {
        let mut slot = self.slot.lock().expect(ERR_POISONED_LOCK);

        *slot = None;
    }

    /// Returns whether the holder currently holds an instance.
    ///
    /// This is a point-in-time observation; another thread may initialize or clear the holder
    /// immediately after this returns.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot.lock().expect(ERR_POISONED_LOCK).is_some()
    }
}

impl<T> Default for LazySingleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LazySingleton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySingleton")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(LazySingleton<String>: Send, Sync);
    assert_not_impl_any!(LazySingleton<std::rc::Rc<String>>: Send, Sync);

    #[test]
    fn starts_unset() {
        let holder = LazySingleton::<String>::new();

        assert!(!holder.is_initialized());
    }

    #[test]
    fn instance_initializes_and_returns_same_handle() {
        let holder = LazySingleton::<String>::new();

        let first = holder.instance();
        let second = holder.instance();

        assert!(holder.is_initialized());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clear_resets_to_unset() {
        let holder = LazySingleton::<String>::new();

        drop(holder.instance());
        holder.clear();

        assert!(!holder.is_initialized());
    }

    #[test]
    fn instance_after_clear_is_fresh() {
        let holder = LazySingleton::<String>::new();

        let before = holder.instance();
        holder.clear();
        let after = holder.instance();

        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn clear_does_not_invalidate_outstanding_handles() {
        struct DropFlag {
            dropped: &'static AtomicUsize,
        }

        static DROPPED: AtomicUsize = AtomicUsize::new(0);

        impl Default for DropFlag {
            fn default() -> Self {
                Self { dropped: &DROPPED }
            }
        }

        impl Drop for DropFlag {
            fn drop(&mut self) {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }

        let holder = LazySingleton::<DropFlag>::new();

        let handle = holder.instance();
        holder.clear();

        // The instance survives as long as the handle does.
        assert_eq!(DROPPED.load(Ordering::Relaxed), 0);
        drop(handle);
        assert_eq!(DROPPED.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn concurrent_first_access_constructs_exactly_once() {
        static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

        struct Tracked;

        impl Default for Tracked {
            fn default() -> Self {
                CONSTRUCTIONS.fetch_add(1, Ordering::Relaxed);
                Self
            }
        }

        let holder = LazySingleton::<Tracked>::new();

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    drop(holder.instance());
                });
            }
        });

        assert_eq!(CONSTRUCTIONS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn concurrent_callers_observe_the_same_instance() {
        let holder = LazySingleton::<String>::new();

        let handles = thread::scope(|s| {
            let spawned: Vec<_> = (0..4).map(|_| s.spawn(|| holder.instance())).collect();

            spawned
                .into_iter()
                .map(|h| h.join().expect("worker thread panicked"))
                .collect::<Vec<_>>()
        });

        let first = handles.first().expect("spawned at least one worker");
        for other in &handles {
            assert!(Arc::ptr_eq(first, other));
        }
    }

    #[test]
    fn static_holder_usage() {
        static HOLDER: LazySingleton<Vec<u32>> = LazySingleton::new();

        let instance = HOLDER.instance();
        assert!(instance.is_empty());
    }
}
