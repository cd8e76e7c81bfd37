use std::any;
use std::fmt;
use std::sync::{Arc, Mutex};

use foldhash::{HashMap, HashMapExt};
use lazy_singleton::LazySingleton;
use recycle_pool::{FabricationError, Poolable, RecyclePool};

use crate::constants::ERR_POISONED_LOCK;
use crate::{DEFAULT_POOL_SIZE, Error, PoolEntry, Result};

/// The process-wide registry instance, constructed on first access to
/// [`PoolRegistry::instance()`].
static REGISTRY: LazySingleton<PoolRegistry> = LazySingleton::new();

/// A key-addressed collection of heterogeneous [`RecyclePool`]s.
///
/// Each key maps to exactly one pool, established on first reference to that key and never
/// silently replaced. Keys are case-sensitive and must match exactly between pool creation,
/// get, return and destroy calls. Pools hold elements of a single type each; the registry
/// erases that type internally and checks it on every typed call, so a caller supplying the
/// wrong type gets [`Error::TypeMismatch`] rather than a corrupted pool.
///
/// # Keyed lifecycle
///
/// A key is either absent or active. [`create_pool()`][Self::create_pool] (or the implicit
/// creation inside [`get_object()`][Self::get_object]) takes it from absent to active;
/// [`destroy_pool()`][Self::destroy_pool] takes it back to absent, draining the pool on the
/// way. Re-creating a destroyed key starts a completely fresh pool; no idle instances carry
/// over.
///
/// # Example
///
/// ```rust
/// use pool_registry::PoolRegistry;
/// use recycle_pool::Poolable;
///
/// #[derive(Default)]
/// struct PathfindingScratch {
///     open_set: Vec<u32>,
/// }
///
/// impl Poolable for PathfindingScratch {
///     fn reset(&mut self) {
///         self.open_set.clear();
///     }
/// }
///
/// # fn main() -> Result<(), pool_registry::Error> {
/// let registry = PoolRegistry::new();
///
/// registry.create_pool("pathfinding", 4, || Ok(PathfindingScratch::default()))?;
///
/// let mut scratch = registry.get_object("pathfinding", || Ok(PathfindingScratch::default()))?;
/// scratch.open_set.push(7);
/// registry.return_object("pathfinding", scratch)?;
///
/// registry.destroy_pool("pathfinding")?;
/// # Ok(())
/// # }
/// ```
///
/// # Thread safety
///
/// The registry is thread-safe ([`Send`] and [`Sync`]): every operation locks the key→pool map
/// for its whole duration, including any factory calls it performs. That serializes all
/// registry-routed pool access, which closes the underlying pool's single-writer requirement
/// for this path — at the cost that a slow factory briefly blocks operations on other keys
/// too.
pub struct PoolRegistry {
    /// The key→pool map. Only the registry's own operations mutate this: insert on create,
    /// remove on destroy. We use foldhash for better performance with small hash tables.
    pools: Mutex<HashMap<String, PoolEntry>>,
}

impl PoolRegistry {
    /// Creates a new, empty registry owned by the caller.
    ///
    /// Most callers use the process-wide singleton via [`instance()`][Self::instance] instead;
    /// an owned registry is useful when isolation matters, e.g. in tests or when two subsystems
    /// must not share keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a handle to the process-wide registry, constructing it on first access.
    ///
    /// Concurrent first accesses construct the registry exactly once; every caller receives a
    /// handle to the same instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use pool_registry::PoolRegistry;
    ///
    /// let registry = PoolRegistry::instance();
    /// let same_registry = PoolRegistry::instance();
    /// assert!(Arc::ptr_eq(&registry, &same_registry));
    /// ```
    #[must_use]
    pub fn instance() -> Arc<Self> {
        REGISTRY.instance()
    }

    /// Resets the process-wide singleton to its unconstructed state.
    ///
    /// The next [`instance()`][Self::instance] call constructs a fresh, empty registry.
    /// Outstanding handles keep the previous registry (and its pools) alive until dropped;
    /// this call performs no teardown of its own. Callers that need the pools torn down
    /// destroy them first.
    pub fn clear_instance() {
        REGISTRY.clear();
    }

    /// Creates a new pool under `key`, eagerly fabricating `initial_size` idle instances via
    /// `factory`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if a pool already exists under `key`; the existing pool
    /// is left untouched. Returns [`Error::Fabrication`] if the factory fails during the eager
    /// fabrication; no pool is registered in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_registry::{Error, PoolRegistry};
    /// use recycle_pool::Poolable;
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), pool_registry::Error> {
    /// let registry = PoolRegistry::new();
    ///
    /// registry.create_pool("decals", 8, || Ok(Decal))?;
    ///
    /// // A second creation under the same key is rejected.
    /// let error = registry
    ///     .create_pool("decals", 8, || Ok(Decal))
    ///     .unwrap_err();
    /// assert!(matches!(error, Error::DuplicateKey { .. }));
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_pool<T>(
        &self,
        key: impl Into<String>,
        initial_size: usize,
        factory: impl FnMut() -> std::result::Result<T, FabricationError> + Send + 'static,
    ) -> Result<()>
    where
        T: Poolable + Send + 'static,
    {
        let key = key.into();
        let mut pools = self.pools.lock().expect(ERR_POISONED_LOCK);

        if pools.contains_key(&key) {
            return Err(Error::DuplicateKey { key });
        }

        let pool = RecyclePool::new(initial_size, factory)
            .map_err(|source| Error::Fabrication {
                key: key.clone(),
                source,
            })?;

        pools.insert(key, PoolEntry::new(pool));

        Ok(())
    }

    /// Acquires an instance from the pool under `key`, transferring ownership to the caller.
    ///
    /// If no pool exists under `key`, one is created implicitly first, as if by
    /// `create_pool(key, DEFAULT_POOL_SIZE, factory)` (see [`DEFAULT_POOL_SIZE`]). This means
    /// the first caller for a key determines that pool's factory and initial size: when the
    /// pool already exists, the `factory` argument is silently ignored and the pool's stored
    /// factory keeps being used. Callers whose factories disagree for the same key should
    /// create the pool explicitly instead of relying on implicit creation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the pool under `key` holds a different element type.
    /// Returns [`Error::Fabrication`] if the factory fails, either during implicit pool
    /// creation or while fabricating because the holding area was empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_registry::{DEFAULT_POOL_SIZE, PoolRegistry};
    /// use recycle_pool::Poolable;
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), pool_registry::Error> {
    /// let registry = PoolRegistry::new();
    ///
    /// // No pool exists yet, so this creates one with DEFAULT_POOL_SIZE idle instances
    /// // and hands out one of them.
    /// let decal = registry.get_object("decals", || Ok(Decal))?;
    ///
    /// assert_eq!(registry.idle_count("decals")?, DEFAULT_POOL_SIZE - 1);
    /// # registry.return_object("decals", decal)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_object<T>(
        &self,
        key: &str,
        factory: impl FnMut() -> std::result::Result<T, FabricationError> + Send + 'static,
    ) -> Result<T>
    where
        T: Poolable + Send + 'static,
    {
        let mut pools = self.pools.lock().expect(ERR_POISONED_LOCK);

        if !pools.contains_key(key) {
            let pool = RecyclePool::new(DEFAULT_POOL_SIZE, factory)
                .map_err(|source| Error::Fabrication {
                    key: key.to_string(),
                    source,
                })?;

            pools.insert(key.to_string(), PoolEntry::new(pool));
        }

        let entry = pools
            .get_mut(key)
            .expect("the entry exists - it was either already present or just inserted");

        let actual = entry.element_type_name();
        let Some(pool) = entry.downcast_mut::<T>() else {
            return Err(Error::TypeMismatch {
                key: key.to_string(),
                expected: any::type_name::<T>(),
                actual,
            });
        };

        pool.acquire().map_err(|source| Error::Fabrication {
            key: key.to_string(),
            source,
        })
    }

    /// Returns an instance to the pool under `key` for reuse.
    ///
    /// The element type must be the one the pool was created with, and the instance must
    /// originally have been acquired from that pool (the latter is a caller contract the
    /// registry cannot verify; see [`RecyclePool::release()`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no pool is registered under `key`, and
    /// [`Error::TypeMismatch`] if the pool holds a different element type. In both cases the
    /// instance is dropped with no pool mutated — an instance that cannot be returned safely is
    /// not returned at all.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_registry::{Error, PoolRegistry};
    /// use recycle_pool::Poolable;
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), pool_registry::Error> {
    /// let registry = PoolRegistry::new();
    ///
    /// let decal = registry.get_object("decals", || Ok(Decal))?;
    /// registry.return_object("decals", decal)?;
    ///
    /// // Returning under a key that was never created is an error.
    /// let error = registry.return_object("missing", Decal).unwrap_err();
    /// assert!(matches!(error, Error::UnknownKey { .. }));
    /// # Ok(())
    /// # }
    /// ```
    pub fn return_object<T>(&self, key: &str, instance: T) -> Result<()>
    where
        T: Poolable + Send + 'static,
    {
        let mut pools = self.pools.lock().expect(ERR_POISONED_LOCK);

        let Some(entry) = pools.get_mut(key) else {
            return Err(Error::UnknownKey {
                key: key.to_string(),
            });
        };

        let actual = entry.element_type_name();
        let Some(pool) = entry.downcast_mut::<T>() else {
            return Err(Error::TypeMismatch {
                key: key.to_string(),
                expected: any::type_name::<T>(),
                actual,
            });
        };

        pool.release(instance);

        Ok(())
    }

    /// Destroys the pool under `key`: drains it and removes the key from the registry.
    ///
    /// Every idle instance has its release hook invoked and is then dropped, which is where a
    /// pooled type wrapping an external resource performs its end-of-life teardown (its
    /// [`Drop`] implementation). Instances currently held by callers are unaffected and become
    /// orphans of the destroyed pool.
    ///
    /// After this call the key is absent; a later [`create_pool()`][Self::create_pool] or
    /// [`get_object()`][Self::get_object] under the same key starts a completely fresh pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no pool is registered under `key`; nothing is mutated
    /// in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pool_registry::PoolRegistry;
    /// use recycle_pool::Poolable;
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), pool_registry::Error> {
    /// let registry = PoolRegistry::new();
    ///
    /// registry.create_pool("decals", 8, || Ok(Decal))?;
    /// registry.destroy_pool("decals")?;
    ///
    /// assert!(!registry.contains_pool("decals"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn destroy_pool(&self, key: &str) -> Result<()> {
        let mut pools = self.pools.lock().expect(ERR_POISONED_LOCK);

        match pools.remove(key) {
            Some(mut entry) => {
                entry.drain_idle();
                Ok(())
            }
            None => Err(Error::UnknownKey {
                key: key.to_string(),
            }),
        }
    }

    /// Returns whether a pool is currently registered under `key`.
    #[must_use]
    pub fn contains_pool(&self, key: &str) -> bool {
        self.pools
            .lock()
            .expect(ERR_POISONED_LOCK)
            .contains_key(key)
    }

    /// The number of pools currently registered.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// The number of idle instances in the pool under `key`, regardless of element type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no pool is registered under `key`.
    pub fn idle_count(&self, key: &str) -> Result<usize> {
        let pools = self.pools.lock().expect(ERR_POISONED_LOCK);

        pools
            .get(key)
            .map(PoolEntry::idle_len)
            .ok_or_else(|| Error::UnknownKey {
                key: key.to_string(),
            })
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pools = self.pools.lock().expect(ERR_POISONED_LOCK);

        f.debug_struct("PoolRegistry")
            .field("pools", &*pools)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use static_assertions::assert_impl_all;

    use super::*;

    #[derive(Debug, Default)]
    struct Widget {
        uses: usize,
    }

    impl Poolable for Widget {
        fn on_acquire(&mut self) {
            self.uses += 1;
        }
    }

    #[derive(Debug, Default)]
    struct Gadget;
    impl Poolable for Gadget {}

    assert_impl_all!(PoolRegistry: Send, Sync);

    #[test]
    fn create_then_get_uses_the_created_pool() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 3, || Ok(Widget::default()))
            .unwrap();

        let widget = registry
            .get_object("widgets", || Ok(Widget::default()))
            .unwrap();

        assert_eq!(widget.uses, 1);
        assert_eq!(registry.idle_count("widgets").unwrap(), 2);
    }

    #[test]
    fn get_object_creates_pool_implicitly_with_default_size() {
        let registry = PoolRegistry::new();

        let widget = registry
            .get_object("widgets", || Ok(Widget::default()))
            .unwrap();

        assert!(registry.contains_pool("widgets"));
        assert_eq!(
            registry.idle_count("widgets").unwrap(),
            DEFAULT_POOL_SIZE - 1
        );

        registry.return_object("widgets", widget).unwrap();
        assert_eq!(registry.idle_count("widgets").unwrap(), DEFAULT_POOL_SIZE);
    }

    #[test]
    fn later_factories_for_an_existing_key_are_ignored() {
        let first_factory_calls = Arc::new(AtomicUsize::new(0));
        let second_factory_calls = Arc::new(AtomicUsize::new(0));

        let registry = PoolRegistry::new();

        let first_calls = Arc::clone(&first_factory_calls);
        registry
            .create_pool("widgets", 0, move || {
                first_calls.fetch_add(1, Ordering::Relaxed);
                Ok(Widget::default())
            })
            .unwrap();

        // The pool exists and is empty, so this acquire fabricates - but through the
        // pool's stored factory, not the one passed here.
        let second_calls = Arc::clone(&second_factory_calls);
        let widget = registry
            .get_object("widgets", move || {
                second_calls.fetch_add(1, Ordering::Relaxed);
                Ok(Widget::default())
            })
            .unwrap();
        drop(widget);

        assert_eq!(first_factory_calls.load(Ordering::Relaxed), 1);
        assert_eq!(second_factory_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn duplicate_key_is_rejected_and_existing_pool_untouched() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 2, || Ok(Widget::default()))
            .unwrap();

        let error = registry
            .create_pool("widgets", 9, || Ok(Widget::default()))
            .unwrap_err();

        assert!(matches!(error, Error::DuplicateKey { .. }));
        assert_eq!(registry.idle_count("widgets").unwrap(), 2);
    }

    #[test]
    fn unknown_key_on_return_and_destroy() {
        let registry = PoolRegistry::new();

        let error = registry.return_object("missing", Widget::default()).unwrap_err();
        assert!(matches!(error, Error::UnknownKey { .. }));

        let error = registry.destroy_pool("missing").unwrap_err();
        assert!(matches!(error, Error::UnknownKey { .. }));

        assert_eq!(registry.pool_count(), 0);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("Widgets", 1, || Ok(Widget::default()))
            .unwrap();

        let error = registry.destroy_pool("widgets").unwrap_err();
        assert!(matches!(error, Error::UnknownKey { .. }));
        assert!(registry.contains_pool("Widgets"));
    }

    #[test]
    fn pools_under_different_keys_are_independent() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("a", 2, || Ok(Widget::default()))
            .unwrap();
        registry
            .create_pool("b", 5, || Ok(Widget::default()))
            .unwrap();

        registry.destroy_pool("a").unwrap();

        assert!(!registry.contains_pool("a"));
        assert!(registry.contains_pool("b"));
        assert_eq!(registry.idle_count("b").unwrap(), 5);
    }

    #[test]
    fn type_mismatch_on_get_and_return() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 1, || Ok(Widget::default()))
            .unwrap();

        let error = registry
            .get_object("widgets", || Ok(Gadget))
            .unwrap_err();
        assert!(matches!(error, Error::TypeMismatch { .. }));

        let error = registry.return_object("widgets", Gadget).unwrap_err();
        assert!(matches!(error, Error::TypeMismatch { .. }));

        // The pool survives both mismatches untouched.
        assert_eq!(registry.idle_count("widgets").unwrap(), 1);
    }

    #[test]
    fn type_mismatch_reports_both_type_names() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 0, || Ok(Widget::default()))
            .unwrap();

        let error = registry.return_object("widgets", Gadget).unwrap_err();

        let Error::TypeMismatch {
            expected, actual, ..
        } = error
        else {
            panic!("expected a type mismatch, got {error:?}");
        };

        assert!(expected.contains("Gadget"));
        assert!(actual.contains("Widget"));
    }

    #[test]
    fn fabrication_failure_surfaces_through_get_object() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 0, || {
                Err::<Widget, FabricationError>("widget press jammed".into())
            })
            .unwrap();

        let error = registry
            .get_object("widgets", || Ok(Widget::default()))
            .unwrap_err();

        assert!(matches!(error, Error::Fabrication { .. }));
    }

    #[test]
    fn fabrication_failure_during_create_registers_nothing() {
        let registry = PoolRegistry::new();

        let error = registry
            .create_pool("widgets", 3, || {
                Err::<Widget, FabricationError>("widget press jammed".into())
            })
            .unwrap_err();

        assert!(matches!(error, Error::Fabrication { .. }));
        assert!(!registry.contains_pool("widgets"));
    }

    #[test]
    fn destroy_then_recreate_starts_fresh() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 4, || Ok(Widget::default()))
            .unwrap();
        registry.destroy_pool("widgets").unwrap();

        registry
            .create_pool("widgets", 1, || Ok(Widget::default()))
            .unwrap();

        // No residual idle instances carry over from the destroyed pool.
        assert_eq!(registry.idle_count("widgets").unwrap(), 1);
    }

    #[test]
    fn destroy_tears_down_idle_instances() {
        struct Handle {
            closed: Arc<AtomicUsize>,
        }

        impl Poolable for Handle {}

        impl Drop for Handle {
            fn drop(&mut self) {
                self.closed.fetch_add(1, Ordering::Relaxed);
            }
        }

        let closed = Arc::new(AtomicUsize::new(0));
        let registry = PoolRegistry::new();

        let closed_in_factory = Arc::clone(&closed);
        registry
            .create_pool("handles", 3, move || {
                Ok(Handle {
                    closed: Arc::clone(&closed_in_factory),
                })
            })
            .unwrap();

        registry.destroy_pool("handles").unwrap();

        assert_eq!(closed.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn round_trip_reuses_instances_fifo() {
        let registry = PoolRegistry::new();

        registry
            .create_pool("widgets", 0, || Ok(Widget::default()))
            .unwrap();

        let a = registry
            .get_object("widgets", || Ok(Widget::default()))
            .unwrap();
        let b = registry
            .get_object("widgets", || Ok(Widget::default()))
            .unwrap();

        registry.return_object("widgets", a).unwrap();
        registry.return_object("widgets", b).unwrap();

        // `a` was released first, so it comes back first with its second use.
        let reused = registry
            .get_object("widgets", || Ok(Widget::default()))
            .unwrap();
        assert_eq!(reused.uses, 2);
    }

    #[test]
    fn singleton_handles_share_one_registry() {
        // The process-wide singleton is shared across all tests in this binary, so this is
        // the only test that touches it, and it uses a key no other test uses.
        let registry = PoolRegistry::instance();
        let same_registry = PoolRegistry::instance();
        assert!(Arc::ptr_eq(&registry, &same_registry));

        registry
            .create_pool("singleton_test/widgets", 1, || Ok(Widget::default()))
            .unwrap();

        assert!(same_registry.contains_pool("singleton_test/widgets"));

        registry.destroy_pool("singleton_test/widgets").unwrap();
    }
}
