use std::collections::VecDeque;
use std::fmt;

use crate::{Error, FabricationError, LifecycleEvent, Poolable, RecyclePoolBuilder, Result};

/// The boxed form of a pool factory.
pub(crate) type Factory<T> =
    Box<dyn FnMut() -> std::result::Result<T, FabricationError> + Send>;

/// The boxed form of a lifecycle observer.
pub(crate) type Observer<T> = Box<dyn FnMut(LifecycleEvent, &T) + Send>;

/// An unbounded FIFO pool of reusable instances of a single [`Poolable`] type.
///
/// The pool owns an idle holding area and a factory. [`acquire()`][Self::acquire] hands out the
/// oldest idle instance, or fabricates a new one via the factory when the holding area is
/// empty; it never blocks and never fails on its own. [`release()`][Self::release] hands an
/// instance back for reuse. The holding area has no upper bound; the pool never discards an
/// instance except in [`drain()`][Self::drain].
///
/// Instances move by value across the acquire/release boundary, so exactly one owner holds any
/// instance at any time: the holding area while it is idle, or the caller while it is in use.
///
/// # Caller contract
///
/// The pool cannot verify that a released instance originally came from it. Releasing an
/// instance into a pool it was not acquired from mixes unrelated instances in one holding area;
/// honoring this contract is the caller's responsibility.
///
/// The factory must produce a distinct instance on every call. A factory that hands out shared
/// handles to one underlying resource defeats the single-owner model.
///
/// # Example
///
/// ```rust
/// use recycle_pool::{Poolable, RecyclePool};
///
/// #[derive(Default)]
/// struct ParticleBurst {
///     remaining_particles: u32,
/// }
///
/// impl Poolable for ParticleBurst {
///     fn reset(&mut self) {
///         self.remaining_particles = 0;
///     }
/// }
///
/// # fn main() -> Result<(), recycle_pool::Error> {
/// let mut pool = RecyclePool::new(4, || Ok(ParticleBurst::default()))?;
/// assert_eq!(pool.len(), 4);
///
/// let burst = pool.acquire()?;
/// assert_eq!(pool.len(), 3);
///
/// pool.release(burst);
/// assert_eq!(pool.len(), 4);
/// # Ok(())
/// # }
/// ```
///
/// # Thread safety
///
/// The pool is thread-mobile ([`Send`] when `T` is [`Send`]) but not thread-safe ([`Sync`]).
/// All holding-area mutation goes through `&mut self`, so the compiler enforces the
/// single-writer model. To share one pool across concurrent callers, wrap it in a mutex; the
/// `pool_registry` package does exactly that for its keyed pools.
pub struct RecyclePool<T>
where
    T: Poolable,
{
    /// Idle instances, oldest-released first. Every instance in here has had `on_create` run
    /// exactly once and `on_release` + `reset` run on its most recent hand-back (or is fresh
    /// from the factory and has never been handed out).
    idle: VecDeque<T>,

    /// Fabricates a new instance when the holding area cannot satisfy an acquire.
    factory: Factory<T>,

    /// Lifecycle observers, invoked synchronously after the corresponding hook.
    observers: Vec<Observer<T>>,
}

impl<T> RecyclePool<T>
where
    T: Poolable,
{
    /// Creates a new pool, eagerly fabricating `initial_size` idle instances.
    ///
    /// Each pre-fabricated instance has its [`on_create()`][Poolable::on_create] hook invoked
    /// exactly once before it enters the holding area. An `initial_size` of 0 is legal and
    /// produces an empty pool.
    ///
    /// For custom configuration (e.g. observers that see the eager fabrication), use
    /// [`RecyclePool::builder()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fabrication`] if the factory fails while producing any of the initial
    /// instances.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// struct ScratchBuffer {
    ///     bytes: Vec<u8>,
    /// }
    ///
    /// impl Poolable for ScratchBuffer {
    ///     fn reset(&mut self) {
    ///         self.bytes.clear();
    ///     }
    /// }
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let mut pool = RecyclePool::new(2, || {
    ///     Ok(ScratchBuffer {
    ///         bytes: Vec::with_capacity(4096),
    ///     })
    /// })?;
    ///
    /// assert_eq!(pool.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        initial_size: usize,
        factory: impl FnMut() -> std::result::Result<T, FabricationError> + Send + 'static,
    ) -> Result<Self> {
        Self::new_inner(initial_size, Box::new(factory), Vec::new())
    }

    /// Creates a builder for configuring and constructing a [`RecyclePool`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let pool = RecyclePool::builder()
    ///     .initial_size(8)
    ///     .factory(|| Ok(Decal))
    ///     .build()?;
    ///
    /// assert_eq!(pool.len(), 8);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn builder() -> RecyclePoolBuilder<T> {
        RecyclePoolBuilder::new()
    }

    /// Creates a new [`RecyclePool`] with the specified configuration.
    ///
    /// This method is used internally by the builder to construct the actual pool.
    pub(crate) fn new_inner(
        initial_size: usize,
        factory: Factory<T>,
        observers: Vec<Observer<T>>,
    ) -> Result<Self> {
        let mut pool = Self {
            idle: VecDeque::with_capacity(initial_size),
            factory,
            observers,
        };

        for _ in 0..initial_size {
            let instance = pool.fabricate()?;
            pool.idle.push_back(instance);
        }

        Ok(pool)
    }

    /// Hands out an instance, transferring ownership to the caller.
    ///
    /// If the holding area is non-empty, the oldest-released idle instance is reused (FIFO).
    /// Otherwise a new instance is fabricated via the factory, with
    /// [`on_create()`][Poolable::on_create] invoked exactly once on it. Either way the
    /// instance's [`on_acquire()`][Poolable::on_acquire] hook runs before it is returned.
    ///
    /// This never blocks and never queues: an empty holding area always means fabrication.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fabrication`] if the holding area was empty and the factory failed.
    /// The holding area is left unmodified in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let mut pool = RecyclePool::new(0, || Ok(Decal))?;
    ///
    /// // The pool is empty, so this fabricates on demand.
    /// let decal = pool.acquire()?;
    /// # drop(decal);
    /// # Ok(())
    /// # }
    /// ```
    pub fn acquire(&mut self) -> Result<T> {
        let mut instance = match self.idle.pop_front() {
            Some(instance) => instance,
            None => self.fabricate()?,
        };

        instance.on_acquire();
        self.notify(LifecycleEvent::Acquired, &instance);

        Ok(instance)
    }

    /// Hands an instance back to the pool for reuse.
    ///
    /// The instance's [`on_release()`][Poolable::on_release] hook runs first, then
    /// [`reset()`][Poolable::reset] clears its per-use state, then the instance joins the end
    /// of the idle holding area. It will be reused after every instance released before it.
    ///
    /// The instance must have been acquired from this pool; see the caller contract in the
    /// [type documentation][RecyclePool].
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let mut pool = RecyclePool::new(1, || Ok(Decal))?;
    ///
    /// let decal = pool.acquire()?;
    /// pool.release(decal);
    ///
    /// assert_eq!(pool.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn release(&mut self, mut instance: T) {
        instance.on_release();
        self.notify(LifecycleEvent::Released, &instance);

        instance.reset();
        self.idle.push_back(instance);
    }

    /// Releases and drops every idle instance, emptying the holding area.
    ///
    /// Each idle instance has its [`on_release()`][Poolable::on_release] hook invoked (and the
    /// [`Released`][LifecycleEvent::Released] notification fired) before it is dropped. A
    /// pooled type that wraps an external resource performs its end-of-life teardown in its
    /// [`Drop`] implementation.
    ///
    /// Instances currently held by callers are unaffected; the pool has no way to recall them.
    /// They become orphans of this pool, and callers should stop using them promptly rather
    /// than releasing them into the now-empty holding area as if nothing happened.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let mut pool = RecyclePool::new(8, || Ok(Decal))?;
    ///
    /// pool.drain();
    /// assert!(pool.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn drain(&mut self) {
        while let Some(mut instance) = self.idle.pop_front() {
            instance.on_release();
            self.notify(LifecycleEvent::Released, &instance);
        }
    }

    /// Registers an observer that receives every subsequent [`LifecycleEvent`] of this pool,
    /// together with a reference to the instance the event concerns.
    ///
    /// Observers are invoked synchronously from the pool operation that triggered the event,
    /// after the corresponding [`Poolable`] hook, in registration order. There is no way to
    /// unregister an observer; observers live as long as the pool.
    ///
    /// Observers registered here never see the [`Created`][LifecycleEvent::Created] events of
    /// the eager initial fabrication, which has already happened by the time the pool exists.
    /// Register observers via [`RecyclePoolBuilder::observer()`][crate::RecyclePoolBuilder::observer]
    /// to see those.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{LifecycleEvent, Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let mut pool = RecyclePool::new(1, || Ok(Decal))?;
    ///
    /// pool.subscribe(|event, _decal: &Decal| {
    ///     if event == LifecycleEvent::Acquired {
    ///         println!("a decal is now in use");
    ///     }
    /// });
    ///
    /// let decal = pool.acquire()?;
    /// # drop(decal);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe(&mut self, observer: impl FnMut(LifecycleEvent, &T) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The number of idle instances currently in the holding area.
    ///
    /// Instances held by callers are not counted; the pool does not track them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let mut pool = RecyclePool::new(3, || Ok(Decal))?;
    /// assert_eq!(pool.len(), 3);
    ///
    /// let decal = pool.acquire()?;
    /// assert_eq!(pool.len(), 2);
    /// # drop(decal);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.idle.len()
    }

    /// Returns whether the holding area has no idle instances.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Poolable, RecyclePool};
    ///
    /// #[derive(Default)]
    /// struct Decal;
    /// impl Poolable for Decal {}
    ///
    /// # fn main() -> Result<(), recycle_pool::Error> {
    /// let pool = RecyclePool::new(0, || Ok(Decal))?;
    /// assert!(pool.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    /// Fabricates a brand-new instance via the factory and runs its creation hook.
    fn fabricate(&mut self) -> Result<T> {
        let mut instance = (self.factory)().map_err(|source| Error::Fabrication { source })?;

        instance.on_create();
        self.notify(LifecycleEvent::Created, &instance);

        Ok(instance)
    }

    /// Delivers an event to every observer, in registration order.
    fn notify(&mut self, event: LifecycleEvent, instance: &T) {
        for observer in &mut self.observers {
            observer(event, instance);
        }
    }
}

impl<T> fmt::Debug for RecyclePool<T>
where
    T: Poolable,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclePool")
            .field("idle", &self.idle.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
