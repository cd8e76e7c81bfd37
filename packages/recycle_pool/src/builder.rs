use std::fmt;

use crate::pool::{Factory, Observer};
use crate::{FabricationError, LifecycleEvent, Poolable, RecyclePool, Result};

/// Builder for creating an instance of [`RecyclePool`].
///
/// [`RecyclePool`] requires a factory to be specified at construction time; everything else is
/// optional. The builder exists mainly so that lifecycle observers can be registered before the
/// eager initial fabrication happens, letting them see the
/// [`Created`][LifecycleEvent::Created] notifications of the prefilled instances.
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
/// let pool = RecyclePool::builder()
///     .initial_size(4)
///     .factory(|| Ok(Decal))
///     .observer(|event, _decal: &Decal| {
///         if event == LifecycleEvent::Created {
///             println!("fabricated a decal");
///         }
///     })
///     .build()?;
///
/// assert_eq!(pool.len(), 4);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct RecyclePoolBuilder<T>
where
    T: Poolable,
{
    initial_size: usize,
    factory: Option<Factory<T>>,
    observers: Vec<Observer<T>>,
}

impl<T> RecyclePoolBuilder<T>
where
    T: Poolable,
{
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            initial_size: 0,
            factory: None,
            observers: Vec::new(),
        }
    }

    /// Sets the number of instances fabricated eagerly when the pool is built.
    ///
    /// Defaults to 0 (no eager fabrication).
    #[inline]
    pub fn initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Sets the factory the pool uses to fabricate instances.
    ///
    /// The factory is mandatory. It must produce a distinct instance on every call.
    #[inline]
    pub fn factory(
        mut self,
        factory: impl FnMut() -> std::result::Result<T, FabricationError> + Send + 'static,
    ) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Registers a lifecycle observer on the pool being built.
    ///
    /// May be called multiple times; observers are invoked in registration order. Unlike
    /// [`RecyclePool::subscribe()`], observers registered here also see the
    /// [`Created`][LifecycleEvent::Created] notifications of the eager initial fabrication.
    #[inline]
    pub fn observer(mut self, observer: impl FnMut(LifecycleEvent, &T) + Send + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Constructs the pool, eagerly fabricating the configured number of instances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fabrication`][crate::Error::Fabrication] if the factory fails while
    /// producing any of the initial instances.
    ///
    /// # Panics
    ///
    /// Panics if no factory has been set. A pool without a factory cannot exist; this is a
    /// programming error, not a runtime condition.
    pub fn build(self) -> Result<RecyclePool<T>> {
        let factory = self
            .factory
            .expect("a factory must be set before a RecyclePool can be built");

        RecyclePool::new_inner(self.initial_size, factory, self.observers)
    }
}

impl<T> fmt::Debug for RecyclePoolBuilder<T>
where
    T: Poolable,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclePoolBuilder")
            .field("initial_size", &self.initial_size)
            .field("has_factory", &self.factory.is_some())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use static_assertions::assert_impl_all;

    use super::*;

    #[derive(Debug, Default)]
    struct Widget;

    impl Poolable for Widget {}

    assert_impl_all!(RecyclePoolBuilder<Widget>: Send);

    #[test]
    fn defaults_to_empty_pool() {
        let pool = RecyclePool::<Widget>::builder()
            .factory(|| Ok(Widget))
            .build()
            .unwrap();

        assert!(pool.is_empty());
    }

    #[test]
    fn builder_observer_sees_prefill_creations() {
        let created = Arc::new(AtomicUsize::new(0));
        let created_in_observer = Arc::clone(&created);

        let _pool = RecyclePool::builder()
            .initial_size(6)
            .factory(|| Ok(Widget))
            .observer(move |event, _widget: &Widget| {
                if event == LifecycleEvent::Created {
                    created_in_observer.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build()
            .unwrap();

        assert_eq!(created.load(Ordering::Relaxed), 6);
    }

    #[test]
    #[should_panic(expected = "a factory must be set")]
    fn build_without_factory_panics() {
        drop(RecyclePool::<Widget>::builder().initial_size(1).build());
    }
}
