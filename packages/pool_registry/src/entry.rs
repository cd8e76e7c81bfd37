use std::any::{self, Any};
use std::fmt;

use recycle_pool::{Poolable, RecyclePool};

/// The object-safe view of a [`RecyclePool<T>`] with the element type erased.
///
/// The registry stores pools of arbitrary element types in one map, so it can only hold them
/// behind this trait. Operations that do not care about the element type (teardown, idle
/// counts) go through the trait directly; typed operations recover the concrete pool with a
/// checked downcast via [`as_any_mut()`][Self::as_any_mut].
pub(crate) trait ErasedPool: Any + Send + fmt::Debug {
    /// Releases and drops every idle instance; see
    /// [`RecyclePool::drain()`][recycle_pool::RecyclePool::drain].
    fn drain_idle(&mut self);

    /// The number of idle instances in the holding area.
    fn idle_len(&self) -> usize;

    /// Restores access to the concrete `RecyclePool<T>` for checked downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> ErasedPool for RecyclePool<T>
where
    T: Poolable + Send + 'static,
{
    fn drain_idle(&mut self) {
        self.drain();
    }

    fn idle_len(&self) -> usize {
        self.len()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One registered pool: the type-erased pool itself plus the name of its element type, kept
/// around so type mismatches can be reported with both sides named.
#[derive(Debug)]
pub(crate) struct PoolEntry {
    pool: Box<dyn ErasedPool>,
    element_type_name: &'static str,
}

impl PoolEntry {
    pub(crate) fn new<T>(pool: RecyclePool<T>) -> Self
    where
        T: Poolable + Send + 'static,
    {
        Self {
            pool: Box::new(pool),
            element_type_name: any::type_name::<T>(),
        }
    }

    /// The name of the element type the pool was created with, for diagnostics.
    pub(crate) fn element_type_name(&self) -> &'static str {
        self.element_type_name
    }

    /// The number of idle instances in the pool, regardless of element type.
    pub(crate) fn idle_len(&self) -> usize {
        self.pool.idle_len()
    }

    /// Releases and drops every idle instance, regardless of element type.
    pub(crate) fn drain_idle(&mut self) {
        self.pool.drain_idle();
    }

    /// Recovers the concrete pool, or `None` if `T` is not the element type it was created
    /// with.
    pub(crate) fn downcast_mut<T>(&mut self) -> Option<&mut RecyclePool<T>>
    where
        T: Poolable + Send + 'static,
    {
        self.pool.as_any_mut().downcast_mut::<RecyclePool<T>>()
    }
}
