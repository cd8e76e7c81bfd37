/// The lifecycle contract implemented by every type stored in a
/// [`RecyclePool`][crate::RecyclePool].
///
/// The pool drives the hooks; implementors only react to them. Every hook has a default no-op
/// body, so a type with no per-use state can opt in with an empty `impl` block and a stateful
/// type overrides only what it needs.
///
/// # Hook order
///
/// For an instance fabricated by the factory, the pool calls [`on_create()`][Self::on_create]
/// exactly once, immediately after the factory returns. Every hand-out calls
/// [`on_acquire()`][Self::on_acquire], whether the instance is fresh or reused. Every hand-back
/// calls [`on_release()`][Self::on_release] first and [`reset()`][Self::reset] immediately
/// after, so the instance re-enters the idle holding area indistinguishable from a freshly
/// created one.
///
/// # Example
///
/// ```rust
/// use recycle_pool::Poolable;
///
/// #[derive(Default)]
/// struct AudioVoice {
///     samples_played: u64,
///     is_audible: bool,
/// }
///
/// impl Poolable for AudioVoice {
///     fn on_acquire(&mut self) {
///         self.is_audible = true;
///     }
///
///     fn on_release(&mut self) {
///         self.is_audible = false;
///     }
///
///     fn reset(&mut self) {
///         self.samples_played = 0;
///     }
/// }
/// ```
pub trait Poolable {
    /// Called exactly once per instance, when the factory has just produced it.
    ///
    /// This is the place for one-time setup that must not repeat on reuse. Reused instances
    /// never see this hook again.
    fn on_create(&mut self) {}

    /// Called every time the instance is handed to a caller, both on fresh fabrication and on
    /// reuse from the idle holding area.
    fn on_acquire(&mut self) {}

    /// Called every time the instance is handed back to the pool, before
    /// [`reset()`][Self::reset].
    fn on_release(&mut self) {}

    /// Clears any per-use state, immediately after [`on_release()`][Self::on_release].
    ///
    /// After this returns, the pool treats the instance as equivalent to a freshly created one.
    fn reset(&mut self) {}
}

/// A lifecycle notification delivered to pool observers.
///
/// Notifications fire synchronously from the pool operation that triggered them, always after
/// the corresponding [`Poolable`] hook has run. See
/// [`RecyclePool::subscribe()`][crate::RecyclePool::subscribe].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum LifecycleEvent {
    /// The factory produced a brand-new instance and its
    /// [`on_create()`][Poolable::on_create] hook has run.
    Created,

    /// An instance was handed to a caller and its [`on_acquire()`][Poolable::on_acquire] hook
    /// has run.
    Acquired,

    /// An instance was handed back (or is being drained) and its
    /// [`on_release()`][Poolable::on_release] hook has run.
    Released,
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(LifecycleEvent: Copy, Debug, Eq, Send, Sync);

    #[test]
    fn default_hooks_are_no_ops() {
        struct Inert;
        impl Poolable for Inert {}

        let mut instance = Inert;
        instance.on_create();
        instance.on_acquire();
        instance.on_release();
        instance.reset();
    }
}
