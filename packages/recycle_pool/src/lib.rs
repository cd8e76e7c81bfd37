//! This package provides [`RecyclePool`], an unbounded FIFO pool of reusable instances for
//! workloads where constructing an instance is expensive relative to how often one is needed.
//!
//! Instead of dropping an instance after use, callers hand it back to the pool, which parks it
//! in an idle holding area and hands it out again on the next request. Pooled types implement
//! the [`Poolable`] lifecycle contract so the pool can tell them when they are created, handed
//! out, and handed back.
//!
//! This is part of the [Repool project](https://github.com/folo-rs/repool) that provides object
//! reuse primitives for frame-driven Rust programs.
//!
//! # Features
//!
//! - **FIFO reuse**: the oldest released instance is reused first.
//! - **Fabrication on demand**: an empty pool never blocks; it fabricates a new instance via
//!   the factory supplied at construction time.
//! - **Lifecycle hooks**: creation, acquisition, release and state-reset hooks on the pooled
//!   type itself, via [`Poolable`].
//! - **Lifecycle notifications**: observers outside the pooling machinery can watch instances
//!   being created, acquired and released, via [`RecyclePool::subscribe()`].
//! - **Ownership transfer by move**: [`acquire()`][RecyclePool::acquire] moves the instance to
//!   the caller and [`release()`][RecyclePool::release] moves it back, so an instance is never
//!   referenced by two owners at once.
//!
//! # Example
//!
//! ```rust
//! use recycle_pool::{Poolable, RecyclePool};
//!
//! #[derive(Default)]
//! struct Projectile {
//!     flight_time_ms: u32,
//! }
//!
//! impl Poolable for Projectile {
//!     fn reset(&mut self) {
//!         self.flight_time_ms = 0;
//!     }
//! }
//!
//! # fn main() -> Result<(), recycle_pool::Error> {
//! let mut pool = RecyclePool::new(2, || Ok(Projectile::default()))?;
//!
//! let mut projectile = pool.acquire()?;
//! projectile.flight_time_ms = 150;
//!
//! // Handing the instance back resets it for the next caller.
//! pool.release(projectile);
//!
//! let reused = pool.acquire()?;
//! assert_eq!(reused.flight_time_ms, 0);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod pool;
mod poolable;

pub use builder::*;
pub use error::*;
pub use pool::*;
pub use poolable::*;
