//! This package provides [`PoolRegistry`], a key-addressed collection of heterogeneous
//! [`RecyclePool`][recycle_pool::RecyclePool]s, itself exposed as a process-wide singleton.
//!
//! Callers address pools by a string key plus the element type. The registry creates pools
//! lazily on first use, routes acquire/release calls by key, and supports explicit teardown of
//! individual pools. The element types of the stored pools are erased inside the registry and
//! recovered on each call through a checked downcast, so supplying the wrong type produces an
//! [`Error::TypeMismatch`] instead of undefined behavior.
//!
//! This is part of the [Repool project](https://github.com/folo-rs/repool) that provides object
//! reuse primitives for frame-driven Rust programs.
//!
//! # Example
//!
//! ```rust
//! use pool_registry::PoolRegistry;
//! use recycle_pool::Poolable;
//!
//! #[derive(Default)]
//! struct Explosion {
//!     frames_remaining: u32,
//! }
//!
//! impl Poolable for Explosion {
//!     fn reset(&mut self) {
//!         self.frames_remaining = 0;
//!     }
//! }
//!
//! # fn main() -> Result<(), pool_registry::Error> {
//! let registry = PoolRegistry::new();
//!
//! // The first call for a key creates the pool implicitly.
//! let explosion = registry.get_object("explosions", || Ok(Explosion::default()))?;
//!
//! registry.return_object("explosions", explosion)?;
//! registry.destroy_pool("explosions")?;
//! # Ok(())
//! # }
//! ```
//!
//! For process-wide use, address the singleton instead of constructing a registry:
//!
//! ```rust
//! use pool_registry::PoolRegistry;
//! # use recycle_pool::Poolable;
//! # #[derive(Default)]
//! # struct Explosion;
//! # impl Poolable for Explosion {}
//!
//! # fn main() -> Result<(), pool_registry::Error> {
//! let registry = PoolRegistry::instance();
//! let explosion = registry.get_object("vfx/explosions", || Ok(Explosion::default()))?;
//! registry.return_object("vfx/explosions", explosion)?;
//! # registry.destroy_pool("vfx/explosions")?;
//! # Ok(())
//! # }
//! ```

mod constants;
mod entry;
mod error;
mod registry;

pub use constants::DEFAULT_POOL_SIZE;
pub use error::*;
pub use registry::*;

pub(crate) use entry::*;
