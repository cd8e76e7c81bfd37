//! This package provides [`LazySingleton`], a thread-safe holder for exactly one process-wide
//! instance of a type, constructed on first access and destroyable via an explicit reset.
//!
//! Unlike [`std::sync::OnceLock`], the holder supports the full
//! uninitialized → initialized → uninitialized cycle: [`clear()`][LazySingleton::clear] returns
//! the holder to its unset state and a later [`instance()`][LazySingleton::instance] call
//! constructs a fresh instance. The cycle may repeat any number of times.
//!
//! This is part of the [Repool project](https://github.com/folo-rs/repool) that provides object
//! reuse primitives for frame-driven Rust programs.
//!
//! # Example
//!
//! The intended use is one `static` holder per singleton type:
//!
//! ```rust
//! use lazy_singleton::LazySingleton;
//!
//! #[derive(Default)]
//! struct FrameCounters {
//!     // ...
//! }
//!
//! static COUNTERS: LazySingleton<FrameCounters> = LazySingleton::new();
//!
//! // The first access constructs the instance; every later access returns a handle
//! // to the same one.
//! let counters = COUNTERS.instance();
//! let same_counters = COUNTERS.instance();
//! assert!(std::sync::Arc::ptr_eq(&counters, &same_counters));
//! ```

mod singleton;

pub use singleton::*;
