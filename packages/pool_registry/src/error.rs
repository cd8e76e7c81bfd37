use thiserror::Error;

/// Errors that can occur when operating a [`PoolRegistry`][crate::PoolRegistry].
///
/// Every condition is reported synchronously at the call that triggered it; the registry never
/// retries internally and never swallows a failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// [`create_pool()`][crate::PoolRegistry::create_pool] was called with a key that already
    /// maps to a pool. The existing pool is left untouched; recover by choosing a different key
    /// or skipping creation.
    #[error("a pool with key '{key}' already exists")]
    DuplicateKey {
        /// The key that was already present.
        key: String,
    },

    /// The call referenced a key under which no pool is registered (never created, or already
    /// destroyed).
    #[error("no pool with key '{key}' exists")]
    UnknownKey {
        /// The key that had no pool.
        key: String,
    },

    /// The call supplied an element type different from the one the pool under this key was
    /// created with. The pool is left untouched; an unchecked cast never happens.
    ///
    /// The type names are those of [`std::any::type_name`] and are suitable for diagnostics
    /// only.
    #[error("the pool with key '{key}' holds instances of {actual}, but the caller expected {expected}")]
    TypeMismatch {
        /// The key whose pool was addressed.
        key: String,

        /// The element type the caller supplied.
        expected: &'static str,

        /// The element type the pool was created with.
        actual: &'static str,
    },

    /// The pool's factory failed while fabricating an instance, either during eager pool
    /// creation or during an acquire that found the holding area empty.
    #[error("fabrication failed in the pool with key '{key}'")]
    Fabrication {
        /// The key whose pool's factory failed.
        key: String,

        /// The underlying pool error.
        #[source]
        source: recycle_pool::Error,
    },
}

/// A specialized `Result` type for registry operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn type_mismatch_names_both_types() {
        let error = Error::TypeMismatch {
            key: "vfx".to_string(),
            expected: "Explosion",
            actual: "SmokeTrail",
        };

        let rendered = error.to_string();
        assert!(rendered.contains("Explosion"));
        assert!(rendered.contains("SmokeTrail"));
        assert!(rendered.contains("vfx"));
    }
}
