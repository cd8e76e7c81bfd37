use thiserror::Error;

/// The error payload a pool factory returns when it fails to produce an instance.
///
/// Factories are arbitrary caller-supplied closures, so the pool does not constrain what their
/// failures look like beyond being sendable error values.
pub type FabricationError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when operating a [`RecyclePool`][crate::RecyclePool].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The factory failed while fabricating a new instance.
    ///
    /// The factory's error is propagated unchanged. The pool's holding area is left exactly as
    /// it was before the fabrication attempt; a partially-constructed instance is never
    /// inserted.
    #[error("the pool factory failed to fabricate a new instance: {source}")]
    Fabrication {
        /// The error returned by the factory.
        source: FabricationError,
    },
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
