/// The initial size used when [`get_object()`][crate::PoolRegistry::get_object] creates a pool
/// implicitly because none existed yet under the requested key.
///
/// Pools that need a different initial size are created explicitly via
/// [`create_pool()`][crate::PoolRegistry::create_pool] before the first `get_object()` call.
pub const DEFAULT_POOL_SIZE: usize = 10;

// A poisoned lock means the process is in an unrecoverable/unsafe state and must exit (we panic).
pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - program validity cannot be guaranteed";
