//! The process-wide namespace.

use crate::namespace::Namespace;
use std::sync::{LazyLock, Mutex};

static GLOBAL: LazyLock<Mutex<Namespace>> = LazyLock::new(|| Mutex::new(Namespace::new()));

/// The process-wide namespace, created on first use and never torn down.
///
/// Its root is the global root directory. The namespace does no locking of
/// its own; the mutex is the single coarse lock that serializes callers.
/// Tests and embedders that want isolation should build their own
/// [`Namespace`] instead.
pub fn global() -> &'static Mutex<Namespace> {
    &GLOBAL
}
