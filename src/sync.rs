//! Lock helpers for the process-wide width cache.
//!
//! The only shared state in the crate is the display width cache in
//! [`crate::cells`]. A panic while it is locked leaves at worst a stale
//! entry, so poisoned locks are recovered instead of propagated. Recovery is
//! reported through `log` so it stays visible when a logger is installed.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a previous holder panicked.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned: PoisonError<MutexGuard<'_, T>>| {
        log::warn!("recovered poisoned width cache lock");
        poisoned.into_inner()
    })
}
