//! Mutex lock recovery so one panicking caller does not wedge the prompt slot.

use std::sync::{Mutex, MutexGuard};

pub(crate) fn lock_or_recover<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!(context, "mutex poisoned; recovering");
            // Guarded values are only ever replaced whole, never left half-written.
            lock.clear_poison();
            poisoned.into_inner()
        }
    }
}

