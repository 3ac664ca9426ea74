use std::sync::{Mutex, MutexGuard, PoisonError};

/// locks the passed mutex. If a previous holder panicked, the poison is logged and cleared
/// instead of being passed on, since every write to the guarded data completes before it is
/// made visible
pub fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e: PoisonError<MutexGuard<'a, T>>| {
        log::warn!("The {name} mutex was poisoned! Resetting...");
        mutex.clear_poison();
        e.into_inner()
    })
}
