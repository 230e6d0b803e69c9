//! Scoped reentrancy guard.
//!
//! A [`ReentrancyLock`] is owned by a pool.  Every operation that calls out
//! to the ledger acquires a [`ReentrancyGuard`] first; the lock is released
//! when the guard drops, on every exit path including `?` and panics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::PoolError;

/// Per-pool lock flag.
#[derive(Debug, Default)]
pub struct ReentrancyLock {
    locked: Arc<AtomicBool>,
}

impl ReentrancyLock {
    /// Creates an unlocked lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock.
    ///
    /// # Errors
    ///
    /// [`PoolError::Reentrancy`] if a guard is already alive.
    pub fn enter(&self) -> Result<ReentrancyGuard, PoolError> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| PoolError::Reentrancy)?;
        Ok(ReentrancyGuard {
            locked: Arc::clone(&self.locked),
        })
    }

    /// Returns `true` while a guard is alive.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// Releases its [`ReentrancyLock`] on drop.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ReentrancyGuard {
    locked: Arc<AtomicBool>,
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn nested_enter_fails() {
        let lock = ReentrancyLock::new();
        let Ok(guard) = lock.enter() else {
            panic!("expected Ok");
        };
        assert!(lock.is_locked());
        assert!(matches!(lock.enter(), Err(PoolError::Reentrancy)));
        drop(guard);
        assert!(!lock.is_locked());
        assert!(lock.enter().is_ok());
    }

    #[test]
    fn released_on_early_return() {
        fn failing(lock: &ReentrancyLock) -> Result<(), PoolError> {
            let _guard = lock.enter()?;
            Err(PoolError::SwapsPaused)
        }
        let lock = ReentrancyLock::new();
        assert_eq!(failing(&lock), Err(PoolError::SwapsPaused));
        assert!(!lock.is_locked());
    }
}
