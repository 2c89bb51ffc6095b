//! Write-once value shared between one producer and any number of readers.
//!
//! The connection handler creates one [`RdnsFuture`] per session, starts the
//! reverse lookup and resolves the future when it completes. Every check that
//! needs the PTR name blocks on the same instance instead of querying again.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::resolver::DnsError;

/// Reverse-DNS name of the peer (`None` when no PTR record exists).
pub type RdnsFuture = SingleAssignment<Option<String>, DnsError>;

#[derive(Debug)]
pub struct SingleAssignment<T, E> {
    slot: Mutex<Option<Result<T, E>>>,
    ready: Condvar,
}

impl<T, E> SingleAssignment<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    pub fn resolved(result: Result<T, E>) -> Self {
        Self {
            slot: Mutex::new(Some(result)),
            ready: Condvar::new(),
        }
    }

    /// Store the result and wake every waiter.
    ///
    /// Must be called exactly once. A second call panics in debug builds and
    /// is ignored otherwise; the first result is kept.
    pub fn set(&self, result: Result<T, E>) {
        let mut slot = self.lock();
        debug_assert!(slot.is_none(), "single-assignment value set twice");
        if slot.is_none() {
            *slot = Some(result);
            self.ready.notify_all();
        }
    }

    /// Block until the value is set.
    pub fn get(&self) -> Result<T, E> {
        let mut slot = self.lock();
        loop {
            if let Some(result) = slot.as_ref() {
                return result.clone();
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block for at most `timeout`. Returns `None` if the value is still pending.
    pub fn get_timeout(&self, timeout: Duration) -> Option<Result<T, E>> {
        let (slot, _) = self
            .ready
            .wait_timeout_while(self.lock(), timeout, |slot| slot.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().cloned()
    }

    pub fn try_get(&self) -> Option<Result<T, E>> {
        self.lock().as_ref().cloned()
    }

    pub fn is_resolved(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Result<T, E>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone, E: Clone> Default for SingleAssignment<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
