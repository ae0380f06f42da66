//! Admission gate: fixed-window capacity accounting.
//!
//! At most `capacity` acquires succeed between two refill ticks. Refill is
//! a full reset to capacity, not an incremental release: completing a
//! submission never returns a unit to the pool, only the next window tick
//! does. The gate throttles admission rate, not in-flight count.

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::debug;

use crate::error::AcquireError;

struct GateState {
    units: u32,
    closed: bool,
}

/// Bounded-capacity gate shared by all callers of a client.
///
/// The unit count is the only mutable shared state; all mutation goes
/// through [`acquire`](Self::acquire), [`refill`](Self::refill), and
/// [`close`](Self::close) under one mutex that is never held across an
/// await point.
pub struct AdmissionGate {
    capacity: u32,
    state: Mutex<GateState>,
    notify: Notify,
}

impl AdmissionGate {
    /// Create a gate with `capacity` units available for the first window.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            state: Mutex::new(GateState {
                units: capacity,
                closed: false,
            }),
            notify: Notify::new(),
        }
    }

    /// Wait until a unit is available, then consume it.
    ///
    /// Cancel-safe: dropping the returned future abandons the wait without
    /// consuming a unit. Ordering among concurrent waiters is unspecified.
    /// Fails with [`AcquireError::Cancelled`] once the gate is closed.
    pub async fn acquire(&self) -> Result<(), AcquireError> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register interest before checking so a refill landing between
            // the check and the await cannot be lost.
            notified.as_mut().enable();
            if self.try_take()? {
                return Ok(());
            }
            notified.await;
        }
    }

    /// Consume a unit if one is available right now.
    ///
    /// Returns `false` when the window's budget is exhausted or the gate
    /// is closed.
    pub fn try_acquire(&self) -> bool {
        matches!(self.try_take(), Ok(true))
    }

    fn try_take(&self) -> Result<bool, AcquireError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(AcquireError::Cancelled);
        }
        if state.units > 0 {
            state.units -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Reset available units to capacity and wake blocked acquirers.
    ///
    /// This is an atomic reset, never a read-then-compute-delta, so
    /// concurrent acquires cannot observe a count outside [0, capacity].
    /// Returns the number of units restored. No-op once closed.
    pub fn refill(&self) -> u32 {
        let restored = {
            let mut state = self.state.lock();
            if state.closed {
                return 0;
            }
            let restored = self.capacity - state.units;
            state.units = self.capacity;
            restored
        };
        if restored > 0 {
            self.notify.notify_waiters();
        }
        restored
    }

    /// Close the gate: all blocked and future acquires fail with
    /// [`AcquireError::Cancelled`]. Idempotent.
    pub fn close(&self) {
        let was_open = {
            let mut state = self.state.lock();
            let was_open = !state.closed;
            state.closed = true;
            was_open
        };
        if was_open {
            debug!("admission gate closed");
            self.notify.notify_waiters();
        }
    }

    /// Units still available in the current window.
    pub fn available(&self) -> u32 {
        self.state.lock().units
    }

    /// Configured maximum admissions per window.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    #[tokio::test(start_paused = true)]
    async fn admits_capacity_then_blocks() {
        let gate = AdmissionGate::new(3);
        for _ in 0..3 {
            gate.acquire().await.unwrap();
        }
        assert_eq!(gate.available(), 0);

        // Fourth acquire blocks; abandoning it consumes nothing.
        let blocked = timeout(Duration::from_millis(10), gate.acquire()).await;
        assert!(blocked.is_err());
        assert_eq!(gate.available(), 0);
    }

    #[tokio::test]
    async fn refill_is_a_full_reset() {
        let gate = AdmissionGate::new(4);
        gate.acquire().await.unwrap();
        gate.acquire().await.unwrap();

        assert_eq!(gate.refill(), 2);
        assert_eq!(gate.available(), 4);
        // Idempotent at rest: nothing consumed, nothing restored.
        assert_eq!(gate.refill(), 0);
        assert_eq!(gate.available(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn refill_wakes_blocked_acquirer() {
        let gate = Arc::new(AdmissionGate::new(1));
        gate.acquire().await.unwrap();

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.acquire().await }
        });
        sleep(Duration::from_millis(1)).await;

        gate.refill();
        waiter.await.unwrap().unwrap();
        assert_eq!(gate.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_acquires_respect_capacity() {
        let gate = Arc::new(AdmissionGate::new(5));
        let admitted = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let gate = Arc::clone(&gate);
            let admitted = Arc::clone(&admitted);
            handles.push(tokio::spawn(async move {
                if matches!(
                    timeout(Duration::from_millis(50), gate.acquire()).await,
                    Ok(Ok(()))
                ) {
                    admitted.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(admitted.load(Ordering::SeqCst), 5);
        assert_eq!(gate.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_wait_does_not_affect_other_waiters() {
        let gate = Arc::new(AdmissionGate::new(1));
        gate.acquire().await.unwrap();

        // First waiter gives up.
        assert!(timeout(Duration::from_millis(5), gate.acquire()).await.is_err());

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.acquire().await }
        });
        sleep(Duration::from_millis(1)).await;

        gate.refill();
        waiter.await.unwrap().unwrap();
        assert_eq!(gate.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn close_fails_blocked_and_future_acquires() {
        let gate = Arc::new(AdmissionGate::new(1));
        gate.acquire().await.unwrap();

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.acquire().await }
        });
        sleep(Duration::from_millis(1)).await;

        gate.close();
        assert_eq!(waiter.await.unwrap(), Err(AcquireError::Cancelled));
        assert_eq!(gate.acquire().await, Err(AcquireError::Cancelled));
        assert!(!gate.try_acquire());
        // Closed gate never restores capacity.
        assert_eq!(gate.refill(), 0);
    }

    #[tokio::test]
    async fn try_acquire_consumes_units() {
        let gate = AdmissionGate::new(2);
        assert!(gate.try_acquire());
        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
        assert_eq!(gate.available(), 0);
    }
}
