//! Window clock: periodic refill driver.
//!
//! One spawned task per client ticks once per window and resets the gate.
//! Refills are the only capacity-recovery mechanism, so the loop only
//! exits on an explicit stop or when the clock handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::gate::AdmissionGate;

/// Handle to the ticking task. Dropping the handle stops the task.
pub struct WindowClock {
    shutdown_tx: watch::Sender<bool>,
}

impl WindowClock {
    /// Spawn the ticking task. The first tick fires one full window after
    /// start; missed ticks are skipped rather than bursted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(gate: Arc<AdmissionGate>, window: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + window, window);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(window_ms = window.as_millis() as u64, "window clock started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let restored = gate.refill();
                        if restored > 0 {
                            debug!(restored, "window refill");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        // A closed channel means the handle was dropped.
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("window clock stopped");
                            return;
                        }
                    }
                }
            }
        });

        Self { shutdown_tx }
    }

    /// Stop ticking. Safe to call more than once.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
