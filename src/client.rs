//! Composition root: one gate, one clock, one dispatcher.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::clock::WindowClock;
use crate::config::ClientConfig;
use crate::dispatch::{PendingResponse, SubmissionDispatcher};
use crate::error::{ConfigError, SubmitError};
use crate::gate::AdmissionGate;

/// Rate-limited client for the registration service.
///
/// Each client owns its own gate and clock: instances are independently
/// constructible and disposable, with no process-wide shared state.
/// Construction and [`submit`](Self::submit) require a tokio runtime.
pub struct Client {
    gate: Arc<AdmissionGate>,
    clock: WindowClock,
    dispatcher: SubmissionDispatcher,
}

impl Client {
    /// Validate `config`, build the shared HTTP client, and start the
    /// window clock.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let endpoint = config.validated_endpoint()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let gate = Arc::new(AdmissionGate::new(config.capacity));
        let clock = WindowClock::start(Arc::clone(&gate), config.window);

        info!(
            capacity = config.capacity,
            window_ms = config.window.as_millis() as u64,
            endpoint = %endpoint,
            "submission client started"
        );

        Ok(Self {
            gate,
            clock,
            dispatcher: SubmissionDispatcher::new(http, endpoint),
        })
    }

    /// Shorthand for a config with only the required parameters.
    pub fn with_limit(window: Duration, capacity: u32) -> Result<Self, ConfigError> {
        Self::new(ClientConfig::new(window, capacity))
    }

    /// Submit a document with the caller-supplied signature.
    ///
    /// Waits for admission (at most `capacity` submissions proceed per
    /// window), then dispatches in the background and returns a handle to
    /// the eventual response. Fails with [`SubmitError::Cancelled`] if the
    /// client is shut down while waiting.
    pub async fn submit<T: Serialize>(
        &self,
        document: &T,
        signature: &str,
    ) -> Result<PendingResponse, SubmitError> {
        self.gate.acquire().await?;
        self.dispatcher.dispatch(document, signature)
    }

    /// Stop the window clock and fail all blocked submitters.
    ///
    /// In-flight [`PendingResponse`]s are unaffected and keep resolving.
    /// Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        self.clock.stop();
        self.gate.close();
    }

    /// Units still available in the current window.
    pub fn available_units(&self) -> u32 {
        self.gate.available()
    }

    /// Configured maximum admissions per window.
    pub fn capacity(&self) -> u32 {
        self.gate.capacity()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.shutdown();
    }
}
