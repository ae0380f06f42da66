//! # docgate
//!
//! Rate-limited client for submitting documents to a remote registration
//! service over HTTP.
//!
//! At most `capacity` submissions are admitted per time window. Capacity is
//! reset in full at each window boundary by a per-client clock task; it is
//! NOT returned when a request finishes, so the limiter throttles admission
//! rate rather than in-flight count. Callers over the budget wait for the
//! next window tick.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use docgate::{Client, ClientConfig, Document};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // At most 5 submissions per second.
//!     let client = Client::new(ClientConfig::new(Duration::from_secs(1), 5))?;
//!
//!     let document = Document {
//!         doc_id: Some("doc-1".to_string()),
//!         ..Default::default()
//!     };
//!
//!     // Waits for admission, then dispatches in the background.
//!     let pending = client.submit(&document, "base64-signature").await?;
//!     let response = pending.await?;
//!     println!("{}: {}", response.status, response.body);
//!
//!     client.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Semantics
//!
//! - Admission order among blocked callers is unspecified.
//! - Abandoning a blocked `submit` (dropping the future) consumes nothing.
//! - [`Client::shutdown`] stops the clock and fails blocked callers with
//!   [`SubmitError::Cancelled`]; in-flight responses keep resolving.
//! - A non-2xx status is a successful exchange, surfaced as a
//!   [`SubmissionResponse`] for the caller to interpret. There are no
//!   automatic retries.

mod client;
mod clock;
mod config;
mod dispatch;
mod document;
mod error;
mod gate;

pub use client::Client;
pub use clock::WindowClock;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use dispatch::{PendingResponse, SubmissionResponse};
pub use document::{Description, Document, Product};
pub use error::{AcquireError, ConfigError, SubmitError};
pub use gate::AdmissionGate;
