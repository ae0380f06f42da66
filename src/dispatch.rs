//! Submission dispatch over HTTP.
//!
//! The dispatcher builds and sends the outbound request for an admitted
//! submission. It does not consult the admission gate: once a caller is
//! admitted, a slow network call must not hold a rate-limit unit hostage,
//! so the send runs in a spawned task and the caller gets a handle.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::error::SubmitError;

/// Raw result of a completed submission exchange.
///
/// The client does not interpret the status: a non-2xx response is a
/// successful transport-level exchange whose payload indicates business
/// failure, and is surfaced as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    /// HTTP status code returned by the registration service.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl SubmissionResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Handle to an in-flight submission.
///
/// Resolves to the raw response or a [`SubmitError::Transport`] failure.
/// Dropping the handle does not abort the request.
pub struct PendingResponse {
    handle: JoinHandle<Result<SubmissionResponse, SubmitError>>,
}

impl Future for PendingResponse {
    type Output = Result<SubmissionResponse, SubmitError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => Poll::Ready(Err(SubmitError::Transport(format!(
                "dispatch task failed: {}",
                e
            )))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Builds and sends registration requests using one shared HTTP client.
pub struct SubmissionDispatcher {
    http: reqwest::Client,
    endpoint: Url,
}

impl SubmissionDispatcher {
    pub(crate) fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Serialize `document`, build the request, and send it in the
    /// background. The caller must already have been admitted by the gate.
    ///
    /// Serialization failures surface synchronously; everything after that
    /// is delivered through the returned [`PendingResponse`].
    pub fn dispatch<T: Serialize>(
        &self,
        document: &T,
        signature: &str,
    ) -> Result<PendingResponse, SubmitError> {
        let body = serde_json::to_string(document)
            .map_err(|e| SubmitError::InvalidDocument(e.to_string()))?;

        let request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header("Signature", signature)
            .body(body);
        let endpoint = self.endpoint.clone();

        let handle = tokio::spawn(async move {
            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match response.text().await {
                        Ok(body) => {
                            debug!(status, "submission exchange completed");
                            Ok(SubmissionResponse { status, body })
                        }
                        Err(e) => {
                            warn!(url = %endpoint, error = %e, "submission body read failed");
                            Err(SubmitError::Transport(e.to_string()))
                        }
                    }
                }
                Err(e) => {
                    warn!(url = %endpoint, error = %e, "submission request failed");
                    Err(SubmitError::Transport(e.to_string()))
                }
            }
        });

        Ok(PendingResponse { handle })
    }
}
