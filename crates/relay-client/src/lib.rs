//! # relay-client
//!
//! Async HTTP/JSON client for the Relay task backend.
//!
//! Every response is a `{success, data}` envelope. Status codes map onto the
//! error taxonomy in [`ClientError::kind`]:
//! - 404 → not found (an absent report is not a failure)
//! - 400/409/422 → validation
//! - timeouts, connection failures, 429 and 5xx → transient
//!
//! Reads (list, get, poll) retry transient failures with capped exponential
//! backoff. Mutations (dispatch, create, confirm, append) are sent once, with
//! an `Idempotency-Key` header, and are never retried here.
//!
//! Endpoint groups:
//! - [`requirements`]: requirement listing and per-assignee dispatch
//! - [`tasks`]: task listing, submission, confirmation, status polling
//! - [`conversations`]: execution log reads and appends
//! - [`reports`]: delivery report lookup and polling

pub mod conversations;
pub mod reports;
pub mod requirements;
pub mod tasks;

mod error;
mod http;

pub use error::ClientError;

use std::future::Future;
use std::time::Duration;

use relay_core::poll::{PollPolicy, PollStep, RetryPolicy};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http::{check_response, read_envelope};

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

// ── Options ────────────────────────────────────────────────────────

/// Connection and pacing settings.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL every endpoint path is appended to, e.g.
    /// `http://localhost:3001/api`.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Backoff for transient read failures.
    pub retry: RetryPolicy,
    /// Bound for `wait_for_*` polls.
    pub poll: PollPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
            timeout: Duration::from_secs(5),
            user_agent: "relay/0.1".to_string(),
            retry: RetryPolicy::default(),
            poll: PollPolicy::default(),
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the task backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    poll: PollPolicy,
}

impl BackendClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. an invalid user agent).
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            retry: options.retry,
            poll: options.poll,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and unwrap the envelope, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<T, ClientError> {
        let mut attempt = 1;
        loop {
            match self.get_once(path, query, resource).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        path,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %err,
                        "transient read failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let resp = self.http.get(self.url(path)).query(query).send().await?;
        read_envelope(check_response(resp, resource).await?).await
    }

    /// POST `body` to `path` exactly once.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
        resource: &str,
    ) -> Result<T, ClientError> {
        tracing::debug!(path, idempotency_key, "POST");
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_KEY_HEADER, key);
        }
        let resp = request.send().await?;
        read_envelope(check_response(resp, resource).await?).await
    }

    /// Run `check` until it reports ready or the poll policy runs out.
    async fn poll_until<T, F, Fut>(&self, what: &str, mut check: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollStep<T>, ClientError>>,
    {
        let mut attempts = 0;
        while self.poll.should_continue(attempts) {
            if attempts > 0 {
                tokio::time::sleep(self.poll.interval).await;
            }
            attempts += 1;
            if let PollStep::Ready(value) = check().await? {
                return Ok(value);
            }
            tracing::debug!(what, attempts, "still waiting");
        }
        Err(ClientError::PollExhausted {
            what: what.to_string(),
            attempts,
        })
    }
}

/// Percent-encode one path segment.
fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
