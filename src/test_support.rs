//! Test support utilities shared across unit and integration tests.

use std::collections::{BTreeSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::StatusCode;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

use crate::transport::{RawResponse, Transport, TransportError, TransportFuture};

/// Scripted transport that returns pre-seeded responses in FIFO order and
/// records every request it receives.
///
/// When the script runs dry it answers `202 Accepted` with an empty body.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A single request captured by [`RecordingTransport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedRequest {
    /// Target URL.
    pub url: String,
    /// Token passed as `X-Auth-Token`.
    pub auth_token: String,
    /// JSON body.
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

impl RecordingTransport {
    /// Creates a transport with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn push_response(&self, status: StatusCode, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(RawResponse::new(status, body)));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Returns a snapshot of all requests recorded so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for RecordingTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth_token: &'a str,
        body: Vec<u8>,
    ) -> TransportFuture<'a, RawResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_owned(),
                auth_token: auth_token.to_owned(),
                body,
            });
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(StatusCode::ACCEPTED, Vec::new())));
        Box::pin(async move { next })
    }
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());

/// Guard that holds [`ENV_LOCK`] and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: AsyncMutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Applies `changes` while holding the global mutex. `Some` sets a
    /// variable and `None` removes it.
    pub async fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                changes.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::apply"
        );

        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(changes.len());
        for (key, value) in changes {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`.
            unsafe {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
