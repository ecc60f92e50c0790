use std::time::Duration;

use async_trait::async_trait;
use todo_types::ItemView;

use crate::error::{SyncError, SyncResult};

/// Echo endpoint used when no other mirror is configured.
pub const DEFAULT_MIRROR_ENDPOINT: &str = "https://postman-echo.com/post";

/// Outbound interface to the external mirror.
///
/// One call per item; implementations must not retry.
#[async_trait]
pub trait MirrorClient: Send + Sync {
    /// Send the item to the mirror. `Ok` only on a confirmed success response.
    async fn mirror(&self, item: &ItemView) -> SyncResult<()>;

    /// Human-readable target, for logs.
    fn endpoint(&self) -> &str;
}

/// Mirror that POSTs the item view as JSON over HTTP(S).
///
/// Unauthenticated. Any 2xx status counts as success; the response body is
/// ignored.
pub struct HttpMirror {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpMirror {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl MirrorClient for HttpMirror {
    async fn mirror(&self, item: &ItemView) -> SyncResult<()> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let response = self
            .client
            .post(&self.endpoint)
            .json(item)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    SyncError::Timeout(timeout_ms)
                } else {
                    SyncError::Transport(error.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SyncError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMirror")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Mirror used when mirroring is switched off. Every attempt fails without I/O.
#[derive(Debug, Default)]
pub struct DisabledMirror;

#[async_trait]
impl MirrorClient for DisabledMirror {
    async fn mirror(&self, _item: &ItemView) -> SyncResult<()> {
        Err(SyncError::Disabled)
    }

    fn endpoint(&self) -> &str {
        "disabled"
    }
}
