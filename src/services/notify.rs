//! Notification dispatch seam.
//!
//! The engine only produces a payload; delivery is fire-and-forget and
//! decoupled from the profile commit. The default implementation pushes to
//! an in-process outbox channel drained by a logging task, standing in for
//! the push transport. A failure here is reported and dropped, never
//! allowed to roll back a committed mutation.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Error, Debug)]
#[error("notification dispatch failed: {0}")]
pub struct DispatchError(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, account_id: &str, payload: Value) -> Result<(), DispatchError>;
}

/// Queues payloads onto an outbox channel.
pub struct OutboxNotifier {
    tx: mpsc::UnboundedSender<(String, Value)>,
}

impl OutboxNotifier {
    pub fn new() -> (OutboxNotifier, mpsc::UnboundedReceiver<(String, Value)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (OutboxNotifier { tx }, rx)
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn notify(&self, account_id: &str, payload: Value) -> Result<(), DispatchError> {
        self.tx
            .send((account_id.to_string(), payload))
            .map_err(|e| DispatchError(e.to_string()))
    }
}

/// Drains the outbox, logging each delivery. The real-time push transport
/// would hang off this receiver instead.
pub async fn drain_outbox(mut rx: mpsc::UnboundedReceiver<(String, Value)>) {
    while let Some((account_id, payload)) = rx.recv().await {
        info!(target: "notify.outbox", account_id = %account_id, payload = %payload, "notification dispatched");
    }
}

/// Records every payload. For tests.
#[derive(Default)]
pub struct CapturingNotifier {
    sent: Mutex<Vec<(String, Value)>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn take(&self) -> Vec<(String, Value)> {
        std::mem::take(&mut *self.sent.lock().await)
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn notify(&self, account_id: &str, payload: Value) -> Result<(), DispatchError> {
        self.sent
            .lock()
            .await
            .push((account_id.to_string(), payload));
        Ok(())
    }
}
