//! Notifier implementations: log-only, timeout-enforcing, and recording.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

use remedia_core::org::types::User;
use remedia_core::store::{Notifier, NotifyError};
use remedia_shared::config::DispatchConfig;
use remedia_shared::types::{CaseId, UserId};
use tracing::info;

/// Log-only notifier for embedders without a delivery gateway.
///
/// Never fails and never blocks; the persistent notification rows remain
/// the system of record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    async fn send(
        &self,
        recipient: &User,
        message: &str,
        case_id: Option<CaseId>,
    ) -> Result<(), NotifyError> {
        info!(
            recipient = %recipient.id,
            case_id = ?case_id,
            message,
            "notification"
        );
        Ok(())
    }
}

/// Wraps another notifier and enforces the configured per-send timeout.
///
/// No send may block the dispatcher indefinitely; a send that outlives
/// the timeout is reported as [`NotifyError::Timeout`] and abandoned.
pub struct TimeoutNotifier<N> {
    inner: N,
    timeout: Duration,
}

impl<N> TimeoutNotifier<N> {
    /// Wraps `inner` with an explicit timeout.
    #[must_use]
    pub fn new(inner: N, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Wraps `inner` with the timeout from the dispatch configuration.
    #[must_use]
    pub fn from_config(inner: N, config: &DispatchConfig) -> Self {
        Self::new(inner, Duration::from_secs(config.send_timeout_secs))
    }
}

impl<N: Notifier> Notifier for TimeoutNotifier<N> {
    async fn send(
        &self,
        recipient: &User,
        message: &str,
        case_id: Option<CaseId>,
    ) -> Result<(), NotifyError> {
        match tokio::time::timeout(self.timeout, self.inner.send(recipient, message, case_id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(NotifyError::Timeout(self.timeout.as_secs())),
        }
    }
}

/// One message captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// The recipient.
    pub recipient: UserId,
    /// The rendered message.
    pub message: String,
    /// The case the message was about.
    pub case_id: Option<CaseId>,
}

/// Test notifier that records every send and can fail on demand.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    failing: Mutex<BTreeSet<UserId>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to `recipient` fail.
    pub fn fail_for(&self, recipient: UserId) {
        self.failing
            .lock()
            .expect("failing lock poisoned")
            .insert(recipient);
    }

    /// Everything sent so far, in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("sent lock poisoned").clone()
    }

    /// Recipients of everything sent so far.
    #[must_use]
    pub fn recipients(&self) -> Vec<UserId> {
        self.sent().into_iter().map(|m| m.recipient).collect()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        recipient: &User,
        message: &str,
        case_id: Option<CaseId>,
    ) -> Result<(), NotifyError> {
        if self
            .failing
            .lock()
            .expect("failing lock poisoned")
            .contains(&recipient.id)
        {
            return Err(NotifyError::Delivery(format!(
                "injected failure for {}",
                recipient.id
            )));
        }
        self.sent
            .lock()
            .expect("sent lock poisoned")
            .push(SentMessage {
                recipient: recipient.id,
                message: message.to_string(),
                case_id,
            });
        Ok(())
    }
}
