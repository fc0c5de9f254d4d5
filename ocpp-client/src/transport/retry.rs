use tokio_util::sync::CancellationToken;

use super::{OutgoingCall, Transport, TransportError, TransportReply};
use crate::config::RetryPolicy;

/// Resends a call that could not reach the peer. Only connection failures
/// are retried; anything the peer answered, timeouts and cancellation are
/// passed through.
pub struct RetryTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait::async_trait]
impl<T: Transport> Transport for RetryTransport<T> {
    async fn send(
        &self,
        call: OutgoingCall,
        cancel: CancellationToken,
    ) -> Result<TransportReply, TransportError> {
        let mut attempt = 0;
        loop {
            match self.inner.send(call.clone(), cancel.clone()).await {
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "{} {} failed ({e}), retry {attempt}/{} in {:?}",
                        call.action,
                        call.unique_id,
                        self.policy.max_retries,
                        self.policy.retry_delay()
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(TransportError::Canceled),
                        _ = tokio::time::sleep(self.policy.retry_delay()) => {}
                    }
                }
                res => return res,
            }
        }
    }
}
