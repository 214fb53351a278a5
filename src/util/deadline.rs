use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::model::error::TerminateError;

/// Expiry and cancellation shared by every provider call of one run.
#[derive(Clone, Debug)]
pub struct Deadline {
    expires_at: Option<Instant>,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct Canceller {
    token: CancellationToken,
}

impl Canceller {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Deadline {
    /// `None` or a zero timeout means no expiry.
    pub fn new(timeout: Option<Duration>) -> (Self, Canceller) {
        let token = CancellationToken::new();
        let expires_at = timeout
            .filter(|t| !t.is_zero())
            .map(|t| Instant::now() + t);

        (
            Self {
                expires_at,
                token: token.clone(),
            },
            Canceller { token },
        )
    }

    /// Never expires and cannot be cancelled.
    #[cfg(test)]
    pub fn unbounded() -> Self {
        Self::new(None).0
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn check(&self) -> Result<(), TerminateError> {
        if self.is_cancelled() {
            return Err(TerminateError::Cancelled);
        }

        match self.expires_at {
            Some(at) if Instant::now() >= at => Err(TerminateError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Resolves at expiry. Pends forever without one.
    pub async fn expired(&self) {
        match self.expires_at() {
            Some(at) => tokio::time::sleep_until(at).await,
            None => futures::future::pending::<()>().await,
        }
    }
}
