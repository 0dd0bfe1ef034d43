//! Caller-supplied cancellation and deadline for store access.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{CancelReason, RepoError};

/// Cancellation scope for one unit of work (usually one HTTP request).
///
/// Cloning shares the same token and deadline.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl QueryContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Attach an external cancellation token. The context is cancelled when
    /// the token (or any of its parents) is.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Drive `op` to completion unless the context is cancelled or its
    /// deadline passes first. The losing store future is dropped, which
    /// aborts the in-flight statement.
    pub async fn run<T, F>(&self, op: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(RepoError::Cancelled(CancelReason::Cancelled));
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(RepoError::Cancelled(CancelReason::Cancelled)),
            () = deadline => Err(RepoError::Cancelled(CancelReason::DeadlineExceeded)),
            res = op => res,
        }
    }
}
