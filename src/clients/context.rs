//! Per-call deadline and cancellation.
//!
//! Every API operation takes a [`Context`]. The transport races each of its
//! suspension points (rate-limit wait, network I/O, backoff sleep) against
//! [`Context::done`], so a cancelled or expired context stops the call
//! without further attempts.
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::Context;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (ctx, handle) = Context::with_timeout(Duration::from_secs(30)).with_cancel();
//! assert!(ctx.err().is_none());
//!
//! handle.cancel();
//! assert!(ctx.err().is_some());
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{select_all, BoxFuture, FutureExt};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::clients::errors::Error;

/// Why a context finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The context deadline passed.
    DeadlineExceeded,
    /// A [`CancelHandle`] was triggered.
    Cancelled,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadlineExceeded => f.write_str("context deadline exceeded"),
            Self::Cancelled => f.write_str("context canceled"),
        }
    }
}

/// Deadline and cancellation carried through a single API call.
///
/// Contexts are cheap to clone. Deriving a context never loosens it: a
/// child keeps every cancellation handle of its parent and the earlier of
/// the two deadlines.
#[derive(Clone, Debug, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancellations: Vec<watch::Receiver<bool>>,
}

impl Context {
    /// A context that is never done.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().with_deadline(Instant::now() + timeout)
    }

    /// Returns a child context that expires at `deadline` or at the
    /// current deadline, whichever comes first.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |current| current.min(deadline)));
        self
    }

    /// Returns a child context plus a handle that cancels it.
    #[must_use]
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancellations.push(receiver);
        (
            self,
            CancelHandle {
                sender: Arc::new(sender),
            },
        )
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns why the context is done, or `None` while it is still live.
    #[must_use]
    pub fn err(&self) -> Option<CancelReason> {
        if self.cancellations.iter().any(|rx| *rx.borrow()) {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Completes once the context is done.
    ///
    /// Never completes for a background context.
    pub async fn done(&self) -> CancelReason {
        if let Some(reason) = self.err() {
            return reason;
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => futures::future::pending::<()>().await,
            }
        };

        tokio::select! {
            () = deadline => CancelReason::DeadlineExceeded,
            () = Self::any_cancelled(&self.cancellations) => CancelReason::Cancelled,
        }
    }

    /// Runs `fut` to completion unless the context finishes first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the context is done before `fut`
    /// completes. `fut` is dropped in that case.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Error> {
        if let Some(reason) = self.err() {
            return Err(Error::Cancelled(reason));
        }
        tokio::select! {
            biased;
            reason = self.done() => Err(Error::Cancelled(reason)),
            output = fut => Ok(output),
        }
    }

    async fn any_cancelled(cancellations: &[watch::Receiver<bool>]) {
        if cancellations.is_empty() {
            return futures::future::pending().await;
        }

        let waits: Vec<BoxFuture<'_, ()>> = cancellations
            .iter()
            .map(|rx| {
                let mut rx = rx.clone();
                async move {
                    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    // A dropped handle can no longer cancel.
                    if closed {
                        futures::future::pending::<()>().await;
                    }
                }
                .boxed()
            })
            .collect();

        select_all(waits).await;
    }
}

/// Cancels the [`Context`] it was created with, and every context derived
/// from it.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancels the associated context. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}
