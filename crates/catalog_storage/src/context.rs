//! Execution context carried by every store call.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why an operation stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// The context was cancelled.
    Canceled,
    /// The context's deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled => f.write_str("cancelled"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// A deadline plus a cancellation signal.
///
/// Cloning shares the cancellation signal. Derived contexts
/// ([`Context::with_timeout`], [`Context::child`]) are cancelled together
/// with their parent but can also be cancelled on their own, and never
/// outlive the parent's deadline.
#[derive(Debug, Clone)]
pub struct Context {
    deadline: Option<Instant>,
    token: CancellationToken,
}

impl Context {
    /// A context with no deadline that is never cancelled unless asked to.
    #[must_use]
    pub fn background() -> Self {
        Self {
            deadline: None,
            token: CancellationToken::new(),
        }
    }

    /// A child context that is also cancelled when this one is.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            deadline: self.deadline,
            token: self.token.child_token(),
        }
    }

    /// A child context whose deadline is at most `timeout` from now.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// A child context whose deadline is at most `deadline`.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        };
        Self {
            deadline: Some(deadline),
            token: self.token.child_token(),
        }
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the context is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The deadline, if one is set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.token.is_cancelled() {
            return Err(Interrupted::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Interrupted::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drives `fut` to completion unless the context is cancelled or its
    /// deadline passes first, in which case `fut` is dropped.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        self.check()?;
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Interrupted::Canceled),
            () = deadline => Err(Interrupted::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_runs_to_completion() {
        let ctx = Context::background();
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn cancelled_context_refuses_work() {
        let ctx = Context::background();
        ctx.cancel();
        assert_eq!(ctx.check(), Err(Interrupted::Canceled));
        assert_eq!(ctx.run(async { 7 }).await, Err(Interrupted::Canceled));
    }

    #[tokio::test]
    async fn deadline_interrupts_pending_work() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        let out = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(out, Err(Interrupted::DeadlineExceeded));
    }

    #[tokio::test]
    async fn cancel_propagates_to_children_only_downwards() {
        let parent = Context::background();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());

        let other = parent.with_timeout(Duration::from_secs(60));
        parent.cancel();
        assert!(other.is_cancelled());
    }

    #[tokio::test]
    async fn child_deadline_never_extends_parent() {
        let parent = Context::background().with_timeout(Duration::from_millis(5));
        let child = parent.with_timeout(Duration::from_secs(60));
        assert_eq!(child.deadline(), parent.deadline());
    }
}
