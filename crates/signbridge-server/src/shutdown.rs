//! Stop signal shared by the listener and every open session.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// How a drain finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every task exited on its own.
    Drained,
    /// The timeout hit and `aborted` tasks were cancelled forcibly.
    TimedOut {
        /// Tasks still running when the timeout expired.
        aborted: usize,
    },
}

/// One-shot stop signal. Clones observe the same signal.
#[derive(Clone, Debug, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// A coordinator that has not fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `select!` loops and `with_graceful_shutdown`.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Fire the signal. Idempotent.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Whether the signal has fired.
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Fire the signal and give `tasks` up to `timeout` (10 s when `None`)
    /// to exit before aborting the rest.
    pub async fn graceful_shutdown(
        &self,
        tasks: Vec<JoinHandle<()>>,
        timeout: Option<Duration>,
    ) -> DrainOutcome {
        let timeout = timeout.unwrap_or(DEFAULT_DRAIN_TIMEOUT);
        self.shutdown();
        info!(tasks = tasks.len(), ?timeout, "draining");

        let aborts: Vec<_> = tasks.iter().map(JoinHandle::abort_handle).collect();
        if tokio::time::timeout(timeout, futures::future::join_all(tasks))
            .await
            .is_ok()
        {
            return DrainOutcome::Drained;
        }

        let mut aborted = 0;
        for handle in aborts.iter().filter(|h| !h.is_finished()) {
            handle.abort();
            aborted += 1;
        }
        warn!(aborted, "drain timed out");
        DrainOutcome::TimedOut { aborted }
    }
}
