//! Fixed-interval polling until a job reaches a terminal status.
//!
//! [`poll_until_terminal`] checks once immediately and then once per
//! [`PollConfig::interval`]. Each check is awaited before the next tick
//! is taken, so a poller never has more than one request in flight and
//! slow responses delay the schedule instead of piling up.
//!
//! Polling stops on the first check error, mirroring the callback form
//! of the checker which never calls back on failure.

use std::time::Duration;

use jobwatch_core::JobId;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::checker::{CheckError, JobChecker, JobReport};
use crate::config::PollConfig;
use crate::notify::Notifier;

/// Shortest interval accepted by the loop; `tokio::time::interval`
/// rejects a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Why polling stopped without a terminal status.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("Polling cancelled")]
    Cancelled,
}

/// Advance the attempt counter. Saturates so an unbounded poll never
/// overflows.
pub fn next_attempt(attempt: u64) -> u64 {
    attempt.saturating_add(1)
}

/// Poll `job_id` until it is failed or succeeded.
///
/// Returns the terminal [`JobReport`], [`PollError::Check`] after the
/// failure has been passed to the checker's notifier, or
/// [`PollError::Cancelled`] once `cancel` fires (an in-flight request is
/// abandoned).
pub async fn poll_until_terminal<N: Notifier>(
    checker: &JobChecker<N>,
    job_id: &JobId,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> Result<JobReport, PollError> {
    let mut ticker = tokio::time::interval(config.interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut attempt = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(job_id = %job_id, attempt, "Polling cancelled");
                return Err(PollError::Cancelled);
            }
            _ = ticker.tick() => {}
        }

        attempt = next_attempt(attempt);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(job_id = %job_id, attempt, "Polling cancelled mid-request");
                return Err(PollError::Cancelled);
            }
            result = checker.report(job_id) => result,
        };

        match result {
            Ok(report) if report.status.is_terminal() => {
                tracing::info!(
                    job_id = %job_id,
                    attempt,
                    status = report.status.name(),
                    "Job reached terminal status",
                );
                return Ok(report);
            }
            Ok(report) => {
                tracing::debug!(
                    job_id = %job_id,
                    attempt,
                    status = %report.status,
                    "Job not finished yet",
                );
            }
            Err(e) => {
                checker.surface(job_id, &e);
                return Err(e.into());
            }
        }
    }
}
