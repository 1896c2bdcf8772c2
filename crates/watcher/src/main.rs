//! `jobwatch-watcher` -- polls one job until it finishes.
//!
//! Checks `GET {base_url}/check/{job_id}` on a fixed interval and exits
//! once the backend reports a terminal status. Ctrl-C stops polling.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                          |
//! |------------------------|----------|-------------------------|--------------------------------------|
//! | `JOB_ID`               | yes      | --                      | Job to watch                         |
//! | `JOBWATCH_BASE_URL`    | no       | `http://localhost:8080` | Backend origin                       |
//! | `JOBWATCH_CHECK_PREFIX`| no       | `/check/`               | Path prefix before the job id        |
//! | `REQUEST_TIMEOUT_SECS` | no       | unset                   | Per-request timeout, `0` disables    |
//! | `POLL_INTERVAL_MS`     | no       | `1000`                  | Milliseconds between checks          |
//!
//! # Exit codes
//!
//! `0` job succeeded, `1` job failed, `2` polling stopped early.

use std::process::ExitCode;

use jobwatch_client::{
    poll_until_terminal, ClientConfig, JobChecker, PollConfig, PollError, StatusApi,
};
use jobwatch_core::{JobId, JobStatus};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_SUCCEEDED: u8 = 0;
const EXIT_FAILED: u8 = 1;
const EXIT_ABORTED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Ok(job_id) = std::env::var("JOB_ID").map(JobId::new) else {
        tracing::error!("JOB_ID environment variable is required");
        return ExitCode::from(EXIT_ABORTED);
    };

    let (client_config, poll_config) = match (ClientConfig::from_env(), PollConfig::from_env()) {
        (Ok(client), Ok(poll)) => (client, poll),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::from(EXIT_ABORTED);
        }
    };

    let api = match StatusApi::new(&client_config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::from(EXIT_ABORTED);
        }
    };

    tracing::info!(
        job_id = %job_id,
        url = %api.check_url(&job_id),
        interval_ms = poll_config.interval.as_millis() as u64,
        "Starting jobwatch-watcher",
    );

    let checker = JobChecker::with_logging(api);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping");
            ctrl_c.cancel();
        }
    });

    match poll_until_terminal(&checker, &job_id, &poll_config, &cancel).await {
        Ok(report) if report.status == JobStatus::Succeeded => {
            tracing::info!(
                job_id = %job_id,
                image_url = report.image_url.as_deref().unwrap_or("-"),
                "Job succeeded",
            );
            ExitCode::from(EXIT_SUCCEEDED)
        }
        Ok(report) => {
            tracing::warn!(job_id = %job_id, status = %report.status, "Job failed");
            ExitCode::from(EXIT_FAILED)
        }
        Err(PollError::Cancelled) => ExitCode::from(EXIT_ABORTED),
        // Already reported through the checker's notifier.
        Err(PollError::Check(_)) => ExitCode::from(EXIT_ABORTED),
    }
}
