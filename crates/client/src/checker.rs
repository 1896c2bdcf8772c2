//! Job status checker.
//!
//! [`JobChecker`] turns the raw check-endpoint response into a
//! [`JobStatus`]. It offers two surfaces:
//!
//! * [`JobChecker::check`] / [`JobChecker::report`] return a `Result`.
//! * [`JobChecker::check_job`] takes a completion callback. The callback
//!   runs exactly once on success; on failure it is never invoked and the
//!   error goes to the injected [`Notifier`] instead.

use jobwatch_core::{JobId, JobStatus};

use crate::api::{FetchError, StatusApi};
use crate::notify::{LogNotifier, Notifier};

/// Leading text of every alert raised by the checker.
pub const ALERT_PREFIX: &str = "Error retrieving status.";

/// Outcome of a successful check.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub job_id: JobId,
    pub status: JobStatus,
    /// Present once the backend has an artifact for the job.
    pub image_url: Option<String>,
}

/// Errors from a single status check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// HTTP 200, but `status` was missing or `null`.
    #[error("Response did not contain a status")]
    MissingStatus,
}

impl CheckError {
    /// Message shown to the user when this error is surfaced.
    pub fn alert_message(&self) -> String {
        match self {
            Self::MissingStatus => ALERT_PREFIX.to_string(),
            Self::Fetch(e) => format!("{ALERT_PREFIX} {e}"),
        }
    }

    /// HTTP status code behind the failure, if the backend answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.http_status(),
            Self::MissingStatus => None,
        }
    }
}

/// Checks job status against one backend and reports failures through
/// a [`Notifier`].
pub struct JobChecker<N = LogNotifier> {
    api: StatusApi,
    notifier: N,
}

impl JobChecker<LogNotifier> {
    /// Checker that logs alerts via `tracing`.
    pub fn with_logging(api: StatusApi) -> Self {
        Self::new(api, LogNotifier)
    }
}

impl<N: Notifier> JobChecker<N> {
    pub fn new(api: StatusApi, notifier: N) -> Self {
        Self { api, notifier }
    }

    pub fn api(&self) -> &StatusApi {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Fetch the job's status plus any artifact URL.
    pub async fn report(&self, job_id: &JobId) -> Result<JobReport, CheckError> {
        let response = self.api.get_status(job_id).await?;
        let status = response.status.ok_or(CheckError::MissingStatus)?;

        tracing::debug!(job_id = %job_id, status = %status, "Job status received");

        Ok(JobReport {
            job_id: job_id.clone(),
            status,
            image_url: response.image_url,
        })
    }

    /// Fetch the job's status.
    pub async fn check(&self, job_id: &JobId) -> Result<JobStatus, CheckError> {
        Ok(self.report(job_id).await?.status)
    }

    /// Check a job and hand the status to `on_complete`.
    ///
    /// `on_complete` is called exactly once if the backend returned a
    /// status. Otherwise it is dropped uncalled and the error is passed
    /// to the notifier.
    pub async fn check_job<F>(&self, job_id: &JobId, on_complete: F)
    where
        F: FnOnce(JobStatus),
    {
        match self.check(job_id).await {
            Ok(status) => on_complete(status),
            Err(e) => self.surface(job_id, &e),
        }
    }

    /// Log `error` and forward its alert text to the notifier.
    pub(crate) fn surface(&self, job_id: &JobId, error: &CheckError) {
        tracing::warn!(
            job_id = %job_id,
            http_status = ?error.http_status(),
            error = %error,
            "Job status check failed",
        );
        self.notifier.alert(&error.alert_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_alert_is_generic() {
        assert_eq!(
            CheckError::MissingStatus.alert_message(),
            "Error retrieving status."
        );
    }

    #[test]
    fn http_status_alert_includes_code() {
        let err = CheckError::from(FetchError::Status {
            status: 503,
            body: String::new(),
        });
        assert_eq!(
            err.alert_message(),
            "Error retrieving status. Error code: 503"
        );
    }

    #[test]
    fn http_status_is_exposed_for_backend_answers_only() {
        let rejected = CheckError::from(FetchError::Status {
            status: 404,
            body: String::new(),
        });
        assert_eq!(rejected.http_status(), Some(404));
        assert_eq!(CheckError::MissingStatus.http_status(), None);
    }

    #[test]
    fn decode_alert_is_marked_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = CheckError::from(FetchError::from(json_err));
        assert!(err
            .alert_message()
            .starts_with("Error retrieving status. Malformed response:"));
    }
}
