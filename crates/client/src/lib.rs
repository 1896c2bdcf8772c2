//! HTTP client for a job-status backend.
//!
//! Fetches `GET /check/{job_id}`, maps the JSON `status` field onto a
//! [`JobStatus`](jobwatch_core::JobStatus), and optionally polls until
//! the job finishes. Failures are surfaced through a pluggable
//! [`Notifier`](notify::Notifier).

pub mod api;
pub mod checker;
pub mod config;
pub mod notify;
pub mod poll;

pub use api::{FetchError, StatusApi, StatusResponse};
pub use checker::{CheckError, JobChecker, JobReport};
pub use config::{ClientConfig, ConfigError, PollConfig};
pub use notify::{LogNotifier, Notifier};
pub use poll::{poll_until_terminal, PollError};
