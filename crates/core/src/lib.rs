//! Shared domain types for jobwatch.
//!
//! Holds the job identifier and the tri-state job status reported by
//! the job-status backend. No I/O lives here; the HTTP client is in
//! `jobwatch-client`.

pub mod job_status;
pub mod types;

pub use job_status::JobStatus;
pub use types::JobId;
