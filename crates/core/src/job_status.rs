//! Job status codes reported by the `/check/{job_id}` endpoint.
//!
//! The backend normally sends a bare integer in the `status` field. The
//! three well-known values are exposed as constants; any other integer
//! is carried through as [`JobStatus::Unknown`], and any other non-null
//! JSON value as [`JobStatus::Other`]. Nothing non-null is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The job finished with an error.
pub const STATUS_FAILED: i64 = 0;

/// The job finished and its output is available.
pub const STATUS_SUCCEEDED: i64 = 1;

/// The job is still queued or running.
pub const STATUS_WAITING: i64 = 2;

/// Tri-state job status, plus passthroughs for anything else the
/// backend sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum JobStatus {
    Failed,
    Succeeded,
    Waiting,
    /// An integral code outside the known set, kept verbatim.
    Unknown(i64),
    /// A non-integral value (string, bool, fraction, object...), kept verbatim.
    Other(Value),
}

impl JobStatus {
    /// Map a raw status code onto a [`JobStatus`].
    pub fn from_code(code: i64) -> Self {
        match code {
            STATUS_FAILED => Self::Failed,
            STATUS_SUCCEEDED => Self::Succeeded,
            STATUS_WAITING => Self::Waiting,
            other => Self::Unknown(other),
        }
    }

    /// Map any JSON value onto a [`JobStatus`].
    ///
    /// Integral numbers, `1.0` included, go through [`from_code`](Self::from_code);
    /// everything else lands in [`JobStatus::Other`].
    pub fn from_value(value: Value) -> Self {
        match integral_code(&value) {
            Some(code) => Self::from_code(code),
            None => Self::Other(value),
        }
    }

    /// The integer code, or `None` for [`JobStatus::Other`].
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Failed => Some(STATUS_FAILED),
            Self::Succeeded => Some(STATUS_SUCCEEDED),
            Self::Waiting => Some(STATUS_WAITING),
            Self::Unknown(code) => Some(*code),
            Self::Other(_) => None,
        }
    }

    /// Whether the job has reached a final state. Polling stops here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Succeeded)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Succeeded => "succeeded",
            Self::Waiting => "waiting",
            Self::Unknown(_) | Self::Other(_) => "unknown",
        }
    }
}

fn integral_code(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(code) = n.as_i64() {
        return Some(code);
    }
    let f = n.as_f64()?;
    // Exclusive upper bound: i64::MAX is not representable as f64.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(value) => write!(f, "{value}"),
            other => match other.code() {
                Some(code) => write!(f, "{code}"),
                None => f.write_str(other.name()),
            },
        }
    }
}

impl From<i64> for JobStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<Value> for JobStatus {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<JobStatus> for Value {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(value) => value,
            known => known.code().map(Value::from).unwrap_or(Value::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
