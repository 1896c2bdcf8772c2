use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a backend job.
///
/// The value is taken as-is from the caller and appended to the check
/// URL without validation or escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_id() {
        assert_eq!(JobId::new("abc123").to_string(), "abc123");
    }

    #[test]
    fn ids_are_not_normalised() {
        let id = JobId::from(" a/b?c ");
        assert_eq!(id.as_str(), " a/b?c ");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&JobId::new("xyz")).unwrap();
        assert_eq!(json, "\"xyz\"");
    }
}
