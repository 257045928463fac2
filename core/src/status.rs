use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment status reported in the `status` field of an analyze response.
///
/// Values the service may add in the future decode to [`AnalysisStatus::Other`]
/// and are treated as terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    Dns,
    InProgress,
    Ready,
    Error,
    Other(String),
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AnalysisStatus::Dns => "DNS",
            AnalysisStatus::InProgress => "IN_PROGRESS",
            AnalysisStatus::Ready => "READY",
            AnalysisStatus::Error => "ERROR",
            AnalysisStatus::Other(s) => s,
        }
    }

    /// Anything other than `DNS` and `IN_PROGRESS` ends polling.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnalysisStatus::Dns | AnalysisStatus::InProgress)
    }
}

impl From<String> for AnalysisStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DNS" => AnalysisStatus::Dns,
            "IN_PROGRESS" => AnalysisStatus::InProgress,
            "READY" => AnalysisStatus::Ready,
            "ERROR" => AnalysisStatus::Error,
            _ => AnalysisStatus::Other(s),
        }
    }
}

impl From<&str> for AnalysisStatus {
    fn from(s: &str) -> Self {
        AnalysisStatus::from(s.to_string())
    }
}

impl From<AnalysisStatus> for String {
    fn from(s: AnalysisStatus) -> Self {
        match s {
            AnalysisStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_states_are_not_terminal() {
        assert!(!AnalysisStatus::Dns.is_terminal());
        assert!(!AnalysisStatus::InProgress.is_terminal());
        assert!(AnalysisStatus::Ready.is_terminal());
        assert!(AnalysisStatus::Error.is_terminal());
    }

    #[test]
    fn unknown_status_is_kept_and_terminal() {
        let s: AnalysisStatus = serde_json::from_str("\"QUEUED_FOREVER\"").unwrap();
        assert_eq!(s, AnalysisStatus::Other("QUEUED_FOREVER".into()));
        assert!(s.is_terminal());
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"QUEUED_FOREVER\"");
    }

    #[test]
    fn known_status_serializes_as_wire_name() {
        let s: AnalysisStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(s, AnalysisStatus::InProgress);
        assert_eq!(s.to_string(), "IN_PROGRESS");
    }
}
