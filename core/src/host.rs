use crate::details::EndpointDetails;
use crate::status::AnalysisStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// One assessment of a host as returned by `analyze`.
///
/// Snapshots taken while the assessment is still running usually carry
/// endpoints without `details`; only the terminal snapshot is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub port: Option<u16>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub protocol: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub is_public: Option<bool>,
    pub status: AnalysisStatus,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status_message: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub start_time: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub test_time: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub engine_version: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub criteria_version: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub cache_expiry_time: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::vec")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, deserialize_with = "crate::lenient::vec")]
    pub cert_hostnames: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Host {
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn started_at(&self) -> Option<OffsetDateTime> {
        self.start_time.and_then(crate::millis_to_datetime)
    }

    pub fn tested_at(&self) -> Option<OffsetDateTime> {
        self.test_time.and_then(crate::millis_to_datetime)
    }

    /// `(ip address, grade)` for every endpoint that received a grade.
    pub fn grades(&self) -> Vec<(&str, &str)> {
        self.endpoints
            .iter()
            .filter_map(|e| Some((e.ip_address.as_deref()?, e.grade.as_deref()?)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub ip_address: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub server_name: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status_message: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status_details: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status_details_message: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub grade_trust_ignored: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub has_warnings: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub is_exceptional: Option<bool>,
    /// Percent complete, `-1` until the endpoint starts.
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub progress: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub eta: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub delegation: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub details: Option<EndpointDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint {
    pub fn is_ready(&self) -> bool {
        self.status_message.as_deref() == Some("Ready")
    }
}
