use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Response of the `info` call: engine versions and assessment capacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub engine_version: Option<String>,
    pub criteria_version: Option<String>,
    pub max_assessments: Option<i64>,
    pub current_assessments: Option<i64>,
    /// Milliseconds to wait between starting new assessments.
    pub new_assessment_cool_off: Option<i64>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the `getStatusCodes` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCodes {
    #[serde(default)]
    pub status_details: BTreeMap<String, String>,
}

impl StatusCodes {
    /// Human readable text for a `statusDetails` code such as `TESTING_HEARTBLEED`.
    pub fn describe(&self, code: &str) -> Option<&str> {
        self.status_details.get(code).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_keeps_unknown_fields() {
        let info: Info = serde_json::from_value(json!({
            "engineVersion": "1.24.4",
            "criteriaVersion": "2009l",
            "maxAssessments": 25,
            "currentAssessments": 0,
            "newAssessmentCoolOff": 1000,
            "messages": ["This assessment service is provided free of charge"],
            "clientMaxAssessments": 25
        }))
        .unwrap();
        assert_eq!(info.engine_version.as_deref(), Some("1.24.4"));
        assert_eq!(info.new_assessment_cool_off, Some(1000));
        assert_eq!(info.messages.len(), 1);
        assert_eq!(info.extra.get("clientMaxAssessments"), Some(&json!(25)));
    }

    #[test]
    fn status_codes_lookup() {
        let codes: StatusCodes = serde_json::from_value(json!({
            "statusDetails": {
                "TESTING_HEARTBLEED": "Testing Heartbleed",
                "TESTING_PROTOCOL_INTOLERANCE_399": "Testing Protocol Intolerance (TLS 1.152)"
            }
        }))
        .unwrap();
        assert_eq!(codes.describe("TESTING_HEARTBLEED"), Some("Testing Heartbleed"));
        assert_eq!(codes.describe("NOPE"), None);
    }
}
