use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("WAQI not available : {0}")]
    Unavailable(String),

    #[error("WAQI data not well formed")]
    NotWellFormed(Value),

    #[error("WAQI internal API Error")]
    Api(Value),

    #[error("WAQI's response incomplete")]
    Incomplete(Value),

    #[error("WAQI response malformed : {reason}")]
    Malformed { reason: String, payload: Value },
}

impl FetchError {
    pub fn payload(&self) -> Option<&Value> {
        match self {
            FetchError::Unavailable(_) => None,
            FetchError::NotWellFormed(payload)
            | FetchError::Api(payload)
            | FetchError::Incomplete(payload)
            | FetchError::Malformed { payload, .. } => Some(payload),
        }
    }

    /// Flattens the error into the report published on the error topic.
    pub fn into_report(self, time: i64) -> FailureReport {
        let message = self.to_string();
        let data = self.payload().cloned();

        FailureReport {
            time,
            message,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub time: i64,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unavailable_report_has_no_data() {
        let report = FetchError::Unavailable("dns error".to_string()).into_report(1700000000);

        assert_eq!(report.message, "WAQI not available : dns error");
        assert_eq!(report.data, None);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"time": 1700000000, "message": "WAQI not available : dns error"})
        );
    }

    #[test]
    fn api_report_carries_payload() {
        let payload = json!({"status": "error", "data": "Invalid key"});
        let report = FetchError::Api(payload.clone()).into_report(42);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"time": 42, "message": "WAQI internal API Error", "data": payload})
        );
    }

    #[test]
    fn malformed_message_includes_reason() {
        let err = FetchError::Malformed {
            reason: "missing data.iaqi".to_string(),
            payload: json!({"status": "ok"}),
        };

        assert_eq!(err.payload(), Some(&json!({"status": "ok"})));
        assert_eq!(
            err.into_report(0).message,
            "WAQI response malformed : missing data.iaqi"
        );
    }
}
