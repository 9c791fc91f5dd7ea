//! Response shapes served by the HTTP gateway

use serde::{Deserialize, Serialize};

/// Lowest, average and highest temperature over a date window.
///
/// The key names are part of the public wire format and are kept exactly as
/// existing clients expect them, misspellings included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    /// Minimum observation, in the storage type reported by the store
    #[serde(rename = "Lowest Temperature")]
    pub lowest: serde_json::Value,

    /// Mean observation rounded to two decimal places
    #[serde(rename = "Average Temperatue")]
    pub average: Option<f64>,

    /// Maximum observation, in the storage type reported by the store
    #[serde(rename = "Higest Temperature")]
    pub highest: serde_json::Value,
}

impl TemperatureSummary {
    /// Returns true if no aggregate value is present
    pub fn is_empty(&self) -> bool {
        self.lowest.is_null() && self.average.is_none() && self.highest.is_null()
    }
}

/// Error body returned when a request fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-safe error message
    pub error: String,
}

impl ErrorResponse {
    /// Create an error response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_wire_keys() {
        let summary = TemperatureSummary {
            lowest: json!(75),
            average: Some(75.0),
            highest: json!(75),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "Lowest Temperature": 75,
                "Average Temperatue": 75.0,
                "Higest Temperature": 75
            })
        );
    }

    #[test]
    fn test_empty_summary_serializes_nulls() {
        let summary = TemperatureSummary {
            lowest: serde_json::Value::Null,
            average: None,
            highest: serde_json::Value::Null,
        };
        assert!(summary.is_empty());
        let text = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            text,
            r#"{"Lowest Temperature":null,"Average Temperatue":null,"Higest Temperature":null}"#
        );
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("Database connection error");
        let text = serde_json::to_string(&response).unwrap();
        assert_eq!(text, r#"{"error":"Database connection error"}"#);
    }
}
