//! Gesture report output
//!
//! Types serialized by trace replay and the CLI: each recognized gesture with
//! its source and detection time, wrapped in a report that carries producer
//! metadata for provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GestureError;
use crate::types::{GestureEvent, PointerSource};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "gesture.report.v1";

/// Producer metadata embedded in every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    /// Unique engine instance identifier
    pub instance_id: String,
}

impl Producer {
    pub fn new(instance_id: String) -> Self {
        Self {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id,
        }
    }
}

/// One gesture recognized during replay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognizedGesture {
    pub gesture: GestureEvent,
    pub source: PointerSource,
    /// Capture time of the release event that completed the gesture
    pub detected_at: DateTime<Utc>,
}

/// A full replay report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureReport {
    pub schema_version: String,
    pub producer: Producer,
    pub gestures: Vec<RecognizedGesture>,
}

impl GestureReport {
    pub fn new(producer: Producer, gestures: Vec<RecognizedGesture>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            producer,
            gestures,
        }
    }

    pub fn to_json(&self) -> Result<String, GestureError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, GestureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_round_trip() {
        let report = GestureReport::new(
            Producer::new("instance-1".to_string()),
            vec![RecognizedGesture {
                gesture: GestureEvent::SwipeRight,
                source: PointerSource::Touch,
                detected_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            }],
        );

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema_version"], REPORT_SCHEMA_VERSION);
        assert_eq!(value["producer"]["name"], PRODUCER_NAME);
        assert_eq!(value["gestures"][0]["gesture"], "swipe_right");
        assert_eq!(value["gestures"][0]["source"], "touch");
    }
}
