//! pointer.trace_event.v1 schema definition
//!
//! A small schema for captured pointer event streams, so traces recorded by
//! an input-capture layer can be replayed through the engine offline:
//! - press/release events for touch and mouse streams
//! - RFC3339 timestamps, converted to engine milliseconds on replay
//! - NDJSON (one event per line) and JSON-array forms
//!
//! The capture layer owns coordinate units and timestamp monotonicity; the
//! adapter checks both before a trace reaches the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GestureError;
use crate::types::PointerSource;

/// Current trace schema version
pub const TRACE_SCHEMA_VERSION: &str = "pointer.trace_event.v1";

/// Phase of a pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Press / touch-start
    Down,
    /// Release / touch-end
    Up,
}

/// One captured pointer event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Schema version; defaults to [`TRACE_SCHEMA_VERSION`] when omitted
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// When the event was captured (RFC3339)
    pub timestamp: DateTime<Utc>,
    /// Input modality
    pub source: PointerSource,
    /// Press or release
    pub phase: PointerPhase,
    /// Horizontal position (px)
    pub x: f64,
    /// Vertical position (px)
    pub y: f64,
}

fn default_schema_version() -> String {
    TRACE_SCHEMA_VERSION.to_string()
}

impl TraceEvent {
    /// Validate a single event against the schema.
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.schema_version != TRACE_SCHEMA_VERSION {
            return Err(GestureError::ParseError(format!(
                "unsupported schema version '{}', expected '{}'",
                self.schema_version, TRACE_SCHEMA_VERSION
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GestureError::NonFiniteCoordinate(format!(
                "x={}, y={} at {}",
                self.x, self.y, self.timestamp
            )));
        }
        Ok(())
    }

    /// Event time in engine milliseconds.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// A validation failure for one event in a trace
#[derive(Debug)]
pub struct InvalidTraceEvent {
    /// Position of the event in the input
    pub index: usize,
    pub error: GestureError,
}

/// Parses and validates captured pointer traces
pub struct TraceAdapter;

impl TraceAdapter {
    /// Parse newline-delimited JSON, one trace event per line.
    ///
    /// Blank lines are skipped.
    pub fn parse_ndjson(input: &str) -> Result<Vec<TraceEvent>, GestureError> {
        let mut events = Vec::new();
        for (line_no, line) in input.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event: TraceEvent = serde_json::from_str(trimmed).map_err(|e| {
                GestureError::ParseError(format!("line {}: {}", line_no + 1, e))
            })?;
            events.push(event);
        }
        Ok(events)
    }

    /// Parse a JSON array of trace events.
    pub fn parse_array(input: &str) -> Result<Vec<TraceEvent>, GestureError> {
        let events: Vec<TraceEvent> = serde_json::from_str(input)?;
        Ok(events)
    }

    /// Validate every event, returning the failures with their positions.
    pub fn validate_events(events: &[TraceEvent]) -> Vec<InvalidTraceEvent> {
        events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| {
                event
                    .validate()
                    .err()
                    .map(|error| InvalidTraceEvent { index, error })
            })
            .collect()
    }

    /// Check that timestamps never go backwards.
    ///
    /// Delivery order is the engine's ordering precondition, so a trace whose
    /// timestamps regress was captured wrong and is rejected as a whole.
    pub fn check_order(events: &[TraceEvent]) -> Result<(), GestureError> {
        for (index, pair) in events.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(GestureError::OutOfOrder(format!(
                    "event {} at {} precedes event {} at {}",
                    index + 1,
                    pair[1].timestamp,
                    index,
                    pair[0].timestamp
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_ndjson() -> &'static str {
        concat!(
            "{\"timestamp\":\"2024-03-01T10:00:00.000Z\",\"source\":\"touch\",\"phase\":\"down\",\"x\":100.0,\"y\":100.0}\n",
            "\n",
            "{\"timestamp\":\"2024-03-01T10:00:00.120Z\",\"source\":\"touch\",\"phase\":\"up\",\"x\":160.0,\"y\":102.0}\n",
        )
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let events = TraceAdapter::parse_ndjson(sample_ndjson()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].phase, PointerPhase::Down);
        assert_eq!(events[0].schema_version, TRACE_SCHEMA_VERSION);
        assert_eq!(events[1].timestamp_ms() - events[0].timestamp_ms(), 120);
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"timestamp": "2024-03-01T10:00:00Z", "source": "mouse", "phase": "down", "x": 0, "y": 0},
            {"timestamp": "2024-03-01T10:00:01Z", "source": "mouse", "phase": "up", "x": 150, "y": 10}
        ]"#;
        let events = TraceAdapter::parse_array(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].source, PointerSource::Mouse);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = TraceAdapter::parse_ndjson("not json\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_unknown_source_rejected() {
        let json = r#"{"timestamp": "2024-03-01T10:00:00Z", "source": "pen", "phase": "down", "x": 0, "y": 0}"#;
        assert!(TraceAdapter::parse_ndjson(json).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_coordinates() {
        let mut events = TraceAdapter::parse_ndjson(sample_ndjson()).unwrap();
        events[1].x = f64::NAN;

        let failures = TraceAdapter::validate_events(&events);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 1);
        assert!(matches!(
            failures[0].error,
            GestureError::NonFiniteCoordinate(_)
        ));
    }

    #[test]
    fn test_validate_rejects_foreign_schema_version() {
        let mut events = TraceAdapter::parse_ndjson(sample_ndjson()).unwrap();
        events[0].schema_version = "pointer.trace_event.v2".to_string();
        assert!(events[0].validate().is_err());
    }

    #[test]
    fn test_check_order() {
        let mut events = TraceAdapter::parse_ndjson(sample_ndjson()).unwrap();
        assert!(TraceAdapter::check_order(&events).is_ok());

        events.swap(0, 1);
        assert!(matches!(
            TraceAdapter::check_order(&events),
            Err(GestureError::OutOfOrder(_))
        ));
    }
}
