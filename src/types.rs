//! Core types for the gesture recognition engine
//!
//! This module defines the data that flows through the engine: raw pointer
//! samples, the input source they came from, the gesture labels the
//! classifier can emit, and the per-source swipe threshold table.

use serde::{Deserialize, Serialize};

/// Maximum displacement (px, per axis) for an interaction to count as a tap
pub const TAP_MAX_DISPLACEMENT: f64 = 10.0;

/// Maximum duration (ms) for an interaction to count as a tap
pub const TAP_MAX_DURATION_MS: i64 = 300;

/// Maximum gap (ms) between two tap candidates to pair into a double tap
pub const DOUBLE_TAP_WINDOW_MS: i64 = 500;

/// Input modality that produced a pointer interaction.
///
/// Sessions are keyed by source: a touch session is never matched against a
/// mouse release and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    Touch,
    Mouse,
}

impl PointerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerSource::Touch => "touch",
            PointerSource::Mouse => "mouse",
        }
    }
}

/// A single pointer reading: position in consistent px units plus a
/// monotonic wall-clock timestamp in milliseconds.
///
/// Captured once at interaction start and once at interaction end; immutable
/// once recorded. The capture layer owns unit consistency and timestamp
/// monotonicity (see [`crate::schema`]); the engine performs no conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: i64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// A recognized gesture.
///
/// Variant tag only: callers needing coordinates must read them off the
/// originating samples before classification, which the engine does not
/// expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    DoubleTap,
}

impl GestureEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureEvent::SwipeLeft => "swipe_left",
            GestureEvent::SwipeRight => "swipe_right",
            GestureEvent::SwipeUp => "swipe_up",
            GestureEvent::SwipeDown => "swipe_down",
            GestureEvent::DoubleTap => "double_tap",
        }
    }

    /// All variants, in dispatch-table order.
    pub const ALL: [GestureEvent; 5] = [
        GestureEvent::SwipeLeft,
        GestureEvent::SwipeRight,
        GestureEvent::SwipeUp,
        GestureEvent::SwipeDown,
        GestureEvent::DoubleTap,
    ];
}

/// Swipe detection thresholds for one input source.
///
/// Touch swipes are short and quick; mouse "swipes" are drag simulations and
/// get a larger distance and a longer time budget. The asymmetry is part of
/// the engine's contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeThresholds {
    /// Minimum displacement (px) on the dominant axis
    pub min_distance: f64,
    /// Maximum press-to-release duration (ms)
    pub max_duration_ms: i64,
}

impl SwipeThresholds {
    pub const TOUCH: SwipeThresholds = SwipeThresholds {
        min_distance: 50.0,
        max_duration_ms: 300,
    };

    pub const MOUSE: SwipeThresholds = SwipeThresholds {
        min_distance: 100.0,
        max_duration_ms: 500,
    };

    /// Threshold table lookup for a source.
    pub fn for_source(source: PointerSource) -> SwipeThresholds {
        match source {
            PointerSource::Touch => SwipeThresholds::TOUCH,
            PointerSource::Mouse => SwipeThresholds::MOUSE,
        }
    }
}
