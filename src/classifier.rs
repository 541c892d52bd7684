//! Gesture classification
//!
//! Given a completed interaction's `(origin, end)` samples and the source
//! that produced them, decide whether it denotes a double tap, a directional
//! swipe, or nothing. The decision is a pure function of the samples, the
//! per-source threshold table, and the classifier's tap history.
//!
//! Classification never fails: an unmatched or ambiguous interaction is a
//! silent no-op, which is the right call for a best-effort input heuristic.

use log::{debug, trace};

use crate::types::{
    GestureEvent, PointerSample, PointerSource, SwipeThresholds, DOUBLE_TAP_WINDOW_MS,
    TAP_MAX_DISPLACEMENT, TAP_MAX_DURATION_MS,
};

/// Classifier for completed pointer interactions.
///
/// Owns the tap-history scalar used for double-tap pairing, so construct one
/// classifier per gesture surface; sharing an instance across surfaces would
/// let taps on one surface pair with taps on another.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    /// Timestamp of the most recent tap candidate, paired or not
    last_tap_ms: Option<i64>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one completed interaction.
    ///
    /// Emits at most one gesture. A tap candidate is only ever evaluated for
    /// double-tap pairing; it never falls through to swipe detection.
    pub fn classify(
        &mut self,
        origin: PointerSample,
        end: PointerSample,
        source: PointerSource,
    ) -> Option<GestureEvent> {
        let dx = end.x - origin.x;
        let dy = end.y - origin.y;
        let dt = end.timestamp_ms - origin.timestamp_ms;

        if is_tap_candidate(dx, dy, dt) {
            return self.pair_double_tap(end.timestamp_ms);
        }

        let gesture = classify_swipe(dx, dy, dt, SwipeThresholds::for_source(source));
        match gesture {
            Some(g) => debug!(
                "{} recognized on {}: dx={dx:.1} dy={dy:.1} dt={dt}ms",
                g.as_str(),
                source.as_str()
            ),
            None => trace!(
                "{} interaction discarded: dx={dx:.1} dy={dy:.1} dt={dt}ms",
                source.as_str()
            ),
        }
        gesture
    }

    /// Pair a tap candidate with the immediately preceding one.
    ///
    /// The new tap unconditionally becomes the reference point, whether or
    /// not it completed a pair. Pairing therefore re-arms immediately: three
    /// taps spaced inside the window emit two double taps.
    fn pair_double_tap(&mut self, now_ms: i64) -> Option<GestureEvent> {
        let paired = self
            .last_tap_ms
            .is_some_and(|last| now_ms - last < DOUBLE_TAP_WINDOW_MS);
        self.last_tap_ms = Some(now_ms);

        if paired {
            debug!("double tap recognized at t={now_ms}ms");
            Some(GestureEvent::DoubleTap)
        } else {
            trace!("unpaired tap at t={now_ms}ms");
            None
        }
    }
}

/// Displacement and duration both below the swipe thresholds.
fn is_tap_candidate(dx: f64, dy: f64, dt: i64) -> bool {
    dx.abs() < TAP_MAX_DISPLACEMENT && dy.abs() < TAP_MAX_DISPLACEMENT && dt < TAP_MAX_DURATION_MS
}

/// Evaluate a non-tap interaction against the swipe thresholds.
///
/// Only the dominant axis is evaluated; the other axis's displacement is
/// ignored entirely, even when it exceeds its own threshold.
fn classify_swipe(dx: f64, dy: f64, dt: i64, thresholds: SwipeThresholds) -> Option<GestureEvent> {
    // A slow drag is not a gesture.
    if dt > thresholds.max_duration_ms {
        return None;
    }

    if dx.abs() > dy.abs() {
        if dx.abs() > thresholds.min_distance {
            if dx > 0.0 {
                Some(GestureEvent::SwipeRight)
            } else {
                Some(GestureEvent::SwipeLeft)
            }
        } else {
            None
        }
    } else if dy.abs() > thresholds.min_distance {
        if dy > 0.0 {
            Some(GestureEvent::SwipeDown)
        } else {
            Some(GestureEvent::SwipeUp)
        }
    } else {
        None
    }
}
