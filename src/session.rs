//! Pointer session tracking
//!
//! A session is the open interval between an interaction's press and release
//! for one input source. The tracker records the origin sample of each
//! in-progress interaction and hands it out exactly once on release. Touch
//! and mouse streams are tracked independently; they never consume each
//! other's origins.
//!
//! Ordering is a precondition, not something the tracker verifies: for a
//! given source, `begin_session` and `end_session` must arrive in delivery
//! order from the input runtime. A second press without an intervening
//! release silently replaces the earlier origin.

use crate::types::{PointerSample, PointerSource};

/// Tracks at most one open session per input source
#[derive(Debug, Default)]
pub struct SessionTracker {
    touch: Option<PointerSample>,
    mouse: Option<PointerSample>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `source` at the given position and time.
    ///
    /// Any prior unconsumed session for the same source is silently replaced;
    /// there is no queuing.
    pub fn begin_session(&mut self, source: PointerSource, x: f64, y: f64, now_ms: i64) {
        *self.slot(source) = Some(PointerSample::new(x, y, now_ms));
    }

    /// Close the session for `source`, returning its `(origin, end)` samples.
    ///
    /// Returns `None` when no session is open for `source` (a release without
    /// a matching press is a no-op, not an error). The session is consumed:
    /// a second `end_session` without an intervening `begin_session` returns
    /// `None`.
    pub fn end_session(
        &mut self,
        source: PointerSource,
        x: f64,
        y: f64,
        now_ms: i64,
    ) -> Option<(PointerSample, PointerSample)> {
        let origin = self.slot(source).take()?;
        Some((origin, PointerSample::new(x, y, now_ms)))
    }

    /// Whether a session is currently open for `source`.
    pub fn is_active(&self, source: PointerSource) -> bool {
        match source {
            PointerSource::Touch => self.touch.is_some(),
            PointerSource::Mouse => self.mouse.is_some(),
        }
    }

    fn slot(&mut self, source: PointerSource) -> &mut Option<PointerSample> {
        match source {
            PointerSource::Touch => &mut self.touch,
            PointerSource::Mouse => &mut self.mouse,
        }
    }
}
