//! Engine facade
//!
//! `GestureEngine` composes the three stages of the engine behind the raw
//! input boundary: the session tracker opens and closes interactions, the
//! classifier turns a completed interaction into at most one gesture, and
//! the dispatcher routes the gesture to its handler and the notification
//! sink.
//!
//! All operations are synchronous and single-threaded; the engine must be
//! driven from whatever thread delivers the input events, in delivery order.
//! Construct one engine per gesture surface so tap history never bleeds
//! between surfaces.

use uuid::Uuid;

use crate::classifier::GestureClassifier;
use crate::dispatcher::GestureDispatcher;
use crate::error::GestureError;
use crate::notify::NotificationSink;
use crate::report::{GestureReport, Producer, RecognizedGesture};
use crate::schema::{PointerPhase, TraceAdapter, TraceEvent};
use crate::session::SessionTracker;
use crate::types::{GestureEvent, PointerSource};

/// Pointer gesture recognition engine for one surface
#[derive(Debug)]
pub struct GestureEngine {
    tracker: SessionTracker,
    classifier: GestureClassifier,
    dispatcher: GestureDispatcher,
    instance_id: String,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    /// Create an engine with no handlers and no notification sink
    pub fn new() -> Self {
        Self {
            tracker: SessionTracker::new(),
            classifier: GestureClassifier::new(),
            dispatcher: GestureDispatcher::new(),
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Unique identifier of this engine instance, used in report provenance.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Register the handler for a gesture variant, replacing any previous one.
    pub fn on<F>(&mut self, gesture: GestureEvent, handler: F)
    where
        F: FnMut() + 'static,
    {
        self.dispatcher.on(gesture, handler);
    }

    pub fn on_swipe_left<F: FnMut() + 'static>(&mut self, handler: F) {
        self.on(GestureEvent::SwipeLeft, handler);
    }

    pub fn on_swipe_right<F: FnMut() + 'static>(&mut self, handler: F) {
        self.on(GestureEvent::SwipeRight, handler);
    }

    pub fn on_swipe_up<F: FnMut() + 'static>(&mut self, handler: F) {
        self.on(GestureEvent::SwipeUp, handler);
    }

    pub fn on_swipe_down<F: FnMut() + 'static>(&mut self, handler: F) {
        self.on(GestureEvent::SwipeDown, handler);
    }

    pub fn on_double_tap<F: FnMut() + 'static>(&mut self, handler: F) {
        self.on(GestureEvent::DoubleTap, handler);
    }

    /// Install the notification sink for user-visible feedback.
    pub fn set_notification_sink<S>(&mut self, sink: S)
    where
        S: NotificationSink + 'static,
    {
        self.dispatcher.set_sink(Box::new(sink));
    }

    /// Feed a press / touch-start event.
    pub fn pointer_down(&mut self, source: PointerSource, x: f64, y: f64, timestamp_ms: i64) {
        self.tracker.begin_session(source, x, y, timestamp_ms);
    }

    /// Feed a release / touch-end event.
    ///
    /// Classifies the completed interaction, dispatches any recognized
    /// gesture, and returns it. A release with no matching press, or an
    /// interaction that matches nothing, returns `None`.
    pub fn pointer_up(
        &mut self,
        source: PointerSource,
        x: f64,
        y: f64,
        timestamp_ms: i64,
    ) -> Option<GestureEvent> {
        let (origin, end) = self.tracker.end_session(source, x, y, timestamp_ms)?;
        let gesture = self.classifier.classify(origin, end, source)?;
        self.dispatcher.dispatch(gesture);
        Some(gesture)
    }

    /// Replay a captured trace through the engine in order.
    ///
    /// Every event is validated and the trace's timestamp ordering checked
    /// before anything reaches the engine; a bad trace is rejected as a
    /// whole. Recognized gestures are dispatched as usual and also collected
    /// for the caller.
    pub fn replay(&mut self, events: &[TraceEvent]) -> Result<Vec<RecognizedGesture>, GestureError> {
        if let Some(failure) = TraceAdapter::validate_events(events).into_iter().next() {
            return Err(failure.error);
        }
        TraceAdapter::check_order(events)?;

        let mut recognized = Vec::new();
        for event in events {
            match event.phase {
                PointerPhase::Down => {
                    self.pointer_down(event.source, event.x, event.y, event.timestamp_ms());
                }
                PointerPhase::Up => {
                    if let Some(gesture) =
                        self.pointer_up(event.source, event.x, event.y, event.timestamp_ms())
                    {
                        recognized.push(RecognizedGesture {
                            gesture,
                            source: event.source,
                            detected_at: event.timestamp,
                        });
                    }
                }
            }
        }
        Ok(recognized)
    }

    /// Wrap recognized gestures in a report carrying this engine's provenance.
    pub fn report(&self, gestures: Vec<RecognizedGesture>) -> GestureReport {
        GestureReport::new(Producer::new(self.instance_id.clone()), gestures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TRACE_SCHEMA_VERSION;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn trace_event(
        offset_ms: i64,
        source: PointerSource,
        phase: PointerPhase,
        x: f64,
        y: f64,
    ) -> TraceEvent {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        TraceEvent {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            timestamp: base + chrono::Duration::milliseconds(offset_ms),
            source,
            phase,
            x,
            y,
        }
    }

    #[test]
    fn test_swipe_right_end_to_end() {
        let mut engine = GestureEngine::new();
        let hits = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&hits);
        engine.on_swipe_right(move || *counter.borrow_mut() += 1);

        engine.pointer_down(PointerSource::Touch, 100.0, 100.0, 0);
        let gesture = engine.pointer_up(PointerSource::Touch, 160.0, 102.0, 120);

        assert_eq!(gesture, Some(GestureEvent::SwipeRight));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut engine = GestureEngine::new();
        assert_eq!(
            engine.pointer_up(PointerSource::Touch, 160.0, 102.0, 120),
            None
        );
    }

    #[test]
    fn test_double_tap_dispatches_and_notifies() {
        let mut engine = GestureEngine::new();
        let taps = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&taps);
        engine.on_double_tap(move || *counter.borrow_mut() += 1);

        engine.pointer_down(PointerSource::Touch, 100.0, 100.0, 0);
        assert_eq!(
            engine.pointer_up(PointerSource::Touch, 104.0, 98.0, 100),
            None
        );

        engine.pointer_down(PointerSource::Touch, 102.0, 101.0, 300);
        assert_eq!(
            engine.pointer_up(PointerSource::Touch, 103.0, 99.0, 320),
            Some(GestureEvent::DoubleTap)
        );
        assert_eq!(*taps.borrow(), 1);
    }

    #[test]
    fn test_source_isolation_end_to_end() {
        let mut engine = GestureEngine::new();

        engine.pointer_down(PointerSource::Touch, 100.0, 100.0, 0);
        // Mouse release must not consume the touch origin.
        assert_eq!(
            engine.pointer_up(PointerSource::Mouse, 250.0, 100.0, 120),
            None
        );
        assert_eq!(
            engine.pointer_up(PointerSource::Touch, 160.0, 102.0, 140),
            Some(GestureEvent::SwipeRight)
        );
    }

    #[test]
    fn test_replay_collects_gestures() {
        let mut engine = GestureEngine::new();
        let events = vec![
            trace_event(0, PointerSource::Touch, PointerPhase::Down, 100.0, 100.0),
            trace_event(120, PointerSource::Touch, PointerPhase::Up, 160.0, 102.0),
            trace_event(500, PointerSource::Touch, PointerPhase::Down, 0.0, 0.0),
            trace_event(650, PointerSource::Touch, PointerPhase::Up, 5.0, 80.0),
            // Slow mouse drag: discarded by the duration gate.
            trace_event(1000, PointerSource::Mouse, PointerPhase::Down, 0.0, 0.0),
            trace_event(1600, PointerSource::Mouse, PointerPhase::Up, 150.0, 10.0),
        ];

        let recognized = engine.replay(&events).unwrap();
        let gestures: Vec<_> = recognized.iter().map(|r| r.gesture).collect();
        assert_eq!(
            gestures,
            vec![GestureEvent::SwipeRight, GestureEvent::SwipeDown]
        );
        assert_eq!(recognized[1].detected_at, events[3].timestamp);
    }

    #[test]
    fn test_replay_rejects_out_of_order_trace() {
        let mut engine = GestureEngine::new();
        let events = vec![
            trace_event(120, PointerSource::Touch, PointerPhase::Down, 0.0, 0.0),
            trace_event(0, PointerSource::Touch, PointerPhase::Up, 80.0, 0.0),
        ];
        assert!(matches!(
            engine.replay(&events),
            Err(GestureError::OutOfOrder(_))
        ));
    }

    #[test]
    fn test_replay_rejects_invalid_event() {
        let mut engine = GestureEngine::new();
        let mut events = vec![trace_event(
            0,
            PointerSource::Touch,
            PointerPhase::Down,
            0.0,
            0.0,
        )];
        events[0].y = f64::INFINITY;
        assert!(matches!(
            engine.replay(&events),
            Err(GestureError::NonFiniteCoordinate(_))
        ));
    }

    #[test]
    fn test_notification_follows_dispatch() {
        struct SharedSink(Rc<RefCell<Vec<String>>>);
        impl crate::notify::NotificationSink for SharedSink {
            fn notify(&mut self, n: crate::notify::Notification) {
                self.0.borrow_mut().push(n.title);
            }
        }

        let titles = Rc::new(RefCell::new(Vec::new()));
        let mut engine = GestureEngine::new();
        engine.set_notification_sink(SharedSink(Rc::clone(&titles)));

        engine.pointer_down(PointerSource::Mouse, 0.0, 0.0, 0);
        let gesture = engine.pointer_up(PointerSource::Mouse, 150.0, 0.0, 200);
        assert_eq!(gesture, Some(GestureEvent::SwipeRight));
        assert_eq!(*titles.borrow(), vec!["Swipe Right".to_string()]);
    }

    #[test]
    fn test_report_carries_instance_id() {
        let engine = GestureEngine::new();
        let report = engine.report(Vec::new());
        assert_eq!(report.producer.instance_id, engine.instance_id());
        assert!(report.gestures.is_empty());
    }
}
