//! Gesture dispatch
//!
//! Routes a classified gesture to the handler registered for its variant (if
//! any) and then to the notification sink. Both calls are synchronous with
//! respect to `dispatch`; there is no queuing or deferred delivery.

use std::collections::HashMap;

use log::debug;

use crate::notify::{Notification, NotificationSink};
use crate::types::GestureEvent;

/// Fire-and-forget gesture callback
pub type Handler = Box<dyn FnMut()>;

/// Binds gesture variants to optional handlers and a notification sink.
///
/// At most one handler per variant; absent handlers mean the event's handler
/// step is simply skipped. The dispatcher holds no state beyond the
/// registrations themselves.
#[derive(Default)]
pub struct GestureDispatcher {
    handlers: HashMap<GestureEvent, Handler>,
    sink: Option<Box<dyn NotificationSink>>,
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a gesture variant, replacing any previous one.
    pub fn on<F>(&mut self, gesture: GestureEvent, handler: F)
    where
        F: FnMut() + 'static,
    {
        self.handlers.insert(gesture, Box::new(handler));
    }

    /// Remove the handler for a gesture variant.
    pub fn off(&mut self, gesture: GestureEvent) {
        self.handlers.remove(&gesture);
    }

    /// Install the notification sink, replacing any previous one.
    pub fn set_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = Some(sink);
    }

    /// Dispatch a gesture: handler first, notification second.
    pub fn dispatch(&mut self, gesture: GestureEvent) {
        debug!("dispatching {}", gesture.as_str());
        if let Some(handler) = self.handlers.get_mut(&gesture) {
            handler();
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.notify(Notification::for_gesture(gesture));
        }
    }
}

impl std::fmt::Debug for GestureDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that records labels interleaved with handler calls.
    struct SharedLogSink(Rc<RefCell<Vec<String>>>);

    impl NotificationSink for SharedLogSink {
        fn notify(&mut self, notification: Notification) {
            self.0.borrow_mut().push(format!("notify:{}", notification.title));
        }
    }

    #[test]
    fn test_handler_runs_before_notification() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();

        let handler_log = Rc::clone(&log);
        dispatcher.on(GestureEvent::SwipeLeft, move || {
            handler_log.borrow_mut().push("handler".to_string());
        });
        dispatcher.set_sink(Box::new(SharedLogSink(Rc::clone(&log))));

        dispatcher.dispatch(GestureEvent::SwipeLeft);
        assert_eq!(
            *log.borrow(),
            vec!["handler".to_string(), "notify:Swipe Left".to_string()]
        );
    }

    #[test]
    fn test_missing_handler_still_notifies() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.set_sink(Box::new(SharedLogSink(Rc::clone(&log))));

        dispatcher.dispatch(GestureEvent::SwipeDown);
        assert_eq!(*log.borrow(), vec!["notify:Swipe Down".to_string()]);
    }

    #[test]
    fn test_no_sink_no_handler_is_noop() {
        let mut dispatcher = GestureDispatcher::new();
        // Must not panic.
        dispatcher.dispatch(GestureEvent::DoubleTap);
    }

    #[test]
    fn test_reregistration_replaces_handler() {
        let count = Rc::new(RefCell::new((0u32, 0u32)));
        let mut dispatcher = GestureDispatcher::new();

        let first = Rc::clone(&count);
        dispatcher.on(GestureEvent::DoubleTap, move || first.borrow_mut().0 += 1);
        let second = Rc::clone(&count);
        dispatcher.on(GestureEvent::DoubleTap, move || second.borrow_mut().1 += 1);

        dispatcher.dispatch(GestureEvent::DoubleTap);
        assert_eq!(*count.borrow(), (0, 1));
    }

    #[test]
    fn test_off_unregisters_handler() {
        let calls = Rc::new(RefCell::new(0u32));
        let mut dispatcher = GestureDispatcher::new();

        let counter = Rc::clone(&calls);
        dispatcher.on(GestureEvent::SwipeUp, move || *counter.borrow_mut() += 1);
        dispatcher.off(GestureEvent::SwipeUp);

        dispatcher.dispatch(GestureEvent::SwipeUp);
        assert_eq!(*calls.borrow(), 0);
    }
}
