//! Campus Gestures - On-device pointer gesture recognition
//!
//! Turns raw touch/mouse timing-and-displacement samples into discrete
//! semantic gestures (directional swipe, double tap) through a deterministic
//! pipeline: session tracking → classification → dispatch.
//!
//! ## Modules
//!
//! - **Session Tracker**: records the origin of an in-progress interaction,
//!   independently per input source
//! - **Classifier**: decides tap / double tap / directional swipe from the
//!   completed interaction's start and end samples
//! - **Dispatcher**: routes recognized gestures to registered handlers and a
//!   user-visible notification sink

pub mod classifier;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod notify;
pub mod report;
pub mod schema;
pub mod session;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use classifier::GestureClassifier;
pub use dispatcher::GestureDispatcher;
pub use engine::GestureEngine;
pub use error::GestureError;
pub use notify::{MemorySink, Notification, NotificationSink};
pub use session::SessionTracker;
pub use types::{GestureEvent, PointerSample, PointerSource, SwipeThresholds};

// Schema exports
pub use report::{GestureReport, Producer, RecognizedGesture, REPORT_SCHEMA_VERSION};
pub use schema::{PointerPhase, TraceAdapter, TraceEvent, TRACE_SCHEMA_VERSION};

/// Engine version embedded in all gesture reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for gesture reports
pub const PRODUCER_NAME: &str = "campus-gestures";
