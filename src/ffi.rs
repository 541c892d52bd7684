//! FFI bindings for campus-gestures
//!
//! C-compatible functions for embedding the engine in a non-Rust host UI.
//! Strings returned by these functions are allocated here and must be freed
//! by the caller using `gestures_free_string`. Engines created with
//! `gestures_engine_new` must be released with `gestures_engine_free`.
//!
//! Sources are passed as integers: 0 = touch, 1 = mouse.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

use crate::engine::GestureEngine;
use crate::schema::TraceAdapter;
use crate::types::PointerSource;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn source_from_int(source: c_int) -> Option<PointerSource> {
    match source {
        0 => Some(PointerSource::Touch),
        1 => Some(PointerSource::Mouse),
        _ => None,
    }
}

// ============================================================================
// Stateful engine API
// ============================================================================

/// Create a new gesture engine.
///
/// # Safety
/// The returned pointer must be released with `gestures_engine_free`.
#[no_mangle]
pub extern "C" fn gestures_engine_new() -> *mut GestureEngine {
    Box::into_raw(Box::new(GestureEngine::new()))
}

/// Free an engine created with `gestures_engine_new`.
///
/// # Safety
/// `engine` must be a pointer returned by `gestures_engine_new` that has not
/// already been freed. Passing NULL is a no-op.
#[no_mangle]
pub unsafe extern "C" fn gestures_engine_free(engine: *mut GestureEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Feed a press / touch-start event.
///
/// Returns 0 on success, -1 on error (NULL engine or unknown source); call
/// `gestures_last_error` for the message.
///
/// # Safety
/// `engine` must be a valid pointer from `gestures_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn gestures_engine_pointer_down(
    engine: *mut GestureEngine,
    source: c_int,
    x: f64,
    y: f64,
    timestamp_ms: i64,
) -> c_int {
    clear_last_error();

    let Some(engine) = engine.as_mut() else {
        set_last_error("NULL engine pointer");
        return -1;
    };
    let Some(source) = source_from_int(source) else {
        set_last_error("Unknown pointer source (expected 0=touch, 1=mouse)");
        return -1;
    };

    engine.pointer_down(source, x, y, timestamp_ms);
    0
}

/// Feed a release / touch-end event.
///
/// Returns the recognized gesture name (`swipe_left`, `swipe_right`,
/// `swipe_up`, `swipe_down`, `double_tap`) or NULL when no gesture was
/// recognized. NULL is also returned on error; call `gestures_last_error`
/// to distinguish.
///
/// # Safety
/// - `engine` must be a valid pointer from `gestures_engine_new`.
/// - A non-NULL result must be freed with `gestures_free_string`.
#[no_mangle]
pub unsafe extern "C" fn gestures_engine_pointer_up(
    engine: *mut GestureEngine,
    source: c_int,
    x: f64,
    y: f64,
    timestamp_ms: i64,
) -> *mut c_char {
    clear_last_error();

    let Some(engine) = engine.as_mut() else {
        set_last_error("NULL engine pointer");
        return ptr::null_mut();
    };
    let Some(source) = source_from_int(source) else {
        set_last_error("Unknown pointer source (expected 0=touch, 1=mouse)");
        return ptr::null_mut();
    };

    match engine.pointer_up(source, x, y, timestamp_ms) {
        Some(gesture) => string_to_cstr(gesture.as_str()),
        None => ptr::null_mut(),
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Replay an NDJSON pointer trace and return the gesture report as JSON.
///
/// # Safety
/// - `trace_ndjson` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with
///   `gestures_free_string`.
/// - Returns NULL on error; call `gestures_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn gestures_classify_trace(trace_ndjson: *const c_char) -> *mut c_char {
    clear_last_error();

    let Some(input) = cstr_to_string(trace_ndjson) else {
        set_last_error("Invalid trace string pointer");
        return ptr::null_mut();
    };

    let events = match TraceAdapter::parse_ndjson(&input) {
        Ok(events) => events,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    let mut engine = GestureEngine::new();
    let recognized = match engine.replay(&events) {
        Ok(recognized) => recognized,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match engine.report(recognized).to_json() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory and error helpers
// ============================================================================

/// Free a string returned by this library.
///
/// # Safety
/// `s` must be a pointer returned by a `gestures_*` function that has not
/// already been freed. Passing NULL is a no-op.
#[no_mangle]
pub unsafe extern "C" fn gestures_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the last error message, or NULL if there was none.
///
/// The returned pointer is owned by thread-local storage: do not free it,
/// and copy it before the next `gestures_*` call on this thread.
#[no_mangle]
pub extern "C" fn gestures_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(msg) => msg.as_ptr(),
        None => ptr::null(),
    })
}
