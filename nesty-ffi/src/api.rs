//! C session API.

use std::ffi::{CString, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use log::{debug, error, warn};

use blf::config::BLFConfig;
use blf::session::Session;
use nesty::NestyError;
use nesty::io::flat::{encode_solution, flat_len};
use nesty::io::paths::encoded_len;

/// Error codes.
pub const NESTY_OK: i32 = 0;
pub const NESTY_ERR_NULL_PTR: i32 = -1;
pub const NESTY_ERR_INVALID_GEOMETRY: i32 = -2;
pub const NESTY_ERR_INVALID_PARAMETER: i32 = -3;
pub const NESTY_ERR_UNKNOWN: i32 = -99;

const STATUS_OK: &str = "OK";

/// Opaque handle to a nesting session.
pub struct NestySession {
    session: Session,
    /// Encoded solution of the last execute, until it is fetched
    pending: Option<Box<[i64]>>,
    /// Status string of the last execute
    status: CString,
}

impl NestySession {
    fn new() -> Self {
        Self {
            session: Session::new(BLFConfig::default()),
            pending: None,
            status: status_string(STATUS_OK),
        }
    }
}

fn status_string(status: &str) -> CString {
    CString::new(status.replace('\0', " ")).unwrap_or_default()
}

fn error_code(e: &NestyError) -> i32 {
    match e {
        NestyError::InvalidGeometry(_) => NESTY_ERR_INVALID_GEOMETRY,
        NestyError::InvalidParameter(_) => NESTY_ERR_INVALID_PARAMETER,
        _ => NESTY_ERR_UNKNOWN,
    }
}

fn append_result(result: std::thread::Result<nesty::Result<()>>) -> i32 {
    match result {
        Ok(Ok(())) => NESTY_OK,
        Ok(Err(e)) => {
            debug!("[FFI] definition rejected: {e}");
            error_code(&e)
        }
        Err(_) => {
            error!("[FFI] panic while appending a definition");
            NESTY_ERR_UNKNOWN
        }
    }
}

/// Creates a new, empty session.
///
/// The handle must be released with [`nesty_session_free`].
#[unsafe(no_mangle)]
pub extern "C" fn nesty_session_new() -> *mut NestySession {
    Box::into_raw(Box::new(NestySession::new()))
}

/// Releases a session, including a solution buffer that was not fetched yet.
/// Buffers already handed out by [`nesty_get_solution`] stay valid.
///
/// # Safety
/// - `session` must be null or a handle returned by [`nesty_session_new`] that was not freed yet
/// - `session` must not be used after this call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_session_free(session: *mut NestySession) {
    if !session.is_null() {
        drop(unsafe { Box::from_raw(session) });
    }
}

/// Removes all bin and shape definitions and the solution of the session.
///
/// # Safety
/// - `session` must be null or a live handle, not used concurrently from another thread
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_clear(session: *mut NestySession) {
    let Some(s) = (unsafe { session.as_mut() }) else {
        return;
    };
    if catch_unwind(AssertUnwindSafe(|| s.session.clear())).is_err() {
        error!("[FFI] panic while clearing the session");
    }
    s.pending = None;
}

/// Adds a bin definition, replacing any earlier one with the same `id`.
/// `bin_type` is 0 for a rectangle and 1 for a bar.
///
/// # Safety
/// - `session` must be null or a live handle, not used concurrently from another thread
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_append_bin_def(
    session: *mut NestySession,
    id: i32,
    count: i32,
    length: i64,
    width: i64,
    bin_type: i32,
) -> i32 {
    let Some(s) = (unsafe { session.as_mut() }) else {
        return NESTY_ERR_NULL_PTR;
    };
    append_result(catch_unwind(AssertUnwindSafe(|| {
        s.session.append_bin_def(id, count, length, width, bin_type)
    })))
}

/// Adds a shape definition, replacing any earlier one with the same `id`.
///
/// `cpaths` is `[loopCount, loop0VertexCount, x0, y0, …, loop1VertexCount, …]`,
/// the first loop is the boundary, the others are holes.
///
/// # Safety
/// - `session` must be null or a live handle, not used concurrently from another thread
/// - `cpaths` must be null or point to a buffer that holds at least the values its own counts describe,
///   up to the first count that is negative or too large
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_append_shape_def(
    session: *mut NestySession,
    id: i32,
    count: i32,
    cpaths: *const i64,
) -> i32 {
    let Some(s) = (unsafe { session.as_mut() }) else {
        return NESTY_ERR_NULL_PTR;
    };
    if cpaths.is_null() {
        return NESTY_ERR_NULL_PTR;
    }
    append_result(catch_unwind(AssertUnwindSafe(|| {
        //counts are validated before they are used to read any further
        let len = encoded_len(|i| Some(unsafe { cpaths.add(i).read() }))?;
        let paths = unsafe { std::slice::from_raw_parts(cpaths, len) };
        s.session.append_shape_def(id, count, paths)
    })))
}

/// Nests the shapes of the session into its bins.
///
/// Returns `"OK"`, or `"<CODE>: <message>"` if nesting could not start.
/// The string is owned by the session and valid until the next call on it.
/// On success, a solution of an earlier execute that was not fetched yet is released.
/// On failure, it stays available to [`nesty_get_solution`].
///
/// # Safety
/// - `session` must be null or a live handle, not used concurrently from another thread
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_execute_nesting(
    session: *mut NestySession,
    spacing: i64,
    trimming: i64,
) -> *const c_char {
    let Some(s) = (unsafe { session.as_mut() }) else {
        return c"NULL_PTR: session is null".as_ptr();
    };
    let result = catch_unwind(AssertUnwindSafe(|| {
        s.session
            .execute_nesting(spacing, trimming)
            .map(encode_solution)
    }));
    s.status = match result {
        Ok(Ok(flat)) => {
            debug!("[FFI] solution encoded in {} values", flat.len());
            s.pending = Some(flat.into_boxed_slice());
            status_string(STATUS_OK)
        }
        Ok(Err(e)) => {
            warn!("[FFI] execute failed: {e}");
            status_string(&e.status())
        }
        Err(_) => {
            error!("[FFI] panic during execute");
            status_string("INTERNAL: nesting panicked")
        }
    };
    s.status.as_ptr()
}

/// Hands over the solution of the last successful execute.
///
/// Returns null if there is none, or if it was already fetched.
/// The buffer is owned by the caller and must be released with [`nesty_dispose_array64`].
///
/// # Safety
/// - `session` must be null or a live handle, not used concurrently from another thread
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_get_solution(session: *mut NestySession) -> *mut i64 {
    let Some(s) = (unsafe { session.as_mut() }) else {
        return ptr::null_mut();
    };
    match s.pending.take() {
        Some(flat) => Box::into_raw(flat).cast::<i64>(),
        None => ptr::null_mut(),
    }
}

/// Releases a buffer returned by [`nesty_get_solution`].
///
/// # Safety
/// - `array` must be null or a buffer returned by [`nesty_get_solution`] that was not released yet
/// - `array` must not be used after this call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nesty_dispose_array64(array: *mut i64) {
    if array.is_null() {
        return;
    }
    let len = flat_len(|i| unsafe { array.add(i).read() });
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(array, len)) });
}

/// Returns the version of the library.
///
/// The returned string is statically allocated and must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn nesty_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn version_matches_the_crate() {
        let version = unsafe { CStr::from_ptr(nesty_version()) }.to_str().unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn null_handles_are_rejected() {
        unsafe {
            assert_eq!(
                nesty_append_bin_def(ptr::null_mut(), 1, 1, 10, 10, 0),
                NESTY_ERR_NULL_PTR
            );
            assert!(nesty_get_solution(ptr::null_mut()).is_null());
            nesty_clear(ptr::null_mut());
            nesty_dispose_array64(ptr::null_mut());
            nesty_session_free(ptr::null_mut());

            let s = nesty_session_new();
            assert_eq!(nesty_append_shape_def(s, 1, 1, ptr::null()), NESTY_ERR_NULL_PTR);
            nesty_session_free(s);
        }
    }

    #[test]
    fn error_codes_follow_the_error_kind() {
        assert_eq!(
            error_code(&NestyError::InvalidGeometry(String::new())),
            NESTY_ERR_INVALID_GEOMETRY
        );
        assert_eq!(
            error_code(&NestyError::InvalidParameter(String::new())),
            NESTY_ERR_INVALID_PARAMETER
        );
        assert_eq!(error_code(&NestyError::EmptyCatalogue), NESTY_ERR_UNKNOWN);
    }
}
