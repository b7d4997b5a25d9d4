//! # nesty FFI
//!
//! C interface to a [`blf::session::Session`]: bins and shapes are appended to an opaque session handle,
//! nesting is executed, and the solution is handed over as a flat `int64_t` buffer.
//!
//! ## Functions
//!
//! - [`nesty_session_new`] / [`nesty_session_free`] - Create and release a session
//! - [`nesty_clear`] - Removes all definitions and the solution
//! - [`nesty_append_bin_def`] / [`nesty_append_shape_def`] - Add or replace definitions
//! - [`nesty_execute_nesting`] - Runs the engine, returns a status string
//! - [`nesty_get_solution`] / [`nesty_dispose_array64`] - Fetch and release the solution buffer
//! - [`nesty_version`] - Returns the library version
//!
//! ## Error Codes
//!
//! | Code | Constant | Meaning |
//! |------|----------|---------|
//! | 0 | `NESTY_OK` | Success |
//! | -1 | `NESTY_ERR_NULL_PTR` | Null pointer passed |
//! | -2 | `NESTY_ERR_INVALID_GEOMETRY` | Rejected polygon or path encoding |
//! | -3 | `NESTY_ERR_INVALID_PARAMETER` | Rejected count, dimension or bin type |
//! | -99 | `NESTY_ERR_UNKNOWN` | Internal failure |
//!
//! ## Solution Buffer
//!
//! `[placementCount, (shapeId, instanceIndex, binDefId, binInstance, x, y, rotation, mirrored) × placementCount,
//! unplacedCount, shapeId × unplacedCount]`
//!
//! Handles are not synchronized: a session must only be driven by one thread at a time.
//! Using a freed or foreign handle is undefined behaviour.

mod api;

pub use api::*;
