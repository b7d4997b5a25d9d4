#![doc = document_features::document_features!()]
//! Core of the `nesty` 2D irregular nesting engine: a fixed-point geometry kernel,
//! the catalogue of bins and shapes of a nesting session, and the solution model with its
//! flat binary encoding.

/// Bins, shapes and the catalogue that holds them for one nesting session
pub mod entities;

/// Geometric primitives and base algorithms, all in fixed-point integer coordinates
pub mod geometry;

/// Decoding host input and encoding solutions for the host
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::NestyError;
#[doc(inline)]
pub use error::Result;
