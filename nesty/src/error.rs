use thiserror::Error;

/// Result type alias for fallible `nesty` operations.
pub type Result<T> = std::result::Result<T, NestyError>;

/// Everything that can go wrong while building a catalogue, running a nesting or decoding a solution.
///
/// Running out of bin capacity is deliberately absent: shapes that do not fit are reported
/// in the [`Solution`](crate::entities::Solution) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestyError {
    /// A polygon or path encoding was rejected
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A scalar argument (count, dimension, bin type, spacing, trimming) was rejected
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// There is nothing to nest
    #[error("catalogue contains no shape definitions")]
    EmptyCatalogue,

    /// None of the bin definitions can host anything
    #[error("no bin definition has a usable region")]
    NoUsableCapacity,

    /// A flat solution buffer could not be decoded
    #[error("malformed solution buffer: {0}")]
    MalformedSolution(String),

    /// The offsetting backend failed
    #[error("offset failed: {0}")]
    Offset(String),
}

impl NestyError {
    /// Stable, machine readable code of the error, used in status strings across the host boundary.
    pub fn code(&self) -> &'static str {
        match self {
            NestyError::InvalidGeometry(_) => "INVALID_GEOMETRY",
            NestyError::InvalidParameter(_) => "INVALID_PARAMETER",
            NestyError::EmptyCatalogue => "EMPTY_CATALOGUE",
            NestyError::NoUsableCapacity => "NO_USABLE_CAPACITY",
            NestyError::MalformedSolution(_) => "MALFORMED_SOLUTION",
            NestyError::Offset(_) => "OFFSET_FAILED",
        }
    }

    /// Human readable status line: `<CODE>: <message>`.
    pub fn status(&self) -> String {
        format!("{}: {}", self.code(), self)
    }
}
