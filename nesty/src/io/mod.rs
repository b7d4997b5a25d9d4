/// External (serializable) representations of catalogues and solutions
pub mod ext_repr;

/// Converting external representations into a [`Catalogue`](crate::entities::Catalogue)
pub mod import;

/// Converting solutions into their external representation
pub mod export;

/// Flat `i64` encoding of polygon loops, as received from the host
pub mod paths;

/// Flat `i64` encoding of a [`Solution`](crate::entities::Solution), as handed to the host
pub mod flat;
