/// Set of functions used throughout to assure the correctness of solutions.
pub mod assertions;
