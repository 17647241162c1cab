/// Consistency checks on layouts and parameter vectors.
pub mod assertions;

/// Float comparisons with a small absolute tolerance.
pub mod tol;
