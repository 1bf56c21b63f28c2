/// Operator dispatch and arithmetic.
pub mod core;

/// Equality and ordering comparisons.
pub mod comparison;
