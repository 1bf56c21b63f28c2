/// Numeric conversion helpers.
///
/// Logo has one number type, stored as `f64`. Primitives that need integers
/// (bitwise operations, indices, repeat counts, character codes) use these
/// helpers to convert without silent truncation or data loss.
///
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or an error if the value is out of range or not an integer.
pub mod num;
