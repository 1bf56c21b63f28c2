/// The `Value` enum and its conversions.
///
/// Values are what evaluation produces and what variables hold: numbers,
/// words, booleans, lists, and the explicit absence of a value that commands
/// return.
pub mod core;
