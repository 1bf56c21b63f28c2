use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// Used for counts and indices handed back to Logo code as numbers.
///
/// # Errors
/// Returns `RuntimeError::LiteralTooLarge` if the value exceeds
/// `MAX_SAFE_U64_INT`.
///
/// # Example
/// ```
/// use logoscript::{
///     error::RuntimeError,
///     util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked},
/// };
///
/// assert_eq!(usize_to_f64_checked(100, 0).unwrap(), 100.0);
///
/// let too_big = (MAX_SAFE_U64_INT + 1) as usize;
/// let err = usize_to_f64_checked(too_big, 77).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooLarge { line: 77 }));
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64_checked(value: usize, line: usize) -> EvalResult<f64> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(RuntimeError::LiteralTooLarge { line });
    }

    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// Logo has a single number type, so every primitive that needs an integer
/// (bitwise operations, `item`, `repeat`, `char`) goes through here.
///
/// # Errors
/// - `RuntimeError::InvalidInput` for `NaN` and infinities.
/// - `RuntimeError::LiteralTooLarge` when outside the `i64` range.
/// - `RuntimeError::RealIsFractional` when the value has a fractional part.
///
/// # Example
/// ```
/// use logoscript::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(42.0, 1).unwrap(), 42);
///
/// let err = f64_to_i64_checked(2.5, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { line: 3 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidInput { name: "integer conversion".to_string(),
                                                input: value.to_string(),
                                                line });
    }
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { line });
    }
    Ok(value as i64)
}

/// Safely converts an `i64` to `u32`.
///
/// Used for shift amounts and character codes.
///
/// # Errors
/// - `RuntimeError::LiteralTooLarge` if `value > u32::MAX`.
/// - `RuntimeError::LiteralTooSmall` if `value < 0`.
///
/// # Example
/// ```
/// use logoscript::{error::RuntimeError, util::num::i64_to_u32_checked};
///
/// assert_eq!(i64_to_u32_checked(65, 1).unwrap(), 65);
///
/// let err = i64_to_u32_checked(-1, 2).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooSmall { line: 2 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub const fn i64_to_u32_checked(value: i64, line: usize) -> EvalResult<u32> {
    if value > u32::MAX as i64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }

    if value < 0 {
        return Err(RuntimeError::LiteralTooSmall { line });
    }
    Ok(value as u32)
}

/// Safely converts an `i64` to `usize`.
///
/// # Errors
/// - `RuntimeError::LiteralTooSmall` if `value < 0`.
/// - `RuntimeError::LiteralTooLarge` if the value does not fit.
///
/// # Example
/// ```
/// use logoscript::{error::RuntimeError, util::num::i64_to_usize_checked};
///
/// assert_eq!(i64_to_usize_checked(3, 1).unwrap(), 3);
/// assert!(matches!(i64_to_usize_checked(-3, 9),
///                  Err(RuntimeError::LiteralTooSmall { line: 9 })));
/// ```
pub fn i64_to_usize_checked(value: i64, line: usize) -> EvalResult<usize> {
    if value < 0 {
        return Err(RuntimeError::LiteralTooSmall { line });
    }

    usize::try_from(value).map_or(Err(RuntimeError::LiteralTooLarge { line }), Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i64_range_edges() {
        let two_to_63 = 9_223_372_036_854_775_808.0;
        assert_eq!(f64_to_i64_checked(two_to_63, 4), Err(RuntimeError::LiteralTooLarge { line: 4 }));
        assert_eq!(f64_to_i64_checked(-two_to_63, 4), Ok(i64::MIN));
        assert_eq!(f64_to_i64_checked(9_007_199_254_740_992.0, 4), Ok(1 << 53));
    }
}
