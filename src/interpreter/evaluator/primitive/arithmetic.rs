use crate::{
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_i64_checked,
};

/// Reads every input as a number.
fn numbers(args: &[Value], name: &str, line: usize) -> EvalResult<Vec<f64>> {
    args.iter().map(|arg| arg.as_number(name, line)).collect()
}

/// Reads every input as a whole number.
fn integers(args: &[Value], name: &str, line: usize) -> EvalResult<Vec<i64>> {
    args.iter()
        .map(|arg| f64_to_i64_checked(arg.as_number(name, line)?, line))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
const fn integer_value(n: i64) -> Value {
    Value::Number(n as f64)
}

/// Adds its inputs. `(sum)` is 0.
pub fn sum(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(numbers(args, "sum", line)?.into_iter().sum()))
}

pub fn difference(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number("difference", line)?
                     - args[1].as_number("difference", line)?))
}

/// Multiplies its inputs. `(product)` is 1.
pub fn product(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(numbers(args, "product", line)?.into_iter().product()))
}

/// `quotient a b` divides `a` by `b`; `(quotient a)` is `1 / a`.
///
/// Division by zero follows floating point rules and gives an infinity.
pub fn quotient(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_number("quotient", line)?;
    match args.get(1) {
        Some(b) => Ok(Value::Number(a / b.as_number("quotient", line)?)),
        None => Ok(Value::Number(1.0 / a)),
    }
}

/// Remainder with the sign of the dividend.
pub fn remainder(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number("remainder", line)?
                     % args[1].as_number("remainder", line)?))
}

pub fn minus(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(-args[0].as_number("minus", line)?))
}

/// Drops the fractional part.
pub fn int(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number("int", line)?.trunc()))
}

pub fn round(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(args[0].as_number("round", line)?.round()))
}

/// Square root. Negative inputs are rejected.
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_number("sqrt", line)?;
    if x < 0.0 {
        return Err(args[0].invalid_for("sqrt", line));
    }
    Ok(Value::Number(x.sqrt()))
}

/// Folds `bitand`, `bitor` or `bitxor` over the inputs.
///
/// With no inputs, `bitand` gives -1 and the others give 0.
///
/// # Example
/// ```
/// use logoscript::interpreter::{evaluator::primitive::arithmetic::bitwise, value::core::Value};
///
/// let args = [Value::Number(12.0), Value::Number(10.0)];
///
/// assert_eq!(bitwise("bitand", &args, 1).unwrap(), Value::Number(8.0));
/// assert_eq!(bitwise("bitor", &args, 1).unwrap(), Value::Number(14.0));
/// assert_eq!(bitwise("bitxor", &args, 1).unwrap(), Value::Number(6.0));
/// ```
pub fn bitwise(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let values = integers(args, name, line)?.into_iter();
    let result = match name {
        "bitand" => values.fold(-1, |acc, n| acc & n),
        "bitor" => values.fold(0, |acc, n| acc | n),
        _ => values.fold(0, |acc, n| acc ^ n),
    };
    Ok(integer_value(result))
}

pub fn bitnot(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = f64_to_i64_checked(args[0].as_number("bitnot", line)?, line)?;
    Ok(integer_value(!n))
}

/// `ashift num count` shifts left for a positive count and right for a
/// negative one, keeping the sign.
pub fn ashift(args: &[Value], line: usize) -> EvalResult<Value> {
    let (n, count, distance) = shift_inputs(args, "ashift", line)?;

    let result = if count >= 0 {
        n.checked_shl(distance).unwrap_or(0)
    } else {
        n.checked_shr(distance).unwrap_or(if n < 0 { -1 } else { 0 })
    };
    Ok(integer_value(result))
}

/// `lshift num count` is like `ashift`, but right shifts fill with zeros.
pub fn lshift(args: &[Value], line: usize) -> EvalResult<Value> {
    let (n, count, distance) = shift_inputs(args, "lshift", line)?;

    let result = if count >= 0 {
        n.checked_shl(distance).unwrap_or(0)
    } else {
        n.cast_unsigned().checked_shr(distance).unwrap_or(0).cast_signed()
    };
    Ok(integer_value(result))
}

/// Returns the number, the signed count and the shift distance. Distances
/// past `u32::MAX` saturate, since any shift of 64 or more gives the fill.
fn shift_inputs(args: &[Value], name: &str, line: usize) -> EvalResult<(i64, i64, u32)> {
    let n = f64_to_i64_checked(args[0].as_number(name, line)?, line)?;
    let count = f64_to_i64_checked(args[1].as_number(name, line)?, line)?;
    let distance = u32::try_from(count.unsigned_abs()).unwrap_or(u32::MAX);
    Ok((n, count, distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    fn nums(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn empty_sum_and_product() {
        assert_eq!(sum(&[], 1).unwrap(), Value::Number(0.0));
        assert_eq!(product(&[], 1).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn numeric_words_are_accepted() {
        assert_eq!(sum(&[Value::from("2"), Value::Number(3.0)], 1).unwrap(), Value::Number(5.0));
        assert!(sum(&[Value::from("two"), Value::Number(3.0)], 1).is_err());
    }

    #[test]
    fn quotient_with_one_input_is_the_reciprocal() {
        assert_eq!(quotient(&nums(&[4.0]), 1).unwrap(), Value::Number(0.25));
        assert_eq!(quotient(&nums(&[1.0, 0.0]), 1).unwrap(), Value::Number(f64::INFINITY));
    }

    #[test]
    fn remainder_takes_the_sign_of_the_dividend() {
        assert_eq!(remainder(&nums(&[-7.0, 3.0]), 1).unwrap(), Value::Number(-1.0));
    }

    #[test]
    fn int_truncates_and_round_rounds() {
        assert_eq!(int(&nums(&[-2.7]), 1).unwrap(), Value::Number(-2.0));
        assert_eq!(round(&nums(&[2.5]), 1).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn sqrt_rejects_negative_numbers() {
        assert_eq!(sqrt(&nums(&[9.0]), 1).unwrap(), Value::Number(3.0));
        assert!(matches!(sqrt(&nums(&[-1.0]), 5), Err(RuntimeError::InvalidInput { line: 5, .. })));
    }

    #[test]
    fn shifts() {
        assert_eq!(ashift(&nums(&[1.0, 4.0]), 1).unwrap(), Value::Number(16.0));
        assert_eq!(ashift(&nums(&[-16.0, -2.0]), 1).unwrap(), Value::Number(-4.0));
        assert_eq!(lshift(&nums(&[16.0, -2.0]), 1).unwrap(), Value::Number(4.0));
        assert_eq!(bitnot(&nums(&[0.0]), 1).unwrap(), Value::Number(-1.0));
    }

    #[test]
    fn extreme_shift_counts_saturate() {
        let most_negative = -9_223_372_036_854_775_808.0;
        assert_eq!(ashift(&nums(&[1.0, most_negative]), 1).unwrap(), Value::Number(0.0));
        assert_eq!(ashift(&nums(&[-8.0, most_negative]), 1).unwrap(), Value::Number(-1.0));
        assert_eq!(lshift(&nums(&[-8.0, most_negative]), 1).unwrap(), Value::Number(0.0));
        assert_eq!(ashift(&nums(&[3.0, 1e12]), 1).unwrap(), Value::Number(0.0));
    }

    #[test]
    fn bitwise_needs_whole_numbers() {
        let err = bitwise("bitand", &nums(&[1.5, 1.0]), 3).unwrap_err();
        assert_eq!(err, RuntimeError::RealIsFractional { line: 3 });
    }
}
