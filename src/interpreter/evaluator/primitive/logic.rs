use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// True when every input is true. Each input must be a boolean.
pub fn and(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut result = true;
    for arg in args {
        result &= arg.as_bool("and", line)?;
    }
    Ok(Value::Bool(result))
}

/// True when any input is true. Each input must be a boolean.
pub fn or(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut result = false;
    for arg in args {
        result |= arg.as_bool("or", line)?;
    }
    Ok(Value::Bool(result))
}

pub fn not(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(!args[0].as_bool("not", line)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_true_and_false_count_as_booleans() {
        let args = [Value::from("true"), Value::Bool(false)];
        assert_eq!(and(&args, 1).unwrap(), Value::Bool(false));
        assert_eq!(or(&args, 1).unwrap(), Value::Bool(true));
        assert_eq!(not(&args[1..], 1).unwrap(), Value::Bool(true));
    }

    #[test]
    fn every_input_is_checked() {
        let args = [Value::Bool(false), Value::Number(1.0)];
        assert!(and(&args, 1).is_err());
    }
}
