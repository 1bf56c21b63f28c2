use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::numeric_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `=` and `<>` work on any pair of values using Logo equality: numbers
    /// compare numerically (a word holding a number counts), lists compare
    /// element by element. Ordering operators need numbers.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use logoscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::Number(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        Ok(Value::Bool(match op {
                           BinaryOperator::Equal => left.logo_equal(right),
                           BinaryOperator::NotEqual => !left.logo_equal(right),
                           _ => {
                               let (left, right) = numeric_operands(op, left, right, line)?;
                               match op {
                                   BinaryOperator::Less => left < right,
                                   BinaryOperator::Greater => left > right,
                                   BinaryOperator::LessEqual => left <= right,
                                   _ => left >= right,
                               }
                           },
                       }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn numeric_words_equal_numbers() {
        let result =
            Context::eval_comparison(BinaryOperator::Equal, &Value::from("2"), &Value::Number(2.0), 1);
        assert_eq!(result.unwrap(), Value::Bool(true));
    }

    #[test]
    fn lists_compare_structurally() {
        let a = Value::from(vec![Value::from("x"), Value::from(vec![Value::from("y")])]);
        let b = a.clone();
        assert_eq!(Context::eval_comparison(BinaryOperator::NotEqual, &a, &b, 1).unwrap(),
                   Value::Bool(false));
    }

    #[test]
    fn ordering_needs_numbers() {
        let err = Context::eval_comparison(BinaryOperator::GreaterEqual,
                                           &Value::Bool(true),
                                           &Value::Number(1.0),
                                           4).unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedOperator { line: 4, .. }));
    }
}
