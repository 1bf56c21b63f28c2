use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators work on numbers (and words that hold numbers)
    /// with plain `f64` semantics, so dividing by zero gives an infinity
    /// rather than an error. Comparisons are handled by `eval_comparison`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use logoscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Number(3.0);
    /// let right = Value::from("4");
    ///
    /// let result = Context::eval_binary(BinaryOperator::Mul, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Number(12.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };

        match op {
            Add | Sub | Mul | Div => {
                let (a, b) = numeric_operands(op, left, right, line)?;
                Ok(Value::Number(match op {
                                     Add => a + b,
                                     Sub => a - b,
                                     Mul => a * b,
                                     _ => a / b,
                                 }))
            },
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)
            },
        }
    }
}

/// Extracts both operands as numbers.
///
/// Lists, booleans and missing values have no arithmetic meaning and raise
/// `UnsupportedOperator`; a word that is not a number raises `InvalidInput`.
pub(in crate::interpreter::evaluator) fn numeric_operands(op: BinaryOperator,
                                                          left: &Value,
                                                          right: &Value,
                                                          line: usize)
                                                          -> EvalResult<(f64, f64)> {
    let name = op.to_string();
    for operand in [left, right] {
        if matches!(operand, Value::List(_) | Value::Bool(_) | Value::Absent) {
            return Err(RuntimeError::UnsupportedOperator { operator: name,
                                                           line });
        }
    }
    Ok((left.as_number(&name, line)?, right.as_number(&name, line)?))
}
