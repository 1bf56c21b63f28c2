use crate::interpreter::{
    environment::Env,
    evaluator::core::{Context, EvalResult, Flow},
    lexer::escape_word,
    value::core::Value,
};

/// Placeholder `foreach` replaces with the current element.
pub const ELEMENT_PLACEHOLDER: &str = "?";

/// Placeholder `foreach` replaces with the 1-based position of the element.
pub const INDEX_PLACEHOLDER: &str = "#";

impl Context {
    /// Runs a value as a list of instructions in `env`.
    ///
    /// The value is turned back into source text, so `[print 1 + 2]` runs as
    /// `print 1 + 2`. A word runs as a one-word instruction. With
    /// `keep_last`, the value of the final instruction is returned, which lets
    /// `run [1 + 2]` act as an operation.
    ///
    /// # Errors
    /// Any lexing, parsing or runtime error raised by the instructions.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::{
    ///     evaluator::core::{Context, Flow},
    ///     value::core::Value,
    /// };
    ///
    /// let mut context = Context::new();
    /// let global = context.global_env();
    /// let instructions = Value::from(vec![Value::Number(2.0), Value::from("*"), Value::Number(21.0)]);
    ///
    /// let flow = context.run_instructions(&instructions, &global, true).unwrap();
    /// assert_eq!(flow, Flow::Value(Value::Number(42.0)));
    /// ```
    pub fn run_instructions(&mut self,
                            instructions: &Value,
                            env: &Env,
                            keep_last: bool)
                            -> EvalResult<Flow> {
        self.run_text(&instructions.print_form(), env, keep_last)
    }
}

/// Fills a `foreach` template for one element.
///
/// Every `?` word in the template (at any depth) becomes the element, and
/// every `#` word becomes `index`. Words are re-quoted so that they read
/// back as words rather than as procedure names.
///
/// # Example
/// ```
/// use logoscript::interpreter::{evaluator::instruction::fill_template, value::core::Value};
///
/// let template = Value::from(vec![Value::from("print"), Value::from("?"), Value::from("#")]);
/// let filled = fill_template(&template, &Value::from("hi"), 3);
///
/// assert_eq!(filled.print_form(), "print \"hi 3");
/// ```
#[must_use]
pub fn fill_template(template: &Value, element: &Value, index: usize) -> Value {
    match template {
        Value::Word(w) if w == ELEMENT_PLACEHOLDER => Value::Word(quote(element)),
        Value::Word(w) if w == INDEX_PLACEHOLDER => Value::Word(index.to_string()),
        Value::List(items) => Value::from(items.iter()
                                               .map(|item| fill_template(item, element, index))
                                               .collect::<Vec<_>>()),
        other => other.clone(),
    }
}

/// Source text that reads back as `value`.
fn quote(value: &Value) -> String {
    match value {
        Value::Word(w) => format!("\"{}", escape_word(w)),
        Value::Bool(b) => format!("\"{b}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_with_spaces_are_escaped() {
        let template = Value::from(vec![Value::from("show"), Value::from("?")]);
        let filled = fill_template(&template, &Value::from("a b"), 1);
        assert_eq!(filled.print_form(), "show \"a\\ b");
    }

    #[test]
    fn placeholders_are_replaced_inside_nested_lists() {
        let template = Value::from(vec![Value::from("if"),
                                        Value::from("#"),
                                        Value::from("="),
                                        Value::Number(2.0),
                                        Value::from(vec![Value::from("print"), Value::from("?")])]);
        let element = Value::from(vec![Value::from("x"), Value::Number(1.0)]);
        let filled = fill_template(&template, &element, 2);
        assert_eq!(filled.print_form(), "if 2 = 2 [print [x 1]]");
    }

    #[test]
    fn instructions_run_in_the_given_frame() {
        let mut context = Context::new().with_output(std::io::sink());
        let global = context.global_env();
        let instructions = Value::from(vec![Value::from("make"),
                                            Value::from("\"x"),
                                            Value::Number(9.0)]);
        let flow = context.run_instructions(&instructions, &global, false).unwrap();
        assert_eq!(flow, Flow::Value(Value::Absent));
        assert_eq!(global.lookup("x"), Some(Value::Number(9.0)));
    }
}
