use crate::interpreter::{
    environment::Env,
    evaluator::core::{Context, EvalResult, Flow},
    value::core::Value,
};

/// Writes its inputs separated by spaces, followed by a newline.
///
/// Lists are written without their outer brackets, so `print [a [b c]]`
/// writes `a [b c]`.
pub fn print(ctx: &mut Context, _env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let text = args.iter().map(Value::print_form).collect::<Vec<_>>().join(" ");
    ctx.write_output(&format!("{text}\n"), line)?;
    Ok(Flow::Value(Value::Absent))
}

/// Like `print`, but lists keep their brackets.
pub fn show(ctx: &mut Context, _env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let text = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    ctx.write_output(&format!("{text}\n"), line)?;
    Ok(Flow::Value(Value::Absent))
}

/// Like `print`, but with no separators and no trailing newline.
pub fn type_fn(ctx: &mut Context, _env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let text = args.iter().map(Value::print_form).collect::<String>();
    ctx.write_output(&text, line)?;
    Ok(Flow::Value(Value::Absent))
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Write, rc::Rc};

    use crate::interpreter::evaluator::core::Context;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn output_of(source: &str) -> String {
        let buffer = SharedBuffer::default();
        let mut context = Context::new().with_output(buffer.clone());
        context.run_source(source).unwrap();
        String::from_utf8_lossy(&buffer.0.borrow()).into_owned()
    }

    #[test]
    fn print_drops_outer_brackets_and_show_keeps_them() {
        assert_eq!(output_of("print [a [b c]]\nshow [a [b c]]"),
                   "a [b c]\n[a [b c]]\n");
    }

    #[test]
    fn parenthesised_print_joins_with_spaces() {
        assert_eq!(output_of("(print \"a 1 [b])"), "a 1 b\n");
    }

    #[test]
    fn type_adds_nothing() {
        assert_eq!(output_of("(type \"a \"b)\ntype 1\nprint \""), "ab1\n");
    }

    #[test]
    fn print_with_no_inputs_writes_a_blank_line() {
        assert_eq!(output_of("(print)"), "\n");
    }
}
