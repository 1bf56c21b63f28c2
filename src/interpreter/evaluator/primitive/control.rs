use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::{
            core::{Context, EvalResult, Flow, propagate},
            instruction::fill_template,
        },
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, i64_to_usize_checked},
};

/// `run list` runs the list as instructions and outputs whatever its last
/// instruction produced.
pub fn run(ctx: &mut Context, env: &Env, args: &[Value], _line: usize) -> EvalResult<Flow> {
    ctx.run_instructions(&args[0], env, true)
}

/// `repeat count list` runs the list `count` times.
///
/// The list is turned back into text and parsed again on every pass, so a
/// procedure defined by one pass can be called by the next. `output` and
/// `stop` inside the list end the loop and reach the enclosing procedure.
///
/// # Errors
/// - `LiteralTooSmall` for a negative count.
/// - `RealIsFractional` for a count that is not a whole number.
pub fn repeat(ctx: &mut Context, env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let count = f64_to_i64_checked(args[0].as_number("repeat", line)?, line)?;
    let count = i64_to_usize_checked(count, line)?;

    for _ in 0..count {
        propagate!(ctx.run_instructions(&args[1], env, false)?);
    }
    Ok(Flow::Value(Value::Absent))
}

/// `foreach data template` runs the template once per member of `data`.
///
/// In the template `?` stands for the member and `#` for its position,
/// counting from 1. A word is walked one character at a time.
pub fn foreach(ctx: &mut Context, env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let members = match &args[0] {
        Value::List(items) => items.to_vec(),
        other => {
            other.as_word("foreach", line)?
                 .chars()
                 .map(|c| Value::Word(c.to_string()))
                 .collect()
        },
    };

    for (index, member) in members.iter().enumerate() {
        let instructions = fill_template(&args[1], member, index + 1);
        propagate!(ctx.run_instructions(&instructions, env, false)?);
    }
    Ok(Flow::Value(Value::Absent))
}

/// `output value` ends the current procedure, which outputs `value`.
pub fn output(ctx: &mut Context, _env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    if !ctx.in_procedure() {
        return Err(RuntimeError::OutsideProcedure { name: "output".to_string(),
                                                    line });
    }
    Ok(Flow::Output(args[0].clone()))
}

/// `stop` ends the current procedure without a value.
pub fn stop(ctx: &mut Context, _env: &Env, _args: &[Value], line: usize) -> EvalResult<Flow> {
    if !ctx.in_procedure() {
        return Err(RuntimeError::OutsideProcedure { name: "stop".to_string(),
                                                    line });
    }
    Ok(Flow::Stop)
}

/// Discards its input.
pub fn ignore(_args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Absent)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Write, rc::Rc};

    use super::*;

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

    fn run_capturing(source: &str) -> (EvalResult<()>, String) {
        let buffer = SharedBuffer::default();
        let mut context = Context::new().with_output(buffer.clone());
        let result = context.run_source(source);
        let text = String::from_utf8_lossy(&buffer.0.borrow()).into_owned();
        (result, text)
    }

    #[test]
    fn repeat_runs_the_body_each_time() {
        let (result, out) = run_capturing("make \"n 0\nrepeat 3 [make \"n :n + 1 print :n]");
        assert!(result.is_ok());
        assert_eq!(out, "1\n2\n3\n");
    }

    #[test]
    fn repeat_zero_times_does_nothing() {
        let (result, out) = run_capturing("repeat 0 [print \"never]");
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn repeat_rejects_negative_counts() {
        let (result, _) = run_capturing("repeat -1 [print 1]");
        assert_eq!(result, Err(RuntimeError::LiteralTooSmall { line: 1 }));
    }

    #[test]
    fn foreach_substitutes_member_and_index() {
        let (result, out) = run_capturing("foreach [a b c] [(print # ?)]");
        assert!(result.is_ok());
        assert_eq!(out, "1 a\n2 b\n3 c\n");
    }

    #[test]
    fn output_inside_a_loop_leaves_the_procedure() {
        let source = "to firstbig :xs\nforeach :xs [if ? > 10 [output ?]]\noutput 0\nend\nprint \
                      firstbig [3 12 40]";
        let (result, out) = run_capturing(source);
        assert!(result.is_ok());
        assert_eq!(out, "12\n");
    }

    #[test]
    fn run_outputs_the_last_value() {
        let (result, out) = run_capturing("print run [1 + 2]");
        assert!(result.is_ok());
        assert_eq!(out, "3\n");
    }

    #[test]
    fn run_rejects_leftover_values_before_the_last() {
        let (result, _) = run_capturing("print run [1 2]");
        assert!(matches!(result, Err(RuntimeError::UnconsumedValue { .. })));
    }

    #[test]
    fn stop_at_top_level_is_an_error() {
        let (result, _) = run_capturing("print 1\nstop");
        assert_eq!(result,
                   Err(RuntimeError::OutsideProcedure { name: "stop".to_string(),
                                                        line: 2, }));
    }

    #[test]
    fn ignore_swallows_a_value() {
        let (result, _) = run_capturing("ignore 1 + 2");
        assert!(result.is_ok());
    }
}
