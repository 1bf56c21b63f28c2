use crate::{
    ast::{Node, Program},
    interpreter::{
        environment::{Env, Environment},
        evaluator::core::{Context, EvalResult, Flow, propagate},
        registry::Callable,
        value::core::Value,
    },
};

/// Stack left before a procedure body is moved onto a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each fresh stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// A procedure defined with `to ... end`.
///
/// The body is kept as a parsed program and runs in a fresh frame whose
/// parent is the frame the definition was evaluated in.
#[derive(Debug)]
pub struct Procedure {
    /// Lowercased procedure name.
    pub name:   String,
    /// Parameter names, without the leading `:`.
    pub params: Vec<String>,
    /// Instructions run on each call.
    pub body:   Program,
    /// Frame the definition was evaluated in.
    pub env:    Env,
}

impl Context {
    /// Evaluates a call to a primitive or user-defined procedure.
    ///
    /// The name is resolved first, so an unknown command fails before any of
    /// its inputs are evaluated. Inputs are evaluated left to right in the
    /// caller's frame.
    ///
    /// # Errors
    /// - `UnknownProcedure` if nothing is bound to `name`.
    /// - `NoOutput` if an input is a call that produced no value.
    /// - Any error raised by the inputs or by the callee.
    pub(crate) fn eval_procedure_call(&mut self,
                                      name: &str,
                                      arguments: &[Node],
                                      env: &Env,
                                      line: usize)
                                      -> EvalResult<Flow> {
        let callable = self.registry.resolve_procedure(name, line)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(propagate!(self.eval_input(argument, env, name)?));
        }

        match callable {
            Callable::Primitive(def) => self.call_primitive(def, env, &args, line),
            Callable::Procedure(procedure) => {
                Ok(Flow::Value(self.call_procedure(&procedure, args, line)?))
            },
        }
    }

    /// Runs a user-defined procedure with already evaluated inputs.
    ///
    /// Parameters are bound positionally in a new frame. Extra inputs are
    /// dropped and missing ones are bound to [`Value::Absent`]. `output`
    /// inside the body becomes the value of the call; `stop` or running off
    /// the end gives no value.
    ///
    /// # Errors
    /// `RecursionLimit` when calls nest too deeply, or any error raised by
    /// the body.
    pub(crate) fn call_procedure(&mut self,
                                 procedure: &Procedure,
                                 args: Vec<Value>,
                                 line: usize)
                                 -> EvalResult<Value> {
        self.enter_frame(line)?;

        let frame = Environment::extend(&procedure.env);
        let mut args = args.into_iter();
        for param in &procedure.params {
            frame.define(param, args.next().unwrap_or(Value::Absent));
        }

        tracing::trace!(name = %procedure.name, "calling procedure");
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
                         self.execute(&procedure.body, &frame, false)
                     });
        self.leave_frame();

        match result? {
            Flow::Output(value) => Ok(value),
            Flow::Stop | Flow::Value(_) => Ok(Value::Absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::RuntimeError,
        interpreter::{evaluator::core::Context, value::core::Value},
    };

    fn context() -> Context {
        Context::new().with_output(std::io::sink())
    }

    #[test]
    fn output_becomes_the_call_value() {
        let mut context = context();
        context.run_source("to double :n\noutput :n * 2\nend\nmake \"r double 5")
               .unwrap();
        assert_eq!(context.global_env().lookup("r"), Some(Value::Number(10.0)));
    }

    #[test]
    fn missing_inputs_are_absent_and_extra_inputs_ignored() {
        let mut context = context();
        context.run_source("to pair :a :b\nmake \"got :b\nend\n(pair 1)").unwrap();
        assert_eq!(context.global_env().lookup("got"), Some(Value::Absent));

        context.run_source("(pair 1 2 3)").unwrap();
        assert_eq!(context.global_env().lookup("got"), Some(Value::Number(2.0)));
    }

    #[test]
    fn stop_ends_the_procedure_early() {
        let mut context = context();
        context.run_source("to early\nmake \"x 1\nstop\nmake \"x 2\nend\nearly").unwrap();
        assert_eq!(context.global_env().lookup("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn parameters_do_not_leak_into_the_global_frame() {
        let mut context = context();
        context.run_source("to f :secret\nmake \"seen :secret\nend\nf 7").unwrap();
        assert_eq!(context.global_env().lookup("seen"), Some(Value::Number(7.0)));
        assert_eq!(context.global_env().lookup("secret"), None);
    }

    #[test]
    fn depth_is_restored_after_an_error() {
        let mut context = context();
        let err = context.run_source("to bad\noutput :nope\nend\nprint bad").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "nope"));
        assert!(!context.in_procedure());
    }
}
