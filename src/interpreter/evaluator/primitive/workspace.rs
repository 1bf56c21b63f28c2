use std::path::PathBuf;

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

/// Extension added to `load` names that have none.
pub const SCRIPT_EXTENSION: &str = "logo";

/// `make "name value` binds a variable in the global frame, even when called
/// from inside a procedure.
pub fn make(_ctx: &mut Context, env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let name = args[0].as_word("make", line)?;
    env.set(&name, args[1].clone());
    Ok(Flow::Value(Value::Absent))
}

/// `name value "name` is `make` with its inputs swapped.
pub fn name(_ctx: &mut Context, env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let name = args[1].as_word("name", line)?;
    env.set(&name, args[0].clone());
    Ok(Flow::Value(Value::Absent))
}

/// `thing "name` reads a variable, like `:name`.
pub fn thing(_ctx: &mut Context, env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let name = args[0].as_word("thing", line)?;
    Ok(Flow::Value(env.get(&name, line)?))
}

/// Reads a script from the corpus directory and runs it in the caller's
/// frame.
///
/// `load "shapes` reads `shapes.logo`; a name that already has an extension
/// is used as given.
///
/// # Errors
/// - `LoadFailed` if the file cannot be read.
/// - Any error raised while running the script.
pub fn load(ctx: &mut Context, env: &Env, args: &[Value], line: usize) -> EvalResult<Flow> {
    let name = args[0].as_word("load", line)?;
    let path = script_path(ctx, &name);

    let source = std::fs::read_to_string(&path).map_err(|e| {
                                                   RuntimeError::LoadFailed { path: path.display().to_string(),
                                                                              details: e.to_string(),
                                                                              line }
                                               })?;

    tracing::debug!(path = %path.display(), "loading script");
    ctx.run_text(&source, env, false)
}

fn script_path(ctx: &Context, name: &str) -> PathBuf {
    let mut path = ctx.corpus_dir().join(name);
    if path.extension().is_none() {
        path.set_extension(SCRIPT_EXTENSION);
    }
    path
}
