use std::{
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    ast::{ConditionalKind, Node, Program},
    error::RuntimeError,
    interpreter::{
        environment::{Env, Environment},
        evaluator::procedure::Procedure,
        lexer::tokenize,
        parser::core::parse,
        registry::{Arity, Callable, Registry},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Deepest nesting of procedure calls before evaluation gives up.
pub const MAX_CALL_DEPTH: usize = 200;

/// Directory `load` reads scripts from unless configured otherwise.
pub const DEFAULT_CORPUS_DIR: &str = "tests/scripts";

/// The outcome of evaluating a node.
///
/// `output` and `stop` end the current procedure early. They travel up
/// through instruction lists and loops as `Output` and `Stop` until the
/// enclosing procedure call turns them back into an ordinary value, so they
/// never share a channel with errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Normal completion with a value (possibly [`Value::Absent`]).
    Value(Value),
    /// `output` was called with this value.
    Output(Value),
    /// `stop` was called.
    Stop,
}

/// Unwraps a [`Flow::Value`], or returns any other flow from the enclosing
/// function.
macro_rules! propagate {
    ($flow:expr) => {
        match $flow {
            $crate::interpreter::evaluator::core::Flow::Value(value) => value,
            signal => return Ok(signal),
        }
    };
}
pub(crate) use propagate;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the command registry shared with
/// the parser, the global variable frame, the sink that `print` and friends
/// write to, and the directory `load` reads from.
///
/// ## Usage
///
/// A `Context` is created once and reused for every piece of source text, so
/// procedures and global variables persist between calls to
/// [`Context::run_source`].
pub struct Context {
    /// Command arities and callables.
    pub registry: Registry,
    global:       Env,
    out:          Box<dyn Write>,
    corpus_dir:   PathBuf,
    depth:        usize,
    max_depth:    usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with every primitive registered, no user variables,
    /// and output going to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self { registry:   Registry::with_primitives(),
               global:     Environment::new_root(),
               out:        Box::new(std::io::stdout()),
               corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
               depth:      0,
               max_depth:  MAX_CALL_DEPTH, }
    }

    /// Sends everything the program writes to `out` instead of standard
    /// output.
    #[must_use]
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Sets the directory `load` reads scripts from.
    #[must_use]
    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = dir.into();
        self
    }

    /// Sets how deeply procedure calls may nest.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// The global variable frame.
    #[must_use]
    pub fn global_env(&self) -> Env {
        Rc::clone(&self.global)
    }

    /// The directory `load` reads scripts from.
    #[must_use]
    pub fn corpus_dir(&self) -> &Path {
        &self.corpus_dir
    }

    /// Writes `text` to the output sink.
    pub fn write_output(&mut self, text: &str, line: usize) -> EvalResult<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                line })
    }

    /// Tokenizes, parses and runs `source` in the global frame.
    ///
    /// Every instruction must be a command: a value left over at top level
    /// is an error, and so is `output` or `stop` outside a procedure.
    ///
    /// # Errors
    /// Any lexing, parsing or runtime error, wrapped in `RuntimeError`.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new().with_output(std::io::sink());
    /// context.run_source("make \"x 2 + 3").unwrap();
    ///
    /// assert_eq!(context.global_env().lookup("x"), Some(Value::Number(5.0)));
    /// assert!(context.run_source("1 + 2").is_err());
    /// ```
    pub fn run_source(&mut self, source: &str) -> EvalResult<()> {
        let global = self.global_env();
        match self.run_text(source, &global, false)? {
            Flow::Value(_) => Ok(()),
            Flow::Output(_) => Err(RuntimeError::OutsideProcedure { name: "output".to_string(),
                                                                    line: 0, }),
            Flow::Stop => Err(RuntimeError::OutsideProcedure { name: "stop".to_string(),
                                                               line: 0, }),
        }
    }

    /// Tokenizes, parses and evaluates `source` in the global frame,
    /// returning the list of values its instructions produced.
    ///
    /// Unlike [`Context::run_source`], leftover values are collected rather
    /// than rejected.
    ///
    /// # Errors
    /// Any lexing, parsing or runtime error, wrapped in `RuntimeError`.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new();
    ///
    /// assert_eq!(context.evaluate("1 + 2 + 3").unwrap(),
    ///            Value::from(vec![Value::Number(6.0)]));
    /// ```
    pub fn evaluate(&mut self, source: &str) -> EvalResult<Value> {
        let tokens = tokenize(source)?;
        let program = parse(&tokens, &mut self.registry)?;
        let global = self.global_env();
        match self.eval_program(&program, &global)? {
            Flow::Value(value) => Ok(value),
            Flow::Output(_) => Err(RuntimeError::OutsideProcedure { name: "output".to_string(),
                                                                    line: 0, }),
            Flow::Stop => Err(RuntimeError::OutsideProcedure { name: "stop".to_string(),
                                                               line: 0, }),
        }
    }

    /// Evaluates a node and returns the resulting flow.
    ///
    /// This is the main entry point for evaluation. The evaluator dispatches
    /// on the node variant: literals, variables, infix operations, lists,
    /// procedure definitions and calls, and conditionals.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `env`: Frame that variable reads start from.
    pub fn eval(&mut self, node: &Node, env: &Env) -> EvalResult<Flow> {
        match node {
            Node::NumberLiteral { value, .. } => Ok(Flow::Value(Value::Number(*value))),
            Node::StringLiteral { value, .. } => Ok(Flow::Value(Value::Word(value.clone()))),
            Node::Boolean { value, .. } => Ok(Flow::Value(Value::Bool(*value))),
            Node::Variable { name, line } => Ok(Flow::Value(env.get(name, *line)?)),
            Node::List { elements, .. } => Ok(Flow::Value(list_value(elements))),
            Node::InfixOperation { op,
                                   left,
                                   right,
                                   line, } => {
                let consumer = op.to_string();
                let left = propagate!(self.eval_input(left, env, &consumer)?);
                let right = propagate!(self.eval_input(right, env, &consumer)?);
                Ok(Flow::Value(Self::eval_binary(*op, &left, &right, *line)?))
            },
            Node::ProcedureDefinition(def) => {
                let procedure = Procedure { name:   def.name.clone(),
                                            params: def.params.clone(),
                                            body:   def.body.clone(),
                                            env:    Rc::clone(env), };
                self.registry.register(&def.name, Arity::Fixed(def.params.len()));
                self.registry
                    .register_procedure(&def.name, Callable::Procedure(Rc::new(procedure)));
                tracing::debug!(name = %def.name, "defined procedure");
                Ok(Flow::Value(Value::Absent))
            },
            Node::ProcedureCall { name,
                                  arguments,
                                  line, } => self.eval_procedure_call(name, arguments, env, *line),
            Node::Conditional { kind,
                                condition,
                                then_branch,
                                else_branch,
                                line, } => self.eval_conditional(*kind,
                                                                 condition,
                                                                 then_branch,
                                                                 else_branch.as_deref(),
                                                                 env,
                                                                 *line),
        }
    }

    /// Evaluates a program, collecting the value of every instruction that
    /// produced one.
    ///
    /// `output` and `stop` end the program early and are returned as-is.
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> EvalResult<Flow> {
        let mut results = Vec::new();
        for node in &program.body {
            let value = propagate!(self.eval(node, env)?);
            if !value.is_absent() {
                results.push(value);
            }
        }
        Ok(Flow::Value(Value::from(results)))
    }

    /// Runs a program as a sequence of instructions.
    ///
    /// Used for procedure bodies, top-level scripts and loop bodies. Every
    /// instruction must be a command; a leftover value is reported as
    /// `UnconsumedValue`. With `keep_last`, the value of the final
    /// instruction is returned instead, which is how `run` and `if` act as
    /// operations.
    ///
    /// # Errors
    /// `UnconsumedValue` for a value nothing consumed, or any error raised
    /// while evaluating an instruction.
    pub fn execute(&mut self, program: &Program, env: &Env, keep_last: bool) -> EvalResult<Flow> {
        let count = program.body.len();
        for (index, node) in program.body.iter().enumerate() {
            let value = propagate!(self.eval(node, env)?);
            if keep_last && index + 1 == count {
                return Ok(Flow::Value(value));
            }
            if !value.is_absent() {
                return Err(RuntimeError::UnconsumedValue { value: value.to_string(),
                                                           line:  node.line_number(), });
            }
        }
        Ok(Flow::Value(Value::Absent))
    }

    /// Tokenizes, parses and runs `text` in `env`.
    ///
    /// This is the re-entrant step behind `run`, `repeat`, `if`, `foreach`
    /// and `load`: each call starts from fresh text, so nested runs share no
    /// parser state.
    pub fn run_text(&mut self, text: &str, env: &Env, keep_last: bool) -> EvalResult<Flow> {
        let tokens = tokenize(text)?;
        let program = parse(&tokens, &mut self.registry)?;
        tracing::trace!(text, instructions = program.body.len(), "running instructions");
        self.execute(&program, env, keep_last)
    }

    /// Evaluates a node used as an input to `consumer`.
    ///
    /// A procedure call that finishes without outputting anything cannot be
    /// an input, and is reported as `NoOutput`.
    pub(crate) fn eval_input(&mut self,
                             node: &Node,
                             env: &Env,
                             consumer: &str)
                             -> EvalResult<Flow> {
        let flow = self.eval(node, env)?;
        if let (Flow::Value(Value::Absent), Node::ProcedureCall { name, line, .. }) = (&flow, node) {
            return Err(RuntimeError::NoOutput { name:     name.clone(),
                                                consumer: consumer.to_string(),
                                                line:     *line, });
        }
        Ok(flow)
    }

    /// Evaluates the condition of an `if`/`ifelse` and then only the chosen
    /// branch.
    ///
    /// A branch that evaluates to a list is run as instructions, and the
    /// value of its last instruction becomes the value of the conditional.
    fn eval_conditional(&mut self,
                        kind: ConditionalKind,
                        condition: &Node,
                        then_branch: &Node,
                        else_branch: Option<&Node>,
                        env: &Env,
                        line: usize)
                        -> EvalResult<Flow> {
        let keyword = kind.to_string();
        let condition = propagate!(self.eval_input(condition, env, &keyword)?);

        let branch = if condition.as_bool(&keyword, line)? {
            then_branch
        } else if let Some(else_branch) = else_branch {
            else_branch
        } else {
            return Ok(Flow::Value(Value::Absent));
        };

        match propagate!(self.eval(branch, env)?) {
            instructions @ Value::List(_) => self.run_instructions(&instructions, env, true),
            value => Ok(Flow::Value(value)),
        }
    }

    /// Enters a procedure frame, failing when calls are nested too deeply.
    pub(crate) fn enter_frame(&mut self, line: usize) -> EvalResult<()> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::RecursionLimit { depth: self.max_depth,
                                                      line });
        }
        self.depth += 1;
        Ok(())
    }

    /// Returns `true` while a procedure body is running.
    #[must_use]
    pub const fn in_procedure(&self) -> bool {
        self.depth > 0
    }

    /// Leaves the frame entered by [`Context::enter_frame`].
    pub(crate) const fn leave_frame(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Turns the elements of a list node into a list value without evaluating
/// anything.
fn list_value(elements: &[Node]) -> Value {
    Value::from(elements.iter()
                        .map(|element| match element {
                            Node::List { elements, .. } => list_value(elements),
                            Node::StringLiteral { value, .. } => Value::Word(value.clone()),
                            // The parser only puts words and lists inside a list.
                            _ => Value::Absent,
                        })
                        .collect::<Vec<_>>())
}
