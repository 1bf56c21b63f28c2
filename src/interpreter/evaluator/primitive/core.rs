use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::{
            core::{Context, EvalResult, Flow},
            primitive::{arithmetic, communication, control, data, logic, workspace},
        },
        registry::Arity,
        value::core::Value,
    },
};

/// A primitive that only looks at its inputs.
///
/// Receives the evaluated inputs and the line number, and returns the
/// primitive's output ([`Value::Absent`] for commands).
pub type PureFn = fn(&[Value], usize) -> EvalResult<Value>;

/// A primitive that needs the interpreter: writing output, reading or
/// setting variables, or running instruction lists.
pub type ContextualFn = fn(&mut Context, &Env, &[Value], usize) -> EvalResult<Flow>;

/// How a primitive is implemented.
#[derive(Clone, Copy)]
pub enum Primitive {
    /// A function of the inputs alone.
    Pure(PureFn),
    /// A function of the interpreter, the caller's frame and the inputs.
    Contextual(ContextualFn),
    /// Known to the parser but not implemented. Calling it is an error.
    Unimplemented,
}

/// One entry of the primitive table.
pub struct PrimitiveDef {
    /// Lowercased primitive name.
    pub name:       &'static str,
    /// How many inputs the parser gives it without parentheses.
    pub arity:      Arity,
    /// The fewest inputs it accepts in a parenthesised call.
    pub min_inputs: usize,
    /// The implementation.
    pub func:       Primitive,
}

impl std::fmt::Debug for PrimitiveDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveDef")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .field("min_inputs", &self.min_inputs)
         .finish_non_exhaustive()
    }
}

/// Defines the primitive table.
///
/// Each entry provides:
/// - a string name,
/// - the default arity,
/// - the fewest inputs accepted,
/// - the implementation.
///
/// The macro produces `PRIMITIVE_TABLE`, the static table the registry is
/// seeded from.
macro_rules! primitives {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                min: $min:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static PRIMITIVE_TABLE: &[PrimitiveDef] = &[
            $(
                PrimitiveDef { name: $name, arity: Arity::Fixed($arity), min_inputs: $min, func: $func },
            )*
        ];
    };
}

use Primitive::{Contextual, Pure, Unimplemented};

primitives! {
    // Communication
    "print"        => { arity: 1, min: 0, func: Contextual(communication::print) },
    "show"         => { arity: 1, min: 0, func: Contextual(communication::show) },
    "type"         => { arity: 1, min: 0, func: Contextual(communication::type_fn) },

    // Variables and workspace
    "make"         => { arity: 2, min: 2, func: Contextual(workspace::make) },
    "name"         => { arity: 2, min: 2, func: Contextual(workspace::name) },
    "thing"        => { arity: 1, min: 1, func: Contextual(workspace::thing) },
    "load"         => { arity: 1, min: 1, func: Contextual(workspace::load) },

    // Constructors
    "word"         => { arity: 2, min: 0, func: Pure(data::word) },
    "list"         => { arity: 2, min: 0, func: Pure(data::list) },
    "sentence"     => { arity: 2, min: 0, func: Pure(data::sentence) },
    "fput"         => { arity: 2, min: 2, func: Pure(data::fput) },
    "lput"         => { arity: 2, min: 2, func: Pure(data::lput) },
    "combine"      => { arity: 2, min: 2, func: Pure(data::combine) },
    "reverse"      => { arity: 1, min: 1, func: Pure(data::reverse) },

    // Selectors
    "first"        => { arity: 1, min: 1, func: Pure(data::first) },
    "last"         => { arity: 1, min: 1, func: Pure(data::last) },
    "butfirst"     => { arity: 1, min: 1, func: Pure(data::butfirst) },
    "butlast"      => { arity: 1, min: 1, func: Pure(data::butlast) },
    "item"         => { arity: 2, min: 2, func: Pure(data::item) },
    "remdup"       => { arity: 1, min: 1, func: Pure(data::remdup) },

    // Predicates
    "wordp"        => { arity: 1, min: 1, func: Pure(data::wordp) },
    "listp"        => { arity: 1, min: 1, func: Pure(data::listp) },
    "emptyp"       => { arity: 1, min: 1, func: Pure(data::emptyp) },
    "equalp"       => { arity: 2, min: 2, func: Pure(data::equalp) },
    "notequalp"    => { arity: 2, min: 2, func: Pure(data::notequalp) },
    "beforep"      => { arity: 2, min: 2, func: Pure(data::beforep) },
    "memberp"      => { arity: 2, min: 2, func: Pure(data::memberp) },
    "substringp"   => { arity: 2, min: 2, func: Pure(data::substringp) },
    "numberp"      => { arity: 1, min: 1, func: Pure(data::numberp) },

    // Queries
    "count"        => { arity: 1, min: 1, func: Pure(data::count) },
    "ascii"        => { arity: 1, min: 1, func: Pure(data::ascii) },
    "char"         => { arity: 1, min: 1, func: Pure(data::char) },
    "member"       => { arity: 2, min: 2, func: Pure(data::member) },
    "lowercase"    => { arity: 1, min: 1, func: Pure(data::lowercase) },
    "uppercase"    => { arity: 1, min: 1, func: Pure(data::uppercase) },

    // Arithmetic
    "sum"          => { arity: 2, min: 0, func: Pure(arithmetic::sum) },
    "difference"   => { arity: 2, min: 2, func: Pure(arithmetic::difference) },
    "product"      => { arity: 2, min: 0, func: Pure(arithmetic::product) },
    "quotient"     => { arity: 2, min: 1, func: Pure(arithmetic::quotient) },
    "remainder"    => { arity: 2, min: 2, func: Pure(arithmetic::remainder) },
    "minus"        => { arity: 1, min: 1, func: Pure(arithmetic::minus) },
    "int"          => { arity: 1, min: 1, func: Pure(arithmetic::int) },
    "round"        => { arity: 1, min: 1, func: Pure(arithmetic::round) },
    "sqrt"         => { arity: 1, min: 1, func: Pure(arithmetic::sqrt) },

    // Bitwise
    "bitand"       => { arity: 2, min: 0, func: Pure(|args, line| arithmetic::bitwise("bitand", args, line)) },
    "bitor"        => { arity: 2, min: 0, func: Pure(|args, line| arithmetic::bitwise("bitor", args, line)) },
    "bitxor"       => { arity: 2, min: 0, func: Pure(|args, line| arithmetic::bitwise("bitxor", args, line)) },
    "bitnot"       => { arity: 1, min: 1, func: Pure(arithmetic::bitnot) },
    "ashift"       => { arity: 2, min: 2, func: Pure(arithmetic::ashift) },
    "lshift"       => { arity: 2, min: 2, func: Pure(arithmetic::lshift) },

    // Logic
    "and"          => { arity: 2, min: 0, func: Pure(logic::and) },
    "or"           => { arity: 2, min: 0, func: Pure(logic::or) },
    "not"          => { arity: 1, min: 1, func: Pure(logic::not) },

    // Control
    "run"          => { arity: 1, min: 1, func: Contextual(control::run) },
    "repeat"       => { arity: 2, min: 2, func: Contextual(control::repeat) },
    "foreach"      => { arity: 2, min: 2, func: Contextual(control::foreach) },
    "output"       => { arity: 1, min: 1, func: Contextual(control::output) },
    "stop"         => { arity: 0, min: 0, func: Contextual(control::stop) },
    "ignore"       => { arity: 1, min: 1, func: Pure(control::ignore) },

    // Known names without an implementation
    "array"        => { arity: 1, min: 1, func: Unimplemented },
    "mdarray"      => { arity: 1, min: 1, func: Unimplemented },
    "listtoarray"  => { arity: 1, min: 1, func: Unimplemented },
    "arraytolist"  => { arity: 1, min: 1, func: Unimplemented },
    "gensym"       => { arity: 0, min: 0, func: Unimplemented },
    "firsts"       => { arity: 1, min: 1, func: Unimplemented },
    "butfirsts"    => { arity: 1, min: 1, func: Unimplemented },
    "mditem"       => { arity: 2, min: 2, func: Unimplemented },
    "pick"         => { arity: 1, min: 1, func: Unimplemented },
    "remove"       => { arity: 2, min: 2, func: Unimplemented },
    "quoted"       => { arity: 1, min: 1, func: Unimplemented },
    "setitem"      => { arity: 3, min: 3, func: Unimplemented },
    "mdsetitem"    => { arity: 3, min: 3, func: Unimplemented },
    ".setfirst"    => { arity: 2, min: 2, func: Unimplemented },
    ".setbf"       => { arity: 2, min: 2, func: Unimplemented },
    ".setitem"     => { arity: 3, min: 3, func: Unimplemented },
    "push"         => { arity: 2, min: 2, func: Unimplemented },
    "pop"          => { arity: 1, min: 1, func: Unimplemented },
    "queue"        => { arity: 2, min: 2, func: Unimplemented },
    "dequeue"      => { arity: 1, min: 1, func: Unimplemented },
    "arrayp"       => { arity: 1, min: 1, func: Unimplemented },
    ".eq"          => { arity: 2, min: 2, func: Unimplemented },
    "vbarredp"     => { arity: 1, min: 1, func: Unimplemented },
    "backslashedp" => { arity: 1, min: 1, func: Unimplemented },
    "rawascii"     => { arity: 1, min: 1, func: Unimplemented },
    "standout"     => { arity: 1, min: 1, func: Unimplemented },
    "parse"        => { arity: 1, min: 1, func: Unimplemented },
    "runparse"     => { arity: 1, min: 1, func: Unimplemented },
}

/// Extra names for primitives, as `(alias, primitive)` pairs.
pub static ALIASES: &[(&str, &str)] = &[("pr", "print"),
                                        ("se", "sentence"),
                                        ("bf", "butfirst"),
                                        ("bl", "butlast"),
                                        ("op", "output"),
                                        ("word?", "wordp"),
                                        ("list?", "listp"),
                                        ("empty?", "emptyp"),
                                        ("equal?", "equalp"),
                                        ("notequal?", "notequalp"),
                                        ("before?", "beforep"),
                                        ("member?", "memberp"),
                                        ("substring?", "substringp"),
                                        ("number?", "numberp")];

/// Names the parser handles itself rather than through the table.
pub const SPECIAL_FORMS: &[&str] = &["if", "ifelse"];

impl Context {
    /// Calls a primitive with already evaluated inputs.
    ///
    /// The input count is checked against the primitive's minimum before the
    /// implementation runs, so implementations may index their first
    /// `min_inputs` inputs directly.
    ///
    /// # Errors
    /// - `NotEnoughInputs` if fewer inputs than the minimum were given.
    /// - `Unimplemented` for placeholder primitives.
    /// - Any error raised by the implementation.
    pub(crate) fn call_primitive(&mut self,
                                 def: &PrimitiveDef,
                                 env: &Env,
                                 args: &[Value],
                                 line: usize)
                                 -> EvalResult<Flow> {
        if args.len() < def.min_inputs {
            return Err(RuntimeError::NotEnoughInputs { name: def.name.to_string(),
                                                       line });
        }

        match def.func {
            Pure(func) => Ok(Flow::Value(func(args, line)?)),
            Contextual(func) => func(self, env, args, line),
            Unimplemented => Err(RuntimeError::Unimplemented { name: def.name.to_string(),
                                                               line }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for def in PRIMITIVE_TABLE {
            assert!(seen.insert(def.name), "{} is listed twice", def.name);
            assert_eq!(def.name, def.name.to_lowercase());
        }
    }

    #[test]
    fn every_alias_names_a_primitive() {
        for (alias, target) in ALIASES {
            assert!(PRIMITIVE_TABLE.iter().any(|def| def.name == *target),
                    "{alias} points at missing {target}");
        }
    }

    #[test]
    fn minimum_never_exceeds_arity() {
        for def in PRIMITIVE_TABLE {
            let Arity::Fixed(arity) = def.arity else {
                panic!("{} should have a fixed arity", def.name);
            };
            assert!(def.min_inputs <= arity, "{}", def.name);
        }
    }

    #[test]
    fn too_few_inputs_is_an_error() {
        let mut context = Context::new().with_output(std::io::sink());
        let err = context.run_source("make \"x (fput 1)").unwrap_err();
        assert_eq!(err,
                   RuntimeError::NotEnoughInputs { name: "fput".to_string(),
                                                   line: 1, });
    }

    #[test]
    fn placeholders_parse_but_fail_when_called() {
        let mut context = Context::new().with_output(std::io::sink());
        let err = context.run_source("print gensym").unwrap_err();
        assert_eq!(err,
                   RuntimeError::Unimplemented { name: "gensym".to_string(),
                                                 line: 1, });
    }

    #[test]
    fn variadic_call_takes_every_input() {
        let mut context = Context::new();
        assert_eq!(context.evaluate("(sum 1 2 3 4)").unwrap(),
                   Value::from(vec![Value::Number(10.0)]));
    }
}
