use std::{collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{
        core::EvalResult,
        primitive::core::{ALIASES, PRIMITIVE_TABLE, PrimitiveDef, SPECIAL_FORMS},
        procedure::Procedure,
    },
};

/// How many inputs a command consumes when written without parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many expressions follow the command name.
    Fixed(usize),
    /// The parser handles the form itself (`if`, `ifelse`).
    Special,
}

/// Something a procedure call can resolve to.
#[derive(Debug, Clone)]
pub enum Callable {
    /// A built-in primitive from the static table.
    Primitive(&'static PrimitiveDef),
    /// A procedure defined with `to ... end`.
    Procedure(Rc<Procedure>),
}

/// The shared table of command names.
///
/// The parser consults the arities to know how many expressions each command
/// consumes; the evaluator resolves names to callables. All names are stored
/// lowercased. Entries are only ever added or replaced, never removed.
#[derive(Debug, Default)]
pub struct Registry {
    arities:    HashMap<String, Arity>,
    procedures: HashMap<String, Callable>,
}

impl Registry {
    /// Creates an empty registry with no commands at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with every primitive, alias and special
    /// form.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::registry::{Arity, Registry};
    ///
    /// let registry = Registry::with_primitives();
    ///
    /// assert_eq!(registry.lookup_arity("PRINT"), Some(Arity::Fixed(1)));
    /// assert_eq!(registry.lookup_arity("se"), Some(Arity::Fixed(2)));
    /// assert_eq!(registry.lookup_arity("ifelse"), Some(Arity::Special));
    /// assert_eq!(registry.lookup_arity("square"), None);
    /// ```
    #[must_use]
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();

        for def in PRIMITIVE_TABLE {
            registry.register(def.name, def.arity);
            registry.register_procedure(def.name, Callable::Primitive(def));
        }
        for (alias, target) in ALIASES {
            if let Some(def) = PRIMITIVE_TABLE.iter().find(|def| def.name == *target) {
                registry.register(alias, def.arity);
                registry.register_procedure(alias, Callable::Primitive(def));
            }
        }
        for form in SPECIAL_FORMS {
            registry.register(form, Arity::Special);
        }

        tracing::debug!(commands = registry.arities.len(), "registry seeded");
        registry
    }

    /// Records how many inputs `name` consumes.
    pub fn register(&mut self, name: &str, arity: Arity) {
        self.arities.insert(name.to_lowercase(), arity);
    }

    /// Looks up the arity of `name`, ignoring case.
    #[must_use]
    pub fn lookup_arity(&self, name: &str) -> Option<Arity> {
        self.arities.get(&name.to_lowercase()).copied()
    }

    /// Binds `name` to a callable, replacing any previous binding.
    pub fn register_procedure(&mut self, name: &str, callable: Callable) {
        self.procedures.insert(name.to_lowercase(), callable);
    }

    /// Resolves `name` to its callable, ignoring case.
    ///
    /// # Errors
    /// `RuntimeError::UnknownProcedure` when nothing is bound to `name`.
    pub fn resolve_procedure(&self, name: &str, line: usize) -> EvalResult<Callable> {
        self.procedures
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownProcedure { name: name.to_string(),
                                                            line })
    }

    /// Returns `true` if `name` is a built-in primitive, an alias of one, or a
    /// special form.
    #[must_use]
    pub fn is_primitive(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        matches!(self.procedures.get(&name), Some(Callable::Primitive(_)))
        || matches!(self.arities.get(&name), Some(Arity::Special))
    }
}
