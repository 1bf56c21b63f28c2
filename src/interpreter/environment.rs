use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Shared handle to a scope.
pub type Env = Rc<Environment>;

/// One frame of the variable scope chain.
///
/// The root frame holds the global variables. Every procedure call extends
/// the procedure's defining frame with a child that holds its parameters, and
/// drops it when the call returns.
///
/// Lookups walk outward from the current frame, but `make` always writes to
/// the root, so every variable that is not a parameter is global.
#[derive(Debug, Default)]
pub struct Environment {
    vars:   RefCell<HashMap<String, Value>>,
    parent: Option<Env>,
}

impl Environment {
    /// Creates a root frame with no variables.
    #[must_use]
    pub fn new_root() -> Env {
        Rc::new(Self::default())
    }

    /// Creates a child frame of `parent`.
    #[must_use]
    pub fn extend(parent: &Env) -> Env {
        Rc::new(Self { vars:   RefCell::new(HashMap::new()),
                       parent: Some(Rc::clone(parent)), })
    }

    /// Finds the innermost binding of `name`, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let name = name.to_lowercase();
        let mut scope = self;
        loop {
            if let Some(value) = scope.vars.borrow().get(&name) {
                return Some(value.clone());
            }
            match &scope.parent {
                Some(parent) => scope = parent,
                None => return None,
            }
        }
    }

    /// Reads `name`, failing if no frame binds it.
    ///
    /// # Errors
    /// `RuntimeError::UndefinedVariable` when the name is unbound.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::new_root();
    /// global.set("size", Value::Number(10.0));
    ///
    /// let frame = Environment::extend(&global);
    /// assert_eq!(frame.get("SIZE", 1).unwrap(), Value::Number(10.0));
    /// assert!(frame.get("missing", 1).is_err());
    /// ```
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Binds `name` in the root frame, whatever frame it is called on.
    pub fn set(&self, name: &str, value: Value) {
        self.root().define(name, value);
    }

    /// Binds `name` in this frame only.
    pub fn define(&self, name: &str, value: Value) {
        self.vars.borrow_mut().insert(name.to_lowercase(), value);
    }

    /// The outermost frame of the chain.
    #[must_use]
    pub fn root(&self) -> &Self {
        let mut scope = self;
        while let Some(parent) = &scope.parent {
            scope = parent;
        }
        scope
    }

    /// Returns `true` for the global frame.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
