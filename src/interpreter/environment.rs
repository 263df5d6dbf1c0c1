use crate::interpreter::error::InterpreterError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

struct Frame {
    variables: RefCell<HashMap<String, Value>>,
    constants: RefCell<HashSet<String>>,
    parent: Option<Environment>,
}

/// One lexical scope and, through its parent link, every scope enclosing it.
///
/// Cloning is cheap and yields a handle to the same frame, which is how
/// closures keep their declaring scope alive.
#[derive(Clone)]
pub struct Environment {
    frame: Rc<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self::from_parent(None)
    }

    pub fn with_parent(parent: &Environment) -> Self {
        Self::from_parent(Some(parent.clone()))
    }

    fn from_parent(parent: Option<Environment>) -> Self {
        Self {
            frame: Rc::new(Frame {
                variables: RefCell::new(HashMap::new()),
                constants: RefCell::new(HashSet::new()),
                parent,
            }),
        }
    }

    pub fn parent(&self) -> Option<&Environment> {
        self.frame.parent.as_ref()
    }

    /// Binds `name` in this frame. Names in enclosing frames may be shadowed.
    pub fn declare(&self, name: &str, value: Value, constant: bool) -> Result<Value, InterpreterError> {
        let mut variables = self.frame.variables.borrow_mut();
        if variables.contains_key(name) {
            return Err(InterpreterError::duplicate_declaration(name));
        }
        variables.insert(name.to_string(), value.clone());
        if constant {
            self.frame.constants.borrow_mut().insert(name.to_string());
        }
        tracing::trace!(name, constant, "declared variable");
        Ok(value)
    }

    /// Binds `name` as a constant in this frame, replacing any earlier binding.
    pub fn define_constant(&self, name: &str, value: Value) {
        self.frame.variables.borrow_mut().insert(name.to_string(), value);
        self.frame.constants.borrow_mut().insert(name.to_string());
    }

    /// Whether this frame, ignoring its parents, binds `name`.
    pub fn is_declared_locally(&self, name: &str) -> bool {
        self.frame.variables.borrow().contains_key(name)
    }

    /// Rebinds `name` in the innermost frame that defines it.
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, InterpreterError> {
        let env = self.resolve(name)?;
        if env.frame.constants.borrow().contains(name) {
            return Err(InterpreterError::constant_reassignment(name));
        }
        env.frame
            .variables
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }

    pub fn lookup(&self, name: &str) -> Result<Value, InterpreterError> {
        let env = self.resolve(name)?;
        let variables = env.frame.variables.borrow();
        variables
            .get(name)
            .cloned()
            .ok_or_else(|| InterpreterError::unknown_variable(name))
    }

    /// The innermost frame, starting at this one, that defines `name`.
    pub fn resolve(&self, name: &str) -> Result<Environment, InterpreterError> {
        let mut current = self;
        loop {
            if current.frame.variables.borrow().contains_key(name) {
                return Ok(current.clone());
            }
            match &current.frame.parent {
                Some(parent) => current = parent,
                None => return Err(InterpreterError::unknown_variable(name)),
            }
        }
    }

    /// Whether `name` is a constant of this frame (enclosing frames are not consulted).
    pub fn is_constant(&self, name: &str) -> bool {
        self.frame.constants.borrow().contains(name)
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }

    /// Names bound in this frame, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frame.variables.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Frames reach themselves through closures stored in them, so only names are printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &depth)
            .finish()
    }
}
