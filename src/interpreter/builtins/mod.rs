//! Native functions and constants bound in the root environment.
//!
//! - **IO**: `mark`, which prints its arguments
//! - **State**: `useState` and the setters it hands out
//! - **Types**: the advisory type check applied to state values

mod io;
mod state;
mod types;

pub use io::*;
pub use state::*;
pub use types::*;

use super::environment::Environment;
use crate::value::Value;
use std::rc::Rc;

macro_rules! require_args {
    ($args:expr, $n:expr, $name:expr, $what:expr) => {
        if $args.len() < $n {
            return Err(InterpreterError::native($name, $what));
        }
    };
}

pub(crate) use require_args;

/// A fresh root scope with the constants and natives every program can see.
pub fn create_root_environment() -> Environment {
    create_root_environment_with_state(Rc::new(StateStore::new()))
}

/// Like [`create_root_environment`], with `useState` slots kept in `store`.
pub fn create_root_environment_with_state(store: Rc<StateStore>) -> Environment {
    let env = Environment::new();

    let bindings = [
        ("null", Value::Null),
        ("true", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("undefined", Value::Undefined),
        ("mark", Value::native("mark", builtin_mark)),
        (
            "useState",
            Value::native("useState", move |args, descriptor, sink| {
                builtin_use_state(&store, args, descriptor, sink)
            }),
        ),
    ];

    for (name, value) in bindings {
        env.define_constant(name, value);
    }

    env
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_constants() {
        let env = create_root_environment();
        assert_eq!(env.lookup("true"), Ok(Value::Bool(true)));
        assert_eq!(env.lookup("undefined"), Ok(Value::Undefined));
        assert!(env.lookup("mark").unwrap().is_callable());
        assert!(env.lookup("useState").unwrap().is_callable());
        for name in ["null", "true", "false", "undefined", "mark", "useState"] {
            assert!(env.is_constant(name), "{} should be constant", name);
        }
    }

    #[test]
    fn test_root_environments_are_independent() {
        let first = create_root_environment();
        let second = create_root_environment();
        assert_ne!(first.lookup("useState"), second.lookup("useState"));
    }
}
