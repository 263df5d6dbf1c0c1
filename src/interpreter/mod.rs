//! Parsing and evaluation of JistScript programs.

pub mod builtins;
pub mod control_flow;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use builtins::{
    create_root_environment, create_root_environment_with_state, StateStore, StateTypeInfo,
};
pub use control_flow::ControlFlow;
pub use environment::Environment;
pub use error::InterpreterError;
pub use evaluator::{
    evaluate, parse_and_run, parse_and_run_with_diagnostics, Evaluation, Interpreter,
};
pub use parser::{parse, ParseError, TokenParser};
