pub mod ast;
pub mod cli;
pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod token;
pub mod value;

pub use ast::{Expr, Program, Stmt};
pub use diagnostic::Diagnostic;
pub use interpreter::{
    create_root_environment, evaluate, parse, parse_and_run, parse_and_run_with_diagnostics,
    Environment, Evaluation, Interpreter, InterpreterError, ParseError,
};
pub use lexer::tokenize;
pub use token::Token;
pub use value::Value;
