//! Output built-in functions.

use super::super::error::InterpreterError;
use crate::diagnostic::DiagnosticSink;
use crate::value::Value;

/// The line `mark` prints for `args`.
pub fn format_mark_line(args: &[Value]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn builtin_mark(
    args: &[Value],
    _descriptor: Option<&Value>,
    _sink: &mut dyn DiagnosticSink,
) -> Result<Value, InterpreterError> {
    use std::io::Write;
    println!("{}", format_mark_line(args));
    std::io::stdout().flush().ok();
    Ok(Value::Null)
}
