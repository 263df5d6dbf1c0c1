use crate::value::Value;

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    Completed(Value),
    /// A `return` is unwinding to the nearest function call.
    Return(Value),
}

impl ControlFlow {
    pub fn into_value(self) -> Value {
        match self {
            ControlFlow::Completed(value) | ControlFlow::Return(value) => value,
        }
    }
}
