use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterError {
    DuplicateDeclaration { name: String },
    UnknownVariable { name: String },
    ConstantReassignment { name: String },
    InvalidAssignmentTarget { target: String },
    DestructuringArity { expected: usize, found: usize },
    NotDestructurable { type_name: &'static str },
    NotCallable { type_name: &'static str },
    NativeError { function: String, message: String },
}

impl InterpreterError {
    pub fn duplicate_declaration(name: impl Into<String>) -> Self {
        Self::DuplicateDeclaration { name: name.into() }
    }

    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    pub fn constant_reassignment(name: impl Into<String>) -> Self {
        Self::ConstantReassignment { name: name.into() }
    }

    pub fn native(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NativeError {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateDeclaration { .. } => "E0201",
            Self::UnknownVariable { .. } => "E0202",
            Self::ConstantReassignment { .. } => "E0203",
            Self::InvalidAssignmentTarget { .. } => "E0204",
            Self::DestructuringArity { .. } => "E0205",
            Self::NotDestructurable { .. } => "E0206",
            Self::NotCallable { .. } => "E0207",
            Self::NativeError { .. } => "E0208",
        }
    }

    /// Convert to a diagnostic for pretty printing
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_code(self.code());
        match self {
            Self::DuplicateDeclaration { name } => {
                diag.with_help(format!("assign to `{}` instead of declaring it again", name))
            }
            Self::ConstantReassignment { .. } => {
                diag.with_help("declare the variable with `let` to allow reassignment")
            }
            Self::InvalidAssignmentTarget { .. } => {
                diag.with_note("only plain variable names can be assigned to")
            }
            Self::DestructuringArity { expected, .. } => diag.with_help(format!(
                "the array must hold at least {} element{}",
                expected,
                if *expected == 1 { "" } else { "s" }
            )),
            _ => diag,
        }
    }
}

impl std::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpreterError::DuplicateDeclaration { name } => {
                write!(f, "cannot declare `{}`: it is already declared in this scope", name)
            }
            InterpreterError::UnknownVariable { name } => {
                write!(f, "cannot resolve `{}`: it does not exist", name)
            }
            InterpreterError::ConstantReassignment { name } => {
                write!(f, "cannot reassign `{}`: it was declared constant", name)
            }
            InterpreterError::InvalidAssignmentTarget { target } => {
                write!(f, "invalid assignment target: {}", target)
            }
            InterpreterError::DestructuringArity { expected, found } => write!(
                f,
                "cannot destructure {} element{} from an array of length {}",
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            InterpreterError::NotDestructurable { type_name } => {
                write!(f, "cannot destructure a value of type {}: expected an array", type_name)
            }
            InterpreterError::NotCallable { type_name } => {
                write!(f, "value of type {} is not a function", type_name)
            }
            InterpreterError::NativeError { function, message } => {
                write!(f, "{}: {}", function, message)
            }
        }
    }
}

impl std::error::Error for InterpreterError {}
