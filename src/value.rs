use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::ast::FunctionDeclaration;
use crate::diagnostic::DiagnosticSink;
use crate::interpreter::{Environment, InterpreterError};

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Undefined,
    Number(f64),
    Bool(bool),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<IndexMap<String, Value>>>),
    Function(Rc<Function>),
    NativeFunction(Rc<NativeFunction>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(left_bool), Value::Bool(right_bool)) => left_bool == right_bool,
            (Value::Number(left_num), Value::Number(right_num)) => left_num == right_num,
            (Value::String(left_str), Value::String(right_str)) => left_str == right_str,
            (Value::Array(left_arr), Value::Array(right_arr)) => left_arr == right_arr,
            (Value::Object(left_obj), Value::Object(right_obj)) => left_obj == right_obj,
            (Value::Function(left_fn), Value::Function(right_fn)) => Rc::ptr_eq(left_fn, right_fn),
            (Value::NativeFunction(left_fn), Value::NativeFunction(right_fn)) => {
                Rc::ptr_eq(left_fn, right_fn)
            }
            _ => false,
        }
    }
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::String(Rc::from(s))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(entries: IndexMap<String, Value>) -> Self {
        Value::Object(Rc::new(RefCell::new(entries)))
    }

    pub fn native(
        name: &str,
        func: impl Fn(&[Value], Option<&Value>, &mut dyn DiagnosticSink) -> Result<Value, InterpreterError>
            + 'static,
    ) -> Self {
        Value::NativeFunction(Rc::new(NativeFunction {
            name: Rc::from(name),
            func: Box::new(func),
        }))
    }

    pub fn as_object(&self) -> Option<Ref<'_, IndexMap<String, Value>>> {
        if let Value::Object(object) = self {
            Some(object.borrow())
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<Ref<'_, Vec<Value>>> {
        if let Value::Array(array) = self {
            Some(array.borrow())
        } else {
            None
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Value::Number(numeric_value) = self {
            Some(*numeric_value)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(string_ref) = self {
            Some(string_ref.as_ref())
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(bool_value) = self {
            Some(*bool_value)
        } else {
            None
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::NativeFunction(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) | Value::NativeFunction(_) => "function",
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            other => write!(f, "{}", other),
        }
    }
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Undefined => write!(f, "undefined"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Object(entries) => {
                let entries = entries.borrow();
                if entries.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", key)?;
                    value.fmt_nested(f)?;
                }
                write!(f, " }}")
            }
            Value::Function(func) => write!(f, "[Function: {}]", func.name),
            Value::NativeFunction(func) => write!(f, "[Function: {}]", func.name),
        }
    }
}

/// A user-defined function and the scope it was declared in.
pub struct Function {
    pub name: Rc<str>,
    pub params: Vec<Rc<str>>,
    pub declaration: Rc<FunctionDeclaration>,
    pub closure: Environment,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Host callback: explicit arguments, the `{ typeName, elementType? }`
/// descriptor of an annotated call, and the warning sink.
pub type NativeFn =
    dyn Fn(&[Value], Option<&Value>, &mut dyn DiagnosticSink) -> Result<Value, InterpreterError>;

/// A function implemented by the host.
pub struct NativeFunction {
    pub name: Rc<str>,
    pub func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn call(
        &self,
        args: &[Value],
        descriptor: Option<&Value>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Value, InterpreterError> {
        (self.func)(args, descriptor, sink)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
