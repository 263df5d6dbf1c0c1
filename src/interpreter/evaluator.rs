use crate::ast::{
    CallExpr, DeclarationTarget, Expr, FunctionDeclaration, MemberProperty, Program, Stmt, VarDeclaration,
};
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::value::{format_number, Function, Value};
use super::builtins::{create_root_environment, StateTypeInfo};
use super::control_flow::ControlFlow;
use super::environment::Environment;
use super::error::InterpreterError;
use super::parser::parse;
use indexmap::IndexMap;
use std::rc::Rc;

/// Tree-walking evaluator.
///
/// Holds no scope of its own: every call takes the environment to evaluate
/// in. Warnings raised by natives are collected here.
#[derive(Debug, Default)]
pub struct Interpreter {
    warnings: Vec<Diagnostic>,
}

impl DiagnosticSink for Interpreter {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(code = diagnostic.code.as_deref().unwrap_or(""), "{}", diagnostic.message);
        self.warnings.push(diagnostic);
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    /// Runs every statement in order. A top-level `return` stops the program
    /// with its value; otherwise the result is the last statement's value.
    pub fn run(&mut self, program: &Program, env: &Environment) -> Result<Value, InterpreterError> {
        let mut last = Value::Null;
        for stmt in &program.body {
            match self.execute_statement(stmt, env)? {
                ControlFlow::Return(value) => return Ok(value),
                ControlFlow::Completed(value) => last = value,
            }
        }
        Ok(last)
    }

    pub fn evaluate(&mut self, stmt: &Stmt, env: &Environment) -> Result<Value, InterpreterError> {
        self.execute_statement(stmt, env).map(ControlFlow::into_value)
    }

    fn execute_statement(&mut self, stmt: &Stmt, env: &Environment) -> Result<ControlFlow, InterpreterError> {
        match stmt {
            Stmt::VarDeclaration(decl) => self.declare_variable(decl, env).map(ControlFlow::Completed),
            Stmt::FunctionDeclaration(decl) => {
                self.declare_function(decl, env).map(ControlFlow::Completed)
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate_expr(expr, env)?,
                    None => Value::Undefined,
                };
                Ok(ControlFlow::Return(value))
            }
            Stmt::Expr(expr) => self.evaluate_expr(expr, env).map(ControlFlow::Completed),
        }
    }

    fn declare_variable(&mut self, decl: &VarDeclaration, env: &Environment) -> Result<Value, InterpreterError> {
        let value = match &decl.value {
            Some(expr) => self.evaluate_expr(expr, env)?,
            None => Value::Null,
        };

        match &decl.target {
            DeclarationTarget::Identifier(name) => env.declare(name, value, decl.constant),
            DeclarationTarget::Destructuring(pattern) => {
                let items: Vec<Value> = match &value {
                    Value::Array(items) => items.borrow().clone(),
                    other => {
                        return Err(InterpreterError::NotDestructurable {
                            type_name: other.type_name(),
                        })
                    }
                };
                if items.len() < pattern.elements.len() {
                    return Err(InterpreterError::DestructuringArity {
                        expected: pattern.elements.len(),
                        found: items.len(),
                    });
                }
                // Reject the whole pattern before binding any of it.
                for (index, name) in pattern.elements.iter().enumerate() {
                    if env.is_declared_locally(name) || pattern.elements[..index].contains(name) {
                        return Err(InterpreterError::duplicate_declaration(&**name));
                    }
                }
                for (name, item) in pattern.elements.iter().zip(items) {
                    env.declare(name, item, decl.constant)?;
                }
                Ok(value)
            }
        }
    }

    fn declare_function(
        &mut self,
        decl: &Rc<FunctionDeclaration>,
        env: &Environment,
    ) -> Result<Value, InterpreterError> {
        let function = Value::Function(Rc::new(Function {
            name: Rc::clone(&decl.name),
            params: decl.params.clone(),
            declaration: Rc::clone(decl),
            closure: env.clone(),
        }));
        env.declare(&decl.name, function, true)
    }

    pub fn evaluate_expr(&mut self, expr: &Expr, env: &Environment) -> Result<Value, InterpreterError> {
        match expr {
            Expr::NumericLiteral(n) => Ok(Value::Number(*n)),
            Expr::StringLiteral(s) => Ok(Value::String(Rc::clone(s))),
            Expr::Identifier(name) => env.lookup(name),
            Expr::Binary { left, op, right } => {
                let left = self.evaluate_expr(left, env)?;
                let right = self.evaluate_expr(right, env)?;
                match (&left, &right) {
                    (Value::Number(l), Value::Number(r)) => Ok(Value::Number(op.apply(*l, *r))),
                    _ => {
                        tracing::trace!(
                            op = op.symbol(),
                            left = left.type_name(),
                            right = right.type_name(),
                            "non-numeric operands yield null"
                        );
                        Ok(Value::Null)
                    }
                }
            }
            Expr::Assignment { target, value } => {
                let Expr::Identifier(name) = target.as_ref() else {
                    return Err(InterpreterError::InvalidAssignmentTarget {
                        target: describe(target).to_string(),
                    });
                };
                let value = self.evaluate_expr(value, env)?;
                env.assign(name, value)
            }
            Expr::Object(properties) => {
                let mut entries = IndexMap::new();
                for property in properties {
                    let value = match &property.value {
                        Some(expr) => self.evaluate_expr(expr, env)?,
                        None => env.lookup(&property.key)?,
                    };
                    entries.insert(property.key.clone(), value);
                }
                Ok(Value::object(entries))
            }
            Expr::Array(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.evaluate_expr(element, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            Expr::Member { object, property } => {
                let object = self.evaluate_expr(object, env)?;
                match property {
                    MemberProperty::Named(name) => Ok(get_property(&object, name)),
                    MemberProperty::Computed(key) => {
                        let key = self.evaluate_expr(key, env)?;
                        Ok(get_member(&object, &key))
                    }
                }
            }
            Expr::Call(call) => self.evaluate_call(call, env),
        }
    }

    fn evaluate_call(&mut self, call: &CallExpr, env: &Environment) -> Result<Value, InterpreterError> {
        let callee = self.evaluate_expr(&call.callee, env)?;
        let args = call
            .args
            .iter()
            .map(|arg| self.evaluate_expr(arg, env))
            .collect::<Result<Vec<_>, _>>()?;

        match callee {
            Value::NativeFunction(native) => {
                let descriptor = call
                    .type_annotation
                    .as_ref()
                    .map(|annotation| StateTypeInfo::from_annotation(annotation).to_value());
                tracing::trace!(function = %native.name, args = args.len(), "calling native");
                native.call(&args, descriptor.as_ref(), self)
            }
            Value::Function(function) => self.call_function(&function, args),
            other => Err(InterpreterError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    fn call_function(&mut self, function: &Function, args: Vec<Value>) -> Result<Value, InterpreterError> {
        tracing::debug!(function = %function.name, args = args.len(), "calling function");

        let scope = Environment::with_parent(&function.closure);
        let mut args = args.into_iter();
        for param in &function.params {
            scope.declare(param, args.next().unwrap_or(Value::Undefined), false)?;
        }

        let mut result = Value::Null;
        for stmt in &function.declaration.body {
            match self.execute_statement(stmt, &scope)? {
                ControlFlow::Return(value) => return Ok(value),
                ControlFlow::Completed(value) => result = value,
            }
        }
        Ok(result)
    }
}

fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::NumericLiteral(_) => "a number literal",
        Expr::StringLiteral(_) => "a string literal",
        Expr::Identifier(_) => "a variable",
        Expr::Binary { .. } => "a binary expression",
        Expr::Assignment { .. } => "an assignment",
        Expr::Call(_) => "a call expression",
        Expr::Member { .. } => "a member expression",
        Expr::Object(_) => "an object literal",
        Expr::Array(_) => "an array literal",
    }
}

fn get_property(object: &Value, name: &str) -> Value {
    match object {
        Value::Object(entries) => entries.borrow().get(name).cloned().unwrap_or(Value::Undefined),
        Value::Array(items) if name == "length" => Value::Number(items.borrow().len() as f64),
        Value::String(s) if name == "length" => Value::Number(s.chars().count() as f64),
        Value::Array(_) | Value::String(_) => match name.parse::<usize>() {
            Ok(index) if index.to_string() == name => get_index(object, index),
            _ => Value::Undefined,
        },
        _ => Value::Undefined,
    }
}

fn get_index(object: &Value, index: usize) -> Value {
    match object {
        Value::Array(items) => items.borrow().get(index).cloned().unwrap_or(Value::Undefined),
        Value::String(s) => s
            .chars()
            .nth(index)
            .map(|c| Value::string(c.encode_utf8(&mut [0; 4])))
            .unwrap_or(Value::Undefined),
        _ => Value::Undefined,
    }
}

fn get_member(object: &Value, key: &Value) -> Value {
    match key {
        Value::String(name) => get_property(object, name),
        Value::Number(n) => match object {
            Value::Object(_) => get_property(object, &format_number(*n)),
            _ if *n >= 0.0 && n.fract() == 0.0 => get_index(object, *n as usize),
            _ => Value::Undefined,
        },
        _ => Value::Undefined,
    }
}

/// Evaluates `program` in `env` with a fresh interpreter.
pub fn evaluate(program: &Program, env: &Environment) -> Result<Value, InterpreterError> {
    Interpreter::new().run(program, env)
}

/// Final value of a run together with the warnings raised on the way.
#[derive(Debug)]
pub struct Evaluation {
    pub value: Value,
    pub warnings: Vec<Diagnostic>,
}

pub fn parse_and_run(source: &str) -> Result<Value, String> {
    let program = parse(source).map_err(|e| format!("Parse error: {}", e))?;
    evaluate(&program, &create_root_environment()).map_err(|e| format!("Runtime error: {}", e))
}

/// Parses and runs `source` in a fresh root environment.
///
/// On failure the returned list ends with the error and holds any warnings
/// raised before it.
pub fn parse_and_run_with_diagnostics(source: &str) -> Result<Evaluation, Vec<Diagnostic>> {
    let program = parse(source).map_err(|e| vec![e.to_diagnostic()])?;

    let mut interpreter = Interpreter::new();
    match interpreter.run(&program, &create_root_environment()) {
        Ok(value) => Ok(Evaluation {
            value,
            warnings: interpreter.take_warnings(),
        }),
        Err(e) => {
            let mut diagnostics = interpreter.take_warnings();
            diagnostics.push(e.to_diagnostic());
            Err(diagnostics)
        }
    }
}
