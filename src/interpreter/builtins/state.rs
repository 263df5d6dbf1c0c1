//! `useState` and its setters.

use super::super::error::InterpreterError;
use super::require_args;
use super::types::{validate_state_type, StateTypeInfo};
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Slots allocated by `useState`, one per call, in call order.
#[derive(Debug, Default)]
pub struct StateStore {
    slots: RefCell<Vec<Value>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&self, initial: Value) -> usize {
        let mut slots = self.slots.borrow_mut();
        slots.push(initial);
        slots.len() - 1
    }

    fn set(&self, slot: usize, value: Value) {
        if let Some(current) = self.slots.borrow_mut().get_mut(slot) {
            *current = value;
        }
    }

    pub fn get(&self, slot: usize) -> Option<Value> {
        self.slots.borrow().get(slot).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Drops every slot; the next `useState` call gets slot 0 again.
    pub fn reset(&self) {
        self.slots.borrow_mut().clear();
    }
}

fn check_state_type(
    value: &Value,
    info: Option<&StateTypeInfo>,
    code: &str,
    origin: &str,
    sink: &mut dyn DiagnosticSink,
) {
    let Some(info) = info else {
        return;
    };
    if validate_state_type(value, info) {
        return;
    }

    let expected = match &info.element_type {
        Some(element_type) => format!("{}({})", info.type_name, element_type),
        None => info.type_name.clone(),
    };
    sink.report(
        Diagnostic::warning(format!(
            "type mismatch in {}: expected {}, got {}",
            origin,
            expected,
            value.type_name()
        ))
        .with_code(code)
        .with_note("the value is stored anyway"),
    );
}

/// `useState(initial, descriptor?)` returns `[initial, setter]`.
///
/// The descriptor of an annotated call (`useState:Number(0)`) takes
/// precedence over an explicit second argument.
pub fn builtin_use_state(
    store: &Rc<StateStore>,
    args: &[Value],
    descriptor: Option<&Value>,
    sink: &mut dyn DiagnosticSink,
) -> Result<Value, InterpreterError> {
    require_args!(args, 1, "useState", "an initial value is required");

    let initial = args[0].clone();
    let type_info = descriptor.or(args.get(1)).and_then(StateTypeInfo::from_value);
    check_state_type(&initial, type_info.as_ref(), "W0301", "useState", sink);

    let slot = store.allocate(initial.clone());
    tracing::debug!(slot, "allocated state slot");

    let setter_store = Rc::clone(store);
    let setter = Value::native("setState", move |setter_args, _, sink| {
        require_args!(setter_args, 1, "setState", "a new value is required");
        let value = setter_args[0].clone();
        check_state_type(&value, type_info.as_ref(), "W0302", "setState", sink);
        setter_store.set(slot, value.clone());
        Ok(value)
    });

    Ok(Value::array(vec![initial, setter]))
}
