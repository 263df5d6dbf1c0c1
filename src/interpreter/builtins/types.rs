//! Advisory type checks for state values.

use crate::ast::TypeAnnotation;
use crate::value::Value;
use indexmap::IndexMap;

/// The declared type of a piece of state, e.g. `Array(String)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTypeInfo {
    pub type_name: String,
    pub element_type: Option<String>,
}

impl StateTypeInfo {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            element_type: None,
        }
    }

    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Reads a `{ typeName, elementType? }` descriptor object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let type_name = object.get("typeName")?.as_string()?.to_string();
        let element_type = object
            .get("elementType")
            .and_then(Value::as_string)
            .map(str::to_string);
        Some(Self {
            type_name,
            element_type,
        })
    }

    pub fn from_annotation(annotation: &TypeAnnotation) -> Self {
        Self {
            type_name: annotation.type_name.clone(),
            element_type: annotation.element_type().map(str::to_string),
        }
    }

    /// The descriptor object handed to natives called as `callee:Type(...)`.
    pub fn to_value(&self) -> Value {
        let mut entries = IndexMap::new();
        entries.insert("typeName".to_string(), Value::string(&self.type_name));
        if let Some(element_type) = &self.element_type {
            entries.insert("elementType".to_string(), Value::string(element_type));
        }
        Value::object(entries)
    }
}

fn is_scalar_of(value: &Value, type_name: &str) -> bool {
    match type_name {
        "String" => matches!(value, Value::String(_)),
        "Number" => matches!(value, Value::Number(_)),
        "Boolean" => matches!(value, Value::Bool(_)),
        _ => true,
    }
}

/// Whether `value` fits `info`. Unknown type names accept anything.
pub fn validate_state_type(value: &Value, info: &StateTypeInfo) -> bool {
    match info.type_name.as_str() {
        "String" | "Number" | "Boolean" => is_scalar_of(value, &info.type_name),
        "Object" => matches!(value, Value::Object(_)),
        "Array" => match (value.as_array(), &info.element_type) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(items), Some(element_type)) => {
                items.iter().all(|item| is_scalar_of(item, element_type))
            }
        },
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert!(validate_state_type(&Value::string("x"), &StateTypeInfo::new("String")));
        assert!(!validate_state_type(&Value::string("x"), &StateTypeInfo::new("Number")));
        assert!(validate_state_type(&Value::Number(0.0), &StateTypeInfo::new("Number")));
        assert!(validate_state_type(&Value::Bool(true), &StateTypeInfo::new("Boolean")));
        assert!(!validate_state_type(&Value::Null, &StateTypeInfo::new("Boolean")));
    }

    #[test]
    fn test_object() {
        assert!(validate_state_type(&Value::object(IndexMap::new()), &StateTypeInfo::new("Object")));
        assert!(!validate_state_type(&Value::array(vec![]), &StateTypeInfo::new("Object")));
    }

    #[test]
    fn test_array_elements() {
        let strings = Value::array(vec![Value::string("ready"), Value::string("loading")]);
        let mixed = Value::array(vec![Value::string("ready"), Value::Number(1.0)]);
        let info = StateTypeInfo::new("Array").with_element_type("String");

        assert!(validate_state_type(&strings, &info));
        assert!(!validate_state_type(&mixed, &info));
        assert!(validate_state_type(&mixed, &StateTypeInfo::new("Array")));
        assert!(validate_state_type(&Value::array(vec![]), &info));
        assert!(!validate_state_type(&Value::string("x"), &info));
    }

    #[test]
    fn test_unknown_element_type_is_permissive() {
        let mixed = Value::array(vec![Value::Null, Value::Number(1.0)]);
        let info = StateTypeInfo::new("Array").with_element_type("Object");
        assert!(validate_state_type(&mixed, &info));
    }

    #[test]
    fn test_unknown_type_name_accepts_anything() {
        assert!(validate_state_type(&Value::Null, &StateTypeInfo::new("Any")));
        assert!(validate_state_type(&Value::Number(1.0), &StateTypeInfo::new("Void")));
    }

    #[test]
    fn test_descriptor_round_trip() {
        let annotation = TypeAnnotation {
            type_name: "Array".to_string(),
            generic_types: vec![TypeAnnotation::new("String")],
        };
        let info = StateTypeInfo::from_annotation(&annotation);
        assert_eq!(info, StateTypeInfo::new("Array").with_element_type("String"));
        assert_eq!(StateTypeInfo::from_value(&info.to_value()), Some(info));
    }

    #[test]
    fn test_from_value_requires_type_name() {
        let mut entries = IndexMap::new();
        entries.insert("elementType".to_string(), Value::string("String"));
        assert_eq!(StateTypeInfo::from_value(&Value::object(entries)), None);
        assert_eq!(StateTypeInfo::from_value(&Value::Number(1.0)), None);
    }
}
