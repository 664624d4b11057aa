//! Runtime value model the engine introspects and invokes against.
//!
//! A `Value` is an argument, receiver or result of a dispatched call. Scalar
//! variants carry their boxed builtin type; `Null` has no runtime type and
//! becomes the wildcard descriptor during argument introspection.

use crate::object::instance::Instance;
use crate::types::registry::TypeRegistry;
use crate::types::TypeId;
use std::sync::Arc;

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(Arc<str>),
    Object(Arc<Instance>),
    Array(Arc<ArrayValue>),
}

/// A typed array value: a component type plus its elements.
#[derive(Clone, Debug)]
pub struct ArrayValue {
    component: TypeId,
    elements: Vec<Value>,
}

impl ArrayValue {
    pub fn new(component: TypeId, elements: Vec<Value>) -> Self {
        Self {
            component,
            elements,
        }
    }

    /// Declared component type of the array.
    #[inline]
    pub fn component(&self) -> TypeId {
        self.component
    }

    /// The array's elements.
    #[inline]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Value {
    /// String value.
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Arc::from(s.as_ref()))
    }

    /// Class instance value.
    pub fn object(instance: Arc<Instance>) -> Self {
        Value::Object(instance)
    }

    /// Array value with the given component type.
    pub fn array(component: TypeId, elements: Vec<Value>) -> Self {
        Value::Array(Arc::new(ArrayValue::new(component, elements)))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value's runtime type, or `None` for `Null`.
    ///
    /// Scalars report their boxed builtin type; arrays intern their array
    /// type in the registry on first use.
    pub fn type_of(&self, registry: &TypeRegistry) -> Option<TypeId> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeId::BOOLEAN),
            Value::Char(_) => Some(TypeId::CHARACTER),
            Value::I8(_) => Some(TypeId::BYTE),
            Value::I16(_) => Some(TypeId::SHORT),
            Value::I32(_) => Some(TypeId::INTEGER),
            Value::I64(_) => Some(TypeId::LONG),
            Value::F32(_) => Some(TypeId::FLOAT),
            Value::F64(_) => Some(TypeId::DOUBLE),
            Value::Str(_) => Some(TypeId::STRING),
            Value::Object(instance) => Some(instance.class()),
            Value::Array(array) => Some(registry.array_of(array.component())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Instances have identity, not structure.
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => {
                a.component == b.component && a.elements == b.elements
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ClassBuilder;

    #[test]
    fn test_scalar_runtime_types() {
        let registry = TypeRegistry::new();
        assert_eq!(Value::Null.type_of(&registry), None);
        assert_eq!(Value::Bool(true).type_of(&registry), Some(TypeId::BOOLEAN));
        assert_eq!(Value::I32(1).type_of(&registry), Some(TypeId::INTEGER));
        assert_eq!(Value::I64(1).type_of(&registry), Some(TypeId::LONG));
        assert_eq!(Value::F64(1.0).type_of(&registry), Some(TypeId::DOUBLE));
        assert_eq!(Value::str("x").type_of(&registry), Some(TypeId::STRING));
    }

    #[test]
    fn test_instance_runtime_type() {
        let registry = TypeRegistry::new();
        let point = registry.define(ClassBuilder::new("Point"));
        let value = Value::object(Instance::new(point));
        assert_eq!(value.type_of(&registry), Some(point));
    }

    #[test]
    fn test_array_runtime_type_is_interned() {
        let registry = TypeRegistry::new();
        let value = Value::array(TypeId::STRING, vec![Value::str("a")]);
        let first = value.type_of(&registry).unwrap();
        let second = value.type_of(&registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.component_of(first), Some(TypeId::STRING));
    }

    #[test]
    fn test_array_equality_is_structural() {
        let a = Value::array(TypeId::OBJECT, vec![Value::I32(1), Value::Null]);
        let b = Value::array(TypeId::OBJECT, vec![Value::I32(1), Value::Null]);
        let c = Value::array(TypeId::STRING, vec![Value::I32(1), Value::Null]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_instance_equality_is_identity() {
        let registry = TypeRegistry::new();
        let point = registry.define(ClassBuilder::new("Point"));
        let one = Instance::new(point);
        let same = Value::object(one.clone());
        assert_eq!(Value::object(one), same);
        assert_ne!(
            Value::object(Instance::new(point)),
            Value::object(Instance::new(point))
        );
    }
}
