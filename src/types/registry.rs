//! Type registry: the reflected-type table the dispatch engine consumes.
//!
//! The registry owns one [`TypeDef`] per [`TypeId`]: builtins are installed
//! at construction, user classes are added through [`ClassBuilder`], and
//! array types are interned on demand, one per component type. Everything a
//! `TypeDef` carries is immutable once registered, so readers never observe a
//! partially built type.

use crate::error::DispatchError;
use crate::object::class::ClassBuilder;
use crate::object::method::{Access, MethodDef, ParamList};
use crate::types::TypeId;
use crate::value::Value;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// =============================================================================
// Type Definitions
// =============================================================================

/// The shape of a registered type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// One of the nine primitive types.
    Primitive,

    /// A class; `base` is `None` only for the `Object` root.
    Class { base: Option<TypeId> },

    /// An interned array type.
    Array { component: TypeId },
}

/// Immutable definition of one registered type.
#[derive(Debug)]
pub struct TypeDef {
    name: String,
    kind: TypeKind,
    /// Declared methods, in declaration order.
    methods: Vec<Arc<MethodDef>>,
}

impl TypeDef {
    fn new(name: String, kind: TypeKind, methods: Vec<Arc<MethodDef>>) -> Self {
        Self {
            name,
            kind,
            methods,
        }
    }

    /// Readable type name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shape of this type.
    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Methods declared directly on this type, in declaration order.
    #[inline]
    pub fn methods(&self) -> &[Arc<MethodDef>] {
        &self.methods
    }

    /// The type this one inherits from, if any.
    ///
    /// Array types inherit from `Object`; primitives inherit from nothing.
    pub fn base(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Primitive => None,
            TypeKind::Class { base } => base,
            TypeKind::Array { .. } => Some(TypeId::OBJECT),
        }
    }
}

// =============================================================================
// Type Registry
// =============================================================================

/// Registry of all types visible to the engine.
///
/// Builtins are registered at construction; user classes and array types are
/// added dynamically. Registered definitions are never mutated or removed.
pub struct TypeRegistry {
    /// Map from TypeId to its definition.
    types: RwLock<FxHashMap<TypeId, Arc<TypeDef>>>,
    /// Interned array types, keyed by component type.
    arrays: RwLock<FxHashMap<TypeId, TypeId>>,
    /// Counter for generating new TypeIds.
    next_id: AtomicU32,
}

impl TypeRegistry {
    /// Create a registry with the builtin types installed.
    pub fn new() -> Arc<Self> {
        let registry = Arc::new(Self {
            types: RwLock::new(FxHashMap::default()),
            arrays: RwLock::new(FxHashMap::default()),
            next_id: AtomicU32::new(TypeId::FIRST_USER_TYPE),
        });
        Self::install_builtins(&registry);
        registry
    }

    /// Allocate a new TypeId for a user-defined type.
    pub fn allocate_type_id(&self) -> TypeId {
        TypeId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn install_builtins(registry: &Arc<Self>) {
        let primitives = [
            TypeId::PRIM_BOOLEAN,
            TypeId::PRIM_CHAR,
            TypeId::PRIM_BYTE,
            TypeId::PRIM_SHORT,
            TypeId::PRIM_INT,
            TypeId::PRIM_LONG,
            TypeId::PRIM_FLOAT,
            TypeId::PRIM_DOUBLE,
            TypeId::PRIM_VOID,
        ];
        let boxed = [
            TypeId::BOOLEAN,
            TypeId::CHARACTER,
            TypeId::BYTE,
            TypeId::SHORT,
            TypeId::INTEGER,
            TypeId::LONG,
            TypeId::FLOAT,
            TypeId::DOUBLE,
            TypeId::VOID,
            TypeId::STRING,
        ];

        // `getClass` is the one universal method every type inherits. The
        // body resolves the receiver's class name through the registry, so it
        // holds a weak reference back to it.
        let weak = Arc::downgrade(registry);
        let get_class = MethodDef::new(
            "getClass",
            TypeId::OBJECT,
            ParamList::new(),
            TypeId::STRING,
            Access::Public,
            Arc::new(move |receiver: &Value, _args: &[Value]| {
                let Some(registry) = weak.upgrade() else {
                    return Err(DispatchError::invocation("type registry dropped"));
                };
                let class = receiver.type_of(&registry).unwrap_or(TypeId::OBJECT);
                Ok(Value::str(registry.name_of(class)))
            }),
        );

        let mut types = registry.types.write();
        for id in primitives {
            types.insert(
                id,
                Arc::new(TypeDef::new(
                    id.builtin_name().unwrap_or_default().to_string(),
                    TypeKind::Primitive,
                    Vec::new(),
                )),
            );
        }
        types.insert(
            TypeId::OBJECT,
            Arc::new(TypeDef::new(
                "Object".to_string(),
                TypeKind::Class { base: None },
                vec![Arc::new(get_class)],
            )),
        );
        for id in boxed {
            types.insert(
                id,
                Arc::new(TypeDef::new(
                    id.builtin_name().unwrap_or_default().to_string(),
                    TypeKind::Class {
                        base: Some(TypeId::OBJECT),
                    },
                    Vec::new(),
                )),
            );
        }
    }

    /// Register a user class and return its new TypeId.
    ///
    /// The class's base must already be registered; classes without an
    /// explicit base inherit from `Object`.
    pub fn define(&self, class: ClassBuilder) -> TypeId {
        let id = self.allocate_type_id();
        let (name, base, specs) = class.into_parts();
        let base = base.unwrap_or(TypeId::OBJECT);
        debug_assert!(self.contains(base), "base type is not registered");
        let methods = specs
            .into_iter()
            .map(|spec| Arc::new(spec.into_def(id)))
            .collect();
        self.types.write().insert(
            id,
            Arc::new(TypeDef::new(
                name,
                TypeKind::Class { base: Some(base) },
                methods,
            )),
        );
        id
    }

    /// Intern the array type with the given component type.
    ///
    /// Idempotent: one array type exists per component.
    pub fn array_of(&self, component: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.read().get(&component) {
            return id;
        }
        let mut arrays = self.arrays.write();
        // Re-check under the write lock.
        if let Some(&id) = arrays.get(&component) {
            return id;
        }
        let id = self.allocate_type_id();
        let name = format!("{}[]", self.name_of(component));
        self.types.write().insert(
            id,
            Arc::new(TypeDef::new(
                name,
                TypeKind::Array { component },
                Vec::new(),
            )),
        );
        arrays.insert(component, id);
        id
    }

    /// Look up a type definition by id.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<TypeDef>> {
        self.types.read().get(&type_id).cloned()
    }

    /// Check if a type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.read().contains_key(&type_id)
    }

    /// Readable name of a type; array types render with `[]` per dimension.
    pub fn name_of(&self, type_id: TypeId) -> String {
        match self.get(type_id) {
            Some(def) => def.name().to_string(),
            None => format!("<unregistered:{}>", type_id.raw()),
        }
    }

    /// Component type of an array type, or `None` for non-arrays.
    pub fn component_of(&self, type_id: TypeId) -> Option<TypeId> {
        match self.get(type_id)?.kind() {
            TypeKind::Array { component } => Some(*component),
            _ => None,
        }
    }

    /// Whether a value of type `from` is acceptable where `to` is declared.
    ///
    /// Reflexive; any non-primitive type (arrays included) is assignable to
    /// `Object`; class base chains are walked transitively; arrays are
    /// covariant for non-primitive components and invariant for primitive
    /// ones; primitives are assignable only to themselves.
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to {
            return true;
        }
        if from.is_primitive() || to.is_primitive() {
            return false;
        }
        if to == TypeId::OBJECT {
            return true;
        }
        let (Some(from_def), Some(to_def)) = (self.get(from), self.get(to)) else {
            return false;
        };
        match (from_def.kind(), to_def.kind()) {
            (TypeKind::Array { component: cf }, TypeKind::Array { component: ct }) => {
                !cf.is_primitive() && !ct.is_primitive() && self.is_assignable(*cf, *ct)
            }
            _ => {
                let mut current = from_def.base();
                while let Some(id) = current {
                    if id == to {
                        return true;
                    }
                    current = self.get(id).and_then(|def| def.base());
                }
                false
            }
        }
    }

    /// Full reflected method table for a type: the type's own methods, then
    /// its base chain up to `Object`, each class's methods in declaration
    /// order. Subclass-before-superclass walk order is the override-first
    /// invariant the matcher relies on.
    pub fn methods_of(&self, type_id: TypeId) -> Vec<Arc<MethodDef>> {
        let mut table = Vec::new();
        let mut current = Some(type_id);
        while let Some(id) = current {
            let Some(def) = self.get(id) else { break };
            table.extend(def.methods().iter().cloned());
            current = def.base();
        }
        table
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Check if the registry is empty. Never true: builtins are always
    /// installed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::native;

    fn point_class(registry: &TypeRegistry) -> TypeId {
        registry.define(
            ClassBuilder::new("Point")
                .method(
                    "getX",
                    &[],
                    TypeId::PRIM_INT,
                    native(|_, _| Ok(Value::I32(7))),
                )
                .method(
                    "setX",
                    &[TypeId::PRIM_INT],
                    TypeId::PRIM_VOID,
                    native(|_, _| Ok(Value::Null)),
                ),
        )
    }

    #[test]
    fn test_builtins_installed() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::PRIM_INT));
        assert!(registry.contains(TypeId::INTEGER));
        assert!(registry.contains(TypeId::OBJECT));
        assert!(registry.contains(TypeId::STRING));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_allocate_type_id() {
        let registry = TypeRegistry::new();
        let a = registry.allocate_type_id();
        let b = registry.allocate_type_id();
        assert_eq!(a.raw(), TypeId::FIRST_USER_TYPE);
        assert_eq!(b.raw(), TypeId::FIRST_USER_TYPE + 1);
        assert!(!a.is_builtin());
    }

    #[test]
    fn test_define_class() {
        let registry = TypeRegistry::new();
        let point = point_class(&registry);
        let def = registry.get(point).unwrap();
        assert_eq!(def.name(), "Point");
        assert_eq!(def.base(), Some(TypeId::OBJECT));
        assert_eq!(def.methods().len(), 2);
        assert_eq!(def.methods()[0].name(), "getX");
    }

    #[test]
    fn test_array_interning() {
        let registry = TypeRegistry::new();
        let ints = registry.array_of(TypeId::PRIM_INT);
        assert_eq!(registry.array_of(TypeId::PRIM_INT), ints);
        assert_eq!(registry.name_of(ints), "int[]");
        assert_eq!(registry.component_of(ints), Some(TypeId::PRIM_INT));

        let nested = registry.array_of(ints);
        assert_eq!(registry.name_of(nested), "int[][]");
        assert_ne!(nested, ints);
    }

    #[test]
    fn test_assignability_reference_types() {
        let registry = TypeRegistry::new();
        let parent = registry.define(ClassBuilder::new("Parent"));
        let child = registry.define(ClassBuilder::new("Child").extends(parent));

        assert!(registry.is_assignable(child, child));
        assert!(registry.is_assignable(child, parent));
        assert!(registry.is_assignable(child, TypeId::OBJECT));
        assert!(!registry.is_assignable(parent, child));
        assert!(registry.is_assignable(TypeId::STRING, TypeId::OBJECT));
    }

    #[test]
    fn test_assignability_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.is_assignable(TypeId::PRIM_INT, TypeId::PRIM_INT));
        assert!(!registry.is_assignable(TypeId::PRIM_INT, TypeId::PRIM_LONG));
        assert!(!registry.is_assignable(TypeId::INTEGER, TypeId::PRIM_INT));
        assert!(!registry.is_assignable(TypeId::PRIM_INT, TypeId::OBJECT));
    }

    #[test]
    fn test_assignability_arrays() {
        let registry = TypeRegistry::new();
        let parent = registry.define(ClassBuilder::new("Parent"));
        let child = registry.define(ClassBuilder::new("Child").extends(parent));
        let parents = registry.array_of(parent);
        let children = registry.array_of(child);
        let ints = registry.array_of(TypeId::PRIM_INT);
        let longs = registry.array_of(TypeId::PRIM_LONG);

        // Covariant for reference components, invariant for primitives.
        assert!(registry.is_assignable(children, parents));
        assert!(!registry.is_assignable(parents, children));
        assert!(registry.is_assignable(ints, ints));
        assert!(!registry.is_assignable(ints, longs));
        assert!(registry.is_assignable(ints, TypeId::OBJECT));
    }

    #[test]
    fn test_method_table_override_first_order() {
        let registry = TypeRegistry::new();
        let parent = registry.define(ClassBuilder::new("Parent").method(
            "greet",
            &[],
            TypeId::STRING,
            native(|_, _| Ok(Value::str("parent"))),
        ));
        let child = registry.define(ClassBuilder::new("Child").extends(parent).method(
            "greet",
            &[],
            TypeId::STRING,
            native(|_, _| Ok(Value::str("child"))),
        ));

        let table = registry.methods_of(child);
        let greeters: Vec<TypeId> = table
            .iter()
            .filter(|m| m.name() == "greet")
            .map(|m| m.declaring())
            .collect();
        assert_eq!(greeters, vec![child, parent]);

        // The universal method is inherited by every class.
        assert!(table.iter().any(|m| m.name() == "getClass"));
    }

    #[test]
    fn test_get_class_reports_receiver_class() {
        let registry = TypeRegistry::new();
        let point = point_class(&registry);
        let instance = Value::object(crate::object::Instance::new(point));

        let table = registry.methods_of(point);
        let get_class = table.iter().find(|m| m.name() == "getClass").unwrap();
        let result = get_class.call(&instance, &[]).unwrap();
        assert_eq!(result.as_str(), Some("Point"));
    }
}
