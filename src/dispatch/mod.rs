//! Duck-typed method resolution engine.
//!
//! A [`Reflector`] is bound to one target type at construction and resolves
//! property-style invocations against it:
//!
//! ```text
//! caller
//!   └── candidate names ("get"/"is"/"set" + property, case-insensitive)
//!         └── per name: three-phase matcher
//!               1. exact signature match (boxed argument types)
//!               2. exact signature match (primitive-narrowed view)
//!               3. brute-force assignability scan over the method table,
//!                  override-first, first match wins
//!                     └── lazy per-type method table, built once
//! ```
//!
//! One `Reflector` instance is usable from multiple threads; the only shared
//! mutable state is the lazily built method table, whose construction is
//! idempotent.

pub mod args;
mod invoke;
mod resolve;

pub use args::{argument_types, to_primitives, ArgTypes};

use crate::error::{DispatchError, DispatchResult};
use crate::object::method::MethodDef;
use crate::types::registry::TypeRegistry;
use crate::types::TypeId;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

/// Per-name candidate lists, in override-first method table order.
pub(crate) type MethodMap = FxHashMap<String, Vec<Arc<MethodDef>>>;

/// Method-resolution engine bound to one target type.
pub struct Reflector {
    registry: Arc<TypeRegistry>,
    target: TypeId,
    /// Lazy method table for brute-force resolution. Built in full on first
    /// use, immutable afterwards.
    cache: OnceLock<MethodMap>,
}

impl Reflector {
    /// Bind an engine instance to a target type.
    pub fn new(registry: Arc<TypeRegistry>, target: TypeId) -> Self {
        Self {
            registry,
            target,
            cache: OnceLock::new(),
        }
    }

    /// The type this engine resolves against.
    #[inline]
    pub fn target(&self) -> TypeId {
        self.target
    }

    /// The type registry backing this engine.
    #[inline]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// The target's reflected method table with overridden signatures
    /// pruned: of any same-signature pair, the override (earlier in the
    /// walk) is kept.
    fn visible_methods(&self) -> Vec<Arc<MethodDef>> {
        let mut visible: Vec<Arc<MethodDef>> = Vec::new();
        for method in self.registry.methods_of(self.target) {
            let shadowed = visible
                .iter()
                .any(|kept| kept.signature_matches(method.name(), method.params()));
            if !shadowed {
                visible.push(method);
            }
        }
        visible
    }

    /// All methods whose name matches the pattern; the whole name must
    /// match, not a substring.
    pub fn find_methods(
        &self,
        name_pattern: &str,
        case_sensitive: bool,
    ) -> DispatchResult<Vec<Arc<MethodDef>>> {
        let pattern = compile_name_pattern(name_pattern, case_sensitive)?;
        Ok(self
            .visible_methods()
            .into_iter()
            .filter(|m| pattern.is_match(m.name()))
            .collect())
    }

    /// First method whose name matches the pattern, in method table order.
    pub fn find_first_method(
        &self,
        name_pattern: &str,
        case_sensitive: bool,
    ) -> DispatchResult<Option<Arc<MethodDef>>> {
        let pattern = compile_name_pattern(name_pattern, case_sensitive)?;
        Ok(self
            .visible_methods()
            .into_iter()
            .find(|m| pattern.is_match(m.name())))
    }

    /// Zero-parameter, non-void methods named `get*` or `is*`, excluding the
    /// universal `getClass`.
    pub fn find_getter_methods(&self) -> Vec<Arc<MethodDef>> {
        self.visible_methods()
            .into_iter()
            .filter(|m| {
                let name = m.name();
                m.params().is_empty()
                    && m.return_type() != TypeId::PRIM_VOID
                    && name != "getClass"
                    && (name.starts_with("get") || name.starts_with("is"))
            })
            .collect()
    }

    /// Property names derived from [`find_getter_methods`], with the `get`
    /// or `is` prefix stripped.
    ///
    /// [`find_getter_methods`]: Reflector::find_getter_methods
    pub fn find_getter_property_names(&self) -> Vec<String> {
        self.find_getter_methods()
            .iter()
            .filter_map(|m| property_name_of(m.name()))
            .collect()
    }
}

fn compile_name_pattern(pattern: &str, case_sensitive: bool) -> DispatchResult<Regex> {
    RegexBuilder::new(&format!("^(?:{})$", pattern))
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(DispatchError::InvalidPattern)
}

/// Strip the getter prefix from a method name. Prefix-only names (`get`,
/// `is`) carry no property name.
fn property_name_of(method_name: &str) -> Option<String> {
    for prefix in ["get", "is"] {
        if let Some(rest) = method_name.strip_prefix(prefix) {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{native, ClassBuilder};
    use crate::value::Value;

    fn widget_reflector() -> Reflector {
        let registry = TypeRegistry::new();
        let widget = registry.define(
            ClassBuilder::new("Widget")
                .method("getFoo", &[], TypeId::INTEGER, native(|_, _| Ok(Value::I32(1))))
                .method(
                    "isEnabled",
                    &[],
                    TypeId::PRIM_BOOLEAN,
                    native(|_, _| Ok(Value::Bool(true))),
                )
                .method(
                    "getNothing",
                    &[],
                    TypeId::PRIM_VOID,
                    native(|_, _| Ok(Value::Null)),
                )
                .method(
                    "getWith",
                    &[TypeId::PRIM_INT],
                    TypeId::INTEGER,
                    native(|_, _| Ok(Value::I32(2))),
                )
                .method("touch", &[], TypeId::PRIM_VOID, native(|_, _| Ok(Value::Null))),
        );
        Reflector::new(registry, widget)
    }

    #[test]
    fn test_find_methods_whole_name_match() {
        let reflector = widget_reflector();
        let found = reflector.find_methods("get.*", true).unwrap();
        let names: Vec<&str> = found.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["getFoo", "getNothing", "getWith", "getClass"]);

        // Substrings do not match.
        assert!(reflector.find_methods("get", true).unwrap().is_empty());
    }

    #[test]
    fn test_find_methods_case_sensitivity() {
        let reflector = widget_reflector();
        assert!(reflector.find_methods("GETFOO", true).unwrap().is_empty());
        let found = reflector.find_methods("GETFOO", false).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "getFoo");
    }

    #[test]
    fn test_find_methods_bad_pattern() {
        let reflector = widget_reflector();
        let err = reflector.find_methods("(", true).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPattern(_)));
    }

    #[test]
    fn test_find_first_method() {
        let reflector = widget_reflector();
        let first = reflector.find_first_method("get.*", true).unwrap().unwrap();
        assert_eq!(first.name(), "getFoo");
        assert!(reflector
            .find_first_method("nope.*", true)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_getter_scan_rules() {
        let reflector = widget_reflector();
        let getters = reflector.find_getter_methods();
        let names: Vec<&str> = getters.iter().map(|m| m.name()).collect();
        // Void-returning, parameterized and class-identity getters are
        // excluded.
        assert_eq!(names, vec!["getFoo", "isEnabled"]);
    }

    #[test]
    fn test_getter_property_names() {
        let reflector = widget_reflector();
        assert_eq!(
            reflector.find_getter_property_names(),
            vec!["Foo".to_string(), "Enabled".to_string()]
        );
    }

    #[test]
    fn test_property_name_of_prefix_only() {
        assert_eq!(property_name_of("get"), None);
        assert_eq!(property_name_of("is"), None);
        assert_eq!(property_name_of("getX"), Some("X".to_string()));
        assert_eq!(property_name_of("isOpen"), Some("Open".to_string()));
        assert_eq!(property_name_of("touch"), None);
    }

    #[test]
    fn test_visible_methods_prunes_overridden() {
        let registry = TypeRegistry::new();
        let parent = registry.define(ClassBuilder::new("Parent").method(
            "getName",
            &[],
            TypeId::STRING,
            native(|_, _| Ok(Value::str("parent"))),
        ));
        let child = registry.define(ClassBuilder::new("Child").extends(parent).method(
            "getName",
            &[],
            TypeId::STRING,
            native(|_, _| Ok(Value::str("child"))),
        ));
        let reflector = Reflector::new(registry, child);

        let getters = reflector.find_getter_methods();
        let names: Vec<(&str, TypeId)> = getters
            .iter()
            .map(|m| (m.name(), m.declaring()))
            .collect();
        // Only the override survives the pruned view.
        assert_eq!(names, vec![("getName", child)]);
        assert_eq!(reflector.find_getter_property_names(), vec!["Name"]);
    }
}
