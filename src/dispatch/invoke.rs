//! Multi-name invocation and the property-style getter/setter surface.
//!
//! The invoker is a stateless pipeline over the matcher: it tries each
//! candidate method name in turn, invokes the first one that resolves, and
//! applies the setter-specific array-retyping fallback. Only `MethodNotFound`
//! moves the trial to the next name; every other failure propagates
//! immediately.

use super::{args, Reflector};
use crate::error::{DispatchError, DispatchResult};
use crate::types::registry::TypeRegistry;
use crate::value::Value;
use tracing::trace;

/// Read-family prefixes for property-style names.
const GETTER_PREFIXES: &[&str] = &["get", "is"];
/// Write-family prefix.
const SETTER_PREFIXES: &[&str] = &["set"];

impl Reflector {
    /// Method names declared on the target that equal `prefix + property`
    /// case-insensitively for one of the prefixes.
    ///
    /// Returned in method table order (override-first walk, declaration
    /// order within a class), deduplicated keeping the first occurrence, so
    /// the subsequent trial order is deterministic.
    pub fn candidate_names(&self, property: &str, prefixes: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for method in self.registry.methods_of(self.target) {
            let name = method.name();
            if names.iter().any(|n| n == name) {
                continue;
            }
            if prefixes
                .iter()
                .any(|prefix| name_matches(name, prefix, property))
            {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Try each candidate name in turn and invoke the first that resolves.
    ///
    /// The last name's `MethodNotFound` propagates; failures during the
    /// invocation itself propagate immediately. An empty name list fails
    /// `MethodNotFound` under the first supplied name.
    pub fn invoke_best_method_on_target<S: AsRef<str>>(
        &self,
        names: &[S],
        target: &Value,
        arguments: &[Value],
    ) -> DispatchResult<Value> {
        let missing = names.first().map(|n| n.as_ref()).unwrap_or("");
        self.invoke_any(names, target, arguments, missing)
    }

    /// Find and invoke the best getter for a property name.
    pub fn invoke_getter_method_on_target(
        &self,
        property: &str,
        target: &Value,
    ) -> DispatchResult<Value> {
        let names = self.candidate_names(property, GETTER_PREFIXES);
        self.invoke_any(&names, target, &[], &format!("get{}", property))
    }

    /// Find and invoke the best setter for a property name.
    ///
    /// If ordinary resolution fails and the value is an array of objects,
    /// the array is rebuilt with its first non-null element's exact runtime
    /// type as the component type and the invocation is retried once. A
    /// failed retry reports the original failure.
    pub fn invoke_setter_method_on_target(
        &self,
        property: &str,
        target: &Value,
        value: Value,
    ) -> DispatchResult<Value> {
        let names = self.candidate_names(property, SETTER_PREFIXES);
        let missing = format!("set{}", property);
        let arguments = [value];
        match self.invoke_any(&names, target, &arguments, &missing) {
            Err(original) if original.is_method_not_found() => {
                let Some(retyped) = retype_object_array(&self.registry, &arguments[0]) else {
                    return Err(original);
                };
                trace!(property, "retrying setter with retyped array");
                match self.invoke_any(&names, target, &[retyped], &missing) {
                    // Keep the original diagnostic, not the retry's.
                    Err(retry) if retry.is_method_not_found() => Err(original),
                    other => other,
                }
            }
            other => other,
        }
    }

    fn invoke_any<S: AsRef<str>>(
        &self,
        names: &[S],
        target: &Value,
        arguments: &[Value],
        missing_name: &str,
    ) -> DispatchResult<Value> {
        let descriptors = args::argument_types(&self.registry, arguments);
        for (index, name) in names.iter().enumerate() {
            match self.find_best_method_with_signature(name.as_ref(), &descriptors) {
                Ok(method) => return method.call(target, arguments),
                Err(err) if err.is_method_not_found() => {
                    if index + 1 == names.len() {
                        return Err(err);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Err(DispatchError::MethodNotFound {
            name: missing_name.to_string(),
        })
    }
}

fn name_matches(name: &str, prefix: &str, property: &str) -> bool {
    name.eq_ignore_ascii_case(&format!("{}{}", prefix, property))
}

/// Rebuild an object array with a precise component type taken from its
/// first non-null element. Returns `None` when there is nothing to retry
/// with: non-arrays, primitive-component arrays, all-null or empty arrays,
/// and arrays already typed by their element type.
fn retype_object_array(registry: &TypeRegistry, value: &Value) -> Option<Value> {
    let Value::Array(array) = value else {
        return None;
    };
    if array.component().is_primitive() {
        return None;
    }
    let element = array.elements().iter().find(|e| !e.is_null())?;
    let component = element.type_of(registry)?;
    if component == array.component() {
        return None;
    }
    Some(Value::array(component, array.elements().to_vec()))
}
