//! Three-phase best-method resolution.
//!
//! Phases are tried in order and the first success wins:
//!
//! 1. Exact signature match against the boxed argument types.
//! 2. Exact signature match against the primitive-narrowed view.
//! 3. Brute-force assignability scan over the lazily built method table,
//!    in override-first order; the first fully matching candidate is
//!    returned. This is a first-match policy, not best-match-by-specificity.
//!
//! For a fixed target type and fixed descriptors the result is deterministic
//! across calls: the table is built once, in full, from the registry's
//! reflected method walk.

use super::{args, MethodMap, Reflector};
use crate::error::{DispatchError, DispatchResult};
use crate::object::method::{MethodDef, ParamList};
use crate::types::TypeId;
use crate::value::Value;
use std::sync::Arc;
use tracing::{debug, trace};

impl Reflector {
    /// Resolve the best method for a name and runtime argument values.
    pub fn find_best_method_on_target(
        &self,
        name: &str,
        args: &[Value],
    ) -> DispatchResult<Arc<MethodDef>> {
        let descriptors = args::argument_types(&self.registry, args);
        self.find_best_method_with_signature(name, &descriptors)
    }

    /// Resolve the best method for a name and argument type descriptors.
    ///
    /// `None` descriptors are wildcards standing for null arguments.
    pub fn find_best_method_with_signature(
        &self,
        name: &str,
        descriptors: &[Option<TypeId>],
    ) -> DispatchResult<Arc<MethodDef>> {
        // Phase 1: exact match on the boxed argument types.
        if let Some(found) = self.exact_match(name, descriptors) {
            trace!(name, "resolved by exact match");
            return Ok(found);
        }

        // Phase 2: the same lookup with boxed types narrowed to primitives.
        let primitives = args::to_primitives(descriptors);
        if primitives.as_slice() != descriptors {
            if let Some(found) = self.exact_match(name, &primitives) {
                trace!(name, "resolved by primitive-narrowed exact match");
                return Ok(found);
            }
        }

        // Phase 3: brute-force assignability scan.
        self.assignable_match(name, descriptors)
    }

    /// Exact-signature lookup over the reflected method table. Wildcard
    /// descriptors never exact-match.
    fn exact_match(&self, name: &str, descriptors: &[Option<TypeId>]) -> Option<Arc<MethodDef>> {
        let mut wanted = ParamList::new();
        for descriptor in descriptors {
            wanted.push((*descriptor)?);
        }
        self.registry
            .methods_of(self.target)
            .into_iter()
            .find(|m| m.signature_matches(name, &wanted))
    }

    /// Scan the per-name candidate list in override-first order and return
    /// the first candidate whose parameters accept every argument.
    fn assignable_match(
        &self,
        name: &str,
        descriptors: &[Option<TypeId>],
    ) -> DispatchResult<Arc<MethodDef>> {
        let table = self.cache.get_or_init(|| self.build_method_map());
        let candidates = table.get(name).ok_or_else(|| DispatchError::MethodNotFound {
            name: name.to_string(),
        })?;
        for method in candidates {
            if self.accepts(method, descriptors) {
                trace!(name, declaring = method.declaring().raw(), "resolved by assignability scan");
                return Ok(method.clone());
            }
        }
        Err(DispatchError::MethodNotFound {
            name: name.to_string(),
        })
    }

    /// Build the per-name method table from the full reflected method walk.
    /// Idempotent: concurrent builders compute an equal table.
    fn build_method_map(&self) -> MethodMap {
        let mut map = MethodMap::default();
        for method in self.registry.methods_of(self.target) {
            map.entry(method.name().to_string())
                .or_insert_with(Vec::new)
                .push(method);
        }
        debug!(
            ty = self.registry.name_of(self.target).as_str(),
            names = map.len(),
            "built method lookup table"
        );
        map
    }

    /// Parameter-wise acceptance check for one candidate.
    fn accepts(&self, method: &MethodDef, descriptors: &[Option<TypeId>]) -> bool {
        if method.params().len() != descriptors.len() {
            return false;
        }
        for (&param, descriptor) in method.params().iter().zip(descriptors) {
            match descriptor {
                // A wildcard is acceptable everywhere except a primitive slot.
                None => {
                    if param.is_primitive() {
                        return false;
                    }
                }
                Some(arg) => {
                    if self.registry.is_assignable(*arg, param) {
                        continue;
                    }
                    // Both arrays with castable components also match.
                    let components = (
                        self.registry.component_of(*arg),
                        self.registry.component_of(param),
                    );
                    if let (Some(arg_comp), Some(param_comp)) = components {
                        if self.registry.is_assignable(arg_comp, param_comp) {
                            continue;
                        }
                    }
                    return false;
                }
            }
        }
        true
    }
}
