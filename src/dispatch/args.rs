//! Argument introspection: runtime values to type descriptors.
//!
//! A descriptor is `Some(TypeId)` for a non-null argument's exact boxed
//! runtime type, or `None` for a null argument. `None` is the wildcard: it
//! is compatible with any non-primitive parameter type and with no primitive
//! parameter type.

use crate::types::registry::TypeRegistry;
use crate::types::TypeId;
use crate::value::Value;
use smallvec::SmallVec;

/// Descriptor list storage; resolution calls rarely carry many arguments.
pub type ArgTypes = SmallVec<[Option<TypeId>; 4]>;

/// Build the type descriptors for a list of runtime arguments.
pub fn argument_types(registry: &TypeRegistry, args: &[Value]) -> ArgTypes {
    args.iter().map(|arg| arg.type_of(registry)).collect()
}

/// Second-phase matching view: boxed descriptors narrowed to their primitive
/// counterparts, everything else unchanged. Never mutates the input.
pub fn to_primitives(descriptors: &[Option<TypeId>]) -> ArgTypes {
    descriptors
        .iter()
        .map(|d| d.map(|ty| ty.to_primitive().unwrap_or(ty)))
        .collect()
}
