//! Duck-typed method resolution over a registered class model.
//!
//! Given a target type, a property-style name (e.g. `"Value"`) and a set of
//! runtime argument values, `mirror` determines and invokes the best-matching
//! method on that type without compile-time knowledge of the type's method
//! signatures.
//!
//! This crate provides:
//! - A type registry with the primitive/boxed builtins, user-defined classes
//!   and interned array types
//! - A runtime [`Value`] model with class instances and typed arrays
//! - The [`Reflector`] engine: regex method search, getter discovery, and
//!   three-phase best-method resolution backed by a lazily built per-type
//!   method table

pub mod dispatch;
pub mod error;
pub mod object;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use dispatch::Reflector;
pub use error::{DispatchError, DispatchResult};
pub use object::{native, Access, ClassBuilder, Instance, MethodDef};
pub use types::registry::{TypeKind, TypeRegistry};
pub use types::TypeId;
pub use value::{ArrayValue, Value};
