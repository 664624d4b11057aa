//! Method definitions and bodies.
//!
//! A [`MethodDef`] is one entry of a type's reflected method table: a name,
//! an ordered parameter type list, a return type, an access level and a
//! native body. Two definitions are equal when their structural signatures
//! (declaring type, name, parameter list) are equal.

use crate::error::{DispatchError, DispatchResult};
use crate::types::TypeId;
use crate::value::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Parameter type list storage; most methods take few parameters.
pub type ParamList = SmallVec<[TypeId; 4]>;

/// Native implementation of a method: receiver and arguments in, value or
/// failure out. Failures raised here propagate to the caller unchanged.
pub type MethodBody = Arc<dyn Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync>;

/// Wrap a closure as a method body.
pub fn native<F>(f: F) -> MethodBody
where
    F: Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

// =============================================================================
// Access Level
// =============================================================================

/// Access level of a method.
///
/// Restricted methods appear in the reflected method table and resolve
/// normally, but invoking one fails with `AccessDenied`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Restricted,
}

// =============================================================================
// Method Definition
// =============================================================================

/// One method of a registered type.
#[derive(Clone)]
pub struct MethodDef {
    name: Arc<str>,
    declaring: TypeId,
    params: ParamList,
    ret: TypeId,
    access: Access,
    body: MethodBody,
}

impl MethodDef {
    pub fn new(
        name: impl Into<Arc<str>>,
        declaring: TypeId,
        params: ParamList,
        ret: TypeId,
        access: Access,
        body: MethodBody,
    ) -> Self {
        Self {
            name: name.into(),
            declaring,
            params,
            ret,
            access,
            body,
        }
    }

    /// Method name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type this method is declared on.
    #[inline]
    pub fn declaring(&self) -> TypeId {
        self.declaring
    }

    /// Declared parameter types, in order.
    #[inline]
    pub fn params(&self) -> &[TypeId] {
        &self.params
    }

    /// Declared return type; `TypeId::PRIM_VOID` for void methods.
    #[inline]
    pub fn return_type(&self) -> TypeId {
        self.ret
    }

    /// Access level.
    #[inline]
    pub fn access(&self) -> Access {
        self.access
    }

    /// Exact structural match against a name and parameter list.
    pub fn signature_matches(&self, name: &str, params: &[TypeId]) -> bool {
        self.name.as_ref() == name && self.params.as_slice() == params
    }

    /// Invoke the method on a receiver.
    ///
    /// Checks the access level, then runs the body; body failures propagate
    /// unchanged.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
        match self.access {
            Access::Restricted => Err(DispatchError::AccessDenied {
                method: self.name.to_string(),
            }),
            Access::Public => (self.body)(receiver, args),
        }
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("declaring", &self.declaring)
            .field("params", &self.params)
            .field("ret", &self.ret)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

impl PartialEq for MethodDef {
    fn eq(&self, other: &Self) -> bool {
        self.declaring == other.declaring
            && self.name == other.name
            && self.params == other.params
    }
}

impl Eq for MethodDef {}
