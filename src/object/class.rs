//! Class registration builder.
//!
//! A [`ClassBuilder`] accumulates a class's name, optional base and methods
//! in declaration order, then hands them to
//! [`TypeRegistry::define`](crate::types::registry::TypeRegistry::define),
//! which allocates the type id and freezes the definition.

use crate::object::method::{Access, MethodBody, MethodDef, ParamList};
use crate::types::TypeId;

/// Builder for registering a user class.
pub struct ClassBuilder {
    name: String,
    base: Option<TypeId>,
    methods: Vec<MethodSpec>,
}

/// A method pending registration; the declaring type id is not known until
/// the registry allocates it.
pub(crate) struct MethodSpec {
    name: String,
    params: ParamList,
    ret: TypeId,
    access: Access,
    body: MethodBody,
}

impl MethodSpec {
    pub(crate) fn into_def(self, declaring: TypeId) -> MethodDef {
        MethodDef::new(
            self.name,
            declaring,
            self.params,
            self.ret,
            self.access,
            self.body,
        )
    }
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            methods: Vec::new(),
        }
    }

    /// Set the base class. Classes without an explicit base inherit from
    /// `Object`.
    pub fn extends(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Declare a public method.
    pub fn method(
        self,
        name: impl Into<String>,
        params: &[TypeId],
        ret: TypeId,
        body: MethodBody,
    ) -> Self {
        self.method_with_access(name, params, ret, Access::Public, body)
    }

    /// Declare a method that resolves but cannot be invoked.
    pub fn restricted_method(
        self,
        name: impl Into<String>,
        params: &[TypeId],
        ret: TypeId,
        body: MethodBody,
    ) -> Self {
        self.method_with_access(name, params, ret, Access::Restricted, body)
    }

    fn method_with_access(
        mut self,
        name: impl Into<String>,
        params: &[TypeId],
        ret: TypeId,
        access: Access,
        body: MethodBody,
    ) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            params: params.iter().copied().collect(),
            ret,
            access,
            body,
        });
        self
    }

    pub(crate) fn into_parts(self) -> (String, Option<TypeId>, Vec<MethodSpec>) {
        (self.name, self.base, self.methods)
    }
}
