//! Instances of registered classes.
//!
//! An [`Instance`] pairs a class id with an attribute dictionary, so that
//! registered accessor methods have real state to read and write. The
//! dictionary is behind an `RwLock` for safe concurrent access; the class id
//! is immutable.

use crate::types::TypeId;
use crate::value::Value;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// An instance of a registered class.
pub struct Instance {
    class: TypeId,
    attrs: RwLock<FxHashMap<String, Value>>,
}

impl Instance {
    /// Create an instance of the given class.
    pub fn new(class: TypeId) -> Arc<Self> {
        Arc::new(Self {
            class,
            attrs: RwLock::new(FxHashMap::default()),
        })
    }

    /// The instance's class.
    #[inline]
    pub fn class(&self) -> TypeId {
        self.class
    }

    /// Get an attribute.
    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.attrs.read().get(name).cloned()
    }

    /// Set an attribute.
    #[inline]
    pub fn set_attr(&self, name: impl Into<String>, value: Value) {
        self.attrs.write().insert(name.into(), value);
    }

    /// Check if an attribute exists.
    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.read().contains_key(name)
    }

    /// All attribute names.
    pub fn attr_names(&self) -> Vec<String> {
        self.attrs.read().keys().cloned().collect()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class)
            .field("attrs", &self.attrs.read().len())
            .finish()
    }
}
