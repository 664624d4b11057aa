//! Object model: classes, methods and instances.

pub mod class;
pub mod instance;
pub mod method;

pub use class::ClassBuilder;
pub use instance::Instance;
pub use method::{native, Access, MethodBody, MethodDef, ParamList};
