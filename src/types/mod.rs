//! Type universe for the reflection engine.
//!
//! Every type the engine can see is identified by a [`TypeId`]. The low ids
//! are reserved for builtins: the nine primitive types, their boxed
//! counterparts, `Object` and `String`. User classes and interned array types
//! allocate ids at or above [`TypeId::FIRST_USER_TYPE`].

pub mod registry;

// =============================================================================
// Type Identifier
// =============================================================================

/// Unique identifier for a registered type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    // Primitive types.
    pub const PRIM_BOOLEAN: TypeId = TypeId(0);
    pub const PRIM_CHAR: TypeId = TypeId(1);
    pub const PRIM_BYTE: TypeId = TypeId(2);
    pub const PRIM_SHORT: TypeId = TypeId(3);
    pub const PRIM_INT: TypeId = TypeId(4);
    pub const PRIM_LONG: TypeId = TypeId(5);
    pub const PRIM_FLOAT: TypeId = TypeId(6);
    pub const PRIM_DOUBLE: TypeId = TypeId(7);
    pub const PRIM_VOID: TypeId = TypeId(8);

    // Boxed counterparts of the primitives.
    pub const BOOLEAN: TypeId = TypeId(9);
    pub const CHARACTER: TypeId = TypeId(10);
    pub const BYTE: TypeId = TypeId(11);
    pub const SHORT: TypeId = TypeId(12);
    pub const INTEGER: TypeId = TypeId(13);
    pub const LONG: TypeId = TypeId(14);
    pub const FLOAT: TypeId = TypeId(15);
    pub const DOUBLE: TypeId = TypeId(16);
    pub const VOID: TypeId = TypeId(17);

    /// Root of the reference-type hierarchy.
    pub const OBJECT: TypeId = TypeId(18);
    pub const STRING: TypeId = TypeId(19);

    /// First id available for user classes and interned array types.
    pub const FIRST_USER_TYPE: u32 = 32;

    /// Get the raw id value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create a TypeId from a raw value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Check if this is a builtin type id.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER_TYPE
    }

    /// Check if this is one of the nine primitive types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 <= Self::PRIM_VOID.0
    }

    /// Map a boxed type to its primitive counterpart.
    ///
    /// Returns `None` for types that have no primitive form.
    pub fn to_primitive(self) -> Option<TypeId> {
        match self {
            Self::BOOLEAN => Some(Self::PRIM_BOOLEAN),
            Self::CHARACTER => Some(Self::PRIM_CHAR),
            Self::BYTE => Some(Self::PRIM_BYTE),
            Self::SHORT => Some(Self::PRIM_SHORT),
            Self::INTEGER => Some(Self::PRIM_INT),
            Self::LONG => Some(Self::PRIM_LONG),
            Self::FLOAT => Some(Self::PRIM_FLOAT),
            Self::DOUBLE => Some(Self::PRIM_DOUBLE),
            Self::VOID => Some(Self::PRIM_VOID),
            _ => None,
        }
    }

    /// Map a primitive type to its boxed counterpart.
    pub fn to_boxed(self) -> Option<TypeId> {
        match self {
            Self::PRIM_BOOLEAN => Some(Self::BOOLEAN),
            Self::PRIM_CHAR => Some(Self::CHARACTER),
            Self::PRIM_BYTE => Some(Self::BYTE),
            Self::PRIM_SHORT => Some(Self::SHORT),
            Self::PRIM_INT => Some(Self::INTEGER),
            Self::PRIM_LONG => Some(Self::LONG),
            Self::PRIM_FLOAT => Some(Self::FLOAT),
            Self::PRIM_DOUBLE => Some(Self::DOUBLE),
            Self::PRIM_VOID => Some(Self::VOID),
            _ => None,
        }
    }

    /// Readable name for a builtin type id.
    pub(crate) fn builtin_name(self) -> Option<&'static str> {
        let name = match self {
            Self::PRIM_BOOLEAN => "boolean",
            Self::PRIM_CHAR => "char",
            Self::PRIM_BYTE => "byte",
            Self::PRIM_SHORT => "short",
            Self::PRIM_INT => "int",
            Self::PRIM_LONG => "long",
            Self::PRIM_FLOAT => "float",
            Self::PRIM_DOUBLE => "double",
            Self::PRIM_VOID => "void",
            Self::BOOLEAN => "Boolean",
            Self::CHARACTER => "Character",
            Self::BYTE => "Byte",
            Self::SHORT => "Short",
            Self::INTEGER => "Integer",
            Self::LONG => "Long",
            Self::FLOAT => "Float",
            Self::DOUBLE => "Double",
            Self::VOID => "Void",
            Self::OBJECT => "Object",
            Self::STRING => "String",
            _ => return None,
        };
        Some(name)
    }
}
