//! The closed set of values a constant binding may hold.

use crate::key::TypeRef;
use crate::value::Instance;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// An enumerant captured with its type and variant name.
#[derive(Clone)]
pub struct EnumConstant {
    ty: TypeRef,
    name: Cow<'static, str>,
    value: Instance,
}

impl EnumConstant {
    /// Captures `value`; its `Debug` output is kept as the variant name.
    pub fn new<E: fmt::Debug + Send + Sync + 'static>(value: E) -> Self {
        Self { ty: TypeRef::of::<E>(), name: format!("{value:?}").into(), value: Instance::of(value) }
    }

    #[must_use]
    pub const fn type_ref(&self) -> TypeRef {
        self.ty
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for EnumConstant {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.name == other.name
    }
}

impl fmt::Debug for EnumConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.ty, self.name)
    }
}

/// A constant value of one of the supported kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Type(TypeRef),
    Enum(EnumConstant),
}

macro_rules! constant_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for ConstantValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

constant_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Str,
    TypeRef => Type,
    EnumConstant => Enum,
}

impl From<&'static str> for ConstantValue {
    fn from(value: &'static str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// Tries each listed type in order and converts the first match.
macro_rules! downcast_first {
    ($value:ident: $($ty:ty),+ $(,)?) => {{
        $(
            let $value = match $value.downcast::<$ty>() {
                Ok(matched) => return Ok(Self::from(*matched)),
                Err(other) => other,
            };
        )+
        Err($value)
    }};
}

impl ConstantValue {
    /// Captures an enumerant.
    pub fn enumerant<E: fmt::Debug + Send + Sync + 'static>(value: E) -> Self {
        Self::Enum(EnumConstant::new(value))
    }

    /// Classifies a dynamically typed value against the supported kinds.
    ///
    /// # Errors
    /// Hands the value back when it matches no kind.
    pub fn from_dynamic(
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<Self, Box<dyn Any + Send + Sync>> {
        downcast_first!(value:
            bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, char,
            String, &'static str, TypeRef, EnumConstant,
        )
    }

    /// Short name of the kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Type(_) => "type",
            Self::Enum(_) => "enum",
        }
    }

    /// The type the constant resolves as.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Self::Bool(_) => TypeRef::of::<bool>(),
            Self::I8(_) => TypeRef::of::<i8>(),
            Self::I16(_) => TypeRef::of::<i16>(),
            Self::I32(_) => TypeRef::of::<i32>(),
            Self::I64(_) => TypeRef::of::<i64>(),
            Self::U8(_) => TypeRef::of::<u8>(),
            Self::U16(_) => TypeRef::of::<u16>(),
            Self::U32(_) => TypeRef::of::<u32>(),
            Self::U64(_) => TypeRef::of::<u64>(),
            Self::F32(_) => TypeRef::of::<f32>(),
            Self::F64(_) => TypeRef::of::<f64>(),
            Self::Char(_) => TypeRef::of::<char>(),
            Self::Str(_) => TypeRef::of::<String>(),
            Self::Type(_) => TypeRef::of::<TypeRef>(),
            Self::Enum(e) => e.type_ref(),
        }
    }

    /// Converts the constant into a resolvable value of [`ConstantValue::type_ref`].
    #[must_use]
    pub fn into_instance(self) -> Instance {
        match self {
            Self::Bool(v) => Instance::of(v),
            Self::I8(v) => Instance::of(v),
            Self::I16(v) => Instance::of(v),
            Self::I32(v) => Instance::of(v),
            Self::I64(v) => Instance::of(v),
            Self::U8(v) => Instance::of(v),
            Self::U16(v) => Instance::of(v),
            Self::U32(v) => Instance::of(v),
            Self::U64(v) => Instance::of(v),
            Self::F32(v) => Instance::of(v),
            Self::F64(v) => Instance::of(v),
            Self::Char(v) => Instance::of(v),
            Self::Str(v) => Instance::of(v),
            Self::Type(v) => Instance::of(v),
            Self::Enum(e) => e.value,
        }
    }
}
