use core::fmt;

use crate::info::{Type, TypePath};

// -----------------------------------------------------------------------------
// ScalarKind

/// The concrete leaf type behind a [`ScalarInfo`].
///
/// Consumers match on this once per type and pick a specialised routine,
/// instead of probing the value with downcasts on every visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    /// `alloc::string::String`
    String,
    /// `bytes::Bytes`
    Bytes,
    /// `url::Url`
    Uri,
    /// `chrono::DateTime<chrono::Utc>`
    Timestamp,
}

impl ScalarKind {
    /// Returns `true` for the signed integer kinds.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize
        )
    }

    /// Returns `true` for the unsigned integer kinds.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize
        )
    }

    /// Returns `true` for `f32` and `f64`.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns `true` for any integer or float kind.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_signed() || self.is_unsigned() || self.is_float()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Uri => "uri",
            Self::Timestamp => "timestamp",
        };
        f.pad(name)
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type info for leaf values.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{ScalarKind, Typed};
///
/// let info = u16::type_info().as_scalar().unwrap();
/// assert_eq!(info.scalar_kind(), ScalarKind::U16);
/// assert_eq!(info.type_path(), "u16");
/// ```
#[derive(Clone, Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
}

impl ScalarInfo {
    /// Creates a new [`ScalarInfo`].
    ///
    /// `T` must be the Rust type `kind` names: consumers downcast to it.
    #[inline]
    pub const fn new<T: TypePath + ?Sized>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    crate::info::impl_type_fn!(ty);

    /// Returns the concrete leaf kind.
    #[inline]
    pub const fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
}
