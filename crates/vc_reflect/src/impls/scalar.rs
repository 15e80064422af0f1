use alloc::string::String;
use core::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, ScalarKind, TypeInfo, TypePath, Typed};

macro_rules! impl_scalar {
    ($ty:ident, $kind:ident) => {
        impl_scalar!($ty, $kind, stringify!($ty), stringify!($ty), None);
    };
    ($ty:ty, $kind:ident, $path:expr, $name:expr, $module:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::$kind)))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_cast_fn!(Scalar);

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_scalar!(bool, Bool);
impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(isize, Isize);
impl_scalar!(u8, U8);
impl_scalar!(u16, U16);
impl_scalar!(u32, U32);
impl_scalar!(u64, U64);
impl_scalar!(usize, Usize);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);

impl_scalar!(String, String, "alloc::string::String", "String", Some("alloc::string"));
impl_scalar!(Bytes, Bytes, "bytes::Bytes", "Bytes", Some("bytes"));
impl_scalar!(Url, Uri, "url::Url", "Url", Some("url"));
impl_scalar!(
    DateTime<Utc>,
    Timestamp,
    "chrono::DateTime<chrono::Utc>",
    "DateTime<Utc>",
    Some("chrono")
);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::ToString;

    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use url::Url;

    use crate::Reflect;
    use crate::info::{ReflectKind, ScalarKind, TypePath, Typed};

    #[test]
    fn scalar_kinds() {
        let kind_of = |info: &crate::info::TypeInfo| info.as_scalar().unwrap().scalar_kind();

        assert_eq!(kind_of(bool::type_info()), ScalarKind::Bool);
        assert_eq!(kind_of(isize::type_info()), ScalarKind::Isize);
        assert_eq!(kind_of(f32::type_info()), ScalarKind::F32);
        assert_eq!(kind_of(Bytes::type_info()), ScalarKind::Bytes);
        assert_eq!(kind_of(Url::type_info()), ScalarKind::Uri);
        assert_eq!(kind_of(<chrono::DateTime<Utc>>::type_info()), ScalarKind::Timestamp);
    }

    #[test]
    fn scalar_paths() {
        assert_eq!(u64::type_path(), "u64");
        assert_eq!(u64::module_path(), None);
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_name(), "String");
        assert_eq!(<chrono::DateTime<Utc>>::type_name(), "DateTime<Utc>");
    }

    #[test]
    fn scalar_set_and_debug() {
        let mut stamp = Utc.timestamp_opt(0, 0).unwrap();
        let later = Utc.timestamp_opt(60, 0).unwrap();
        stamp.set(Box::new(later)).unwrap();
        assert_eq!(stamp, later);

        let mut name = "a".to_string();
        assert!(name.set(Box::new(1_u8)).is_err());
        assert_eq!(name.reflect_kind(), ReflectKind::Scalar);

        let boxed: Box<dyn Reflect> = Box::new(-3_i8);
        assert_eq!(alloc::format!("{boxed:?}"), "-3");
    }
}
