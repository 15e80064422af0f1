use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, generic_name};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Map, RefId};

type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// Unboxes a key/value pair, handing both back on a type mismatch.
fn take_entry<K: Reflect, V: Reflect>(
    key: Box<dyn Reflect>,
    value: Box<dyn Reflect>,
) -> Result<(K, V), (Box<dyn Reflect>, Box<dyn Reflect>)> {
    let key = match key.take::<K>() {
        Ok(key) => key,
        Err(key) => return Err((key, value)),
    };
    match value.take::<V>() {
        Ok(value) => Ok((key, value)),
        Err(value) => Err((Box::new(key), value)),
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl_generic_type_path!("alloc::collections", BTreeMap<K, V>);

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    crate::reflection::impl_reflect_cast_fn!(Map);
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(
            BTreeMap::iter(self).map(|(key, value)| (key.as_reflect(), value.as_reflect())),
        )
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let (key, value) = take_entry::<K, V>(key, value)?;
        BTreeMap::insert(self, key, value);
        Ok(())
    }

    fn ref_id(&self) -> Option<RefId> {
        if BTreeMap::is_empty(self) {
            return None;
        }
        RefId::of::<Self, Self>(self)
    }

    #[inline]
    fn with_capacity(_capacity: usize) -> Self {
        BTreeMap::new()
    }
}

// -----------------------------------------------------------------------------
// HashMap

// The hasher is not part of the name.
impl<K: TypePath, V: TypePath, S: 'static> TypePath for HashMap<K, V, S> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            generic_name(
                "std::collections::HashMap",
                &[K::type_path(), V::type_path()],
            )
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| generic_name("HashMap", &[K::type_name(), V::type_name()]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("std::collections")
    }
}

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + 'static,
{
    crate::reflection::impl_reflect_cast_fn!(Map);
}

impl<K, V, S> Map for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(HashMap::iter(self).map(|(key, value)| (key.as_reflect(), value.as_reflect())))
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let (key, value) = take_entry::<K, V>(key, value)?;
        HashMap::insert(self, key, value);
        Ok(())
    }

    fn ref_id(&self) -> Option<RefId> {
        if HashMap::is_empty(self) {
            return None;
        }
        RefId::of::<Self, Self>(self)
    }

    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, S::default())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use std::collections::HashMap;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Map;

    #[test]
    fn insert_boxed_checks_types() {
        let mut map: BTreeMap<String, u8> = Map::with_capacity(0);
        Map::insert_boxed(&mut map, Box::new("a".to_string()), Box::new(1_u8)).unwrap();

        let (key, value) =
            Map::insert_boxed(&mut map, Box::new(1_u8), Box::new(2_u8)).unwrap_err();
        assert!(key.is::<u8>());
        assert!(value.is::<u8>());

        let (key, _) =
            Map::insert_boxed(&mut map, Box::new("b".to_string()), Box::new(true)).unwrap_err();
        assert_eq!(key.downcast_ref::<String>().map(String::as_str), Some("b"));

        assert_eq!(map.len(), 1);
    }

    #[test]
    fn map_entries_and_identity() {
        let mut map: HashMap<u8, bool> = HashMap::new();
        assert_eq!(Map::ref_id(&map), None);
        map.insert(7, true);

        let dyn_map: &dyn Map = &map;
        let (key, value) = dyn_map.entries().next().unwrap();
        assert_eq!(key.downcast_ref::<u8>(), Some(&7));
        assert_eq!(value.downcast_ref::<bool>(), Some(&true));
        assert!(dyn_map.ref_id().is_some());
    }

    #[test]
    fn map_paths() {
        assert_eq!(
            <BTreeMap<String, u8>>::type_path(),
            "alloc::collections::BTreeMap<alloc::string::String, u8>"
        );
        assert_eq!(<HashMap<u8, bool>>::type_name(), "HashMap<u8, bool>");

        let info = <HashMap<u8, bool>>::type_info().as_map().unwrap();
        assert!(info.key_is::<u8>());
        assert!(info.value_is::<bool>());
    }
}
