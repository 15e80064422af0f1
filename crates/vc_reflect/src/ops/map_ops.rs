use alloc::boxed::Box;

use crate::Reflect;
use crate::ops::RefId;

/// Access to associative containers such as `BTreeMap<K, V>`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_reflect::ops::Map;
///
/// let mut map: BTreeMap<String, u8> = Map::with_capacity(0);
/// map.insert_boxed(Box::new("a".to_string()), Box::new(1_u8)).unwrap();
///
/// let map: &dyn Map = &map;
/// let (key, value) = map.entries().next().unwrap();
/// assert_eq!(key.downcast_ref::<String>().unwrap(), "a");
/// assert_eq!(value.downcast_ref::<u8>(), Some(&1));
/// ```
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries in the container's own order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Inserts an entry, handing both parts back if either has the wrong type.
    ///
    /// An existing entry with an equal key is replaced.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;

    /// Identity of the container, `None` while the map is empty.
    fn ref_id(&self) -> Option<RefId>;

    /// Creates an empty map.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;
}
