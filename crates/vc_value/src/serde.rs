//! Serde support for [`Value`].
//!
//! A [`Value`] serializes as the self-describing data it holds, so any serde
//! format can carry the output of [`to_value`](crate::to_value). URIs and
//! timestamps travel as strings and come back as [`Value::String`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};

use bytes::Bytes;
use chrono::SecondsFormat;
use serde_core::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::Value;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.serialize_bytes(v),
            Value::Uri(v) => serializer.serialize_str(v.as_str()),
            Value::Timestamp(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("any self-describing value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Uint(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.into()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(Bytes::copy_from_slice(v)))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(Bytes::from(v)))
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry()? {
            entries.insert(key, value);
        }
        Ok(Value::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use url::Url;

    use crate::{Error, Value, from_value};

    #[test]
    fn json_round_trip() {
        let value: Value = [
            (Value::from("nil"), Value::Nil),
            (Value::from("flag"), Value::Bool(false)),
            (Value::from("neg"), Value::Int(-3)),
            (Value::from("pos"), Value::Uint(7)),
            (Value::from("half"), Value::Float(0.5)),
            (
                Value::from("items"),
                Value::List(vec![Value::from("a"), Value::List(vec![])]),
            ),
        ]
        .into_iter()
        .collect();

        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(
            text,
            r#"{"flag":false,"half":0.5,"items":["a",[]],"neg":-3,"nil":null,"pos":7}"#
        );
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn leaves_become_plain_data() {
        let value = Value::List(vec![
            Value::Bytes(Bytes::from_static(&[1, 2])),
            Value::Uri(Url::parse("https://example.com/").unwrap()),
            Value::Timestamp(Utc.with_ymd_and_hms(2021, 6, 7, 8, 9, 10).unwrap()),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap().to_string(),
            r#"[[1,2],"https://example.com/","2021-06-07T08:09:10Z"]"#
        );
    }

    #[test]
    fn decoded_leaves_stay_strings() {
        let link = Url::parse("https://example.com/a?b=1").unwrap();
        let stamp = Utc.with_ymd_and_hms(2021, 6, 7, 8, 9, 10).unwrap();
        let value = Value::List(vec![Value::Uri(link.clone()), Value::Timestamp(stamp)]);

        let text = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        let Value::List(items) = &back else {
            panic!("expected a list, got {back}");
        };
        assert_eq!(items[0], Value::from(link.as_str()));
        assert_eq!(items[1], Value::from("2021-06-07T08:09:10Z"));

        assert!(matches!(
            from_value::<Url>(&items[0]),
            Err(Error::KindMismatch { expected: "Uri", .. }),
        ));
        assert!(matches!(
            from_value::<chrono::DateTime<Utc>>(&items[1]),
            Err(Error::KindMismatch { expected: "Timestamp", .. }),
        ));
        assert_eq!(from_value::<String>(&items[0]).unwrap(), link.as_str());
    }
}
