use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

use vc_reflect::Reflect;

use crate::{Error, IterConfig, Result, RootIterator, Value, Visitor};

// -----------------------------------------------------------------------------
// Frame

#[derive(Debug)]
enum Frame {
    List(Vec<Value>),
    /// Expects a key while `pending` is `None`, its value otherwise.
    Map {
        entries: BTreeMap<Value, Value>,
        pending: Option<Value>,
    },
}

// -----------------------------------------------------------------------------
// AdhocBuilder

/// A [`Visitor`] that assembles the events it receives into a [`Value`].
///
/// Open containers live on an explicit stack, so arbitrarily deep input does
/// not grow the call stack. Any value, including a container, may be a map
/// key.
///
/// Shared identity is not materialized: a marker or reference event fails
/// with [`Error::UnsupportedReference`].
///
/// # Examples
///
/// ```
/// use vc_value::{AdhocBuilder, Value, Visitor};
///
/// let mut builder = AdhocBuilder::new();
/// builder.visit_map_begin().unwrap();
/// builder.visit_string("n").unwrap();
/// builder.visit_int(-1).unwrap();
/// builder.visit_container_end().unwrap();
///
/// assert_eq!(builder.finish().unwrap().get("n"), Some(&Value::Int(-1)));
/// ```
#[derive(Debug, Default)]
pub struct AdhocBuilder {
    stack: Vec<Frame>,
    result: Option<Value>,
}

impl AdhocBuilder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            stack: Vec::new(),
            result: None,
        }
    }

    /// Returns the completed top-level value.
    ///
    /// Fails if no value was received or a container is still open.
    pub fn finish(self) -> Result<Value> {
        if !self.stack.is_empty() {
            return Err(Error::MalformedEventSequence("container left open"));
        }
        self.result
            .ok_or(Error::MalformedEventSequence("no value was received"))
    }

    /// Returns the top-level value once it is complete.
    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Returns the number of open containers.
    #[inline]
    pub fn open_containers(&self) -> usize {
        self.stack.len()
    }

    fn deliver(&mut self, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            None if self.result.is_some() => {
                Err(Error::MalformedEventSequence("more than one top-level value"))
            }
            None => {
                self.result = Some(value);
                Ok(())
            }
            Some(Frame::List(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Map { entries, pending }) => {
                match pending.take() {
                    Some(key) => {
                        entries.insert(key, value);
                    }
                    None => *pending = Some(value),
                }
                Ok(())
            }
        }
    }

    fn open(&mut self, frame: Frame) -> Result<()> {
        if self.stack.is_empty() && self.result.is_some() {
            return Err(Error::MalformedEventSequence("more than one top-level value"));
        }
        self.stack.push(frame);
        Ok(())
    }
}

impl Visitor for AdhocBuilder {
    fn visit_nil(&mut self) -> Result<()> {
        self.deliver(Value::Nil)
    }

    fn visit_bool(&mut self, value: bool) -> Result<()> {
        self.deliver(Value::Bool(value))
    }

    fn visit_int(&mut self, value: i64) -> Result<()> {
        self.deliver(Value::Int(value))
    }

    fn visit_uint(&mut self, value: u64) -> Result<()> {
        self.deliver(Value::Uint(value))
    }

    fn visit_float(&mut self, value: f64) -> Result<()> {
        self.deliver(Value::Float(value))
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        self.deliver(Value::String(value.into()))
    }

    fn visit_bytes(&mut self, value: &Bytes) -> Result<()> {
        self.deliver(Value::Bytes(value.clone()))
    }

    fn visit_uri(&mut self, value: &Url) -> Result<()> {
        self.deliver(Value::Uri(value.clone()))
    }

    fn visit_timestamp(&mut self, value: &DateTime<Utc>) -> Result<()> {
        self.deliver(Value::Timestamp(*value))
    }

    fn visit_list_begin(&mut self) -> Result<()> {
        self.open(Frame::List(Vec::new()))
    }

    fn visit_map_begin(&mut self) -> Result<()> {
        self.open(Frame::Map {
            entries: BTreeMap::new(),
            pending: None,
        })
    }

    fn visit_container_end(&mut self) -> Result<()> {
        let finished = match self.stack.pop() {
            None => return Err(Error::MalformedEventSequence("container end outside a container")),
            Some(Frame::Map {
                pending: Some(_), ..
            }) => return Err(Error::MalformedEventSequence("map key without a value")),
            Some(Frame::Map { entries, .. }) => Value::Map(entries),
            Some(Frame::List(items)) => Value::List(items),
        };
        self.deliver(finished)
    }

    fn visit_marker(&mut self, id: u32) -> Result<()> {
        Err(Error::UnsupportedReference { id })
    }

    fn visit_reference(&mut self, id: u32) -> Result<()> {
        Err(Error::UnsupportedReference { id })
    }
}

// -----------------------------------------------------------------------------
// Conversions

/// Converts a reflected value into a [`Value`].
///
/// Shared instances are reported as markers, which the builder rejects; use
/// [`to_value_with_config`] with references turned off to duplicate them
/// instead.
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_value::{Value, to_value};
///
/// #[derive(Reflect, Default)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: -2 }).unwrap();
/// assert_eq!(value.get("y"), Some(&Value::Int(-2)));
/// ```
#[inline]
pub fn to_value(value: &dyn Reflect) -> Result<Value> {
    to_value_with_config(value, IterConfig::default())
}

/// Converts a reflected value into a [`Value`] with the given walk options.
pub fn to_value_with_config(value: &dyn Reflect, config: IterConfig) -> Result<Value> {
    let mut builder = AdhocBuilder::new();
    RootIterator::with_config(&mut builder, config).iterate(value)?;
    builder.finish()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;

    use super::{AdhocBuilder, to_value, to_value_with_config};
    use crate::{Error, Event, IterConfig, Value};

    fn build(events: &[Event]) -> crate::Result<Value> {
        let mut builder = AdhocBuilder::new();
        Event::replay(events, &mut builder)?;
        builder.finish()
    }

    #[test]
    fn nested_containers() {
        let value = build(&[
            Event::MapBegin,
            Event::ListBegin,
            Event::Int(1),
            Event::ContainerEnd,
            Event::MapBegin,
            Event::ContainerEnd,
            Event::String("v".into()),
            Event::ListBegin,
            Event::ContainerEnd,
            Event::ContainerEnd,
        ])
        .unwrap();

        let entries = value.as_map().unwrap();
        assert_eq!(
            entries.get(&Value::List(vec![Value::Int(1)])),
            Some(&Value::Map(Default::default()))
        );
        assert_eq!(entries.get(&Value::from("v")), Some(&Value::List(vec![])));
    }

    #[test]
    fn malformed_sequences() {
        let cases: [&[Event]; 5] = [
            &[Event::ContainerEnd],
            &[Event::ListBegin],
            &[Event::MapBegin, Event::Int(1), Event::ContainerEnd],
            &[Event::Int(1), Event::Int(2)],
            &[Event::Nil, Event::ListBegin],
        ];
        for events in cases {
            let err = build(events).unwrap_err();
            assert!(matches!(err, Error::MalformedEventSequence(_)), "{events:?}");
        }

        let err = AdhocBuilder::new().finish().unwrap_err();
        assert!(matches!(err, Error::MalformedEventSequence(_)));
    }

    #[test]
    fn peek_after_completion() {
        let mut builder = AdhocBuilder::new();
        Event::replay(&[Event::ListBegin, Event::Bool(true)], &mut builder).unwrap();
        assert_eq!(builder.peek(), None);
        assert_eq!(builder.open_containers(), 1);

        Event::replay(&[Event::ContainerEnd], &mut builder).unwrap();
        assert_eq!(builder.peek(), Some(&Value::List(vec![Value::Bool(true)])));
    }

    #[test]
    fn references_are_rejected() {
        let err = build(&[Event::Marker(0), Event::Nil]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedReference { id: 0 }));

        let shared = Rc::new(3_u8);
        let list = vec![Rc::clone(&shared), Rc::clone(&shared)];
        let err = to_value(&list).unwrap_err();
        assert!(matches!(err, Error::UnsupportedReference { id: 0 }));

        let copied = to_value_with_config(&list, IterConfig::new().with_references(false)).unwrap();
        assert_eq!(copied, Value::List(vec![Value::Uint(3), Value::Uint(3)]));
    }
}
