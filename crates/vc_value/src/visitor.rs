use alloc::string::String;
use alloc::vec::Vec;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

use crate::Result;

// -----------------------------------------------------------------------------
// Visitor

/// Receiver of the event stream produced by [`RootIterator`].
///
/// Containers are bracketed by `visit_list_begin` / `visit_map_begin` and
/// exactly one `visit_container_end`. Inside a map, events alternate between
/// a key and a value. A record arrives as a map whose keys are its field
/// names.
///
/// Numbers arrive at full width: signed integers through [`visit_int`],
/// unsigned through [`visit_uint`], floats through [`visit_float`].
///
/// Returning an error aborts the walk; the error reaches the caller of
/// [`RootIterator::iterate`] unchanged.
///
/// [`RootIterator`]: crate::RootIterator
/// [`RootIterator::iterate`]: crate::RootIterator::iterate
/// [`visit_int`]: Visitor::visit_int
/// [`visit_uint`]: Visitor::visit_uint
/// [`visit_float`]: Visitor::visit_float
pub trait Visitor {
    fn visit_nil(&mut self) -> Result<()>;

    fn visit_bool(&mut self, value: bool) -> Result<()>;

    fn visit_int(&mut self, value: i64) -> Result<()>;

    fn visit_uint(&mut self, value: u64) -> Result<()>;

    fn visit_float(&mut self, value: f64) -> Result<()>;

    fn visit_string(&mut self, value: &str) -> Result<()>;

    fn visit_bytes(&mut self, value: &Bytes) -> Result<()>;

    fn visit_uri(&mut self, value: &Url) -> Result<()>;

    fn visit_timestamp(&mut self, value: &DateTime<Utc>) -> Result<()>;

    fn visit_list_begin(&mut self) -> Result<()>;

    fn visit_map_begin(&mut self) -> Result<()>;

    fn visit_container_end(&mut self) -> Result<()>;

    /// The next value is shared; later occurrences arrive as
    /// [`visit_reference`](Visitor::visit_reference) with the same `id`.
    fn visit_marker(&mut self, id: u32) -> Result<()>;

    /// Stands for the value announced by the marker `id`.
    fn visit_reference(&mut self, id: u32) -> Result<()>;
}

// -----------------------------------------------------------------------------
// Event

/// One [`Visitor`] call, as data.
///
/// A `Vec<Event>` is itself a visitor that records what it receives, and
/// [`Event::replay`] drives any visitor from a recorded stream.
///
/// # Examples
///
/// ```
/// use vc_value::{AdhocBuilder, Event, Value};
///
/// let events = [
///     Event::ListBegin,
///     Event::Int(1),
///     Event::String("two".into()),
///     Event::ContainerEnd,
/// ];
///
/// let mut builder = AdhocBuilder::new();
/// Event::replay(&events, &mut builder).unwrap();
/// assert_eq!(
///     builder.finish().unwrap(),
///     Value::List(vec![Value::Int(1), Value::from("two")]),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bytes(Bytes),
    Uri(Url),
    Timestamp(DateTime<Utc>),
    ListBegin,
    MapBegin,
    ContainerEnd,
    Marker(u32),
    Reference(u32),
}

impl Event {
    /// Feeds `events` to `visitor` in order, stopping at the first error.
    pub fn replay(events: &[Event], visitor: &mut dyn Visitor) -> Result<()> {
        events.iter().try_for_each(|event| event.apply(visitor))
    }

    /// Makes the matching call on `visitor`.
    pub fn apply(&self, visitor: &mut dyn Visitor) -> Result<()> {
        match self {
            Self::Nil => visitor.visit_nil(),
            Self::Bool(v) => visitor.visit_bool(*v),
            Self::Int(v) => visitor.visit_int(*v),
            Self::Uint(v) => visitor.visit_uint(*v),
            Self::Float(v) => visitor.visit_float(*v),
            Self::String(v) => visitor.visit_string(v),
            Self::Bytes(v) => visitor.visit_bytes(v),
            Self::Uri(v) => visitor.visit_uri(v),
            Self::Timestamp(v) => visitor.visit_timestamp(v),
            Self::ListBegin => visitor.visit_list_begin(),
            Self::MapBegin => visitor.visit_map_begin(),
            Self::ContainerEnd => visitor.visit_container_end(),
            Self::Marker(id) => visitor.visit_marker(*id),
            Self::Reference(id) => visitor.visit_reference(*id),
        }
    }
}

impl Visitor for Vec<Event> {
    fn visit_nil(&mut self) -> Result<()> {
        self.push(Event::Nil);
        Ok(())
    }

    fn visit_bool(&mut self, value: bool) -> Result<()> {
        self.push(Event::Bool(value));
        Ok(())
    }

    fn visit_int(&mut self, value: i64) -> Result<()> {
        self.push(Event::Int(value));
        Ok(())
    }

    fn visit_uint(&mut self, value: u64) -> Result<()> {
        self.push(Event::Uint(value));
        Ok(())
    }

    fn visit_float(&mut self, value: f64) -> Result<()> {
        self.push(Event::Float(value));
        Ok(())
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        self.push(Event::String(value.into()));
        Ok(())
    }

    fn visit_bytes(&mut self, value: &Bytes) -> Result<()> {
        self.push(Event::Bytes(value.clone()));
        Ok(())
    }

    fn visit_uri(&mut self, value: &Url) -> Result<()> {
        self.push(Event::Uri(value.clone()));
        Ok(())
    }

    fn visit_timestamp(&mut self, value: &DateTime<Utc>) -> Result<()> {
        self.push(Event::Timestamp(*value));
        Ok(())
    }

    fn visit_list_begin(&mut self) -> Result<()> {
        self.push(Event::ListBegin);
        Ok(())
    }

    fn visit_map_begin(&mut self) -> Result<()> {
        self.push(Event::MapBegin);
        Ok(())
    }

    fn visit_container_end(&mut self) -> Result<()> {
        self.push(Event::ContainerEnd);
        Ok(())
    }

    fn visit_marker(&mut self, id: u32) -> Result<()> {
        self.push(Event::Marker(id));
        Ok(())
    }

    fn visit_reference(&mut self, id: u32) -> Result<()> {
        self.push(Event::Reference(id));
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Event, Visitor};
    use crate::Error;

    struct FailOnFloat(usize);

    impl Visitor for FailOnFloat {
        fn visit_nil(&mut self) -> crate::Result<()> {
            self.0 += 1;
            Ok(())
        }
        fn visit_bool(&mut self, _: bool) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_int(&mut self, _: i64) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_uint(&mut self, _: u64) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_float(&mut self, _: f64) -> crate::Result<()> {
            Err(Error::custom("no floats"))
        }
        fn visit_string(&mut self, _: &str) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_bytes(&mut self, _: &bytes::Bytes) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_uri(&mut self, _: &url::Url) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_timestamp(&mut self, _: &chrono::DateTime<chrono::Utc>) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_list_begin(&mut self) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_map_begin(&mut self) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_container_end(&mut self) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_marker(&mut self, _: u32) -> crate::Result<()> {
            self.visit_nil()
        }
        fn visit_reference(&mut self, _: u32) -> crate::Result<()> {
            self.visit_nil()
        }
    }

    #[test]
    fn record_and_replay() {
        let events = vec![
            Event::MapBegin,
            Event::String("k".into()),
            Event::ListBegin,
            Event::Uint(1),
            Event::ContainerEnd,
            Event::Marker(0),
            Event::Reference(0),
            Event::ContainerEnd,
        ];

        let mut copy: Vec<Event> = Vec::new();
        Event::replay(&events, &mut copy).unwrap();
        assert_eq!(copy, events);
    }

    #[test]
    fn replay_stops_at_first_error() {
        let events = [Event::Int(1), Event::Float(2.0), Event::Int(3)];
        let mut visitor = FailOnFloat(0);

        let err = Event::replay(&events, &mut visitor).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert_eq!(visitor.0, 1);
    }
}
