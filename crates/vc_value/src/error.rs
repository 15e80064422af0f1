use alloc::boxed::Box;
use core::error;

use thiserror::Error;

use crate::Value;

// -----------------------------------------------------------------------------
// Error

/// Failure of an iteration, a build or a reconstruction.
///
/// The first error aborts the whole walk; nothing past the failing node is
/// completed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The source value has the wrong variant for the destination kind.
    #[error("cannot reconstruct `{type_path}` from {value}: expected {expected}")]
    KindMismatch {
        value: Value,
        expected: &'static str,
        type_path: &'static str,
    },

    /// A numeric source does not survive the round trip through the
    /// destination representation.
    #[error("{value} does not fit in `{type_path}`")]
    NumericOverflow {
        value: Value,
        type_path: &'static str,
    },

    /// A fixed-length destination received a list of another length.
    #[error("`{type_path}` holds {expected} items, found {found}")]
    LengthMismatch {
        type_path: &'static str,
        expected: usize,
        found: usize,
    },

    /// The destination refused the reconstructed value.
    #[error("destination `{type_path}` refused the reconstructed value")]
    UnsettableDestination { type_path: &'static str },

    /// A `Marker` or `Reference` event reached a consumer that cannot
    /// materialize shared identity.
    #[error("marker/reference {id} is not supported by this consumer")]
    UnsupportedReference { id: u32 },

    /// The event stream is not a single balanced value.
    #[error("malformed event sequence: {0}")]
    MalformedEventSequence(&'static str),

    /// A `RefCell` on the walked path is mutably borrowed.
    #[error("`{type_path}` is mutably borrowed and cannot be read")]
    Borrowed { type_path: &'static str },

    /// Nesting went deeper than the configured maximum.
    #[error("nesting exceeds the depth limit of {0}")]
    DepthLimit(usize),

    /// An error raised by a visitor, e.g. a codec's writer.
    #[error(transparent)]
    Custom(Box<dyn error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a foreign error as [`Error::Custom`].
    ///
    /// ```
    /// use vc_value::Error;
    ///
    /// let err = Error::custom("disk full");
    /// assert_eq!(err.to_string(), "disk full");
    /// ```
    #[inline]
    pub fn custom(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
        Self::Custom(err.into())
    }
}

/// `Result` with [`Error`] as the default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::Value;

    #[test]
    fn messages_name_value_and_destination() {
        let err = Error::KindMismatch {
            value: Value::String("x".into()),
            expected: "List",
            type_path: "alloc::vec::Vec<u8>",
        };
        assert_eq!(
            err.to_string(),
            "cannot reconstruct `alloc::vec::Vec<u8>` from \"x\": expected List"
        );

        let err = Error::NumericOverflow {
            value: Value::Int(300),
            type_path: "i8",
        };
        assert_eq!(err.to_string(), "300 does not fit in `i8`");

        let err = Error::LengthMismatch {
            type_path: "[u8; 2]",
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "`[u8; 2]` holds 2 items, found 3");
    }
}
