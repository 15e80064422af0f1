#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod build;
mod cache;
mod dup;
mod error;
mod iter;
mod reconstruct;
mod value;
mod visitor;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Top-level exports

pub use build::{AdhocBuilder, to_value, to_value_with_config};
pub use cache::{is_cached, prime};
pub use dup::{DuplicateTable, find_duplicates};
pub use error::{Error, Result};
pub use iter::{DEFAULT_MAX_DEPTH, IterConfig, RootIterator, iterate};
pub use reconstruct::{RebuildConfig, Reconstructor, from_value};
pub use value::Value;
pub use visitor::{Event, Visitor};
