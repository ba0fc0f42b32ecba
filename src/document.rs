//! Document layer for condition evaluation.
//!
//! This module provides the in-memory view of one stored record:
//!
//! - **Value**: Tagged union of every field kind a document can hold
//! - **Number**: Numeric values compared by magnitude, not representation
//! - **Document**: Key-ordered mapping of top-level field names to values
//! - **FieldLocator**: Resolves dotted/indexed paths to nested values
//!
//! Decoding the on-wire representation is handled elsewhere; everything here
//! operates on already-decoded values.

pub mod locator;
pub mod value;

pub use locator::{FieldLocator, PathLocator};
pub use value::{Number, Value, ValueKind};

use std::collections::BTreeMap;

/// A decoded document: top-level field name to value
pub type Document = BTreeMap<String, Value>;
