//! Shallow field merge
//!
//! Records are merged as JSON objects, one top-level field at a time. Nested
//! values such as `cases` are replaced whole, never merged recursively.

use serde_json::{Map, Value};

/// Top-level fields of a JSON record
pub type Fields = Map<String, Value>;

/// Overlay `layers` left to right
///
/// A field present in a later layer replaces the same field from every
/// earlier layer, including when the later value is `null`. A field absent
/// from a later layer keeps its earlier value.
#[must_use]
pub fn shallow_merge<'a, I>(layers: I) -> Fields
where
    I: IntoIterator<Item = &'a Fields>,
{
    layers.into_iter().fold(Fields::new(), |mut acc, layer| {
        for (name, value) in layer {
            acc.insert(name.clone(), value.clone());
        }
        acc
    })
}
