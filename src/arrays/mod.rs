//! Array combinatorics: shuffling, sorting, zipping, flattening and set
//! operations. Every function returns a new sequence.

pub mod flatten;
pub mod sets;
pub mod shuffle;
pub mod sort;
pub mod zip;

pub use flatten::{flatten, flatten_json, flatten_shallow, Nested};
pub use sets::{difference, intersection};
pub use shuffle::{shuffle, shuffle_configured, shuffle_seeded, shuffle_with};
pub use sort::{sort_by, sort_by_property};
pub use zip::{zip, zip2};
