//! Underbar - Collection and Function Utilities
//!
//! A namespace of independent, generic utilities over in-memory data supplied
//! by the caller.
//!
//! # Tiers
//!
//! - **Collections**: `first`, `last`, `each`, `index_of`, `filter`, `reject`,
//!   `uniq`, `map`, `pluck`, `invoke`, `reduce`, `contains`, `every`, `some`
//! - **Object merging**: `extend`, `defaults`
//! - **Function combinators**: `once`, `memoize`, `delay`
//! - **Array combinatorics**: `shuffle`, `sort_by`, `zip`, `flatten`,
//!   `intersection`, `difference`
//!
//! Transforms never mutate their input: each returns a freshly allocated
//! `Vec`. The only functions that write through a reference are `extend`,
//! `defaults`, `invoke_mut` and `invoke_with_mut`, whose contracts say so.
//!
//! # Example
//!
//! ```rust
//! use underbar::{difference, reduce, sort_by, uniq, zip};
//!
//! assert_eq!(reduce(&[1, 2, 3, 4], |a, b| a + b, None).unwrap(), 10);
//! assert_eq!(uniq(&[1, 1, 2]), vec![1, 2]);
//! assert_eq!(difference(&[1, 2, 3, 4], &[&[2, 4][..]]), vec![1, 3]);
//! assert_eq!(sort_by(&["ccc", "a", "bb"], |s| s.len()), vec!["a", "bb", "ccc"]);
//! assert_eq!(zip(&[&[1, 2][..], &[3][..]]), vec![vec![Some(1), Some(3)], vec![Some(2), None]]);
//! ```
//!
//! # Threads
//!
//! Everything is synchronous except `delay`, which hands its job to a timer
//! thread (see [`functions::Scheduler`]). `Once` and the memoizers guard their
//! state with `parking_lot` locks and may be shared across threads.

#[doc(hidden)]
pub mod trace;

pub mod arrays;
pub mod collections;
pub mod config;
pub mod error;
pub mod functions;
pub mod value;

// Re-export the whole utility namespace at the crate root
pub use arrays::{
    difference, flatten, flatten_json, flatten_shallow, intersection, shuffle, shuffle_configured,
    shuffle_seeded, shuffle_with, sort_by, sort_by_property, zip, zip2, Nested,
};
pub use collections::{
    contains, contains_value, defaults, each, each_entry, every, every_default, extend, filter,
    first, first_n, fold, index_of, invoke, invoke_mut, invoke_with, invoke_with_mut, last, last_n,
    map, pluck, reduce, reject, some, some_default, uniq, Mapping, MethodRef, Methods, Record,
};
pub use config::{ConfigError, ConfigResult, SchedulerConfig, ShuffleConfig, UnderbarConfig};
pub use error::{UtilError, UtilResult};
pub use functions::{
    default_scheduler, delay, delay_on, memoize, memoize_json, memoize_recursive, once,
    DelayHandle, Memoize, MemoizeJson, Once, RecursiveMemoize, Scheduler,
};
pub use value::{NoValue, Parity, SortKey};
