//! Collection primitives over sequences, keyed mappings and records.

pub mod invoke;
pub mod mapping;
pub mod record;
pub mod sequence;

pub use invoke::{invoke, invoke_mut, invoke_with, invoke_with_mut, MethodRef, Methods};
pub use mapping::{contains_value, defaults, each_entry, extend, Mapping};
pub use record::{pluck, Record};
pub use sequence::{
    contains, each, every, every_default, filter, first, first_n, fold, index_of, last, last_n,
    map, reduce, reject, some, some_default, uniq,
};
