//! Function-wrapping combinators: `once`, `memoize`, `delay`.

pub mod delay;
pub mod memoize;
pub mod once;
pub mod scheduler;

pub use delay::{delay, delay_on};
pub use memoize::{
    memoize, memoize_json, memoize_recursive, Memoize, MemoizeJson, RecursiveMemoize,
};
pub use once::{once, Once};
pub use scheduler::{default_scheduler, DelayHandle, Scheduler};
