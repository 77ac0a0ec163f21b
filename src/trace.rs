//! Diagnostic output gated by the `trace` feature.
//!
//! `trace!(target, fmt, args..)` prints `[underbar::<target>] message` to
//! stderr when built with `--features trace` and expands to nothing
//! otherwise (the arguments are still type-checked).

#[cfg(feature = "trace")]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($target:expr, $($arg:tt)+) => {
        eprintln!("[underbar::{}] {}", $target, format_args!($($arg)+))
    };
}

#[cfg(not(feature = "trace"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($target:expr, $($arg:tt)+) => {{
        let _ = $target;
        if false {
            eprintln!($($arg)+);
        }
    }};
}
