//! `delay`: run a function once after a wait, without blocking the caller.

use std::time::Duration;

use super::scheduler::{default_scheduler, DelayHandle, Scheduler};
use crate::error::UtilResult;

/// Call `func(args)` no earlier than `wait` from now on the shared
/// scheduler. The result of `func` is discarded.
///
/// # Errors
///
/// Fails if the shared timer thread cannot be started or has stopped.
pub fn delay<A, F>(func: F, wait: Duration, args: A) -> UtilResult<DelayHandle>
where
    A: Send + 'static,
    F: FnOnce(A) + Send + 'static,
{
    delay_on(default_scheduler()?, func, wait, args)
}

/// [`delay`] on a specific scheduler.
pub fn delay_on<A, F>(
    scheduler: &Scheduler,
    func: F,
    wait: Duration,
    args: A,
) -> UtilResult<DelayHandle>
where
    A: Send + 'static,
    F: FnOnce(A) + Send + 'static,
{
    scheduler.schedule(wait, move || func(args))
}
