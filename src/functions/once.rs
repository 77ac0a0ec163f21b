//! `once`: a wrapper that runs its function at most one time.

use parking_lot::Mutex;
use std::fmt;

enum OnceState<F, R> {
    Pending(F),
    Running,
    Done(R),
}

/// A function that runs on the first `call` only. Later calls, whatever their
/// arguments, return a clone of the first result.
///
/// The guard and cached value sit behind one lock that is held across the
/// underlying call, so concurrent first callers produce exactly one
/// execution; the others block and then receive the cached result.
pub struct Once<F, R> {
    state: Mutex<OnceState<F, R>>,
}

/// Wrap `func` so it runs at most once.
pub fn once<F, R>(func: F) -> Once<F, R> {
    Once {
        state: Mutex::new(OnceState::Pending(func)),
    }
}

impl<F, R: Clone> Once<F, R> {
    /// Call the wrapped function, or return the cached result.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped function panicked during its one permitted call,
    /// since no result exists to return. Calling the same `Once` from inside
    /// its own function deadlocks.
    pub fn call<A>(&self, args: A) -> R
    where
        F: FnOnce(A) -> R,
    {
        let mut state = self.state.lock();
        if let OnceState::Done(result) = &*state {
            return result.clone();
        }
        match std::mem::replace(&mut *state, OnceState::Running) {
            OnceState::Pending(func) => {
                crate::trace!("once", "first call");
                let result = func(args);
                *state = OnceState::Done(result.clone());
                result
            }
            _ => panic!("Once: wrapped function panicked on its first call"),
        }
    }
}

impl<F, R> Once<F, R> {
    /// Whether the wrapped function has completed its call.
    pub fn has_run(&self) -> bool {
        matches!(*self.state.lock(), OnceState::Done(_))
    }
}

impl<F, R: fmt::Debug> fmt::Debug for Once<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.lock() {
            OnceState::Done(result) => f.debug_tuple("Once").field(result).finish(),
            _ => f.write_str("Once(<pending>)"),
        }
    }
}
