//! `memoize`: cache a single-argument function's results by argument.
//!
//! The cache is a `HashMap` from argument to result. Entries are never
//! evicted. While a result is being computed its key is marked pending and
//! the lock is released, so memoized functions may recurse into themselves
//! on other keys; any other thread asking for a pending key waits for the
//! first computation instead of starting its own.

use parking_lot::{Condvar, Mutex};
use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{UtilError, UtilResult};

enum Slot<R> {
    Pending,
    Ready(R),
}

struct MemoCache<A, R> {
    entries: Mutex<HashMap<A, Slot<R>>>,
    ready: Condvar,
}

impl<A: Hash + Eq + Clone, R: Clone> MemoCache<A, R> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ready: Condvar::new(),
        }
    }

    fn get_or_compute<C>(&self, arg: A, compute: C) -> R
    where
        C: FnOnce(&A) -> R,
    {
        let mut entries = self.entries.lock();
        loop {
            let pending = match entries.get(&arg) {
                Some(Slot::Ready(result)) => return result.clone(),
                Some(Slot::Pending) => true,
                None => false,
            };
            if !pending {
                break;
            }
            self.ready.wait(&mut entries);
        }
        entries.insert(arg.clone(), Slot::Pending);
        drop(entries);

        crate::trace!("memoize", "cache miss, computing");
        let mut pending = PendingGuard {
            cache: self,
            key: &arg,
            armed: true,
        };
        let result = compute(&arg);
        pending.armed = false;
        drop(pending);

        let mut entries = self.entries.lock();
        entries.insert(arg, Slot::Ready(result.clone()));
        self.ready.notify_all();
        result
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }
}

/// Clears a pending slot if the computation unwinds, so waiters retry
/// rather than block forever.
struct PendingGuard<'a, A: Hash + Eq, R> {
    cache: &'a MemoCache<A, R>,
    key: &'a A,
    armed: bool,
}

impl<A: Hash + Eq, R> Drop for PendingGuard<'_, A, R> {
    fn drop(&mut self) {
        if self.armed {
            self.cache.entries.lock().remove(self.key);
            self.cache.ready.notify_all();
        }
    }
}

/// A memoized single-argument function.
pub struct Memoize<A, R, F> {
    func: F,
    cache: MemoCache<A, R>,
}

/// Memoize `func`. The argument must be hashable; that is the Rust rendering
/// of "takes exactly one primitive argument".
pub fn memoize<A, R, F>(func: F) -> Memoize<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: Fn(&A) -> R,
{
    Memoize {
        func,
        cache: MemoCache::new(),
    }
}

impl<A, R, F> Memoize<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: Fn(&A) -> R,
{
    /// Return the cached result for `arg`, computing it on first request.
    pub fn call(&self, arg: A) -> R {
        self.cache.get_or_compute(arg, |arg| (self.func)(arg))
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A memoized function that may call itself through the `recurse` handle it
/// receives, with every inner call going through the cache.
pub struct RecursiveMemoize<A, R, F> {
    func: F,
    cache: MemoCache<A, R>,
}

/// Memoize a self-referential function.
///
/// ```
/// use underbar::memoize_recursive;
///
/// let fib = memoize_recursive(|recurse: &dyn Fn(u64) -> u64, n: &u64| {
///     if *n < 2 { *n } else { recurse(n - 1) + recurse(n - 2) }
/// });
/// assert_eq!(fib.call(80), 23_416_728_348_467_685);
/// ```
pub fn memoize_recursive<A, R, F>(func: F) -> RecursiveMemoize<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, &A) -> R,
{
    RecursiveMemoize {
        func,
        cache: MemoCache::new(),
    }
}

impl<A, R, F> RecursiveMemoize<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, &A) -> R,
{
    pub fn call(&self, arg: A) -> R {
        self.cache.get_or_compute(arg, |arg| {
            let recurse = |inner: A| self.call(inner);
            (self.func)(&recurse, arg)
        })
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hashable form of a primitive JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PrimitiveKey {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Str(String),
}

impl PrimitiveKey {
    fn from_json(value: &Value) -> UtilResult<Self> {
        match value {
            Value::Null => Ok(PrimitiveKey::Null),
            Value::Bool(b) => Ok(PrimitiveKey::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(PrimitiveKey::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(PrimitiveKey::UInt(u))
                } else {
                    let f = n.as_f64().unwrap_or(f64::NAN);
                    Ok(PrimitiveKey::Float(f.to_bits()))
                }
            }
            Value::String(s) => Ok(PrimitiveKey::Str(s.clone())),
            Value::Array(_) => Err(UtilError::invalid(
                "memoize",
                "array argument is not a primitive",
            )),
            Value::Object(_) => Err(UtilError::invalid(
                "memoize",
                "object argument is not a primitive",
            )),
        }
    }
}

/// A memoized function over dynamic JSON arguments.
pub struct MemoizeJson<F> {
    func: F,
    cache: MemoCache<PrimitiveKey, Value>,
}

/// Memoize a function of one JSON value. Only primitives (null, bool,
/// number, string) are accepted as arguments.
pub fn memoize_json<F>(func: F) -> MemoizeJson<F>
where
    F: Fn(&Value) -> Value,
{
    MemoizeJson {
        func,
        cache: MemoCache::new(),
    }
}

impl<F> MemoizeJson<F>
where
    F: Fn(&Value) -> Value,
{
    /// # Errors
    ///
    /// [`UtilError::InvalidArgument`] when `arg` is an array or object.
    pub fn call(&self, arg: &Value) -> UtilResult<Value> {
        let key = PrimitiveKey::from_json(arg)?;
        Ok(self.cache.get_or_compute(key, |_| (self.func)(arg)))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memoize_computes_once_per_argument() {
        let calls = AtomicUsize::new(0);
        let square = memoize(|n: &u64| {
            calls.fetch_add(1, Ordering::SeqCst);
            n * n
        });
        assert!(square.is_empty());
        assert_eq!(square.call(4), 16);
        assert_eq!(square.call(4), 16);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(square.call(5), 25);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(square.len(), 2);
    }

    #[test]
    fn test_memoize_string_keys() {
        let shout = memoize(|s: &String| s.to_uppercase());
        assert_eq!(shout.call("abc".to_string()), "ABC");
        assert_eq!(shout.len(), 1);
    }

    #[test]
    fn test_recursive_fibonacci() {
        let calls = AtomicUsize::new(0);
        let fib = memoize_recursive(|recurse: &dyn Fn(u64) -> u64, n: &u64| {
            calls.fetch_add(1, Ordering::SeqCst);
            if *n < 2 {
                *n
            } else {
                recurse(n - 1) + recurse(n - 2)
            }
        });
        assert_eq!(fib.call(10), 55);
        assert_eq!(fib.call(50), 12_586_269_025);
        assert_eq!(calls.load(Ordering::SeqCst), 51);
        assert_eq!(fib.len(), 51);
    }

    #[test]
    fn test_panic_clears_pending_slot() {
        let fragile = memoize(|n: &i32| {
            if *n < 0 {
                panic!("negative");
            }
            *n
        });
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| fragile.call(-1)));
        assert!(outcome.is_err());
        assert!(fragile.is_empty());
        assert_eq!(fragile.call(3), 3);
    }

    #[test]
    fn test_memoize_json_primitives() {
        let calls = AtomicUsize::new(0);
        let describe = memoize_json(|v: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            json!(format!("<{}>", v))
        });
        assert_eq!(describe.call(&json!(1)).unwrap(), json!("<1>"));
        assert_eq!(describe.call(&json!(1)).unwrap(), json!("<1>"));
        assert_eq!(describe.call(&json!("1")).unwrap(), json!("<\"1\">"));
        assert_eq!(describe.call(&Value::Null).unwrap(), json!("<null>"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_memoize_json_rejects_compound_arguments() {
        let ident = memoize_json(|v: &Value| v.clone());
        let err = ident.call(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, UtilError::InvalidArgument { op: "memoize", .. }));
        assert!(ident.call(&json!({"a": 1})).is_err());
        assert!(ident.is_empty());
    }
}
