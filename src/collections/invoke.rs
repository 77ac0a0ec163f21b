//! `invoke`: call a method on every element of a sequence.
//!
//! The method is either looked up by name through [`Methods`] or supplied as
//! a callable receiving the element as its receiver.

use serde_json::Value;
use std::fmt;

use crate::error::{UtilError, UtilResult};
use crate::value::SortKey;

type Callable<'a, T, A> = Box<dyn Fn(&mut T, &[A]) + 'a>;

/// A method reference: a name resolved per element, or a callable.
pub enum MethodRef<'a, T, A> {
    Name(&'a str),
    Callable(Callable<'a, T, A>),
}

impl<'a, T, A> MethodRef<'a, T, A> {
    pub fn name(name: &'a str) -> Self {
        MethodRef::Name(name)
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&mut T, &[A]) + 'a,
    {
        MethodRef::Callable(Box::new(f))
    }
}

impl<T, A> fmt::Debug for MethodRef<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodRef::Name(name) => f.debug_tuple("Name").field(name).finish(),
            MethodRef::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// Types exposing named methods to [`invoke`].
///
/// An empty impl is enough for a type used with callables only: every name
/// then resolves to an error.
pub trait Methods<A> {
    /// Run the method `name` on `self` with `args`.
    ///
    /// # Errors
    ///
    /// [`UtilError::InvalidArgument`] when `self` has no method `name`.
    fn call_method(&mut self, name: &str, _args: &[A]) -> UtilResult<()> {
        Err(unknown_method(name, std::any::type_name::<Self>()))
    }
}

fn unknown_method(name: &str, receiver: &str) -> UtilError {
    UtilError::invalid("invoke", format!("no method '{}' on {}", name, receiver))
}

/// JSON arrays know `sort`, `reverse`, `push`, `pop`, `shift` and `clear`;
/// JSON strings know `toUpperCase`, `toLowerCase` and `trim`.
impl Methods<Value> for Value {
    fn call_method(&mut self, name: &str, args: &[Value]) -> UtilResult<()> {
        match self {
            Value::Array(items) => match name {
                "sort" => items.sort_by(|a, b| a.cmp_key(b)),
                "reverse" => items.reverse(),
                "push" => items.extend(args.iter().cloned()),
                "pop" => {
                    items.pop();
                }
                "shift" => {
                    if !items.is_empty() {
                        items.remove(0);
                    }
                }
                "clear" => items.clear(),
                _ => return Err(unknown_method(name, "array")),
            },
            Value::String(s) => match name {
                "toUpperCase" => *s = s.to_uppercase(),
                "toLowerCase" => *s = s.to_lowercase(),
                "trim" => *s = s.trim().to_string(),
                _ => return Err(unknown_method(name, "string")),
            },
            other => return Err(unknown_method(name, json_kind(other))),
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<T: Ord + Clone> Methods<T> for Vec<T> {
    fn call_method(&mut self, name: &str, args: &[T]) -> UtilResult<()> {
        match name {
            "sort" => self.sort(),
            "reverse" => self.reverse(),
            "push" => self.extend_from_slice(args),
            "pop" => {
                self.pop();
            }
            "clear" => self.clear(),
            "dedup" => self.dedup(),
            _ => return Err(unknown_method(name, "vec")),
        }
        Ok(())
    }
}

/// Invoke `method` on every element, in place, and return the sequence.
///
/// Stops at the first element whose lookup fails; elements before it have
/// already been called.
pub fn invoke_mut<'s, T, A>(
    seq: &'s mut [T],
    method: &MethodRef<'_, T, A>,
    args: &[A],
) -> UtilResult<&'s mut [T]>
where
    T: Methods<A>,
{
    match method {
        MethodRef::Name(name) => {
            for element in seq.iter_mut() {
                element.call_method(name, args)?;
            }
            Ok(seq)
        }
        MethodRef::Callable(f) => Ok(invoke_with_mut(seq, &**f, args)),
    }
}

/// Invoke `method` on a copy of every element and return the copies. The
/// caller's sequence is untouched.
pub fn invoke<T, A>(seq: &[T], method: &MethodRef<'_, T, A>, args: &[A]) -> UtilResult<Vec<T>>
where
    T: Methods<A> + Clone,
{
    let mut copies = seq.to_vec();
    invoke_mut(&mut copies, method, args)?;
    Ok(copies)
}

/// Call `f` on every element, in place, with `args`. Works for any element
/// type, since nothing is looked up by name.
pub fn invoke_with_mut<'s, T, A, F>(seq: &'s mut [T], f: F, args: &[A]) -> &'s mut [T]
where
    F: Fn(&mut T, &[A]),
{
    for element in seq.iter_mut() {
        f(element, args);
    }
    seq
}

/// [`invoke_with_mut`] on copies of the elements.
pub fn invoke_with<T, A, F>(seq: &[T], f: F, args: &[A]) -> Vec<T>
where
    T: Clone,
    F: Fn(&mut T, &[A]),
{
    let mut copies = seq.to_vec();
    invoke_with_mut(&mut copies, f, args);
    copies
}
