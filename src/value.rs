//! Value classification traits.
//!
//! Elements are generic, but a few operations need to ask questions of them:
//! whether a value counts as "no value" (`defaults`, `sort_by`), how two sort
//! keys compare (`sort_by`), and whether a number is even (`some_default`).

use serde_json::Value;
use std::cmp::Ordering;

/// The "no value" marker: `None`, JSON `null`.
pub trait NoValue {
    fn is_no_value(&self) -> bool;
}

impl<T> NoValue for Option<T> {
    fn is_no_value(&self) -> bool {
        self.is_none()
    }
}

impl NoValue for Value {
    fn is_no_value(&self) -> bool {
        self.is_null()
    }
}

impl<T: NoValue + ?Sized> NoValue for &T {
    fn is_no_value(&self) -> bool {
        (**self).is_no_value()
    }
}

macro_rules! always_a_value {
    ($($t:ty),*) => {
        $(
            impl NoValue for $t {
                fn is_no_value(&self) -> bool {
                    false
                }
            }
        )*
    };
}

always_a_value!(bool, char, String, str);
always_a_value!(i8, i16, i32, i64, i128, isize);
always_a_value!(u8, u16, u32, u64, u128, usize, f32, f64);

impl<T> NoValue for Vec<T> {
    fn is_no_value(&self) -> bool {
        false
    }
}

/// A total order over sort keys.
///
/// Values for which [`NoValue::is_no_value`] holds are not compared with this;
/// `sort_by` moves them to the end before comparing anything.
pub trait SortKey: NoValue {
    fn cmp_key(&self, other: &Self) -> Ordering;
}

macro_rules! ord_sort_key {
    ($($t:ty),*) => {
        $(
            impl SortKey for $t {
                fn cmp_key(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

ord_sort_key!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, str
);

impl SortKey for f64 {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl SortKey for f32 {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl<T: SortKey> SortKey for Option<T> {
    fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Some(a), Some(b)) => a.cmp_key(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<T: SortKey + ?Sized> SortKey for &T {
    fn cmp_key(&self, other: &Self) -> Ordering {
        (**self).cmp_key(*other)
    }
}

/// JSON ordering: values of different kinds order by kind
/// (bool < number < string < array < object); within a kind, by value.
impl SortKey for Value {
    fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => {
                    let x = a.as_f64().unwrap_or(f64::NAN);
                    let y = b.as_f64().unwrap_or(f64::NAN);
                    x.total_cmp(&y)
                }
            },
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.cmp_key(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
            _ => kind_rank(self).cmp(&kind_rank(other)),
        }
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Integer parity, used as the default predicate of `some`.
pub trait Parity {
    fn is_even(&self) -> bool;
}

macro_rules! int_parity {
    ($($t:ty),*) => {
        $(
            impl Parity for $t {
                fn is_even(&self) -> bool {
                    *self % 2 == 0
                }
            }
        )*
    };
}

int_parity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Parity for f64 {
    fn is_even(&self) -> bool {
        *self % 2.0 == 0.0
    }
}

impl Parity for f32 {
    fn is_even(&self) -> bool {
        *self % 2.0 == 0.0
    }
}

/// Non-numbers are never even.
impl Parity for Value {
    fn is_even(&self) -> bool {
        match self {
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => i % 2 == 0,
                (None, Some(u)) => u % 2 == 0,
                _ => n.as_f64().map_or(false, |f| f % 2.0 == 0.0),
            },
            _ => false,
        }
    }
}

impl<T: Parity + ?Sized> Parity for &T {
    fn is_even(&self) -> bool {
        (**self).is_even()
    }
}
