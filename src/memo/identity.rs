//! Per-argument identity used to decide whether a presenter can be reused.

use crate::value::Value;
use std::ops::Range;
use std::rc::Rc;

/// Identity comparison between a node's arguments and the arguments of the
/// previous render pass.
///
/// Shared values compare by reference, primitives by value. This is not deep
/// equality: two structurally equal composites built separately are
/// different.
pub trait Identity {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl Identity for Value {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) | (Value::Opaque(a), Value::Opaque(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) | (Value::Set(a), Value::Set(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Mapping(a), Value::Mapping(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! identity_by_value {
    ($($ty:ty),*) => {
        $(
            impl Identity for $ty {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(bool, char, u32, u64, usize, i64, String, &'static str, Range<usize>);

impl<T: Identity> Identity for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: Identity, B: Identity> Identity for (A, B) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

impl<A: Identity, B: Identity, C: Identity> Identity for (A, B, C) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1) && self.2.same(&other.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_compare_by_value() {
        assert!(Value::from(3).same(&Value::from(3)));
        assert!(Value::from("a").same(&Value::from("a")));
        assert!(Value::Float(f64::NAN).same(&Value::Float(f64::NAN)));
        assert!(!Value::from(3).same(&Value::from(4)));
        assert!(!Value::Null.same(&Value::from(false)));
    }

    #[test]
    fn composites_compare_by_reference() {
        let list = Value::from(vec![1, 2]);
        let copy = list.clone();
        let rebuilt = Value::from(vec![1, 2]);

        assert!(list.same(&copy));
        assert!(!list.same(&rebuilt));
        assert_eq!(list, rebuilt);
    }

    #[test]
    fn sequence_and_set_with_same_items_differ() {
        let items: Rc<[Value]> = Rc::from(vec![Value::from(1)]);
        let sequence = Value::Sequence(Rc::clone(&items));
        let set = Value::Set(items);

        assert!(!sequence.same(&set));
    }

    #[test]
    fn tuples_compare_componentwise() {
        let shared = Rc::new(5);
        let window: Range<usize> = 0..10;

        assert!((Rc::clone(&shared), window.clone()).same(&(Rc::clone(&shared), window.clone())));
        assert!(!(Rc::clone(&shared), window.clone()).same(&(Rc::new(5), window.clone())));
        assert!(!(Rc::clone(&shared), window).same(&(shared, 0..9)));
    }
}
