//! The `Inspect` trait for values shown by the panel.
//!
//! Store states and actions implement this trait so the presenters can
//! render them without knowing their concrete types.

use crate::value::Value;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;

/// Trait for states and actions that can be displayed by the panel.
///
/// `inspect` must not mutate anything observable; it may be called on every
/// render of a presenter that displays the value.
///
/// `type_name` is the coarse identity of a value. For actions it is the label
/// shown next to each dispatch and the match key used by
/// [`DeletePolicy::ActionType`](crate::log::DeletePolicy::ActionType).
///
/// # Example
///
/// ```rust
/// use rewind::core::Inspect;
/// use rewind::value::Value;
///
/// struct Todo {
///     title: String,
///     done: bool,
/// }
///
/// impl Inspect for Todo {
///     fn inspect(&self) -> Value {
///         Value::record(
///             "Todo",
///             [
///                 ("title", self.title.inspect()),
///                 ("done", self.done.inspect()),
///             ],
///         )
///     }
/// }
///
/// let todo = Todo { title: "ship".into(), done: false };
/// assert_eq!(todo.type_name(), "Todo");
/// ```
pub trait Inspect: 'static {
    /// Snapshot this value as an inspectable [`Value`].
    fn inspect(&self) -> Value;

    /// Coarse identity of the value.
    ///
    /// Default implementation returns the type name of the inspected value.
    fn type_name(&self) -> String {
        self.inspect().type_name().to_string()
    }
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }
}

impl Inspect for () {
    fn inspect(&self) -> Value {
        Value::Null
    }
}

macro_rules! inspect_scalar {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

inspect_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    DateTime<Utc>
);

impl Inspect for char {
    fn inspect(&self) -> Value {
        Value::text(self.to_string())
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::text(self)
    }
}

impl Inspect for &'static str {
    fn inspect(&self) -> Value {
        Value::text(self)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        self.as_ref().map_or(Value::Null, Inspect::inspect)
    }
}

/// Snapshots of values reached through `Rc`, keyed by allocation address.
///
/// Each entry holds a `Weak` to its allocation, so the address cannot be
/// handed to another `Rc` while the entry exists.
#[derive(Default)]
struct SharedSnapshots {
    entries: HashMap<usize, Snapshot>,
    prune_at: usize,
}

struct Snapshot {
    alive: Box<dyn Fn() -> bool>,
    value: Value,
}

const MIN_PRUNE_AT: usize = 64;

impl SharedSnapshots {
    fn get(&self, address: usize) -> Option<Value> {
        self.entries
            .get(&address)
            .filter(|snapshot| (snapshot.alive)())
            .map(|snapshot| snapshot.value.clone())
    }

    fn insert(&mut self, address: usize, alive: Box<dyn Fn() -> bool>, value: Value) {
        if self.entries.len() >= self.prune_at {
            self.entries.retain(|_, snapshot| (snapshot.alive)());
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_AT);
        }
        self.entries.insert(address, Snapshot { alive, value });
    }
}

thread_local! {
    static SHARED: RefCell<SharedSnapshots> = RefCell::new(SharedSnapshots::default());
}

/// Inspecting the same `Rc` allocation again returns the same snapshot, so
/// a subtree a reducer shares between states keeps its identity and its
/// presenters are reused. Contents behind a live `Rc` are assumed not to
/// change.
impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn inspect(&self) -> Value {
        let address = Rc::as_ptr(self).cast::<()>() as usize;
        if let Some(value) = SHARED.with(|shared| shared.borrow().get(address)) {
            return value;
        }

        // Not borrowed while inspecting: the contents may hold more `Rc`s.
        let value = (**self).inspect();
        let weak = Rc::downgrade(self);
        let alive: Box<dyn Fn() -> bool> = Box::new(move || weak.strong_count() > 0);
        SHARED.with(|shared| shared.borrow_mut().insert(address, alive, value.clone()));
        value
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }
}

impl<T: Inspect> Inspect for Box<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        Value::sequence(self.iter().map(Inspect::inspect))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value {
        Value::mapping(self.iter().map(|(k, v)| (k.inspect(), v.inspect())))
    }
}

impl<K: Inspect, V: Inspect, H: 'static> Inspect for HashMap<K, V, H> {
    fn inspect(&self) -> Value {
        Value::mapping(self.iter().map(|(k, v)| (k.inspect(), v.inspect())))
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Value {
        Value::set(self.iter().map(Inspect::inspect))
    }
}

impl<T: Inspect, H: 'static> Inspect for HashSet<T, H> {
    fn inspect(&self) -> Value {
        Value::set(self.iter().map(Inspect::inspect))
    }
}
