//! A minimal single-threaded store driven by a reducer.
//!
//! The panel only needs four things from a store: read the current state,
//! replace it, run the reducer, and hear about every dispatch. [`Store`]
//! provides exactly that and nothing more.

use crate::core::Reducer;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked once per dispatch with `(before, after, action)`.
pub type Listener<S, A> = Rc<dyn Fn(&Rc<S>, &Rc<S>, &Rc<A>)>;

struct StoreInner<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Reducer<S, A>,
    listeners: RefCell<Vec<(u64, Listener<S, A>)>>,
    next_listener: Cell<u64>,
}

/// Shared handle to a reducer-driven store.
///
/// Cloning the handle does not clone the store.
///
/// # Example
///
/// ```rust
/// use rewind::store::Store;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let store = Store::new(0_i64, |count: &i64, step: &i64| count + step);
/// let seen = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&seen);
/// let _subscription = store.on_dispatch(move |_before, after, _action| {
///     counter.set(**after);
/// });
///
/// store.dispatch(5);
/// assert_eq!(*store.state(), 5);
/// assert_eq!(seen.get(), 5);
/// ```
pub struct Store<S, A> {
    inner: Rc<StoreInner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: 'static, A: 'static> Store<S, A> {
    /// Create a store holding `initial`, driven by a pure reducer function.
    pub fn new<F>(initial: S, reduce: F) -> Self
    where
        F: Fn(&S, &A) -> S + 'static,
    {
        Self::with_reducer(initial, Reducer::new(reduce))
    }

    pub fn with_reducer(initial: S, reducer: Reducer<S, A>) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(initial)),
                reducer,
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Current state.
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Replace the current state without notifying listeners.
    pub fn set_state(&self, state: Rc<S>) {
        *self.inner.state.borrow_mut() = state;
    }

    /// The store's reducer.
    pub fn reducer(&self) -> &Reducer<S, A> {
        &self.inner.reducer
    }

    /// Apply `action` to the current state, store the result, then notify
    /// every listener in subscription order.
    ///
    /// Listeners run after the new state is in place and may read it.
    pub fn dispatch(&self, action: A) -> Rc<S> {
        let action = Rc::new(action);
        let before = self.state();
        let after = Rc::new(self.inner.reducer.apply(&before, &action));
        self.set_state(Rc::clone(&after));

        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener<S, A>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&before, &after, &action);
        }

        after
    }

    /// Register a dispatch listener.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    pub fn on_dispatch<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Rc<S>, &Rc<S>, &Rc<A>) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<StoreInner<S, A>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .listeners
                        .borrow_mut()
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Registration of a dispatch listener. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes its listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.unsubscribe();
    }

    fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum CounterAction {
        Increment,
        Add(i64),
    }

    fn counter() -> Store<i64, CounterAction> {
        Store::new(0, |count: &i64, action: &CounterAction| match action {
            CounterAction::Increment => count + 1,
            CounterAction::Add(n) => count + n,
        })
    }

    #[test]
    fn dispatch_applies_reducer() {
        let store = counter();

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Add(4));

        assert_eq!(*store.state(), 5);
    }

    #[test]
    fn listeners_see_before_after_and_action() {
        let store = counter();
        let seen: Rc<RefCell<Vec<(i64, i64, CounterAction)>>> = Rc::default();

        let sink = Rc::clone(&seen);
        let _subscription = store.on_dispatch(move |before, after, action| {
            sink.borrow_mut()
                .push((**before, **after, (**action).clone()));
        });

        store.dispatch(CounterAction::Add(2));
        store.dispatch(CounterAction::Increment);

        assert_eq!(
            *seen.borrow(),
            vec![
                (0, 2, CounterAction::Add(2)),
                (2, 3, CounterAction::Increment),
            ]
        );
    }

    #[test]
    fn listener_runs_after_state_update() {
        let store = counter();
        let observed = Rc::new(Cell::new(-1));

        let handle = store.clone();
        let sink = Rc::clone(&observed);
        let _subscription = store.on_dispatch(move |_, _, _| sink.set(*handle.state()));

        store.dispatch(CounterAction::Add(9));

        assert_eq!(observed.get(), 9);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = counter();
        let calls = Rc::new(Cell::new(0));

        let sink = Rc::clone(&calls);
        let subscription = store.on_dispatch(move |_, _, _| sink.set(sink.get() + 1));
        assert_eq!(store.listener_count(), 1);

        store.dispatch(CounterAction::Increment);
        drop(subscription);
        store.dispatch(CounterAction::Increment);

        assert_eq!(calls.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn set_state_does_not_notify() {
        let store = counter();
        let calls = Rc::new(Cell::new(0));

        let sink = Rc::clone(&calls);
        let subscription = store.on_dispatch(move |_, _, _| sink.set(sink.get() + 1));

        store.set_state(Rc::new(42));

        assert_eq!(*store.state(), 42);
        assert_eq!(calls.get(), 0);
        subscription.cancel();
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn consecutive_dispatches_share_snapshots() {
        let store = counter();
        let snapshots: Rc<RefCell<Vec<(Rc<i64>, Rc<i64>)>>> = Rc::default();

        let sink = Rc::clone(&snapshots);
        let _subscription = store.on_dispatch(move |before, after, _| {
            sink.borrow_mut().push((Rc::clone(before), Rc::clone(after)));
        });

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Increment);

        let snapshots = snapshots.borrow();
        assert!(Rc::ptr_eq(&snapshots[0].1, &snapshots[1].0));
    }
}
