//! Dispatch log and replay engine.
//!
//! The log keeps every observed dispatch in order, together with the state
//! the store held when the panel attached. Rewinding truncates the log;
//! deleting a transition rebuilds the remaining history by replaying its
//! actions through the store's reducer, starting from that initial state.
//!
//! Both operations write the resulting state back into the store. That side
//! effect is the point of time travel, and it is why they take the store as
//! an explicit argument.

mod chain;

pub use chain::ChainViolation;

use crate::core::{Inspect, Transition, TransitionId};
use crate::store::Store;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Which transitions a delete removes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Remove only the selected transition.
    #[default]
    Transition,
    /// Remove every transition whose action has the same type name as the
    /// selected one.
    ActionType,
}

/// Ordered history of dispatches, seeded by the state captured at attach
/// time.
///
/// # Example
///
/// ```rust
/// use rewind::log::DispatchLog;
/// use rewind::store::Store;
/// use std::rc::Rc;
///
/// let store = Store::new(0_i64, |count: &i64, step: &i64| count + step);
/// let mut log = DispatchLog::new(store.state());
///
/// for step in [1, 10, 100] {
///     let before = store.state();
///     let after = store.dispatch(step);
///     log.record(before, after, Rc::new(step));
/// }
///
/// // Forget the second dispatch: replay 1 and 100 from the initial state.
/// log.delete_at(1, &store);
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(*store.state(), 101);
/// ```
#[derive(Debug)]
pub struct DispatchLog<S, A> {
    initial: Rc<S>,
    transitions: Vec<Rc<Transition<S, A>>>,
    next_id: u64,
    policy: DeletePolicy,
}

impl<S, A> Clone for DispatchLog<S, A> {
    fn clone(&self) -> Self {
        Self {
            initial: Rc::clone(&self.initial),
            transitions: self.transitions.clone(),
            next_id: self.next_id,
            policy: self.policy,
        }
    }
}

impl<S: 'static, A: Inspect> DispatchLog<S, A> {
    /// Create an empty log seeded with the store's state at attach time.
    pub fn new(initial: Rc<S>) -> Self {
        Self {
            initial,
            transitions: Vec::new(),
            next_id: 0,
            policy: DeletePolicy::default(),
        }
    }

    /// Select how [`delete_at`](Self::delete_at) matches transitions.
    pub fn with_policy(mut self, policy: DeletePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DeletePolicy {
        self.policy
    }

    /// Append a dispatch to the end of the log.
    pub fn record(&mut self, before: Rc<S>, after: Rc<S>, action: Rc<A>) -> Rc<Transition<S, A>> {
        let id = TransitionId(self.next_id);
        self.next_id += 1;

        let transition = Rc::new(Transition {
            id,
            before,
            after,
            action,
            recorded_at: Utc::now(),
        });
        tracing::debug!(
            id = %id,
            action = %transition.action.type_name(),
            "Recorded dispatch"
        );
        self.transitions.push(Rc::clone(&transition));
        transition
    }

    /// Rewind the store to the state after `log[index]` and discard every
    /// later transition.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Callers derive the index from the
    /// current log right before calling.
    pub fn commit_to(&mut self, index: usize, store: &Store<S, A>) {
        let target = self.expect_transition(index, "commit");
        store.set_state(Rc::clone(&target.after));

        let discarded = self.transitions.len() - (index + 1);
        self.transitions.truncate(index + 1);
        tracing::debug!(id = %target.id, index, discarded, "Committed to transition");
    }

    /// Delete `log[index]` (and, under [`DeletePolicy::ActionType`], every
    /// transition whose action shares its type name), then replay the
    /// remaining actions from the initial state.
    ///
    /// The replayed log replaces the old one in a single assignment, and the
    /// last replayed state becomes the store's state. Deleting the only
    /// transition leaves the store at the initial state.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete_at(&mut self, index: usize, store: &Store<S, A>) {
        let target = self.expect_transition(index, "delete");

        let survivors: Vec<&Rc<Transition<S, A>>> = match self.policy {
            DeletePolicy::Transition => self
                .transitions
                .iter()
                .filter(|transition| transition.id != target.id)
                .collect(),
            DeletePolicy::ActionType => {
                let type_name = target.action.type_name();
                self.transitions
                    .iter()
                    .filter(|transition| transition.action.type_name() != type_name)
                    .collect()
            }
        };
        let removed = self.transitions.len() - survivors.len();

        let (replayed, state) = replay(&self.initial, survivors, store);
        tracing::debug!(
            id = %target.id,
            index,
            removed,
            remaining = replayed.len(),
            "Deleted transition and replayed log"
        );

        self.transitions = replayed;
        store.set_state(state);
    }

    fn expect_transition(&self, index: usize, operation: &str) -> Rc<Transition<S, A>> {
        match self.transitions.get(index) {
            Some(transition) => Rc::clone(transition),
            None => panic!(
                "cannot {operation} transition at index {index}: log holds {} transitions",
                self.transitions.len()
            ),
        }
    }
}

impl<S, A> DispatchLog<S, A> {
    /// Position of the transition with `id`, if it is still in the log.
    pub fn position(&self, id: TransitionId) -> Option<usize> {
        self.transitions
            .iter()
            .position(|transition| transition.id == id)
    }

    /// All recorded transitions, oldest first.
    pub fn transitions(&self) -> &[Rc<Transition<S, A>>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The state captured when the log was created.
    pub fn initial(&self) -> &Rc<S> {
        &self.initial
    }

    /// The states traversed: the initial state, then the `after` state of
    /// each transition.
    pub fn get_path(&self) -> Vec<&S> {
        std::iter::once(&*self.initial)
            .chain(self.transitions.iter().map(|transition| &*transition.after))
            .collect()
    }
}

/// Re-apply each surviving action in order, starting from `initial`.
///
/// Ids, actions and timestamps carry over; before/after pairs are rebuilt.
fn replay<S: 'static, A: 'static>(
    initial: &Rc<S>,
    survivors: Vec<&Rc<Transition<S, A>>>,
    store: &Store<S, A>,
) -> (Vec<Rc<Transition<S, A>>>, Rc<S>) {
    let reducer = store.reducer();
    let mut state = Rc::clone(initial);
    let mut replayed = Vec::with_capacity(survivors.len());

    for transition in survivors {
        let after = Rc::new(reducer.apply(&state, &transition.action));
        replayed.push(Rc::new(Transition {
            id: transition.id,
            before: state,
            after: Rc::clone(&after),
            action: Rc::clone(&transition.action),
            recorded_at: transition.recorded_at,
        }));
        state = after;
    }

    (replayed, state)
}
