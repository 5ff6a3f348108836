//! Recorded dispatches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Stable identity of a recorded transition.
///
/// Ids are assigned in dispatch order by the log and survive replays, so a
/// command issued against a transition keeps pointing at it after earlier
/// transitions are deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(pub u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Record of a single dispatch: the state before it, the state after it,
/// and the action that caused it.
///
/// States and actions are shared through `Rc`: the `after` of one transition
/// is the same allocation as the `before` of the next one when both come
/// from consecutive dispatches.
///
/// # Example
///
/// ```rust
/// use rewind::core::{Transition, TransitionId};
/// use chrono::Utc;
/// use std::rc::Rc;
///
/// let transition = Transition {
///     id: TransitionId(0),
///     before: Rc::new(0_i64),
///     after: Rc::new(1_i64),
///     action: Rc::new("increment"),
///     recorded_at: Utc::now(),
/// };
///
/// assert_eq!(*transition.after, 1);
/// ```
#[derive(Debug)]
pub struct Transition<S, A> {
    /// Identity of this transition within its log
    pub id: TransitionId,
    /// The state the action was applied to
    pub before: Rc<S>,
    /// The state the reducer produced
    pub after: Rc<S>,
    /// The dispatched action
    pub action: Rc<A>,
    /// When the dispatch was first observed
    pub recorded_at: DateTime<Utc>,
}

impl<S, A> Clone for Transition<S, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            before: Rc::clone(&self.before),
            after: Rc::clone(&self.after),
            action: Rc::clone(&self.action),
            recorded_at: self.recorded_at,
        }
    }
}
