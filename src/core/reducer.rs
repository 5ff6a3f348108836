//! Reducers: pure functions from a state and an action to the next state.

use std::fmt;

/// Pure function that computes the next state from the current state and
/// an action.
///
/// Replaying the dispatch log calls the reducer again with inputs it has
/// already seen, so it must be deterministic: identical inputs must always
/// produce an identical output. An impure reducer silently breaks the
/// before/after chain of a replayed log.
///
/// # Example
///
/// ```rust
/// use rewind::core::Reducer;
///
/// enum CounterAction {
///     Add(i64),
///     Reset,
/// }
///
/// let reducer = Reducer::new(|count: &i64, action: &CounterAction| match action {
///     CounterAction::Add(n) => count + n,
///     CounterAction::Reset => 0,
/// });
///
/// assert_eq!(reducer.apply(&1, &CounterAction::Add(2)), 3);
/// assert_eq!(reducer.apply(&5, &CounterAction::Reset), 0);
/// ```
pub struct Reducer<S, A> {
    reduce: Box<dyn Fn(&S, &A) -> S>,
}

impl<S, A> Reducer<S, A> {
    /// Create a reducer from a pure function.
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(&S, &A) -> S + 'static,
    {
        Reducer {
            reduce: Box::new(reduce),
        }
    }

    /// Compute the state that follows `state` once `action` is applied.
    pub fn apply(&self, state: &S, action: &A) -> S {
        (self.reduce)(state, action)
    }
}

impl<S, A> fmt::Debug for Reducer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TodoAction {
        Add(&'static str),
        Clear,
    }

    fn todo_reducer() -> Reducer<Vec<&'static str>, TodoAction> {
        Reducer::new(|todos: &Vec<&'static str>, action: &TodoAction| match action {
            TodoAction::Add(title) => {
                let mut next = todos.clone();
                next.push(*title);
                next
            }
            TodoAction::Clear => Vec::new(),
        })
    }

    #[test]
    fn reducer_computes_next_state() {
        let reducer = todo_reducer();

        let state = reducer.apply(&Vec::new(), &TodoAction::Add("ship"));
        assert_eq!(state, vec!["ship"]);

        let state = reducer.apply(&state, &TodoAction::Clear);
        assert!(state.is_empty());
    }

    #[test]
    fn reducer_does_not_touch_its_input() {
        let reducer = todo_reducer();
        let before = vec!["a"];

        let after = reducer.apply(&before, &TodoAction::Add("b"));

        assert_eq!(before, vec!["a"]);
        assert_eq!(after, vec!["a", "b"]);
    }

    #[test]
    fn pure_reducer_is_deterministic() {
        let reducer = todo_reducer();
        let state = vec!["a"];

        let first = reducer.apply(&state, &TodoAction::Add("b"));
        let second = reducer.apply(&state, &TodoAction::Add("b"));

        assert_eq!(first, second);
    }
}
