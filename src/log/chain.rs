//! Chain diagnostics for dispatch logs.
//!
//! A well-formed log starts at the initial state, and every transition
//! starts where the previous one ended. Replay relies on a pure reducer to
//! keep that true; nothing checks it implicitly. `verify_chain` reports
//! every break at once instead of stopping at the first one.

use super::DispatchLog;
use crate::core::TransitionId;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A place where the before/after chain of a log is broken.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChainViolation {
    #[error("Transition {id} does not start from the initial state")]
    InitialMismatch { id: TransitionId },

    #[error("Transition {next} does not start where transition {previous} ended (index {index})")]
    BrokenLink {
        index: usize,
        previous: TransitionId,
        next: TransitionId,
    },
}

impl<S: PartialEq, A> DispatchLog<S, A> {
    /// Check the chain invariant, accumulating ALL violations.
    ///
    /// Returns `Validation::Success(())` for an empty or well-formed log.
    pub fn verify_chain(&self) -> Validation<(), NonEmptyVec<ChainViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ChainViolation>>> = Vec::new();

        if let Some(first) = self.transitions().first() {
            let check = if *first.before == **self.initial() {
                Validation::success(())
            } else {
                Validation::fail(ChainViolation::InitialMismatch { id: first.id })
            };
            checks.push(check);
        }

        for (index, pair) in self.transitions().windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            let check = if *previous.after == *next.before {
                Validation::success(())
            } else {
                Validation::fail(ChainViolation::BrokenLink {
                    index,
                    previous: previous.id,
                    next: next.id,
                })
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn log_of(initial: i64, links: &[(i64, i64)]) -> DispatchLog<i64, i64> {
        let mut log = DispatchLog::new(Rc::new(initial));
        for (before, after) in links {
            log.record(Rc::new(*before), Rc::new(*after), Rc::new(after - before));
        }
        log
    }

    #[test]
    fn empty_log_is_valid() {
        let log = log_of(0, &[]);
        assert!(log.verify_chain().is_success());
    }

    #[test]
    fn contiguous_log_is_valid() {
        let log = log_of(0, &[(0, 1), (1, 3), (3, 6)]);
        assert!(log.verify_chain().is_success());
    }

    #[test]
    fn chain_accumulates_all_violations() {
        let log = log_of(0, &[(5, 6), (6, 7), (9, 10), (11, 12)]);

        match log.verify_chain() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ChainViolation::InitialMismatch { .. })));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ChainViolation::BrokenLink { index: 1, .. }
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ChainViolation::BrokenLink { index: 2, .. }
                )));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn violation_messages_name_transitions() {
        let violation = ChainViolation::BrokenLink {
            index: 0,
            previous: TransitionId(0),
            next: TransitionId(1),
        };
        assert_eq!(
            violation.to_string(),
            "Transition #1 does not start where transition #0 ended (index 0)"
        );
    }
}
