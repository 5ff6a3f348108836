//! Core types shared by the log, the store and the presenters.
//!
//! This module contains the data model of the inspector:
//! - The `Inspect` trait every displayed state and action implements
//! - Pure reducers
//! - Recorded transitions and their stable ids

mod inspect;
mod reducer;
mod transition;

pub use inspect::Inspect;
pub use reducer::Reducer;
pub use transition::{Transition, TransitionId};
