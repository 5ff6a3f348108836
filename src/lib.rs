//! Rewind: an in-process inspector and time-travel debugger for
//! reducer-driven stores
//!
//! Rewind attaches to a store whose state only changes by dispatching
//! actions through a pure reducer. It records every dispatch, shows the
//! current state and the dispatch history as an incrementally rendered tree,
//! and lets an operator rewind to any past state or delete a past action and
//! replay the rest.
//!
//! # Core Concepts
//!
//! - **Store**: Reducer-driven state with dispatch notifications
//! - **Dispatch log**: Ordered transitions with commit and delete-and-replay
//! - **Values**: Inspected snapshots of states and actions via `Inspect`
//! - **Memoization**: Presenter instances reused while their inputs are unchanged
//! - **Panel**: The open/closed inspector wiring it all to a render host
//!
//! # Example
//!
//! ```rust
//! use rewind::inspect_via_serde;
//! use rewind::panel::{DevToolsPanel, HeadlessHost, PanelConfig};
//! use rewind::store::Store;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! #[derive(Serialize)]
//! enum CounterAction {
//!     Increment,
//!     Add(i64),
//! }
//!
//! inspect_via_serde!(Counter, CounterAction);
//!
//! let store = Store::new(Counter { count: 0 }, |state: &Counter, action: &CounterAction| {
//!     match action {
//!         CounterAction::Increment => Counter { count: state.count + 1 },
//!         CounterAction::Add(n) => Counter { count: state.count + n },
//!     }
//! });
//!
//! let host = HeadlessHost::new();
//! let panel = DevToolsPanel::attach(&store, PanelConfig::default(), host.clone());
//! panel.open();
//!
//! store.dispatch(CounterAction::Increment);
//! store.dispatch(CounterAction::Add(10));
//! assert_eq!(store.state().count, 11);
//!
//! // Pretend the increment never happened.
//! let increment = panel.transitions()[0].id;
//! panel.delete(increment).unwrap();
//!
//! assert_eq!(store.state().count, 10);
//! assert!(host.last_text().contains("count: `10`"));
//! ```

pub mod core;
pub mod log;
pub mod memo;
pub mod panel;
pub mod presenters;
pub mod store;
pub mod value;
pub mod view;

// Re-export commonly used types
pub use crate::core::{Inspect, Reducer, Transition, TransitionId};
pub use crate::log::{DeletePolicy, DispatchLog};
pub use crate::memo::{MemoCache, Token};
pub use crate::panel::{DevToolsPanel, PanelConfig, PanelError};
pub use crate::store::Store;
pub use crate::value::Value;
pub use crate::view::{Command, Element};
