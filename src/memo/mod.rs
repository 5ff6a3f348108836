//! Memoized, incremental presentation.
//!
//! A render pass produces [`Placeholder`]s: cheap descriptions of which
//! presenter should render which arguments under which [`Token`]. The
//! [`MemoCache`] turns them into live presenter instances, reusing the ones
//! whose arguments have the same [`Identity`] as in the previous pass.

mod cache;
mod identity;
mod token;

pub use cache::{MemoCache, MemoStats, Placeholder, Presenter, Scope, DEFAULT_SEGMENT_SIZE};
pub use identity::Identity;
pub use token::Token;
