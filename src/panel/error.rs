//! Errors from operator commands.

use crate::core::TransitionId;
use crate::memo::Token;
use thiserror::Error;

/// A command that no longer matches the panel's current contents.
///
/// Commands are built from an earlier render; the transition or presenter
/// they name may be gone by the time they arrive.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PanelError {
    #[error("Transition {0} is no longer in the dispatch log")]
    UnknownTransition(TransitionId),

    #[error("No presenter is mounted at '{0}'")]
    UnknownPresenter(Token),
}
