//! Value conversion errors.

use std::fmt::Display;
use thiserror::Error;

/// Errors raised while converting a `Serialize` type into a [`Value`](super::Value).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConvertError {
    #[error("Map value serialized before its key")]
    MissingKey,

    #[error("Conversion failed: {0}")]
    Custom(String),
}

impl serde::ser::Error for ConvertError {
    fn custom<T: Display>(msg: T) -> Self {
        ConvertError::Custom(msg.to_string())
    }
}
