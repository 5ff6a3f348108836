//! Panel configuration and its builder.

use crate::log::DeletePolicy;
use crate::memo::DEFAULT_SEGMENT_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from [`PanelBuilder::build`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Segment size must be at least 1. Call .segment_size(n) with n > 0")]
    ZeroSegmentSize,
}

/// Settings of a [`DevToolsPanel`](super::DevToolsPanel).
///
/// Missing fields take their default when deserialized. Deserialized
/// configs are validated like [`PanelBuilder::build`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFields")]
pub struct PanelConfig {
    /// Label shown while the panel is closed
    pub title: String,
    /// Number of items per segment of a large sequence
    pub segment_size: usize,
    /// Which transitions a delete removes
    pub delete_policy: DeletePolicy,
    /// Whether the panel starts open
    pub start_open: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Dev Tools".to_string(),
            segment_size: DEFAULT_SEGMENT_SIZE,
            delete_policy: DeletePolicy::default(),
            start_open: false,
        }
    }
}

impl PanelConfig {
    pub fn builder() -> PanelBuilder {
        PanelBuilder::new()
    }
}

/// Unvalidated fields as read by serde.
#[derive(Deserialize)]
#[serde(default)]
struct ConfigFields {
    title: String,
    segment_size: usize,
    delete_policy: DeletePolicy,
    start_open: bool,
}

impl Default for ConfigFields {
    fn default() -> Self {
        let PanelConfig {
            title,
            segment_size,
            delete_policy,
            start_open,
        } = PanelConfig::default();
        Self {
            title,
            segment_size,
            delete_policy,
            start_open,
        }
    }
}

impl TryFrom<ConfigFields> for PanelConfig {
    type Error = ConfigError;

    fn try_from(fields: ConfigFields) -> Result<Self, Self::Error> {
        PanelBuilder::new()
            .title(fields.title)
            .segment_size(fields.segment_size)
            .delete_policy(fields.delete_policy)
            .start_open(fields.start_open)
            .build()
    }
}

/// Builder for [`PanelConfig`].
///
/// # Example
///
/// ```rust
/// use rewind::log::DeletePolicy;
/// use rewind::panel::PanelConfig;
///
/// let config = PanelConfig::builder()
///     .title("Store")
///     .segment_size(50)
///     .delete_policy(DeletePolicy::ActionType)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.segment_size, 50);
/// assert!(!config.start_open);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PanelBuilder {
    config: PanelConfig,
}

impl PanelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the closed-panel label
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set the pagination window of large sequences
    pub fn segment_size(mut self, size: usize) -> Self {
        self.config.segment_size = size;
        self
    }

    /// Set how deletes match transitions
    pub fn delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.config.delete_policy = policy;
        self
    }

    /// Open the panel as soon as it attaches
    pub fn start_open(mut self, open: bool) -> Self {
        self.config.start_open = open;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<PanelConfig, ConfigError> {
        if self.config.segment_size == 0 {
            return Err(ConfigError::ZeroSegmentSize);
        }
        Ok(self.config)
    }
}
