//! Message validation settings.

use serde::{Deserialize, Serialize};

/// Limits applied to message content on create and edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Maximum content length, in characters.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            max_content_length: default_max_content_length(),
        }
    }
}

fn default_max_content_length() -> usize {
    10_000
}
