//! Content validation rules.

use tracing::warn;

use threadline_core::config::MessagingConfig;
use threadline_core::error::AppError;

/// Validates message content on create and edit.
#[derive(Debug, Clone)]
pub struct ContentPolicy {
    /// Maximum content length in characters.
    max_length: usize,
}

impl ContentPolicy {
    /// Creates a policy from configuration.
    pub fn new(config: &MessagingConfig) -> Self {
        Self {
            max_length: config.max_content_length,
        }
    }

    /// Rejects blank or oversized content.
    pub fn validate(&self, content: &str) -> Result<(), AppError> {
        if content.trim().is_empty() {
            warn!("Rejected blank message content");
            return Err(AppError::validation("Message content must not be empty"));
        }

        let length = content.chars().count();
        if length > self.max_length {
            warn!(length, max = self.max_length, "Rejected oversized message content");
            return Err(AppError::validation(format!(
                "Message content is {length} characters, the limit is {}",
                self.max_length
            )));
        }

        Ok(())
    }
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new(&MessagingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadline_core::error::ErrorKind;

    fn policy(max: usize) -> ContentPolicy {
        ContentPolicy::new(&MessagingConfig {
            max_content_length: max,
        })
    }

    #[test]
    fn test_blank_content_rejected() {
        for content in ["", "   ", "\n\t"] {
            let err = policy(10).validate(content).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[test]
    fn test_length_counts_characters() {
        let p = policy(5);
        assert!(p.validate("héllo").is_ok());
        assert!(p.validate("héllo!").is_err());
    }
}
