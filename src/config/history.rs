//! Version history configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::{GenerateProposalConfig, DEFAULT_REGENERATION_LABEL};

/// Version history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Label of the snapshot taken before a regeneration clears the document
    #[serde(default = "default_regeneration_label")]
    pub regeneration_label: String,
}

impl HistoryConfig {
    /// Handler settings derived from this section
    pub fn generate_proposal_config(&self) -> GenerateProposalConfig {
        GenerateProposalConfig {
            regeneration_label: self.regeneration_label.clone(),
        }
    }

    /// Validate history configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.regeneration_label.trim().is_empty() {
            return Err(ValidationError::MissingRequired("history.regeneration_label"));
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            regeneration_label: default_regeneration_label(),
        }
    }
}

fn default_regeneration_label() -> String {
    DEFAULT_REGENERATION_LABEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_config_defaults() {
        let config = HistoryConfig::default();
        assert_eq!(config.regeneration_label, "Before regeneration");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_label_rejected() {
        let config = HistoryConfig {
            regeneration_label: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generate_proposal_config_carries_label() {
        let config = HistoryConfig {
            regeneration_label: "Auto-save".to_string(),
        };
        assert_eq!(config.generate_proposal_config().regeneration_label, "Auto-save");
    }
}
