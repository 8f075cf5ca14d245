//! Navigation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::navigation::{NavigationState, DEFAULT_FOLLOW_WINDOW};

/// Navigation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// How many trailing sections keep the view following a generation stream
    #[serde(default = "default_follow_window")]
    pub follow_window: usize,
}

impl NavigationConfig {
    /// Build the initial navigation state
    pub fn navigation_state(&self) -> NavigationState {
        NavigationState::new(self.follow_window)
    }

    /// Validate navigation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.follow_window == 0 {
            return Err(ValidationError::InvalidFollowWindow);
        }
        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            follow_window: default_follow_window(),
        }
    }
}

fn default_follow_window() -> usize {
    DEFAULT_FOLLOW_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_config_defaults() {
        let config = NavigationConfig::default();
        assert_eq!(config.follow_window, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = NavigationConfig { follow_window: 0 };
        assert_eq!(config.validate(), Err(ValidationError::InvalidFollowWindow));
    }

    #[test]
    fn test_navigation_state_uses_window() {
        let config = NavigationConfig { follow_window: 4 };
        assert_eq!(config.navigation_state().follow_window(), 4);
    }
}
