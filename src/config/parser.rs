//! Section parser configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::document::{SectionParser, DEFAULT_INTRO_TITLE};

/// Section parser configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Title of the synthetic section holding text before the first heading
    #[serde(default = "default_intro_title")]
    pub intro_title: String,
}

impl ParserConfig {
    /// Build the configured parser
    pub fn section_parser(&self) -> SectionParser {
        SectionParser::with_intro_title(self.intro_title.trim())
    }

    /// Validate parser configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.intro_title.trim().is_empty() {
            return Err(ValidationError::MissingRequired("parser.intro_title"));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            intro_title: default_intro_title(),
        }
    }
}

fn default_intro_title() -> String {
    DEFAULT_INTRO_TITLE.to_string()
}
