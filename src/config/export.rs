//! Export configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::{MarkdownExporter, WordHtmlExporter};

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Title written into exported documents
    #[serde(default = "default_document_title")]
    pub document_title: String,

    /// Include default CSS in word processor exports
    #[serde(default = "default_include_css")]
    pub include_default_css: bool,

    /// Filename (without extension) suggested for downloads
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
}

impl ExportConfig {
    /// Build the markdown exporter
    pub fn markdown_exporter(&self) -> MarkdownExporter {
        MarkdownExporter::new(&self.base_filename)
    }

    /// Build the word processor exporter
    pub fn word_html_exporter(&self) -> WordHtmlExporter {
        let exporter = WordHtmlExporter::new(&self.document_title, &self.base_filename);
        if self.include_default_css {
            exporter
        } else {
            exporter.without_default_css()
        }
    }

    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.document_title.trim().is_empty() {
            return Err(ValidationError::MissingRequired("export.document_title"));
        }
        let name = self.base_filename.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingRequired("export.base_filename"));
        }
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ValidationError::InvalidFilename(self.base_filename.clone()));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            document_title: default_document_title(),
            include_default_css: default_include_css(),
            base_filename: default_base_filename(),
        }
    }
}

fn default_document_title() -> String {
    "Proposal".to_string()
}

fn default_include_css() -> bool {
    true
}

fn default_base_filename() -> String {
    "proposal".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::parse_sections;

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.document_title, "Proposal");
        assert!(config.include_default_css);
        assert_eq!(config.base_filename, "proposal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_path_in_filename_rejected() {
        let config = ExportConfig {
            base_filename: "../secrets".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidFilename("../secrets".to_string()))
        );
    }

    #[test]
    fn test_css_toggle_reaches_exporter() {
        let config = ExportConfig {
            include_default_css: false,
            ..Default::default()
        };
        let html = config.word_html_exporter().render(&parse_sections("# A\n"));
        assert!(!html.contains("font-family"));
    }
}
