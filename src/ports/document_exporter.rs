//! Document Exporter Port - Turns parsed sections into a downloadable file.
//!
//! Exporters consume the section list in order, using each section's title
//! and body. Binary encodings (PDF, DOCX) are not produced here; the word
//! processor format is an HTML document that word processors import.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::document::Section;

/// Port for exporting a parsed proposal.
///
/// # Usage
///
/// ```rust,ignore
/// let exporter: &dyn DocumentExporter = &MarkdownExporter::new("proposal");
/// let file = exporter.export(workspace.sections()).await?;
/// ```
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Returns the format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Renders the sections, in order, into a file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::EmptyDocument` when there are no sections.
    async fn export(&self, sections: &[Section]) -> Result<ExportedDocument, ExportError>;
}

/// Export formats supported by the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Plain markdown.
    Markdown,
    /// HTML shaped for word processor import.
    WordHtml,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::WordHtml => "application/msword",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::WordHtml => "doc",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::WordHtml => write!(f, "word_html"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "word_html" | "word" | "doc" => Ok(ExportFormat::WordHtml),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    /// Returns the content as text.
    ///
    /// Every adapter in this crate writes UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// There is nothing to export yet.
    #[error("Document has no sections to export")]
    EmptyDocument,

    /// Rendering the output failed.
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_metadata_matches_variant() {
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::WordHtml.extension(), "doc");
        assert_eq!(ExportFormat::WordHtml.content_type(), "application/msword");
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("Word".parse::<ExportFormat>().unwrap(), ExportFormat::WordHtml);
        assert_eq!(
            "pdf".parse::<ExportFormat>().unwrap_err(),
            ExportError::UnsupportedFormat("pdf".to_string())
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for format in [ExportFormat::Markdown, ExportFormat::WordHtml] {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn exported_document_builds_filename() {
        let doc = ExportedDocument::new(b"# A\n".to_vec(), ExportFormat::Markdown, "proposal");
        assert_eq!(doc.filename, "proposal.md");
        assert_eq!(doc.content_type, "text/markdown; charset=utf-8");
        assert_eq!(doc.as_text(), Some("# A\n"));
    }
}
