//! Plain markdown exporter.

use async_trait::async_trait;

use crate::domain::document::Section;
use crate::ports::{DocumentExporter, ExportError, ExportFormat, ExportedDocument};

/// Writes each section as `# {title}` followed by its body.
///
/// Sections are separated by a blank line unless the body already ends with
/// one. Duplicate blocks dropped by the parser never reach the export.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    base_filename: String,
}

impl MarkdownExporter {
    pub fn new(base_filename: impl Into<String>) -> Self {
        Self {
            base_filename: base_filename.into(),
        }
    }

    /// Renders the sections without wrapping them in an [`ExportedDocument`].
    pub fn render(&self, sections: &[Section]) -> String {
        let mut out = String::new();
        for (index, section) in sections.iter().enumerate() {
            out.push_str("# ");
            out.push_str(&section.title);
            out.push('\n');
            out.push_str(&section.raw_body);

            let is_last = index + 1 == sections.len();
            if !is_last && !out.ends_with("\n\n") {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        out
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new("proposal")
    }
}

#[async_trait]
impl DocumentExporter for MarkdownExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    async fn export(&self, sections: &[Section]) -> Result<ExportedDocument, ExportError> {
        if sections.is_empty() {
            return Err(ExportError::EmptyDocument);
        }
        let markdown = self.render(sections);
        Ok(ExportedDocument::new(
            markdown.into_bytes(),
            ExportFormat::Markdown,
            &self.base_filename,
        ))
    }
}
