//! Word processor exporter.
//!
//! Produces an HTML document carrying the Office namespaces so word
//! processors open it as a native document. Section bodies are rendered with
//! pulldown-cmark; each section title becomes an `<h1>`.

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};

use crate::domain::document::Section;
use crate::ports::{DocumentExporter, ExportError, ExportFormat, ExportedDocument};

/// Exporter for word processor import.
///
/// # Example
///
/// ```rust,ignore
/// let exporter = WordHtmlExporter::new("Acme Proposal", "acme-proposal");
/// let file = exporter.export(workspace.sections()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct WordHtmlExporter {
    document_title: String,
    base_filename: String,
    include_default_css: bool,
}

impl WordHtmlExporter {
    /// Create an exporter with default styling.
    pub fn new(document_title: impl Into<String>, base_filename: impl Into<String>) -> Self {
        Self {
            document_title: document_title.into(),
            base_filename: base_filename.into(),
            include_default_css: true,
        }
    }

    /// Disable default CSS styling.
    pub fn without_default_css(mut self) -> Self {
        self.include_default_css = false;
        self
    }

    /// Renders the sections into a complete HTML document.
    pub fn render(&self, sections: &[Section]) -> String {
        let mut body = String::new();
        for section in sections {
            body.push_str("<h1>");
            body.push_str(&html_escape(&section.title));
            body.push_str("</h1>\n");
            body.push_str(&markdown_to_html(&section.raw_body));
        }
        self.wrap_html(&body)
    }

    fn wrap_html(&self, body: &str) -> String {
        let css = if self.include_default_css {
            DEFAULT_CSS
        } else {
            ""
        };

        format!(
            r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:w="urn:schemas-microsoft-com:office:word" xmlns="http://www.w3.org/TR/REC-html40">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
            title = html_escape(&self.document_title),
            css = css,
            body = body
        )
    }
}

impl Default for WordHtmlExporter {
    fn default() -> Self {
        Self::new("Proposal", "proposal")
    }
}

#[async_trait]
impl DocumentExporter for WordHtmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::WordHtml
    }

    async fn export(&self, sections: &[Section]) -> Result<ExportedDocument, ExportError> {
        if sections.is_empty() {
            return Err(ExportError::EmptyDocument);
        }
        let html = self.render(sections);
        Ok(ExportedDocument::new(
            html.into_bytes(),
            ExportFormat::WordHtml,
            &self.base_filename,
        ))
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DEFAULT_CSS: &str = r#"
body {
    font-family: Calibri, Arial, sans-serif;
    font-size: 11pt;
    line-height: 1.4;
}

h1 {
    font-size: 18pt;
    margin-top: 18pt;
}

h2 {
    font-size: 14pt;
    margin-top: 12pt;
}

table {
    border-collapse: collapse;
}

th, td {
    border: 1px solid #999999;
    padding: 4pt;
}
"#;
