//! Export adapters - implementations of the DocumentExporter port.
//!
//! - `MarkdownExporter` - Plain markdown concatenation
//! - `WordHtmlExporter` - HTML document for word processor import

mod markdown;
mod word_html;

pub use markdown::MarkdownExporter;
pub use word_html::WordHtmlExporter;
