//! Plaintext extraction from article documents
//!
//! The extraction algorithm is pluggable through [`TextExtractor`]. The
//! built-in [`UniversalExtractor`] handles article XML (title, abstract and
//! body paragraphs) and falls back to newline-separated plaintext.

use crate::Result;
use crate::xml::{self, Element};
use super::paragraphs::ParagraphFilter;

/// Elements whose text forms one paragraph. Nested matches belong to the
/// outermost paragraph.
const PARAGRAPH_ELEMENTS: &[&str] = &["article-title", "ArticleTitle", "AbstractText", "p"];

/// Turns one raw document into filtered plaintext.
///
/// Implementations must be pure: the same document and filter always give
/// the same text, and calls share no mutable state.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &str, filter: &ParagraphFilter) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalExtractor;

impl UniversalExtractor {
    /// Split a document into paragraphs.
    ///
    /// Documents starting with `<` are parsed as XML; one that fails to
    /// parse yields no paragraphs.
    pub fn paragraphs(document: &str) -> Vec<String> {
        if document.trim_start().starts_with('<') {
            match xml::parse(document) {
                Ok(root) => {
                    let mut out = Vec::new();
                    collect_paragraphs(&root, &mut out);
                    out
                }
                Err(e) => {
                    tracing::warn!("Unparseable article XML, no paragraphs extracted: {}", e);
                    Vec::new()
                }
            }
        } else {
            document
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}

impl TextExtractor for UniversalExtractor {
    fn extract(&self, document: &str, filter: &ParagraphFilter) -> String {
        let paragraphs = Self::paragraphs(document);
        filter.apply(paragraphs.iter().map(String::as_str))
    }
}

fn collect_paragraphs(el: &Element, out: &mut Vec<String>) {
    if PARAGRAPH_ELEMENTS.contains(&el.name.as_str()) {
        let text = el.text().split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            out.push(text);
        }
        return;
    }
    for child in el.child_elements() {
        collect_paragraphs(child, out);
    }
}

/// Extract plaintext from one document with the built-in extractor.
pub fn universal_extract_text<S: AsRef<str>>(document: &str, contains: &[S]) -> Result<String> {
    let filter = ParagraphFilter::new(contains)?;
    Ok(UniversalExtractor.extract(document, &filter))
}
