//! Paragraph records and required-shortform filtering

use regex::Regex;
use serde::Deserialize;
use crate::Result;

/// One persisted paragraph.
///
/// Older collections store bare strings; newer ones store records with the
/// section the paragraph came from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Paragraph {
    Text(String),
    Record {
        text: String,
        #[serde(default)]
        section: Option<String>,
    },
}

impl Paragraph {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Record { text, .. } => text,
        }
    }

    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Record { section, .. } => section.as_deref(),
        }
    }
}

/// Decode a persisted JSON array of paragraphs, preserving order.
pub fn decode_paragraphs(json: &str) -> Result<Vec<Paragraph>> {
    Ok(serde_json::from_str(json)?)
}

/// Keeps paragraphs mentioning at least one required shortform.
///
/// A shortform matches only when delimited by non-word characters or the
/// paragraph boundaries, so `ER` matches `(ER)` but not `ERK`. With no
/// shortforms every paragraph is kept.
#[derive(Debug, Clone)]
pub struct ParagraphFilter {
    pattern: Option<Regex>,
}

impl ParagraphFilter {
    pub fn new<S: AsRef<str>>(contains: &[S]) -> Result<Self> {
        if contains.is_empty() {
            return Ok(Self::keep_all());
        }

        let alternation = contains
            .iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?:^|\W)(?:{})(?:\W|$)", alternation))?;
        Ok(Self { pattern: Some(pattern) })
    }

    pub fn keep_all() -> Self {
        Self { pattern: None }
    }

    pub fn keeps(&self, paragraph: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(paragraph),
            None => true,
        }
    }

    /// Join the kept paragraphs with `\n`, plus a trailing `\n`.
    ///
    /// When nothing is kept the result is the single character `"\n"`.
    pub fn apply<'a, I>(&self, paragraphs: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = String::new();
        for paragraph in paragraphs.into_iter().filter(|p| self.keeps(p)) {
            out.push_str(paragraph);
            out.push('\n');
        }
        if out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Plaintext of the paragraphs that mention any of `contains`.
pub fn filter_paragraphs<S: AsRef<str>>(paragraphs: &[Paragraph], contains: &[S]) -> Result<String> {
    let filter = ParagraphFilter::new(contains)?;
    Ok(filter.apply(paragraphs.iter().map(Paragraph::text)))
}
