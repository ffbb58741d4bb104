//! Text Normalization - documents to filtered plaintext
//!
//! Two inputs are normalized:
//! - raw article documents, through a [`TextExtractor`]
//! - persisted paragraph collections, through a [`ParagraphFilter`]
//!
//! Either runs serially or on a worker pool; output order always matches
//! input order.

pub mod paragraphs;
pub mod extract;
pub mod pool;

use std::collections::BTreeMap;
use crate::Result;
use crate::pmid::Pmid;

pub use paragraphs::{Paragraph, ParagraphFilter, decode_paragraphs, filter_paragraphs};
pub use extract::{TextExtractor, UniversalExtractor, universal_extract_text};
pub use pool::{Executor, ParallelMap, Serial, WorkerPool};

/// Stored plaintexts shorter than this many characters are dropped.
///
/// An empty paragraph selection renders as a lone `"\n"`, so this removes
/// documents with nothing left after filtering.
pub const MIN_PLAINTEXT_CHARS: usize = 2;

/// Applies extraction and filtering to batches of documents.
#[derive(Debug, Clone)]
pub struct Normalizer<E = UniversalExtractor> {
    extractor: E,
    executor: Executor,
}

impl Normalizer<UniversalExtractor> {
    pub fn new(n_jobs: usize) -> Self {
        Self::with_extractor(UniversalExtractor, n_jobs)
    }
}

impl Default for Normalizer<UniversalExtractor> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<E: TextExtractor> Normalizer<E> {
    pub fn with_extractor(extractor: E, n_jobs: usize) -> Self {
        Self {
            extractor,
            executor: Executor::with_jobs(n_jobs),
        }
    }

    pub fn with_jobs(mut self, n_jobs: usize) -> Self {
        self.executor = Executor::with_jobs(n_jobs);
        self
    }

    pub fn jobs(&self) -> usize {
        self.executor.jobs()
    }

    /// Extract plaintext from each document; the i-th output is the i-th input's text.
    pub fn extract_texts<D, S>(&self, documents: &[D], contains: &[S]) -> Result<Vec<String>>
    where
        D: AsRef<str> + Sync,
        S: AsRef<str>,
    {
        let filter = ParagraphFilter::new(contains)?;
        let docs: Vec<&str> = documents.iter().map(AsRef::as_ref).collect();

        Ok(self
            .executor
            .map_ordered(docs, |doc| self.extractor.extract(doc, &filter)))
    }

    /// Decode and filter persisted paragraph collections, keyed by PMID.
    ///
    /// Documents whose plaintext is shorter than [`MIN_PLAINTEXT_CHARS`] are
    /// left out. A collection that is not valid JSON is an error.
    pub fn normalize_stored<S: AsRef<str>>(
        &self,
        rows: Vec<(Pmid, String)>,
        contains: &[S],
    ) -> Result<BTreeMap<Pmid, String>> {
        let filter = ParagraphFilter::new(contains)?;

        let filtered = self.executor.map_ordered(rows, |(pmid, json)| -> Result<(Pmid, String)> {
            let paragraphs = decode_paragraphs(&json)?;
            let text = filter.apply(paragraphs.iter().map(Paragraph::text));
            Ok((pmid, text))
        });

        let mut plaintexts = BTreeMap::new();
        for row in filtered {
            let (pmid, text) = row?;
            if text.chars().count() < MIN_PLAINTEXT_CHARS {
                tracing::trace!(%pmid, "dropping document with no remaining text");
                continue;
            }
            plaintexts.insert(pmid, text);
        }
        Ok(plaintexts)
    }
}
