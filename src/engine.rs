//! Content engine
//!
//! Provides the public retrieval operations:
//! - Plaintext for PMIDs (stored paragraphs or raw article content)
//! - PMIDs for an agent text, HGNC id or entity grounding
//! - Decompressed article content for PMIDs
//! - Agent-text counts for PMIDs or for an entity
//! - Glossaries for PMIDs

use std::collections::BTreeMap;
use crate::Result;
use crate::aggregate::{DocumentAgentTexts, count_agent_texts};
use crate::codec;
use crate::config::ContentConfig;
use crate::glossary::{Glossary, get_abbreviations};
use crate::grounding::Grounding;
use crate::normalize::{Normalizer, TextExtractor, UniversalExtractor};
use crate::pmid::Pmid;
use crate::storage::{ContentStore, EntityIndex, UpdateStore};

/// Retrieval and normalization over the content and update stores.
#[derive(Debug, Clone)]
pub struct ContentEngine<E = UniversalExtractor> {
    content: ContentStore,
    update: UpdateStore,
    normalizer: Normalizer<E>,
}

impl ContentEngine<UniversalExtractor> {
    /// Create an engine using the built-in extractor
    pub fn new(config: &ContentConfig) -> Self {
        Self::with_extractor(config, UniversalExtractor)
    }
}

impl<E: TextExtractor> ContentEngine<E> {
    pub fn with_extractor(config: &ContentConfig, extractor: E) -> Self {
        Self {
            content: ContentStore::new(&config.stores.content_db, config.batch_size),
            update: UpdateStore::new(&config.stores.update_db, config.batch_size),
            normalizer: Normalizer::with_extractor(extractor, config.n_jobs),
        }
    }

    /// Replace the extraction worker count; 1 runs serially.
    pub fn with_jobs(mut self, n_jobs: usize) -> Self {
        self.normalizer = self.normalizer.with_jobs(n_jobs);
        self
    }

    pub fn jobs(&self) -> usize {
        self.normalizer.jobs()
    }

    // ========== Plaintext ==========

    /// Filtered plaintext from the stored paragraph collections.
    ///
    /// PMIDs without a collection, and documents left with fewer than two
    /// characters after filtering, are absent from the result.
    pub fn plaintexts_for_pmids<S: AsRef<str>>(
        &self,
        pmids: &[Pmid],
        contains: &[S],
    ) -> Result<BTreeMap<Pmid, String>> {
        let rows = self.update.paragraphs_for_pmids(pmids)?;
        let plaintexts = self.normalizer.normalize_stored(rows, contains)?;
        tracing::debug!(requested = pmids.len(), returned = plaintexts.len(), "plaintexts from stored paragraphs");
        Ok(plaintexts)
    }

    /// Filtered plaintext extracted from raw article content.
    pub fn plaintexts_from_content<S: AsRef<str>>(
        &self,
        pmids: &[Pmid],
        contains: &[S],
    ) -> Result<BTreeMap<Pmid, String>> {
        let (ids, documents): (Vec<Pmid>, Vec<String>) = self.content_for_pmids(pmids)?.into_iter().unzip();
        let texts = self.normalizer.extract_texts(&documents, contains)?;
        Ok(ids.into_iter().zip(texts).collect())
    }

    /// Filtered plaintext for documents already in hand, in input order.
    pub fn extract_texts<D, S>(&self, documents: &[D], contains: &[S]) -> Result<Vec<String>>
    where
        D: AsRef<str> + Sync,
        S: AsRef<str>,
    {
        self.normalizer.extract_texts(documents, contains)
    }

    // ========== Identifier lookups ==========

    pub fn pmids_for_agent_text(&self, agent_text: &str) -> Result<Vec<Pmid>> {
        self.content.pmids_for_agent_text(agent_text)
    }

    pub fn pmids_for_hgnc_id(&self, hgnc_id: &str) -> Result<Vec<Pmid>> {
        self.content.pmids_for_hgnc_id(hgnc_id)
    }

    /// PMIDs for an entity; `major_topic` reads the major-topic index instead.
    pub fn pmids_for_entity(&self, grounding: &Grounding, major_topic: bool) -> Result<Vec<Pmid>> {
        self.content
            .pmids_for_grounding(grounding, EntityIndex::from_major_topic(major_topic))
    }

    // ========== Raw content ==========

    /// Decompressed article content for each PMID present in the content store.
    ///
    /// A stored value that fails to decode is an error for the whole call.
    pub fn content_for_pmids(&self, pmids: &[Pmid]) -> Result<BTreeMap<Pmid, String>> {
        self.content
            .raw_content_for_pmids(pmids)?
            .into_iter()
            .map(|(pmid, stored)| -> Result<(Pmid, String)> {
                let text = codec::unpack(&stored).inspect_err(|e| {
                    tracing::error!(%pmid, "Stored content failed to decode: {}", e);
                })?;
                Ok((pmid, text))
            })
            .collect()
    }

    /// Glossary of each PMID with stored content; unparseable documents map to an empty glossary.
    pub fn abbreviations_for_pmids(&self, pmids: &[Pmid]) -> Result<BTreeMap<Pmid, Glossary>> {
        Ok(self
            .content_for_pmids(pmids)?
            .into_iter()
            .map(|(pmid, xml)| {
                let glossary = get_abbreviations(&xml);
                (pmid, glossary)
            })
            .collect())
    }

    // ========== Agent texts ==========

    /// Agent-text occurrence counts per document.
    pub fn agent_texts_for_pmids(&self, pmids: &[Pmid]) -> Result<DocumentAgentTexts> {
        let rows = self.content.agent_text_rows_for_pmids(pmids)?;
        Ok(count_agent_texts(rows))
    }

    /// Agent-text counts for every document indexed under an entity.
    pub fn agent_texts_for_entity(&self, grounding: &Grounding) -> Result<DocumentAgentTexts> {
        let pmids = self.pmids_for_entity(grounding, false)?;
        if pmids.is_empty() {
            return Ok(DocumentAgentTexts::new());
        }
        self.agent_texts_for_pmids(&pmids)
    }
}
