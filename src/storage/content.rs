//! Content store queries: identifier indexes and stored article bodies

use std::path::Path;
use crate::Result;
use crate::grounding::Grounding;
use crate::pmid::Pmid;
use super::sqlite::{StoreHandle, unique_keys};

/// Which grounding → pmid index to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityIndex {
    /// Every document mentioning the entity
    All,
    /// Only documents where the entity is a major topic
    MajorTopic,
}

impl EntityIndex {
    pub fn from_major_topic(major_topic: bool) -> Self {
        if major_topic { Self::MajorTopic } else { Self::All }
    }

    /// Table name; a fixed literal, never caller input.
    pub fn table(&self) -> &'static str {
        match self {
            Self::All => "entity_pmids",
            Self::MajorTopic => "entity_pmids_major",
        }
    }
}

/// Read access to the content store.
#[derive(Debug, Clone)]
pub struct ContentStore {
    handle: StoreHandle,
    batch_size: usize,
}

impl ContentStore {
    pub fn new(path: impl AsRef<Path>, batch_size: usize) -> Self {
        Self {
            handle: StoreHandle::new(path.as_ref()),
            batch_size,
        }
    }

    /// PMIDs indexed under an exact agent text
    pub fn pmids_for_agent_text(&self, agent_text: &str) -> Result<Vec<Pmid>> {
        self.handle.query_column(
            "SELECT pmid FROM agent_text_pmids WHERE agent_text = ?1",
            &agent_text,
        )
    }

    /// PMIDs indexed under an HGNC gene id
    pub fn pmids_for_hgnc_id(&self, hgnc_id: &str) -> Result<Vec<Pmid>> {
        self.handle.query_column(
            "SELECT pmid FROM entrez_pmids WHERE hgnc_id = ?1",
            &hgnc_id,
        )
    }

    /// PMIDs indexed under a grounding, from the general or major-topic index
    pub fn pmids_for_grounding(&self, grounding: &Grounding, index: EntityIndex) -> Result<Vec<Pmid>> {
        let sql = format!("SELECT pmid FROM {} WHERE grounding = ?1", index.table());
        self.handle.query_column(&sql, &grounding.key())
    }

    /// Stored (still encoded) content for each requested PMID present in the store
    pub fn raw_content_for_pmids(&self, pmids: &[Pmid]) -> Result<Vec<(Pmid, String)>> {
        let keys = unique_keys(pmids.iter().cloned());
        self.handle.query_in(
            "SELECT pmid, content FROM best_content WHERE pmid IN ({in})",
            &keys,
            self.batch_size,
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
    }

    /// Every (pmid, agent text) observation for the requested PMIDs
    pub fn agent_text_rows_for_pmids(&self, pmids: &[Pmid]) -> Result<Vec<(Pmid, String)>> {
        let keys = unique_keys(pmids.iter().cloned());
        self.handle.query_in(
            "SELECT pmid, agent_text FROM agent_text_pmids WHERE pmid IN ({in})",
            &keys,
            self.batch_size,
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures::Fixture;

    fn pmids(ids: &[&str]) -> Vec<Pmid> {
        ids.iter().map(|s| Pmid::from(*s)).collect()
    }

    #[test]
    fn test_agent_text_lookup() {
        let fx = Fixture::new();
        fx.add_agent_text("ER", "1").add_agent_text("ER", "2").add_agent_text("PR", "3");
        let store = ContentStore::new(&fx.locations.content_db, 10);

        let mut found = store.pmids_for_agent_text("ER").unwrap();
        found.sort();
        assert_eq!(found, pmids(&["1", "2"]));
        assert!(store.pmids_for_agent_text("er").unwrap().is_empty());
    }

    #[test]
    fn test_hgnc_lookup() {
        let fx = Fixture::new();
        fx.add_hgnc("6871", "10").add_hgnc("1100", "11");
        let store = ContentStore::new(&fx.locations.content_db, 10);

        assert_eq!(store.pmids_for_hgnc_id("6871").unwrap(), pmids(&["10"]));
    }

    #[test]
    fn test_grounding_lookup_uses_separate_major_index() {
        let fx = Fixture::new();
        let g = Grounding::new("HGNC", "6871");
        fx.add_entity(&g, "1", false)
            .add_entity(&g, "2", false)
            .add_entity(&g, "3", true);
        let store = ContentStore::new(&fx.locations.content_db, 10);

        let mut all = store.pmids_for_grounding(&g, EntityIndex::All).unwrap();
        all.sort();
        assert_eq!(all, pmids(&["1", "2"]));
        assert_eq!(store.pmids_for_grounding(&g, EntityIndex::MajorTopic).unwrap(), pmids(&["3"]));
    }

    #[test]
    fn test_raw_content_absent_ids_are_omitted() {
        let fx = Fixture::new();
        fx.add_content("1", "one").add_content("2", "two").add_content("3", "three");
        let store = ContentStore::new(&fx.locations.content_db, 10);

        let mut rows = store.raw_content_for_pmids(&pmids(&["2", "3", "4"])).unwrap();
        rows.sort();
        let ids: Vec<_> = rows.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_duplicate_ids_do_not_duplicate_rows() {
        let fx = Fixture::new();
        fx.add_agent_text("p53", "1").add_agent_text("TP53", "1");
        let store = ContentStore::new(&fx.locations.content_db, 1);

        let rows = store.agent_text_rows_for_pmids(&pmids(&["1", "1", "1"])).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
