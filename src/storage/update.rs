//! Update store queries: persisted paragraph collections

use std::path::Path;
use crate::Result;
use crate::pmid::Pmid;
use super::sqlite::{StoreHandle, unique_keys};

/// Read access to the update store.
#[derive(Debug, Clone)]
pub struct UpdateStore {
    handle: StoreHandle,
    batch_size: usize,
}

impl UpdateStore {
    pub fn new(path: impl AsRef<Path>, batch_size: usize) -> Self {
        Self {
            handle: StoreHandle::new(path.as_ref()),
            batch_size,
        }
    }

    /// Undecoded paragraph JSON for each requested PMID present in the store
    pub fn paragraphs_for_pmids(&self, pmids: &[Pmid]) -> Result<Vec<(Pmid, String)>> {
        let keys = unique_keys(pmids.iter().cloned());
        self.handle.query_in(
            "SELECT pmid, paragraphs FROM text_content WHERE pmid IN ({in})",
            &keys,
            self.batch_size,
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
    }
}
