//! Storage Layer - read-only SQLite stores
//!
//! Two logical stores are read:
//! - content store: agent_text_pmids(agent_text, pmid), entrez_pmids(hgnc_id, pmid),
//!   entity_pmids / entity_pmids_major(grounding, pmid), best_content(pmid, content)
//! - update store: text_content(pmid, paragraphs)
//!
//! Every call opens its own read-only connection and releases it before returning.

pub mod schema;
pub mod sqlite;
pub mod content;
pub mod update;

#[cfg(test)]
pub(crate) mod fixtures;

pub use sqlite::{StoreHandle, placeholders, unique_keys};
pub use content::{ContentStore, EntityIndex};
pub use update::UpdateStore;
