//! Test stores built on disk from the schema DDL

use std::io::Write;
use flate2::Compression;
use flate2::write::GzEncoder;
use rusqlite::{Connection, params};
use tempfile::TempDir;
use crate::config::StoreLocations;
use crate::grounding::Grounding;
use super::schema;

/// Encode text the way the content store holds it: a `\x` tag followed by
/// the hex of a gzip-wrapped stream.
pub(crate) fn pack(text: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    let bytes = encoder.finish().unwrap();
    format!("\\x{}", hex::encode(bytes))
}

pub(crate) struct Fixture {
    // Keeps the directory alive for the fixture's lifetime.
    _dir: TempDir,
    pub locations: StoreLocations,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let locations = StoreLocations {
            content_db: dir.path().join("content.db"),
            update_db: dir.path().join("update.db"),
        };

        let content = Connection::open(&locations.content_db).unwrap();
        for stmt in schema::content_schema_statements() {
            content.execute(stmt, []).unwrap();
        }
        let update = Connection::open(&locations.update_db).unwrap();
        for stmt in schema::update_schema_statements() {
            update.execute(stmt, []).unwrap();
        }

        Self { _dir: dir, locations }
    }

    fn content(&self) -> Connection {
        Connection::open(&self.locations.content_db).unwrap()
    }

    fn update(&self) -> Connection {
        Connection::open(&self.locations.update_db).unwrap()
    }

    pub fn add_agent_text(&self, agent_text: &str, pmid: &str) -> &Self {
        self.content()
            .execute("INSERT INTO agent_text_pmids (agent_text, pmid) VALUES (?1, ?2)", params![agent_text, pmid])
            .unwrap();
        self
    }

    pub fn add_hgnc(&self, hgnc_id: &str, pmid: &str) -> &Self {
        self.content()
            .execute("INSERT INTO entrez_pmids (hgnc_id, pmid) VALUES (?1, ?2)", params![hgnc_id, pmid])
            .unwrap();
        self
    }

    pub fn add_entity(&self, grounding: &Grounding, pmid: &str, major_topic: bool) -> &Self {
        let sql = if major_topic {
            "INSERT INTO entity_pmids_major (grounding, pmid) VALUES (?1, ?2)"
        } else {
            "INSERT INTO entity_pmids (grounding, pmid) VALUES (?1, ?2)"
        };
        self.content().execute(sql, params![grounding.key(), pmid]).unwrap();
        self
    }

    pub fn add_content(&self, pmid: &str, text: &str) -> &Self {
        self.add_raw_content(pmid, &pack(text))
    }

    pub fn add_raw_content(&self, pmid: &str, stored: &str) -> &Self {
        self.content()
            .execute("INSERT INTO best_content (pmid, content) VALUES (?1, ?2)", params![pmid, stored])
            .unwrap();
        self
    }

    pub fn add_paragraphs(&self, pmid: &str, paragraphs_json: &str) -> &Self {
        self.update()
            .execute("INSERT INTO text_content (pmid, paragraphs) VALUES (?1, ?2)", params![pmid, paragraphs_json])
            .unwrap();
        self
    }
}
