//! Table layout of the content and update stores
//!
//! This layer only reads these tables. The DDL documents the columns each
//! query relies on and is what test fixtures are built from.

/// Content store: agent text → pmid index
pub const CREATE_AGENT_TEXT_PMIDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS agent_text_pmids (
    agent_text TEXT NOT NULL,
    pmid TEXT NOT NULL
)
"#;

/// Content store: HGNC id → pmid index
pub const CREATE_ENTREZ_PMIDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entrez_pmids (
    hgnc_id TEXT NOT NULL,
    pmid TEXT NOT NULL
)
"#;

/// Content store: grounding (`ns:id`) → pmid index
pub const CREATE_ENTITY_PMIDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entity_pmids (
    grounding TEXT NOT NULL,
    pmid TEXT NOT NULL
)
"#;

/// Content store: grounding → pmid, restricted to major topics
pub const CREATE_ENTITY_PMIDS_MAJOR_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entity_pmids_major (
    grounding TEXT NOT NULL,
    pmid TEXT NOT NULL
)
"#;

/// Content store: best available article body per pmid.
/// `content` is a hex string: a two-character store tag followed by a
/// gzip-wrapped zlib stream.
pub const CREATE_BEST_CONTENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS best_content (
    pmid TEXT PRIMARY KEY,
    content TEXT NOT NULL
)
"#;

/// Update store: persisted paragraph collections (JSON array)
pub const CREATE_TEXT_CONTENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS text_content (
    pmid TEXT PRIMARY KEY,
    paragraphs TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_agent_text_pmids_text ON agent_text_pmids(agent_text)",
    "CREATE INDEX IF NOT EXISTS idx_agent_text_pmids_pmid ON agent_text_pmids(pmid)",
    "CREATE INDEX IF NOT EXISTS idx_entrez_pmids_hgnc ON entrez_pmids(hgnc_id)",
    "CREATE INDEX IF NOT EXISTS idx_entity_pmids_grounding ON entity_pmids(grounding)",
    "CREATE INDEX IF NOT EXISTS idx_entity_pmids_major_grounding ON entity_pmids_major(grounding)",
];

/// Schema statements for the content store
pub fn content_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_AGENT_TEXT_PMIDS_TABLE,
        CREATE_ENTREZ_PMIDS_TABLE,
        CREATE_ENTITY_PMIDS_TABLE,
        CREATE_ENTITY_PMIDS_MAJOR_TABLE,
        CREATE_BEST_CONTENT_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Schema statements for the update store
pub fn update_schema_statements() -> Vec<&'static str> {
    vec![CREATE_TEXT_CONTENT_TABLE]
}
