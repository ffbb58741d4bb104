//! # adeft-content - literature content retrieval and normalization
//!
//! Read-only access layer over a compressed-document store of biomedical
//! literature, keyed by PubMed identifier.
//!
//! adeft-content provides:
//! - Batched, parameterized identifier lookups against SQLite content stores
//! - Decoding of hex-encoded, gzip-wrapped article bodies
//! - Plaintext extraction with required-shortform paragraph filters, serial or pooled
//! - Glossary (abbreviation → definition) extraction from article XML
//! - Agent-text occurrence aggregation per document and per grounded entity

pub mod pmid;
pub mod grounding;
pub mod config;
pub mod storage;
pub mod codec;
pub mod xml;
pub mod normalize;
pub mod glossary;
pub mod aggregate;
pub mod engine;

// Re-exports for convenient access
pub use pmid::Pmid;
pub use grounding::Grounding;
pub use config::{ContentConfig, StoreLocations};
pub use engine::ContentEngine;
pub use aggregate::AgentTextCounts;
pub use glossary::{get_abbreviations, Glossary};

/// Result type alias for adeft-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for adeft-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Paragraph collection error: {0}")]
    Paragraphs(#[from] serde_json::Error),

    #[error("Invalid grounding: {0}")]
    InvalidGrounding(String),

    #[error("Invalid paragraph filter: {0}")]
    Pattern(#[from] regex::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
