//! PubMed identifier
//!
//! PMIDs are opaque external keys. Stores may hold them as TEXT or INTEGER
//! columns, so reading accepts both and binding always sends text (SQLite
//! applies the column affinity on comparison).

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one article in the literature store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pmid(String);

impl Pmid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pmid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pmid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Pmid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for Pmid {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl ToSql for Pmid {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for Pmid {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(Pmid::from)
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            ValueRef::Integer(n) => Ok(Pmid(n.to_string())),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}
