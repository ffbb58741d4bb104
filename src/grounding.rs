//! Entity grounding - canonical concept reference
//!
//! Format: `<namespace>:<id>`
//!
//! Examples:
//! - `HGNC:6871`
//! - `MESH:D000818`
//! - `CHEBI:CHEBI:15365` (the id itself may contain `:`)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (namespace, local id) pair identifying a grounded entity.
///
/// Serialized as `"namespace:id"` whenever it is used as a lookup key in the
/// entity indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grounding {
    /// Namespace such as `HGNC`, `MESH`, `FPLX`
    pub namespace: String,
    /// Identifier local to the namespace
    pub id: String,
}

impl Grounding {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Parse a `namespace:id` string, splitting at the first `:`.
    pub fn parse(key: &str) -> Result<Self> {
        let (namespace, id) = key
            .split_once(':')
            .ok_or_else(|| Error::InvalidGrounding(format!("missing ':' in {:?}", key)))?;

        if namespace.is_empty() || id.is_empty() {
            return Err(Error::InvalidGrounding(format!("empty namespace or id in {:?}", key)));
        }

        Ok(Self::new(namespace, id))
    }

    /// The exact string used as the `grounding` column value.
    pub fn key(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }
}

impl fmt::Display for Grounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

impl FromStr for Grounding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Grounding {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for Grounding {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Grounding::parse(&s).map_err(serde::de::Error::custom)
    }
}
