//! Agent-text aggregation per document

use std::collections::BTreeMap;
use crate::pmid::Pmid;

/// Agent text → number of observations within one document.
pub type AgentTextCounts = BTreeMap<String, usize>;

/// Per-document agent-text counts.
pub type DocumentAgentTexts = BTreeMap<Pmid, AgentTextCounts>;

/// Group (pmid, agent text) observations by document and count each text.
///
/// Documents without observations do not appear in the result.
pub fn count_agent_texts<I>(rows: I) -> DocumentAgentTexts
where
    I: IntoIterator<Item = (Pmid, String)>,
{
    let mut grouped = DocumentAgentTexts::new();
    for (pmid, agent_text) in rows {
        *grouped.entry(pmid).or_default().entry(agent_text).or_insert(0) += 1;
    }
    grouped
}
