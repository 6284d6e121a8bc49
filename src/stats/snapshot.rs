//! Persisted form of the corpus statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-term counters as stored in a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMeta {
    /// Number of titles the term appeared in
    pub title_hits: u64,

    /// Number of LLM keyword mentions
    pub llm_hits: u64,

    /// Total occurrences across the corpus
    pub tf: u64,

    /// Number of documents containing the term
    pub df: u64,

    /// Term was seen as an acronym at least once
    pub is_acronym: bool,
}

/// A dump of the statistics engine.
///
/// `meta` and `idf` only hold strong terms; `stop_terms` is computed over
/// every observed term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of consumed documents
    pub doc_count: u64,

    /// Inverse document frequency of strong terms
    #[serde(default)]
    pub idf: BTreeMap<String, f64>,

    /// Counters of strong terms
    pub meta: BTreeMap<String, TermMeta>,

    /// Sorted stop terms
    #[serde(default)]
    pub stop_terms: Vec<String>,
}

impl StatsSnapshot {
    /// Number of terms kept in the snapshot.
    pub fn term_count(&self) -> usize {
        self.meta.len()
    }

    /// Check whether a term is a stop term.
    pub fn is_stop_term(&self, term: &str) -> bool {
        self.stop_terms.binary_search_by(|t| t.as_str().cmp(term)).is_ok()
    }

    /// Check internal consistency of the counters.
    ///
    /// Returns a description of the first inconsistent term.
    pub fn validate(&self) -> Result<(), String> {
        for (term, meta) in &self.meta {
            if meta.df > self.doc_count {
                return Err(format!(
                    "term {:?} has df {} above doc_count {}",
                    term, meta.df, self.doc_count
                ));
            }
            if meta.df > meta.tf {
                return Err(format!("term {:?} has df {} above tf {}", term, meta.df, meta.tf));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_keys() {
        let mut snapshot = StatsSnapshot {
            doc_count: 3,
            ..Default::default()
        };
        snapshot.meta.insert(
            "vpn".to_string(),
            TermMeta {
                title_hits: 1,
                llm_hits: 0,
                tf: 4,
                df: 2,
                is_acronym: true,
            },
        );

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"doc_count\":3"));
        assert!(json.contains("\"title_hits\":1"));
        assert!(json.contains("\"is_acronym\":true"));
        assert!(json.contains("\"stop_terms\":[]"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let snapshot: StatsSnapshot = serde_json::from_str(r#"{"doc_count":1,"meta":{}}"#).unwrap();
        assert_eq!(snapshot.doc_count, 1);
        assert!(snapshot.idf.is_empty());
        assert!(snapshot.stop_terms.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let result = serde_json::from_str::<StatsSnapshot>(r#"{"meta":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let mut snapshot = StatsSnapshot {
            doc_count: 1,
            ..Default::default()
        };
        snapshot.meta.insert(
            "wiki".to_string(),
            TermMeta {
                tf: 3,
                df: 2,
                ..Default::default()
            },
        );
        assert!(snapshot.validate().is_err());

        snapshot.doc_count = 2;
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_is_stop_term() {
        let snapshot = StatsSnapshot {
            stop_terms: vec!["page".to_string(), "wiki".to_string()],
            ..Default::default()
        };
        assert!(snapshot.is_stop_term("wiki"));
        assert!(!snapshot.is_stop_term("vpn"));
    }
}
