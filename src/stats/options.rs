//! Statistics engine options.

use super::normalize::{DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use crate::render::JsonFormat;

/// Default minimum document and term frequency for strong terms.
pub const DEFAULT_MIN_DF: u64 = 2;

/// Default document-frequency ratio above which a term is a stop term.
pub const DEFAULT_STOP_TERM_RATIO: f64 = 0.85;

/// Options for [`CorpusStats`](super::CorpusStats).
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Minimum term length in characters
    pub min_token_len: usize,

    /// Maximum term length in characters
    pub max_token_len: usize,

    /// Threshold on both df and tf for a term to be dumped
    pub min_df: u64,

    /// Terms with `df / doc_count` above this are stop terms
    pub stop_term_ratio: f64,

    /// Formatting of the snapshot file
    pub json_format: JsonFormat,
}

impl StatsOptions {
    /// Create new stats options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accepted term length range.
    pub fn with_term_len(mut self, min: usize, max: usize) -> Self {
        self.min_token_len = min;
        self.max_token_len = max;
        self
    }

    /// Set the strong-term threshold.
    pub fn with_min_df(mut self, min_df: u64) -> Self {
        self.min_df = min_df;
        self
    }

    /// Set the stop-term ratio.
    pub fn with_stop_term_ratio(mut self, ratio: f64) -> Self {
        self.stop_term_ratio = ratio;
        self
    }

    /// Set the snapshot JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            min_token_len: DEFAULT_MIN_LEN,
            max_token_len: DEFAULT_MAX_LEN,
            min_df: DEFAULT_MIN_DF,
            stop_term_ratio: DEFAULT_STOP_TERM_RATIO,
            json_format: JsonFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = StatsOptions::default();
        assert_eq!(options.min_token_len, 3);
        assert_eq!(options.max_token_len, 40);
        assert_eq!(options.min_df, 2);
        assert_eq!(options.stop_term_ratio, 0.85);
        assert_eq!(options.json_format, JsonFormat::Pretty);
    }

    #[test]
    fn test_stats_options_builder() {
        let options = StatsOptions::new()
            .with_term_len(2, 20)
            .with_min_df(5)
            .with_stop_term_ratio(0.5)
            .with_json_format(JsonFormat::Compact);

        assert_eq!(options.min_token_len, 2);
        assert_eq!(options.max_token_len, 20);
        assert_eq!(options.min_df, 5);
        assert_eq!(options.stop_term_ratio, 0.5);
        assert_eq!(options.json_format, JsonFormat::Compact);
    }
}
