//! Corpus statistics module.
//!
//! Maintains incremental document frequency (df), term frequency (tf),
//! title and LLM keyword hits and acronym flags over a growing corpus, and
//! persists them as a JSON snapshot plus a spell-correction dictionary.

mod collector;
mod nlp;
mod normalize;
mod options;
mod snapshot;
mod store;

pub use collector::{CorpusStats, TermRecord};
pub use nlp::{Analysis, NounPhrase, SimpleAnalyzer, TextAnalyzer, Token};
pub use normalize::{is_acronym_surface, TermNormalizer, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
pub use options::{StatsOptions, DEFAULT_MIN_DF, DEFAULT_STOP_TERM_RATIO};
pub use snapshot::{StatsSnapshot, TermMeta};
pub use store::{read_snapshot, write_dump, DumpPaths, DICTIONARY_FILE, STATS_FILE};
