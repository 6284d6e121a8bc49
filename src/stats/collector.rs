//! Corpus statistics engine.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::nlp::{SimpleAnalyzer, TextAnalyzer};
use super::normalize::{is_acronym_surface, TermNormalizer};
use super::options::StatsOptions;
use super::snapshot::{StatsSnapshot, TermMeta};
use super::store::{self, DumpPaths};
use crate::error::Result;

/// Corpus-wide counters of a single term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermRecord {
    /// Documents containing the term
    pub df: u64,

    /// Total occurrences
    pub tf: u64,

    /// Title mentions
    pub title_hits: u64,

    /// LLM keyword mentions
    pub llm_hits: u64,

    /// Seen as an acronym at least once
    pub is_acronym: bool,
}

/// Contributions of one document, committed only once the document is done.
#[derive(Debug, Default)]
struct DocumentDelta {
    terms: HashMap<String, TermDelta>,
}

#[derive(Debug, Default)]
struct TermDelta {
    tf: u64,
    title_hits: u64,
    llm_hits: u64,
    acronym: bool,
}

impl DocumentDelta {
    fn occur(&mut self, term: String) -> &mut TermDelta {
        let delta = self.terms.entry(term).or_default();
        delta.tf += 1;
        delta
    }
}

/// Incremental document and term frequency statistics over a corpus.
///
/// The engine is a plain owned value: `consume` takes `&mut self`, so calls
/// are serialized by the borrow checker. Share it across threads by moving it
/// into a single consumer (see [`Pipeline`](crate::pipeline::Pipeline)) or
/// behind a mutex.
///
/// # Example
///
/// ```
/// use kbharvest::stats::CorpusStats;
///
/// let mut stats = CorpusStats::new();
/// stats.consume("VPN setup", "Restart the VPN before login.", None);
/// assert_eq!(stats.doc_count(), 1);
/// assert!(stats.term("vpn").unwrap().is_acronym);
/// ```
#[derive(Debug)]
pub struct CorpusStats<A = SimpleAnalyzer> {
    analyzer: A,
    normalizer: TermNormalizer,
    options: StatsOptions,
    doc_count: u64,
    terms: HashMap<String, TermRecord>,
}

impl CorpusStats<SimpleAnalyzer> {
    /// Create an empty engine with the built-in analyzer and default options.
    pub fn new() -> Self {
        Self::with_analyzer(SimpleAnalyzer::new(), StatsOptions::default())
    }
}

impl Default for CorpusStats<SimpleAnalyzer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TextAnalyzer> CorpusStats<A> {
    /// Create an empty engine.
    pub fn with_analyzer(analyzer: A, options: StatsOptions) -> Self {
        let normalizer = TermNormalizer::new(options.min_token_len, options.max_token_len);
        Self {
            analyzer,
            normalizer,
            options,
            doc_count: 0,
            terms: HashMap::new(),
        }
    }

    /// Load the engine state persisted in `dir`.
    ///
    /// A directory without a snapshot yields an empty engine. A snapshot that
    /// cannot be parsed or is inconsistent is an error: continuing from empty
    /// state would silently skew all future frequencies.
    pub fn load(dir: &Path, analyzer: A, options: StatsOptions) -> Result<Self> {
        let mut stats = Self::with_analyzer(analyzer, options);
        match store::read_snapshot(dir)? {
            Some(snapshot) => {
                stats.restore(&snapshot);
                log::info!(
                    "Loaded statistics for {} documents ({} terms) from {}",
                    stats.doc_count,
                    stats.terms.len(),
                    dir.display()
                );
            }
            None => log::info!("No statistics in {}, starting fresh", dir.display()),
        }
        Ok(stats)
    }

    /// Replace the current state with the counters of a snapshot.
    pub fn restore(&mut self, snapshot: &StatsSnapshot) {
        self.doc_count = snapshot.doc_count;
        self.terms = snapshot
            .meta
            .iter()
            .map(|(term, meta)| {
                let record = TermRecord {
                    df: meta.df,
                    tf: meta.tf,
                    title_hits: meta.title_hits,
                    llm_hits: meta.llm_hits,
                    is_acronym: meta.is_acronym,
                };
                (term.clone(), record)
            })
            .collect();
    }

    /// Register one document.
    ///
    /// Returns `false` without touching any counter when `content` is empty.
    /// Otherwise every term found in the content, the title or the keywords
    /// gains exactly one document and its occurrence count.
    pub fn consume(&mut self, title: &str, content: &str, llm_keywords: Option<&[String]>) -> bool {
        if content.is_empty() {
            return false;
        }

        let mut delta = DocumentDelta::default();
        self.collect_content(content, &mut delta);
        self.collect_title(title, &mut delta);
        if let Some(keywords) = llm_keywords {
            self.collect_keywords(keywords, &mut delta);
        }

        log::debug!("Consumed document {:?}: {} distinct terms", title, delta.terms.len());
        self.commit(delta);
        true
    }

    fn collect_content(&self, content: &str, delta: &mut DocumentDelta) {
        let analysis = self.analyzer.analyze(content);
        let mut covered = vec![false; analysis.tokens.len()];

        for phrase in &analysis.noun_phrases {
            let end = phrase.end.min(covered.len());
            if phrase.start < end {
                covered[phrase.start..end].iter_mut().for_each(|c| *c = true);
            }
            if let Some(term) = self.normalizer.normalize_phrase(&phrase.lemma) {
                delta.occur(term);
            }
        }

        for (token, covered) in analysis.tokens.iter().zip(covered) {
            if covered || !token.is_content_word() {
                continue;
            }
            let Some(term) = self.normalizer.normalize_token(&token.lemma) else {
                continue;
            };
            let entry = delta.occur(term);
            if is_acronym_surface(&token.text) {
                entry.acronym = true;
            }
        }
    }

    fn collect_title(&self, title: &str, delta: &mut DocumentDelta) {
        if title.is_empty() {
            return;
        }

        let mut seen = Vec::new();
        for token in self.analyzer.tokenize(title) {
            if token.is_stop {
                continue;
            }
            let Some(term) = self.normalizer.normalize_token(&token.lemma) else {
                continue;
            };
            if seen.contains(&term) {
                continue;
            }
            seen.push(term.clone());
            delta.occur(term).title_hits += 1;
        }
    }

    fn collect_keywords(&self, keywords: &[String], delta: &mut DocumentDelta) {
        for keyword in keywords {
            let acronym = is_acronym_surface(keyword);
            let Some(phrase) = self.normalizer.normalize_phrase(keyword) else {
                continue;
            };

            let words: Vec<String> = if phrase.contains(' ') {
                phrase
                    .split(' ')
                    .filter_map(|word| self.normalizer.normalize_token(word))
                    .collect()
            } else {
                Vec::new()
            };

            let entry = delta.occur(phrase);
            entry.llm_hits += 1;
            if acronym {
                entry.acronym = true;
            }

            for word in words {
                delta.occur(word).llm_hits += 1;
            }
        }
    }

    fn commit(&mut self, delta: DocumentDelta) {
        self.doc_count += 1;
        for (term, change) in delta.terms {
            let record = self.terms.entry(term).or_default();
            record.df += 1;
            record.tf += change.tf;
            record.title_hits += change.title_hits;
            record.llm_hits += change.llm_hits;
            record.is_acronym |= change.acronym;
        }
    }

    /// Number of consumed documents.
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Number of distinct observed terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Counters of a term.
    pub fn term(&self, term: &str) -> Option<&TermRecord> {
        self.terms.get(term)
    }

    /// Iterate over all observed terms in unspecified order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &TermRecord)> {
        self.terms.iter().map(|(term, record)| (term.as_str(), record))
    }

    /// The options in effect.
    pub fn options(&self) -> &StatsOptions {
        &self.options
    }

    /// Inverse document frequency for a term with document frequency `df`.
    pub fn idf(&self, df: u64) -> f64 {
        ((self.doc_count as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
    }

    fn is_strong(record: &TermRecord, min_df: u64) -> bool {
        record.df >= min_df && record.tf >= min_df
    }

    /// Terms whose document ratio exceeds the configured stop-term ratio,
    /// sorted. Computed over all observed terms.
    pub fn stop_terms(&self) -> Vec<String> {
        if self.doc_count == 0 {
            return Vec::new();
        }

        let n = self.doc_count as f64;
        let mut stop: Vec<String> = self
            .terms
            .iter()
            .filter(|(_, record)| record.df as f64 / n > self.options.stop_term_ratio)
            .map(|(term, _)| term.clone())
            .collect();
        stop.sort();
        stop
    }

    /// Build a snapshot of the strong terms for `min_df`.
    pub fn snapshot(&self, min_df: u64) -> StatsSnapshot {
        let mut idf = BTreeMap::new();
        let mut meta = BTreeMap::new();

        for (term, record) in &self.terms {
            if !Self::is_strong(record, min_df) {
                continue;
            }
            idf.insert(term.clone(), self.idf(record.df));
            meta.insert(
                term.clone(),
                TermMeta {
                    title_hits: record.title_hits,
                    llm_hits: record.llm_hits,
                    tf: record.tf,
                    df: record.df,
                    is_acronym: record.is_acronym,
                },
            );
        }

        StatsSnapshot {
            doc_count: self.doc_count,
            idf,
            meta,
            stop_terms: self.stop_terms(),
        }
    }

    /// Term frequencies of the strong terms for `min_df`, sorted by term.
    pub fn frequency_dictionary(&self, min_df: u64) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .terms
            .iter()
            .filter(|(_, record)| Self::is_strong(record, min_df))
            .map(|(term, record)| (term.clone(), record.tf))
            .collect();
        entries.sort();
        entries
    }

    /// Write the snapshot and dictionary into `dir` using the configured
    /// `min_df`.
    pub fn dump(&self, dir: &Path) -> Result<DumpPaths> {
        self.dump_with_min_df(dir, self.options.min_df)
    }

    /// Write the snapshot and dictionary into `dir`.
    pub fn dump_with_min_df(&self, dir: &Path, min_df: u64) -> Result<DumpPaths> {
        let snapshot = self.snapshot(min_df);
        let dictionary = self.frequency_dictionary(min_df);
        let paths = store::write_dump(dir, &snapshot, &dictionary, self.options.json_format)?;

        log::info!(
            "Dumped {} of {} terms over {} documents to {}",
            snapshot.term_count(),
            self.terms.len(),
            self.doc_count,
            dir.display()
        );
        Ok(paths)
    }
}
