//! Ingestion pipeline: parallel extraction feeding a single statistics consumer.
//!
//! Pages are extracted on the rayon pool and sent through a bounded
//! crossbeam channel to one consumer thread that owns the
//! [`CorpusStats`] for the duration of the run, so `consume` calls never
//! overlap.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crossbeam_channel::{bounded, Sender};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::{is_indexable_url, PageExtractor};
use crate::index::IndexDocument;
use crate::stats::{CorpusStats, TextAnalyzer};

/// Default capacity of the queue between extraction and statistics.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// A fetched page entering the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    /// Page URL
    pub url: String,

    /// Raw HTML document
    pub html: String,

    /// Keywords produced by an external summarizer
    pub llm_keywords: Option<Vec<String>>,

    /// Summary produced by an external summarizer
    pub summary: Option<String>,
}

impl PageInput {
    /// Create an input without summary or keywords.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            ..Default::default()
        }
    }

    /// Attach LLM keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.llm_keywords = Some(keywords);
        self
    }

    /// Attach a summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Read a JSON object mapping page file names to keyword lists.
pub fn read_keyword_map(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Options for [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Capacity of the bounded queue (at least 1)
    pub queue_capacity: usize,

    /// Extract pages on the rayon thread pool
    pub parallel: bool,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Enable or disable parallel extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Extract sequentially on the calling thread.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            parallel: true,
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Index documents in input order
    pub documents: Vec<IndexDocument>,

    /// URLs skipped as not indexable
    pub skipped: Vec<String>,

    /// Documents the statistics engine accepted (non-empty content)
    pub consumed: usize,
}

struct Extracted {
    index: usize,
    document: IndexDocument,
    keywords: Option<Vec<String>>,
}

/// Fan-out extraction, fan-in statistics.
#[derive(Debug)]
pub struct Pipeline {
    extractor: PageExtractor,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new(extractor: PageExtractor) -> Self {
        Self::with_options(extractor, PipelineOptions::default())
    }

    /// Create a pipeline with custom options.
    pub fn with_options(extractor: PageExtractor, options: PipelineOptions) -> Self {
        Self { extractor, options }
    }

    /// The page extractor.
    pub fn extractor(&self) -> &PageExtractor {
        &self.extractor
    }

    /// Extract all pages and feed them into `stats`.
    pub fn run<A: TextAnalyzer>(
        &self,
        pages: &[PageInput],
        stats: &mut CorpusStats<A>,
    ) -> Result<PipelineOutput> {
        self.run_with_progress(pages, stats, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_document` on the consumer thread
    /// after each document has been consumed.
    pub fn run_with_progress<A, F>(
        &self,
        pages: &[PageInput],
        stats: &mut CorpusStats<A>,
        mut on_document: F,
    ) -> Result<PipelineOutput>
    where
        A: TextAnalyzer,
        F: FnMut(&IndexDocument) + Send,
    {
        let mut skipped = Vec::new();
        let mut accepted = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            if is_indexable_url(&page.url) {
                accepted.push((index, page));
            } else {
                log::info!("Skipping non-indexable URL {}", page.url);
                skipped.push(page.url.clone());
            }
        }

        let (tx, rx) = bounded::<Extracted>(self.options.queue_capacity.max(1));

        let (produced, consumed) = std::thread::scope(|scope| {
            let consumer = scope.spawn(move || {
                let mut documents = Vec::new();
                let mut consumed = 0;
                for item in rx {
                    let doc = &item.document;
                    if stats.consume(&doc.title, &doc.content, item.keywords.as_deref()) {
                        consumed += 1;
                    }
                    on_document(doc);
                    documents.push((item.index, item.document));
                }
                (documents, consumed)
            });

            let produced = self.produce(&accepted, tx);
            let consumed = consumer
                .join()
                .map_err(|_| Error::Channel("statistics consumer panicked".to_string()));
            (produced, consumed)
        });

        produced?;
        let (mut documents, consumed) = consumed?;
        documents.sort_by_key(|(index, _)| *index);

        log::info!(
            "Pipeline finished: {} documents, {} consumed, {} skipped",
            documents.len(),
            consumed,
            skipped.len()
        );

        Ok(PipelineOutput {
            documents: documents.into_iter().map(|(_, doc)| doc).collect(),
            skipped,
            consumed,
        })
    }

    fn produce(&self, pages: &[(usize, &PageInput)], tx: Sender<Extracted>) -> Result<()> {
        if self.options.parallel {
            pages
                .par_iter()
                .try_for_each_with(tx, |tx, (index, page)| self.send(tx, *index, page))
        } else {
            pages
                .iter()
                .try_for_each(|(index, page)| self.send(&tx, *index, page))
        }
    }

    fn send(&self, tx: &Sender<Extracted>, index: usize, page: &PageInput) -> Result<()> {
        let extracted = self.extractor.extract_page(&page.url, &page.html);
        let keywords = page.llm_keywords.as_deref().unwrap_or_default();
        let document = IndexDocument::from_page(&extracted, page.summary.as_deref(), keywords);

        tx.send(Extracted {
            index,
            document,
            keywords: page.llm_keywords.clone(),
        })
        .map_err(|e| Error::Channel(e.to_string()))
    }
}
