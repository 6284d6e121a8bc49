//! Text analysis capability consumed by the statistics engine.
//!
//! The engine only needs tokens with a few flags and noun-phrase spans; any
//! tokenizer/lemmatizer can be plugged in through [`TextAnalyzer`]. The
//! bundled [`SimpleAnalyzer`] is rule-based and dependency-light.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// A token produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw surface text
    pub text: String,

    /// Lemma (base form)
    pub lemma: String,

    /// Stop word
    pub is_stop: bool,

    /// Punctuation or symbol
    pub is_punct: bool,

    /// Looks like a number
    pub like_num: bool,
}

impl Token {
    /// Check whether the token can become a term.
    pub fn is_content_word(&self) -> bool {
        !(self.is_stop || self.is_punct || self.like_num)
    }
}

/// A noun phrase spanning tokens `start..end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounPhrase {
    /// Lemmatized phrase text
    pub lemma: String,

    /// Index of the first token
    pub start: usize,

    /// Index one past the last token
    pub end: usize,
}

impl NounPhrase {
    /// Check whether the token at `index` belongs to this phrase.
    pub fn covers(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Result of analyzing a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Tokens in order (whitespace is not a token)
    pub tokens: Vec<Token>,

    /// Noun phrases over `tokens`
    pub noun_phrases: Vec<NounPhrase>,
}

/// Tokenizer, lemmatizer and noun-phrase detector.
pub trait TextAnalyzer: Send + Sync {
    /// Analyze a body of text.
    fn analyze(&self, text: &str) -> Analysis;

    /// Tokenize a short text such as a title.
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.analyze(text).tokens
    }
}

/// English stop words.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "else", "etc", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "may", "me", "might", "more", "most", "must", "my",
    "myself", "neither", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "please", "same", "shall", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Rule-based analyzer using Unicode word boundaries.
///
/// Lemmas are lower-cased with light English plural stripping. Noun phrases
/// are maximal runs of two or more adjacent alphabetic content words;
/// punctuation, numbers and stop words break a run. Overlong runs are left to
/// the term normalizer's length bound.
#[derive(Debug, Clone)]
pub struct SimpleAnalyzer {
    number_regex: Regex,
}

impl SimpleAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self {
            number_regex: Regex::new(r"^[+-]?(\d+([.,]\d+)*|\d*[.,]\d+)(%|st|nd|rd|th)?$").unwrap(),
        }
    }

    fn token(&self, segment: &str) -> Token {
        let lower = segment.to_lowercase();
        let is_punct = !segment.chars().any(char::is_alphanumeric);
        let like_num = self.number_regex.is_match(segment);
        let is_stop = STOP_WORDS.binary_search(&lower.as_str()).is_ok();

        Token {
            text: segment.to_string(),
            lemma: lemmatize(&lower),
            is_stop,
            is_punct,
            like_num,
        }
    }
}

impl Default for SimpleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnalyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Analysis {
        let tokens: Vec<Token> = text
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| self.token(segment))
            .collect();

        let mut noun_phrases = Vec::new();
        let mut run_start = None;

        for idx in 0..=tokens.len() {
            let in_run = tokens
                .get(idx)
                .map(|t| t.is_content_word() && t.text.chars().all(char::is_alphabetic))
                .unwrap_or(false);

            match (in_run, run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    if idx - start >= 2 {
                        noun_phrases.push(phrase(&tokens, start, idx));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }

        Analysis {
            tokens,
            noun_phrases,
        }
    }
}

fn phrase(tokens: &[Token], start: usize, end: usize) -> NounPhrase {
    let lemma = tokens[start..end]
        .iter()
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    NounPhrase { lemma, start, end }
}

/// Strip common English plural endings from a lower-case word.
fn lemmatize(lower: &str) -> String {
    if !lower.chars().all(char::is_alphabetic) {
        return lower.to_string();
    }

    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if lower.ends_with("sses") {
        return lower[..lower.len() - 2].to_string();
    }
    if len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return lower[..lower.len() - 1].to_string();
    }

    lower.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_sorted() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, STOP_WORDS);
    }

    #[test]
    fn test_lemmatize() {
        assert_eq!(lemmatize("servers"), "server");
        assert_eq!(lemmatize("policies"), "policy");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("analysis"), "analysis");
        assert_eq!(lemmatize("gas"), "gas");
        assert_eq!(lemmatize("v2s"), "v2s");
    }

    #[test]
    fn test_token_flags() {
        let analyzer = SimpleAnalyzer::new();
        let analysis = analyzer.analyze("The VPN has 42 users, 3.5% idle!");

        let texts: Vec<_> = analysis.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["The", "VPN", "has", "42", "users", ",", "3.5", "%", "idle", "!"]
        );

        assert!(analysis.tokens[0].is_stop);
        assert!(!analysis.tokens[1].is_stop);
        assert_eq!(analysis.tokens[1].lemma, "vpn");
        assert!(analysis.tokens[3].like_num);
        assert_eq!(analysis.tokens[4].lemma, "user");
        assert!(analysis.tokens[5].is_punct);
        assert!(analysis.tokens[6].like_num);
    }

    #[test]
    fn test_noun_phrases() {
        let analyzer = SimpleAnalyzer::new();
        let analysis = analyzer.analyze("Reset the database server passwords. Then call support.");

        let phrases: Vec<_> = analysis.noun_phrases.iter().map(|p| p.lemma.as_str()).collect();
        assert_eq!(phrases, vec!["database server password", "call support"]);
        assert_eq!(analysis.noun_phrases[0].start, 2);
        assert_eq!(analysis.noun_phrases[0].end, 5);
        assert!(analysis.noun_phrases[0].covers(4));
        assert!(!analysis.noun_phrases[0].covers(5));
    }

    #[test]
    fn test_runs_are_maximal() {
        let analyzer = SimpleAnalyzer::new();
        let analysis =
            analyzer.analyze("The backup server stores nightly snapshots of the mail cluster.");

        let phrases: Vec<_> = analysis.noun_phrases.iter().map(|p| p.lemma.as_str()).collect();
        assert_eq!(phrases, vec!["backup server store nightly snapshot", "mail cluster"]);
        assert_eq!(analysis.noun_phrases[0].start, 1);
        assert_eq!(analysis.noun_phrases[0].end, 6);
    }

    #[test]
    fn test_single_word_runs_are_not_phrases() {
        let analyzer = SimpleAnalyzer::new();
        let analysis = analyzer.analyze("Backup, restore and verify.");
        assert!(analysis.noun_phrases.is_empty());
    }
}
