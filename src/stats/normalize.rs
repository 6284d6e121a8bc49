//! Term normalization.

/// Default minimum term length in characters.
pub const DEFAULT_MIN_LEN: usize = 3;

/// Default maximum term length in characters.
pub const DEFAULT_MAX_LEN: usize = 40;

/// Maps raw tokens and phrases to canonical terms.
///
/// Both operations are total: rejected input yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermNormalizer {
    min_len: usize,
    max_len: usize,
}

impl TermNormalizer {
    /// Create a normalizer accepting terms of `min_len..=max_len` characters.
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Minimum accepted length.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Maximum accepted length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Normalize a single word: lower-cased, trimmed, purely alphabetic.
    ///
    /// Stop words, punctuation and numbers are expected to be filtered by the
    /// caller from analyzer flags before this is called.
    pub fn normalize_token(&self, raw: &str) -> Option<String> {
        let term = raw.to_lowercase();
        let term = term.trim();

        if term.is_empty() || !term.chars().all(char::is_alphabetic) {
            return None;
        }

        self.within_bounds(term).then(|| term.to_string())
    }

    /// Normalize a phrase: lower-cased, whitespace runs collapsed, at least
    /// one alphabetic character.
    pub fn normalize_phrase(&self, raw: &str) -> Option<String> {
        let term = raw.to_lowercase();

        if !term.chars().any(char::is_alphabetic) {
            return None;
        }

        let term = term.split_whitespace().collect::<Vec<_>>().join(" ");
        self.within_bounds(&term).then_some(term)
    }

    fn within_bounds(&self, term: &str) -> bool {
        let len = term.chars().count();
        self.min_len <= len && len <= self.max_len
    }
}

impl Default for TermNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LEN, DEFAULT_MAX_LEN)
    }
}

/// Check whether a raw surface form reads as an acronym: longer than one
/// character, with at least one upper-case letter and no lower-case ones.
pub fn is_acronym_surface(raw: &str) -> bool {
    raw.chars().count() > 1
        && raw.chars().any(char::is_uppercase)
        && !raw.chars().any(char::is_lowercase)
}
