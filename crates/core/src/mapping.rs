//! Word-index mapping
//!
//! Maintains the bidirectional mapping between the word-only subsequence of a
//! token stream and absolute token positions. Alignment runs over words alone;
//! the annotator then uses this map to walk back to the full token sequence so
//! punctuation and whitespace can be copied through in place.

use crate::tokenize::Token;

/// Maps filtered word positions to absolute token positions and back
#[derive(Debug, Clone, Default)]
pub struct WordIndexMap {
    words: Vec<String>,
    positions: Vec<usize>,
}

impl WordIndexMap {
    /// Build the map for a token sequence.
    ///
    /// `positions` is strictly increasing with one entry per word token, in
    /// original order.
    pub fn build(tokens: &[Token]) -> Self {
        let mut words = Vec::new();
        let mut positions = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            if token.is_word() {
                words.push(token.text.clone());
                positions.push(index);
            }
        }

        Self { words, positions }
    }

    /// Number of word tokens
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All word texts in order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Text of the i-th word token
    pub fn word(&self, word_index: usize) -> Option<&str> {
        self.words.get(word_index).map(|w| w.as_str())
    }

    /// Absolute token position of the i-th word token
    pub fn token_index(&self, word_index: usize) -> Option<usize> {
        self.positions.get(word_index).copied()
    }

    /// Word position of an absolute token index, if that token is a word
    pub fn word_index_for_token(&self, token_index: usize) -> Option<usize> {
        self.positions.binary_search(&token_index).ok()
    }
}
