//! Text normalizers
//!
//! Provides the `Normalizer` trait and the implementations used to produce
//! the canonical comparison form of a string. Each normalizer is a total
//! transformation; chaining happens in [`crate::pipeline`].

use crate::tokenize::is_word_char;

/// Trait for text normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize the input text
    fn normalize(&self, input: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Built-in Normalizers
// ============================================================================

/// Removes every character that is neither a word character nor whitespace
#[derive(Clone)]
pub struct StripNonWord;

impl Normalizer for StripNonWord {
    fn normalize(&self, input: &str) -> String {
        input
            .chars()
            .filter(|ch| is_word_char(*ch) || ch.is_whitespace())
            .collect()
    }

    fn name(&self) -> &str {
        "strip_non_word"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Collapses whitespace runs to single spaces and trims the ends
#[derive(Clone)]
pub struct CollapseWhitespace;

impl Normalizer for CollapseWhitespace {
    fn normalize(&self, input: &str) -> String {
        let mut normalized = String::with_capacity(input.len());

        for word in input.split_whitespace() {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(word);
        }

        normalized
    }

    fn name(&self) -> &str {
        "collapse_whitespace"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Converts all text to lowercase
#[derive(Clone)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Removes accents/diacritics (e.g., é -> e)
///
/// Useful for canonical texts that carry accented proper nouns; not part of
/// the default comparison pipeline.
#[derive(Clone)]
pub struct FoldAccents;

impl Normalizer for FoldAccents {
    fn normalize(&self, input: &str) -> String {
        use unicode_normalization::UnicodeNormalization;

        input.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
    }

    fn name(&self) -> &str {
        "fold_accents"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

fn is_combining_mark(ch: char) -> bool {
    matches!(ch, '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{1DC0}'..='\u{1DFF}' | '\u{20D0}'..='\u{20FF}' | '\u{FE20}'..='\u{FE2F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_word() {
        let normalizer = StripNonWord;
        assert_eq!(normalizer.normalize("Jesus wept."), "Jesus wept");
        assert_eq!(normalizer.normalize("don't"), "dont");
        assert_eq!(normalizer.normalize("verse_1!"), "verse_1");
    }

    #[test]
    fn test_collapse_whitespace() {
        let normalizer = CollapseWhitespace;
        assert_eq!(normalizer.normalize("  a \t b\n c  "), "a b c");
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   "), "");
    }

    #[test]
    fn test_lowercase() {
        let normalizer = Lowercase;
        assert_eq!(normalizer.normalize("LORD"), "lord");
    }

    #[test]
    fn test_fold_accents() {
        let normalizer = FoldAccents;
        assert_eq!(normalizer.normalize("résumé"), "resume");
    }
}
