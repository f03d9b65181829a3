//! Lossless tokenization
//!
//! Splits comparison text into word, punctuation, and whitespace tokens.
//! Tokenization never drops or reorders characters: concatenating the token
//! texts in order reconstructs the input exactly, which is what lets the
//! annotator re-emit canonical text verbatim around styled fragments.

use serde::{Deserialize, Serialize};

/// Character class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Run of word characters (alphanumeric or underscore)
    Word,
    /// A single non-word, non-whitespace character
    Punctuation,
    /// Run of whitespace characters
    Whitespace,
}

/// A single token with its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, exactly as it appears in the input
    pub text: String,

    /// Character class of this token
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Whether `ch` belongs to the word-character class.
///
/// Underscore counts as a word character, matching the class used by the
/// normalizers so that tokenization and normalization agree on what a word is.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn classify_char(ch: char) -> TokenKind {
    if ch.is_whitespace() {
        TokenKind::Whitespace
    } else if is_word_char(ch) {
        TokenKind::Word
    } else {
        TokenKind::Punctuation
    }
}

/// Tokenize `input` into an ordered sequence covering it exactly.
///
/// Word and whitespace tokens are maximal runs of their class; punctuation
/// marks are always single-character tokens, never merged.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<TokenKind> = None;

    for (pos, ch) in input.char_indices() {
        let kind = classify_char(ch);

        match run_kind {
            None => {
                run_start = pos;
                run_kind = Some(kind);
            }
            // Punctuation never continues a run
            Some(prev) if prev == kind && prev != TokenKind::Punctuation => {}
            Some(prev) => {
                tokens.push(Token::new(&input[run_start..pos], prev));
                run_start = pos;
                run_kind = Some(kind);
            }
        }
    }

    if let Some(kind) = run_kind {
        tokens.push(Token::new(&input[run_start..], kind));
    }

    tokens
}
