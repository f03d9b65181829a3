//! Diff annotation
//!
//! Walks the word-level edit script in token order and emits styled spans for
//! rendering: `Normal` for correct text, `Wrong` for text the user should not
//! have written, `Added` for canonical text the user omitted, and `Cap` for
//! case/punctuation-only differences. Canonical punctuation and whitespace
//! are copied through in place so the output reads as the canonical passage
//! with mistakes marked inline.
//!
//! All index arithmetic is checked; any internal inconsistency is caught at
//! the single outer [`annotate`] boundary, which degrades to rendering the
//! whole canonical text as omitted rather than failing the caller.

use serde::{Deserialize, Serialize};

use crate::algorithm::{align_words, AlignOp, OpKind, SequenceAligner};
use crate::error::AnnotateError;
use crate::mapping::WordIndexMap;
use crate::tokenize::{is_word_char, tokenize, Token};

/// Rendering style of one output fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanStyle {
    /// Correct text, rendered plainly
    Normal,
    /// Text the user wrote that does not belong (rendered struck through)
    Wrong,
    /// Canonical text the user omitted
    Added,
    /// Case or punctuation-only difference
    Cap,
}

/// One styled, renderable fragment of output text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Annotate a user attempt against the canonical text.
///
/// Produces the span sequence described in the module docs. Never panics:
/// internal inconsistencies degrade to [`omitted_spans`].
pub fn annotate(canonical: &str, user: &str) -> Vec<Span> {
    let canon_tokens = tokenize(canonical);
    let canon_map = WordIndexMap::build(&canon_tokens);
    let user_map = WordIndexMap::build(&tokenize(user));
    let ops = align_words(canon_map.words(), user_map.words());

    let mut annotator = Annotator {
        canon_tokens: &canon_tokens,
        canon_map: &canon_map,
        user_map: &user_map,
        spans: Vec::new(),
        canon_pos: 0,
    };

    match annotator.run(&ops) {
        Ok(()) => annotator.spans,
        Err(err) => {
            log::warn!("annotation failed, rendering canonical as omitted: {err}");
            omitted_spans(canonical)
        }
    }
}

/// The fallback rendering: the whole canonical text as a single omitted span.
///
/// Used when there is nothing to compare against (empty attempt) and when
/// annotation degrades.
pub fn omitted_spans(canonical: &str) -> Vec<Span> {
    if canonical.is_empty() {
        Vec::new()
    } else {
        vec![Span::new(canonical, SpanStyle::Added)]
    }
}

/// Case/punctuation-stripped form of a single word token.
fn folded(word: &str) -> String {
    word.chars()
        .filter(|ch| is_word_char(*ch))
        .collect::<String>()
        .to_lowercase()
}

struct Annotator<'a> {
    canon_tokens: &'a [Token],
    canon_map: &'a WordIndexMap,
    user_map: &'a WordIndexMap,
    spans: Vec<Span>,
    /// Cursor into `canon_tokens`; everything before it has been emitted
    canon_pos: usize,
}

impl<'a> Annotator<'a> {
    fn run(&mut self, ops: &[AlignOp]) -> Result<(), AnnotateError> {
        for op in ops {
            match op.kind {
                OpKind::Equal => self.handle_equal(op)?,
                OpKind::Replace => self.handle_replace(op)?,
                OpKind::Delete => self.handle_delete(op)?,
                OpKind::Insert => self.handle_insert(op)?,
            }
        }

        // Trailing canonical punctuation/whitespace
        self.flush_canonical_until(self.canon_tokens.len())
    }

    fn emit(&mut self, text: &str, style: SpanStyle) {
        if !text.is_empty() {
            self.spans.push(Span::new(text, style));
        }
    }

    /// Emit canonical tokens `[canon_pos, until)` unstyled and advance the
    /// cursor. `until` must not move backwards or past the end.
    fn flush_canonical_until(&mut self, until: usize) -> Result<(), AnnotateError> {
        if until < self.canon_pos || until > self.canon_tokens.len() {
            return Err(AnnotateError::TokenCursor(format!(
                "flush to {until} with cursor {} of {}",
                self.canon_pos,
                self.canon_tokens.len()
            )));
        }

        let tokens = self.canon_tokens;
        for token in &tokens[self.canon_pos..until] {
            self.emit(&token.text, SpanStyle::Normal);
        }
        self.canon_pos = until;

        Ok(())
    }

    /// Position of a canonical word in the token stream.
    fn canonical_token_index(&self, word_index: usize) -> Result<usize, AnnotateError> {
        self.canon_map
            .token_index(word_index)
            .ok_or_else(|| AnnotateError::WordIndex(format!("canonical word {word_index}")))
    }

    fn canonical_word_text(&self, token_index: usize) -> Result<String, AnnotateError> {
        self.canon_tokens
            .get(token_index)
            .map(|token| token.text.clone())
            .ok_or_else(|| AnnotateError::TokenCursor(format!("canonical token {token_index}")))
    }

    fn user_word_text(&self, word_index: usize) -> Result<String, AnnotateError> {
        self.user_map
            .word(word_index)
            .map(str::to_string)
            .ok_or_else(|| AnnotateError::WordIndex(format!("user word {word_index}")))
    }

    /// Matched words: re-verify identity at the token level and copy the
    /// canonical token through.
    fn handle_equal(&mut self, op: &AlignOp) -> Result<(), AnnotateError> {
        for (offset, word_index) in op.canonical.clone().enumerate() {
            let token_index = self.canonical_token_index(word_index)?;
            self.flush_canonical_until(token_index)?;

            let canon_text = self.canonical_word_text(token_index)?;
            let user_text = self
                .user_map
                .word(op.user.start + offset)
                .unwrap_or_default();

            if user_text != canon_text && folded(user_text) == folded(&canon_text) {
                self.emit(&canon_text, SpanStyle::Cap);
            } else {
                self.emit(&canon_text, SpanStyle::Normal);
            }
            self.canon_pos = token_index + 1;
        }

        Ok(())
    }

    /// Replaced range: pair words positionally up to the shorter side, then
    /// emit leftover canonical words as omitted and leftover user words as
    /// extraneous.
    fn handle_replace(&mut self, op: &AlignOp) -> Result<(), AnnotateError> {
        let paired = op.canonical.len().min(op.user.len());

        for offset in 0..paired {
            let token_index = self.canonical_token_index(op.canonical.start + offset)?;
            self.flush_canonical_until(token_index)?;

            let canon_text = self.canonical_word_text(token_index)?;
            let user_text = self.user_word_text(op.user.start + offset)?;
            self.annotate_word_pair(&canon_text, &user_text);
            self.canon_pos = token_index + 1;
        }

        for word_index in (op.canonical.start + paired)..op.canonical.end {
            let token_index = self.canonical_token_index(word_index)?;
            self.flush_canonical_until(token_index)?;

            let canon_text = self.canonical_word_text(token_index)?;
            self.emit(&canon_text, SpanStyle::Added);
            self.canon_pos = token_index + 1;
        }

        for word_index in (op.user.start + paired)..op.user.end {
            let user_text = self.user_word_text(word_index)?;
            self.emit(&user_text, SpanStyle::Wrong);
        }

        Ok(())
    }

    /// Canonical words with no user counterpart: omitted.
    fn handle_delete(&mut self, op: &AlignOp) -> Result<(), AnnotateError> {
        for word_index in op.canonical.clone() {
            let token_index = self.canonical_token_index(word_index)?;
            self.flush_canonical_until(token_index)?;

            let canon_text = self.canonical_word_text(token_index)?;
            self.emit(&canon_text, SpanStyle::Added);
            self.canon_pos = token_index + 1;
        }

        Ok(())
    }

    /// User words with no canonical counterpart: extraneous.
    fn handle_insert(&mut self, op: &AlignOp) -> Result<(), AnnotateError> {
        for word_index in op.user.clone() {
            let user_text = self.user_word_text(word_index)?;
            self.emit(&user_text, SpanStyle::Wrong);
        }

        Ok(())
    }

    /// One canonical word paired with one user word.
    fn annotate_word_pair(&mut self, canon_word: &str, user_word: &str) {
        if folded(user_word) == folded(canon_word) {
            if user_word == canon_word {
                self.emit(canon_word, SpanStyle::Normal);
            } else {
                self.emit(canon_word, SpanStyle::Cap);
            }
            return;
        }

        let canon_chars: Vec<char> = canon_word.chars().collect();
        let user_chars: Vec<char> = user_word.chars().collect();

        for op in SequenceAligner::new(&canon_chars, &user_chars).opcodes() {
            match op.kind {
                OpKind::Equal => {
                    self.emit(&collect(&canon_chars[op.canonical.clone()]), SpanStyle::Normal);
                }
                OpKind::Replace => {
                    self.emit(&collect(&user_chars[op.user.clone()]), SpanStyle::Wrong);
                    self.emit(&collect(&canon_chars[op.canonical.clone()]), SpanStyle::Added);
                }
                OpKind::Delete => {
                    self.emit(&collect(&canon_chars[op.canonical.clone()]), SpanStyle::Added);
                }
                OpKind::Insert => {
                    self.emit(&collect(&user_chars[op.user.clone()]), SpanStyle::Wrong);
                }
            }
        }
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
