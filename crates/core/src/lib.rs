//! # Recite Core
//!
//! The comparison engine behind a memorization-practice tool: a user types a
//! passage from memory and gets back a similarity score plus an inline,
//! token-by-token annotation of their mistakes.
//!
//! ## Core Concepts
//!
//! - **Normalizers / Pipeline**: produce the canonical comparison form used
//!   for scoring (lowercased, punctuation stripped, whitespace collapsed)
//! - **Tokenizer**: lossless word/punctuation/whitespace tokens
//! - **Aligner**: longest-match-first edit script over word sequences
//! - **Annotator**: styled spans — correct, wrong, omitted, or
//!   case/punctuation-only differences
//! - **Scorer**: whole-passage similarity ratio with a pass/fail verdict
//!
//! Canonical text comes from a [`VerseSource`] collaborator and may be
//! fetched in the background with latest-wins semantics
//! ([`fetch::CanonicalFetcher`]); the engine itself is synchronous and pure.
//!
//! ## Example
//!
//! ```rust
//! use recite_core::{compare_attempt, SpanStyle, Verdict};
//!
//! let result = compare_attempt(
//!     "For God so loved the world",
//!     "for god so loves the world",
//!     None,
//! );
//!
//! assert_eq!(result.score.verdict, Verdict::Excellent);
//! assert!(result.spans.iter().any(|span| span.style == SpanStyle::Added));
//! ```

pub mod algorithm;
pub mod annotate;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod mapping;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod store;
pub mod tokenize;
pub mod verse;

// Re-export main types
pub use annotate::{annotate, Span, SpanStyle};
pub use config::CompareConfig;
pub use engine::{CompareEngine, Comparison};
pub use error::VerseError;
pub use pipeline::{comparison_form, TextPipeline};
pub use score::{similarity, Score, Thresholds, Verdict};
pub use tokenize::{tokenize, Token, TokenKind};
pub use verse::{passage_text, PassageRef, VerseSource};

/// Main entry point for comparing a user attempt against canonical text
///
/// # Arguments
///
/// * `canonical` - The authoritative passage text
/// * `attempt` - What the user typed from memory
/// * `config` - Optional configuration (uses default if None)
///
/// # Returns
///
/// A [`Comparison`] holding the styled span sequence and the score object
pub fn compare_attempt(
    canonical: &str,
    attempt: &str,
    config: Option<CompareConfig>,
) -> Comparison {
    let config = config.unwrap_or_default();
    let engine = CompareEngine::new(config);
    engine.compare(canonical, attempt)
}
