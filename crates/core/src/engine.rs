//! Comparison engine
//!
//! Orchestrates one comparison request: truncate the canonical text, produce
//! the normalized forms for scoring, and run the annotator for rendering.
//! The engine is synchronous, pure, and stateless between calls; canonical
//! text fetching happens elsewhere (see [`crate::fetch`]).

use std::borrow::Cow;

use crate::annotate::{annotate, omitted_spans, Span};
use crate::config::CompareConfig;
use crate::pipeline::{comparison_pipeline, TextPipeline};
use crate::score::{similarity, Score};

/// The result of comparing one attempt against a canonical text
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Styled fragments for rendering, in order
    pub spans: Vec<Span>,

    /// Whole-passage similarity
    pub score: Score,
}

/// The comparison engine
pub struct CompareEngine {
    config: CompareConfig,
    pipeline: TextPipeline,
}

impl CompareEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: CompareConfig) -> Self {
        let pipeline = config
            .pipeline
            .clone()
            .unwrap_or_else(comparison_pipeline);

        Self { config, pipeline }
    }

    /// Compare a user attempt against the canonical text.
    ///
    /// An attempt that normalizes to nothing scores `0.0` and renders the
    /// canonical text wholly omitted; there is nothing to compare against.
    pub fn compare(&self, canonical: &str, attempt: &str) -> Comparison {
        let canonical = self.truncate(canonical);

        let canonical_form = self.pipeline.process(&canonical);
        let attempt_form = self.pipeline.process(attempt);

        if attempt_form.is_empty() {
            return Comparison {
                spans: omitted_spans(&canonical),
                score: Score::from_ratio(0.0, self.config.thresholds),
            };
        }

        let ratio = similarity(&canonical_form, &attempt_form);

        Comparison {
            spans: annotate(&canonical, attempt),
            score: Score::from_ratio(ratio, self.config.thresholds),
        }
    }

    fn truncate<'a>(&self, canonical: &'a str) -> Cow<'a, str> {
        match canonical.char_indices().nth(self.config.max_canonical_chars) {
            Some((byte_index, _)) => {
                log::debug!(
                    "truncating canonical text to {} chars",
                    self.config.max_canonical_chars
                );
                Cow::Owned(format!("{} ...", &canonical[..byte_index]))
            }
            None => Cow::Borrowed(canonical),
        }
    }
}

impl Default for CompareEngine {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::SpanStyle;
    use crate::score::Verdict;

    #[test]
    fn test_perfect_attempt() {
        let engine = CompareEngine::default();
        let result = engine.compare("For God so loved the world", "For God so loved the world");

        assert_eq!(result.score.percent, 100);
        assert_eq!(result.score.verdict, Verdict::Excellent);
        assert!(result.spans.iter().all(|s| s.style == SpanStyle::Normal));
    }

    #[test]
    fn test_case_and_punctuation_do_not_cost_points() {
        let engine = CompareEngine::default();
        let result = engine.compare("Jesus wept.", "jesus WEPT");

        assert_eq!(result.score.percent, 100);
    }

    #[test]
    fn test_empty_attempt() {
        let engine = CompareEngine::default();
        let result = engine.compare("Jesus wept.", "   ");

        assert_eq!(result.score.ratio, 0.0);
        assert_eq!(result.score.verdict, Verdict::NeedsWork);
        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.spans[0].style, SpanStyle::Added);
        assert_eq!(result.spans[0].text, "Jesus wept.");
    }

    #[test]
    fn test_partial_attempt_scores_between() {
        let engine = CompareEngine::default();
        let result = engine.compare("In the beginning", "In the end");

        assert!(result.score.ratio > 0.0 && result.score.ratio < 1.0);
    }

    fn canonical_side(result: &Comparison) -> String {
        result
            .spans
            .iter()
            .filter(|s| s.style != SpanStyle::Wrong)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_canonical_truncation() {
        let engine = CompareEngine::new(CompareConfig::new().with_max_canonical_chars(7));
        let result = engine.compare("one two three four", "one two three four");

        assert_eq!(canonical_side(&result), "one two ...");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let engine = CompareEngine::new(CompareConfig::new().with_max_canonical_chars(2));
        // Multi-byte characters must not be split mid-codepoint
        let result = engine.compare("héllo", "héllo");

        assert_eq!(canonical_side(&result), "hé ...");
    }
}
