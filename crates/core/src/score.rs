//! Similarity scoring
//!
//! Computes the whole-passage similarity ratio between two normalized strings
//! and derives the percentage + verdict object handed to the presentation
//! layer. Threshold policy lives with the caller; the raw ratio is always
//! exposed.

use serde::{Deserialize, Serialize};

use crate::algorithm::SequenceAligner;

/// Normalized similarity ratio between two strings, in `[0, 1]`.
///
/// `2·M / T` over the characters of the two strings, where `M` is the
/// longest-common-subsequence length and `T` the sum of both lengths.
/// Symmetric; `similarity(a, a) == 1.0`, and two empty strings count as a
/// perfect match.
pub fn similarity(canonical: &str, attempt: &str) -> f64 {
    let canonical_chars: Vec<char> = canonical.chars().collect();
    let attempt_chars: Vec<char> = attempt.chars().collect();

    SequenceAligner::new(&canonical_chars, &attempt_chars).ratio()
}

/// Pass/fail classification of a similarity percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// At or above the excellent threshold
    Excellent,
    /// At or above the pass threshold
    Good,
    /// Below the pass threshold
    NeedsWork,
}

/// Percentage bands for classifying a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum percent for [`Verdict::Excellent`]
    pub excellent: u8,
    /// Minimum percent for [`Verdict::Good`]
    pub pass: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            excellent: 95,
            pass: 75,
        }
    }
}

impl Verdict {
    pub fn classify(percent: u8, thresholds: Thresholds) -> Self {
        if percent >= thresholds.excellent {
            Verdict::Excellent
        } else if percent >= thresholds.pass {
            Verdict::Good
        } else {
            Verdict::NeedsWork
        }
    }
}

/// A scored comparison result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Raw similarity ratio in `[0, 1]`
    pub ratio: f64,
    /// Truncated integer percentage in `[0, 100]`
    pub percent: u8,
    /// Classification of `percent` against the thresholds in force
    pub verdict: Verdict,
}

impl Score {
    pub fn from_ratio(ratio: f64, thresholds: Thresholds) -> Self {
        let percent = (ratio.clamp(0.0, 1.0) * 100.0) as u8;

        Self {
            ratio,
            percent,
            verdict: Verdict::classify(percent, thresholds),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.verdict != Verdict::NeedsWork
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_perfect() {
        assert!((similarity("in the beginning", "in the beginning") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_conventions() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("in the beginning", ""), 0.0);
        assert_eq!(similarity("", "in the beginning"), 0.0);
    }

    #[test]
    fn test_partial_overlap_strictly_between() {
        let ratio = similarity("in the beginning", "in the end");
        assert!(ratio > 0.0 && ratio < 1.0);
    }

    #[test]
    fn test_symmetry() {
        let forward = similarity("for god so loved the world", "for god so loves the world");
        let backward = similarity("for god so loves the world", "for god so loved the world");
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_verdict_bands() {
        let thresholds = Thresholds::default();
        assert_eq!(Verdict::classify(100, thresholds), Verdict::Excellent);
        assert_eq!(Verdict::classify(95, thresholds), Verdict::Excellent);
        assert_eq!(Verdict::classify(94, thresholds), Verdict::Good);
        assert_eq!(Verdict::classify(75, thresholds), Verdict::Good);
        assert_eq!(Verdict::classify(74, thresholds), Verdict::NeedsWork);
        assert_eq!(Verdict::classify(0, thresholds), Verdict::NeedsWork);
    }

    #[test]
    fn test_percent_truncates() {
        let score = Score::from_ratio(0.999, Thresholds::default());
        assert_eq!(score.percent, 99);
        assert_eq!(score.verdict, Verdict::Excellent);

        let low = Score::from_ratio(0.749, Thresholds::default());
        assert_eq!(low.percent, 74);
        assert!(!low.is_pass());
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = Thresholds {
            excellent: 100,
            pass: 90,
        };
        let score = Score::from_ratio(0.95, strict);
        assert_eq!(score.verdict, Verdict::Good);
    }
}
