//! Configuration for the comparison engine

use crate::pipeline::TextPipeline;
use crate::score::Thresholds;

/// Longest canonical text the annotator will process, in characters.
///
/// Longer passages are truncated with an ellipsis so a runaway range request
/// cannot freeze rendering.
pub const DEFAULT_MAX_CANONICAL_CHARS: usize = 8000;

/// Configuration for comparison requests
#[derive(Clone)]
pub struct CompareConfig {
    /// Truncation limit for canonical text, in characters
    pub max_canonical_chars: usize,

    /// Normalization pipeline used for scoring; `None` selects the canonical
    /// comparison pipeline
    pub pipeline: Option<TextPipeline>,

    /// Verdict thresholds applied to the similarity percentage
    pub thresholds: Thresholds,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            max_canonical_chars: DEFAULT_MAX_CANONICAL_CHARS,
            pipeline: None,
            thresholds: Thresholds::default(),
        }
    }

    /// Set the canonical-text truncation limit
    pub fn with_max_canonical_chars(mut self, chars: usize) -> Self {
        self.max_canonical_chars = chars;
        self
    }

    /// Set the scoring normalization pipeline
    pub fn with_pipeline(mut self, pipeline: TextPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Set the verdict thresholds
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
