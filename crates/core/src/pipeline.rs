//! Text normalization pipeline
//!
//! Chains normalizers into a single transformation. The canonical comparison
//! pipeline (strip non-word characters, collapse whitespace, lowercase)
//! produces the form used for similarity scoring and for detecting
//! case/punctuation-only word differences.

use crate::normalize::{CollapseWhitespace, Lowercase, Normalizer, StripNonWord};

/// An ordered chain of text normalizers
#[derive(Default, Clone)]
pub struct TextPipeline {
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Run the input through every normalizer in order
    pub fn process(&self, input: &str) -> String {
        let mut current = input.to_string();

        for normalizer in &self.normalizers {
            current = normalizer.normalize(&current);
        }

        current
    }

    /// Get the number of normalizers in the pipeline
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Get the names of all normalizers in the pipeline
    pub fn normalizer_names(&self) -> Vec<String> {
        self.normalizers
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

/// The canonical comparison pipeline: lowercase, strip punctuation, collapse
/// whitespace.
///
/// Lowercasing runs first because it can expand characters into base letters
/// plus combining marks; stripping afterwards keeps the result stable under
/// re-normalization.
pub fn comparison_pipeline() -> TextPipeline {
    TextPipeline::new()
        .add_normalizer(Box::new(Lowercase))
        .add_normalizer(Box::new(StripNonWord))
        .add_normalizer(Box::new(CollapseWhitespace))
}

/// Apply the canonical comparison pipeline to a string.
///
/// Idempotent: applying it to its own output is a no-op.
pub fn comparison_form(input: &str) -> String {
    comparison_pipeline().process(input)
}
