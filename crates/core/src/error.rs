/// Errors raised by a verse-source collaborator.
#[derive(Debug, thiserror::Error)]
pub enum VerseError {
    /// The verse number does not exist in the chapter. Range walking treats
    /// this as a signal to roll over to the next chapter.
    #[error("no such verse: {book} {chapter}:{verse}")]
    InvalidVerse {
        book: String,
        chapter: u32,
        verse: u32,
    },

    /// The source failed in some other way; range walking stops collecting.
    #[error("verse source error: {0}")]
    Source(String),
}

/// Internal annotation failures.
///
/// Never escapes the crate: the annotator catches these at its outer boundary
/// and degrades to rendering the whole canonical text as omitted.
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("token cursor out of range: {0}")]
    TokenCursor(String),

    #[error("word index out of range: {0}")]
    WordIndex(String),
}
