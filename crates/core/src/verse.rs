//! Verse source collaborator
//!
//! The engine never performs lookups itself; canonical text comes from a
//! [`VerseSource`] keyed by book/chapter/verse. [`passage_text`] walks a
//! multi-verse range, rolling over chapter boundaries when a verse number
//! runs past the end of its chapter.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VerseError;

/// A passage range within one book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PassageRef {
    pub book: String,
    pub start_chapter: u32,
    pub start_verse: u32,
    pub end_chapter: u32,
    pub end_verse: u32,
}

impl PassageRef {
    /// A single-verse reference
    pub fn verse(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self::range(book, chapter, verse, chapter, verse)
    }

    pub fn range(
        book: impl Into<String>,
        start_chapter: u32,
        start_verse: u32,
        end_chapter: u32,
        end_verse: u32,
    ) -> Self {
        Self {
            book: book.into(),
            start_chapter,
            start_verse,
            end_chapter,
            end_verse,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start_chapter == self.end_chapter && self.start_verse == self.end_verse
    }
}

impl fmt::Display for PassageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}",
            self.book, self.start_chapter, self.start_verse
        )?;
        if !self.is_single() {
            write!(f, " - {}:{}", self.end_chapter, self.end_verse)?;
        }
        Ok(())
    }
}

/// Provider of canonical verse text
pub trait VerseSource: Send + Sync {
    /// Text of one verse.
    ///
    /// Returns [`VerseError::InvalidVerse`] when the verse number does not
    /// exist in the chapter, [`VerseError::Source`] for any other failure.
    fn verse_text(&self, book: &str, chapter: u32, verse: u32) -> Result<String, VerseError>;
}

/// Concatenated text for the full range described by `passage`.
///
/// Walks from the start verse to the end verse inclusive, advancing to the
/// next chapter (from verse 1) when a verse number runs past the end of its
/// chapter, and stopping when the source fails or no further chapter exists.
/// A range whose end precedes its start is treated as the single start verse.
/// Collected verses are joined with single spaces so alignment works across
/// verse boundaries.
pub fn passage_text(source: &dyn VerseSource, passage: &PassageRef) -> String {
    let mut texts: Vec<String> = Vec::new();

    let mut chapter = passage.start_chapter;
    let mut verse = passage.start_verse;
    let (mut end_chapter, mut end_verse) = (passage.end_chapter, passage.end_verse);

    if end_chapter < chapter || (end_chapter == chapter && end_verse < verse) {
        end_chapter = chapter;
        end_verse = verse;
    }

    loop {
        match source.verse_text(&passage.book, chapter, verse) {
            Ok(text) => {
                if !text.is_empty() {
                    texts.push(text);
                }
                if chapter == end_chapter && verse == end_verse {
                    break;
                }
                verse += 1;
            }
            Err(VerseError::InvalidVerse { .. }) => {
                // Ran past the chapter: continue from verse 1 of the next
                // chapter, if that chapter exists
                chapter += 1;
                verse = 1;
                if source.verse_text(&passage.book, chapter, 1).is_err() {
                    break;
                }
            }
            Err(VerseError::Source(reason)) => {
                log::warn!("stopping passage collection for {passage}: {reason}");
                break;
            }
        }
    }

    texts.join(" ")
}

/// An in-memory verse source backed by a lookup table.
///
/// Missing entries report [`VerseError::InvalidVerse`], which makes this
/// suitable for exercising chapter rollover in tests and examples as well as
/// for small embedded passage sets.
#[derive(Debug, Clone, Default)]
pub struct TableVerseSource {
    verses: HashMap<(String, u32, u32), String>,
}

impl TableVerseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the text of one verse
    pub fn insert(
        &mut self,
        book: impl Into<String>,
        chapter: u32,
        verse: u32,
        text: impl Into<String>,
    ) {
        self.verses
            .insert((book.into(), chapter, verse), text.into());
    }
}

impl VerseSource for TableVerseSource {
    fn verse_text(&self, book: &str, chapter: u32, verse: u32) -> Result<String, VerseError> {
        self.verses
            .get(&(book.to_string(), chapter, verse))
            .cloned()
            .ok_or_else(|| VerseError::InvalidVerse {
                book: book.to_string(),
                chapter,
                verse,
            })
    }
}
