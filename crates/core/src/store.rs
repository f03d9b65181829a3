//! Passage store collaborator
//!
//! The quiz core treats its passage list as an opaque repository: it asks for
//! passages to quiz on and records progress, but never touches storage
//! itself. Persistence backends implement [`PassageStore`]; the in-memory
//! implementation here backs tests, examples, and ephemeral sessions.

use crate::verse::PassageRef;

/// Repository of passages selected for memorization practice
pub trait PassageStore {
    /// All stored passages, in insertion order
    fn list(&self) -> Vec<PassageRef>;

    /// Add a passage; already-stored passages are not duplicated
    fn add(&mut self, passage: PassageRef);

    /// Remove a passage if present
    fn remove(&mut self, passage: &PassageRef);

    /// Record memorization progress for a passage
    fn set_status(&mut self, passage: &PassageRef, status: u8);

    /// Mark or unmark a passage as a favorite
    fn set_favorite(&mut self, passage: &PassageRef, favorite: bool);
}

/// One stored passage with its bookkeeping
#[derive(Debug, Clone, Default)]
pub struct StoredPassage {
    pub passage: PassageRef,
    pub status: u8,
    pub favorite: bool,
}

/// In-memory passage store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<StoredPassage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StoredPassage] {
        &self.entries
    }

    pub fn is_favorite(&self, passage: &PassageRef) -> bool {
        self.find(passage).map(|e| e.favorite).unwrap_or(false)
    }

    pub fn status(&self, passage: &PassageRef) -> Option<u8> {
        self.find(passage).map(|e| e.status)
    }

    fn find(&self, passage: &PassageRef) -> Option<&StoredPassage> {
        self.entries.iter().find(|e| &e.passage == passage)
    }

    fn find_mut(&mut self, passage: &PassageRef) -> Option<&mut StoredPassage> {
        self.entries.iter_mut().find(|e| &e.passage == passage)
    }
}

impl PassageStore for MemoryStore {
    fn list(&self) -> Vec<PassageRef> {
        self.entries.iter().map(|e| e.passage.clone()).collect()
    }

    fn add(&mut self, passage: PassageRef) {
        if self.find(&passage).is_none() {
            self.entries.push(StoredPassage {
                passage,
                status: 0,
                favorite: false,
            });
        }
    }

    fn remove(&mut self, passage: &PassageRef) {
        self.entries.retain(|e| &e.passage != passage);
    }

    fn set_status(&mut self, passage: &PassageRef, status: u8) {
        if let Some(entry) = self.find_mut(passage) {
            entry.status = status;
        }
    }

    fn set_favorite(&mut self, passage: &PassageRef, favorite: bool) {
        if let Some(entry) = self.find_mut(passage) {
            entry.favorite = favorite;
        }
    }
}
