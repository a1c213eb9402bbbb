//! The session's note collection.
//!
//! `NoteStore` holds notes in display order and is mutated only with
//! server-confirmed values. It never holds two notes with the same id.

use std::collections::HashSet;

use notes_core::{Note, NoteId};

/// Ordered, duplicate-free collection of the current user's notes.
///
/// Created empty at session start, filled by [`NoteStore::replace_all`] on
/// load, and reset with [`NoteStore::clear`] on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection, preserving the given order.
    ///
    /// If `notes` repeats an id, only the first occurrence is kept.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        let mut seen = HashSet::with_capacity(notes.len());
        let before = notes.len();

        self.notes = notes
            .into_iter()
            .filter(|note| seen.insert(note.id.clone()))
            .collect();

        if self.notes.len() != before {
            tracing::warn!(
                received = before,
                kept = self.notes.len(),
                "Dropped notes with duplicate ids"
            );
        }
    }

    /// Insert a note at the front of the collection.
    ///
    /// Any existing note with the same id is removed first.
    pub fn add(&mut self, note: Note) {
        self.notes.retain(|n| n.id != note.id);
        self.notes.insert(0, note);
    }

    /// Replace the note whose id matches `note.id`, keeping its position.
    ///
    /// Returns `false` and leaves the collection untouched if no note matches.
    pub fn update(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                *slot = note;
                true
            }
            None => false,
        }
    }

    /// Remove the note with the given id. Returns whether a note was removed.
    pub fn remove(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| &n.id != id);
        self.notes.len() != before
    }

    /// Drop every note.
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// All notes in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by id.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl<'a> IntoIterator for &'a NoteStore {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rand::Rng;

    fn note(id: &str, title: &str) -> Note {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Note {
            id: NoteId::new(id),
            title: title.to_string(),
            content: format!("content of {}", title),
            created_at: created,
            updated_at: created,
        }
    }

    fn ids(store: &NoteStore) -> Vec<&str> {
        store.iter().map(|n| n.id.as_str()).collect()
    }

    fn assert_unique_ids(store: &NoteStore) {
        let unique: HashSet<_> = store.iter().map(|n| &n.id).collect();
        assert_eq!(unique.len(), store.len(), "duplicate ids in {:?}", ids(store));
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = NoteStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_replace_all_preserves_order() {
        let mut store = NoteStore::new();
        store.add(note("old", "Old"));

        let fresh = vec![note("3", "C"), note("1", "A"), note("2", "B")];
        store.replace_all(fresh.clone());

        assert_eq!(store.notes(), fresh.as_slice());
    }

    #[test]
    fn test_replace_all_keeps_first_duplicate() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "first"), note("2", "B"), note("1", "second")]);

        assert_eq!(ids(&store), vec!["1", "2"]);
        assert_eq!(store.get(&NoteId::new("1")).unwrap().title, "first");
    }

    #[test]
    fn test_add_prepends() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A"), note("2", "B")]);

        let created = note("3", "C");
        store.add(created.clone());

        assert_eq!(store.notes()[0], created);
        assert_eq!(ids(&store), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_add_existing_id_moves_to_front() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A"), note("2", "B")]);

        store.add(note("2", "B2"));

        assert_eq!(ids(&store), vec!["2", "1"]);
        assert_eq!(store.notes()[0].title, "B2");
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A"), note("2", "B"), note("3", "C")]);

        let mut edited = note("2", "B edited");
        edited.updated_at = edited.created_at + Duration::minutes(5);

        assert!(store.update(edited.clone()));
        assert_eq!(ids(&store), vec!["1", "2", "3"]);
        assert_eq!(store.notes()[1], edited);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A"), note("2", "B")]);
        let before = store.clone();

        assert!(!store.update(note("99", "ghost")));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A"), note("2", "B")]);

        assert!(store.remove(&NoteId::new("1")));
        let once = store.clone();

        assert!(!store.remove(&NoteId::new("1")));
        assert_eq!(store, once);
        assert!(!store.contains(&NoteId::new("1")));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A")]);

        assert!(!store.remove(&NoteId::new("nope")));
        assert_eq!(ids(&store), vec!["1"]);
    }

    #[test]
    fn test_clear() {
        let mut store = NoteStore::new();
        store.replace_all(vec![note("1", "A"), note("2", "B")]);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_random_mutations_never_duplicate_ids() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let mut store = NoteStore::new();
            for step in 0..200 {
                let id = format!("{}", rng.gen_range(0..8));
                match rng.gen_range(0..3) {
                    0 => store.add(note(&id, &format!("add {}", step))),
                    1 => {
                        store.update(note(&id, &format!("update {}", step)));
                    }
                    _ => {
                        store.remove(&NoteId::new(id.clone()));
                        assert!(!store.contains(&NoteId::new(id)));
                    }
                }
                assert_unique_ids(&store);
            }
        }
    }
}
