use crate::{Error, KeyValueStore, Note};
use log::{info, warn};

/// Storage key holding the JSON-encoded note array.
pub const NOTES_KEY: &str = "notes";

/// The ordered note collection, backed by a [`KeyValueStore`].
///
/// Nothing is cached: every operation reads the full collection, changes it
/// and writes it back, so the persisted value is the only authority.
pub struct NoteStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// All notes in insertion order.
    ///
    /// A missing or undecodable stored value reads as an empty collection.
    pub fn list_all(&self) -> Result<Vec<Note>, Error> {
        let raw = match self.kv.get(NOTES_KEY)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(notes) => Ok(notes),
            Err(e) => {
                warn!("stored notes could not be decoded, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Append a note at the end. The note is not re-validated.
    pub fn append(&self, note: Note) -> Result<(), Error> {
        let mut notes = self.list_all()?;
        notes.push(note);
        self.save(&notes)?;
        info!("appended note at index {}", notes.len() - 1);
        Ok(())
    }

    /// Remove the note at `index`. Returns false, writing nothing, when out of range.
    ///
    /// Later notes shift down by one.
    pub fn delete_at(&self, index: usize) -> Result<bool, Error> {
        let mut notes = self.list_all()?;
        if index >= notes.len() {
            return Ok(false);
        }
        notes.remove(index);
        self.save(&notes)?;
        info!("deleted note at index {}", index);
        Ok(true)
    }

    fn save(&self, notes: &[Note]) -> Result<(), Error> {
        let contents = serde_json::to_string(notes)
            .map_err(|e| Error::Storage(format!("Failed to serialize notes: {}", e)))?;
        self.kv.set(NOTES_KEY, &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn note(title: &str) -> Note {
        Note {
            title: title.to_string(),
            content: format!("{} body", title),
            media: None,
        }
    }

    fn setup(titles: &[&str]) -> NoteStore<MemoryStore> {
        let store = NoteStore::new(MemoryStore::new());
        for title in titles {
            store.append(note(title)).unwrap();
        }
        store
    }

    fn titles(store: &NoteStore<MemoryStore>) -> Vec<String> {
        store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let store = setup(&[]);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let store = setup(&["one", "two"]);
        let added = Note {
            title: "three".to_string(),
            content: String::new(),
            media: Some("https://youtu.be/abc".to_string()),
        };
        store.append(added.clone()).unwrap();

        let notes = store.list_all().unwrap();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0], note("one"));
        assert_eq!(notes[1], note("two"));
        assert_eq!(notes[2], added);
    }

    #[test]
    fn test_duplicates_allowed() {
        let store = setup(&["same", "same"]);
        assert_eq!(titles(&store), vec!["same", "same"]);
    }

    #[test]
    fn test_delete_at() {
        let store = setup(&["a", "b", "c", "d"]);
        assert!(store.delete_at(1).unwrap());
        assert_eq!(titles(&store), vec!["a", "c", "d"]);

        assert!(store.delete_at(2).unwrap());
        assert_eq!(titles(&store), vec!["a", "c"]);

        assert!(store.delete_at(0).unwrap());
        assert_eq!(titles(&store), vec!["c"]);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let store = setup(&["a", "b"]);
        let before = store.kv.get(NOTES_KEY).unwrap();

        assert!(!store.delete_at(2).unwrap());
        assert!(!store.delete_at(usize::MAX).unwrap());

        assert_eq!(store.kv.get(NOTES_KEY).unwrap(), before);
        assert_eq!(titles(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_corrupt_data_reads_as_empty() {
        let kv = MemoryStore::new();
        kv.set(NOTES_KEY, "{not json").unwrap();
        let store = NoteStore::new(&kv);
        assert!(store.list_all().unwrap().is_empty());

        kv.set(NOTES_KEY, r#"{"title":"object, not array"}"#).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_after_corrupt_data_starts_fresh() {
        let kv = MemoryStore::new();
        kv.set(NOTES_KEY, "garbage").unwrap();
        let store = NoteStore::new(&kv);
        store.append(note("fresh")).unwrap();
        assert_eq!(store.list_all().unwrap(), vec![note("fresh")]);
    }

    #[test]
    fn test_reads_empty_media_strings() {
        let kv = MemoryStore::new();
        kv.set(
            NOTES_KEY,
            r#"[{"title":"x","content":"y","media":""},{"title":"p","content":"","media":"https://e.com/a.png"}]"#,
        )
        .unwrap();
        let notes = NoteStore::new(&kv).list_all().unwrap();
        assert_eq!(notes[0].media, None);
        assert_eq!(notes[1].media.as_deref(), Some("https://e.com/a.png"));
    }
}
