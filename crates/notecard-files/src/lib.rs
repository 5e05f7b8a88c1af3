//! File-based storage implementation for notecard.
//!
//! Each key is kept in its own file under the data directory:
//!
//! ```text
//! .notecard/
//!   .lock      # Lock file for atomic writes
//!   notes      # JSON note array
//!   theme      # "dark" or "light"
//! ```

use fs2::FileExt;
use log::debug;
use notecard_core::{Error, KeyValueStore};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File-based key-value store.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root)
            .map_err(|e| Error::Storage(format!("Failed to create data dir: {}", e)))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Acquire an exclusive lock on the store.
    fn lock(&self) -> Result<FileLock, Error> {
        let lock_path = self.root.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| Error::Storage(format!("Failed to open lock file: {}", e)))?;

        file.lock_exclusive()
            .map_err(|e| Error::Storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }

    /// Get the path for a key, rejecting anything that is not a plain name.
    fn key_path(&self, key: &str) -> Result<PathBuf, Error> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

/// RAII guard for file locking.
struct FileLock {
    file: File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.key_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    /// Write the value to a temp file, then rename it into place.
    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.key_path(key)?;
        let temp_path = self.root.join(format!("{}.tmp", key));
        let _lock = self.lock()?;

        let mut file = File::create(&temp_path)
            .map_err(|e| Error::Storage(format!("Failed to create temp file: {}", e)))?;

        file.write_all(value.as_bytes())
            .map_err(|e| Error::Storage(format!("Failed to write temp file: {}", e)))?;

        file.sync_all()
            .map_err(|e| Error::Storage(format!("Failed to sync temp file: {}", e)))?;

        fs::rename(&temp_path, &path)
            .map_err(|e| Error::Storage(format!("Failed to rename temp file: {}", e)))?;

        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notecard_core::{Note, NoteStore, Theme, ThemePreference, Headless, NOTES_KEY};
    use std::thread;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join(".notecard")).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_get_missing_key() {
        let (_temp, store) = setup();
        assert_eq!(store.get("notes").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let (_temp, store) = setup();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert!(!store.root().join("theme.tmp").exists());
    }

    #[test]
    fn test_rejects_path_keys() {
        let (_temp, store) = setup();
        for key in ["", "../escape", "a/b", ".lock"] {
            assert!(matches!(store.get(key), Err(Error::InvalidKey(_))), "{}", key);
            assert!(matches!(store.set(key, "x"), Err(Error::InvalidKey(_))), "{}", key);
        }
    }

    #[test]
    fn test_note_store_persists_across_opens() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".notecard");

        let notes = NoteStore::new(FileStore::open(&root).unwrap());
        notes
            .append(Note::from_form("Kept", "across runs", "").unwrap())
            .unwrap();
        notes
            .append(Note::from_form("Pic", "", "https://e.com/a.gif").unwrap())
            .unwrap();

        let reopened = NoteStore::new(FileStore::open(&root).unwrap());
        let listed = reopened.list_all().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Kept");
        assert_eq!(listed[1].media.as_deref(), Some("https://e.com/a.gif"));

        let raw = fs::read_to_string(root.join(NOTES_KEY)).unwrap();
        assert!(raw.contains(r#""media":"""#));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let (_temp, store) = setup();
        fs::write(store.root().join(NOTES_KEY), "[{").unwrap();
        let notes = NoteStore::new(store);
        assert!(notes.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_theme_persists() {
        let (_temp, store) = setup();
        let mut pref = ThemePreference::new(&store, Headless);
        pref.load().unwrap();
        pref.toggle().unwrap();

        let mut reloaded = ThemePreference::new(&store, Headless);
        assert_eq!(reloaded.load().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_concurrent_writes_never_tear() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".notecard");
        FileStore::open(&root).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let root = root.clone();
                thread::spawn(move || {
                    let store = FileStore::open(&root).unwrap();
                    let value = format!("value-{}", i).repeat(1000);
                    store.set("blob", &value).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let store = FileStore::open(&root).unwrap();
        let value = store.get("blob").unwrap().unwrap();
        let first = &value[..7];
        assert_eq!(value, first.repeat(1000));
    }
}
