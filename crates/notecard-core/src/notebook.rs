use crate::{Error, KeyValueStore, Note, NoteListRenderer, NoteStore, NoteSurface};
use log::info;

/// Event handlers for the notes page: initial render, form submission and delete.
pub struct Notebook<S: KeyValueStore, V: NoteSurface> {
    store: NoteStore<S>,
    renderer: NoteListRenderer<V>,
}

impl<S: KeyValueStore, V: NoteSurface> Notebook<S, V> {
    pub fn new(kv: S, surface: V) -> Self {
        Self {
            store: NoteStore::new(kv),
            renderer: NoteListRenderer::new(surface),
        }
    }

    /// Render the full list from storage.
    pub fn render(&mut self) -> Result<usize, Error> {
        self.renderer.render(&self.store)
    }

    /// Validate and store a new note, then re-render.
    ///
    /// On [`Error::InvalidInput`] nothing is stored and the list is left as is.
    pub fn submit(&mut self, title: &str, content: &str, media: &str) -> Result<(), Error> {
        let note = Note::from_form(title, content, media)?;
        info!("adding note {:?}", note.title);
        self.store.append(note)?;
        self.render()?;
        Ok(())
    }

    /// Delete the note at `index`, then re-render. Returns false if `index` was out of range.
    pub fn delete(&mut self, index: usize) -> Result<bool, Error> {
        let deleted = self.store.delete_at(index)?;
        if deleted {
            self.render()?;
        }
        Ok(deleted)
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn surface(&self) -> &V {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut V {
        self.renderer.surface_mut()
    }
}
