use crate::html::escape_html;
use crate::media::{classify, resolve_embed, MediaKind};
use crate::{Error, KeyValueStore, Note, NoteStore};
use log::debug;

/// Placeholder shown when there are no notes.
pub const EMPTY_MESSAGE: &str = "No notes saved yet.";

/// Text that has been escaped for insertion as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escaped(String);

impl Escaped {
    pub fn new(raw: &str) -> Self {
        Self(escape_html(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The media element of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    Image { src: String, alt: String },
    Video { src: String },
}

/// Display model for a single note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    /// Position in the collection at render time; the delete control is bound to it.
    pub index: usize,
    pub title: Escaped,
    pub content: Escaped,
    /// Unescaped title for attribute values such as labels.
    pub label: String,
    pub media: Option<MediaView>,
}

impl NoteCard {
    pub fn from_note(index: usize, note: &Note) -> Self {
        let media = note.media.as_deref().and_then(|url| match classify(url) {
            MediaKind::Image => Some(MediaView::Image {
                src: url.to_string(),
                alt: format!("Image for note titled {}", note.title),
            }),
            MediaKind::Video => Some(MediaView::Video {
                src: resolve_embed(url),
            }),
            MediaKind::None => {
                debug!("note {} media no longer classifies, omitting it", index);
                None
            }
        });

        Self {
            index,
            title: Escaped::new(&note.title),
            content: Escaped::new(&note.content),
            label: note.title.clone(),
            media,
        }
    }

    pub fn aria_label(&self) -> String {
        format!("Note titled {}", self.label)
    }

    pub fn delete_label(&self) -> String {
        format!("Delete note titled {}", self.label)
    }
}

/// Where rendered notes end up.
pub trait NoteSurface {
    /// Remove everything previously rendered.
    fn clear(&mut self);

    /// Show the empty-collection placeholder.
    fn show_empty(&mut self, message: &str);

    /// Append one card, including its delete control.
    fn push_card(&mut self, card: &NoteCard);
}

/// Projects the note store onto a [`NoteSurface`].
pub struct NoteListRenderer<V: NoteSurface> {
    surface: V,
}

impl<V: NoteSurface> NoteListRenderer<V> {
    pub fn new(surface: V) -> Self {
        Self { surface }
    }

    /// Re-render the whole list from the store. Returns the number of cards.
    pub fn render<S: KeyValueStore>(&mut self, store: &NoteStore<S>) -> Result<usize, Error> {
        let notes = store.list_all()?;
        self.surface.clear();

        if notes.is_empty() {
            self.surface.show_empty(EMPTY_MESSAGE);
            return Ok(0);
        }

        for (index, note) in notes.iter().enumerate() {
            self.surface.push_card(&NoteCard::from_note(index, note));
        }
        debug!("rendered {} notes", notes.len());
        Ok(notes.len())
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn into_surface(self) -> V {
        self.surface
    }
}
