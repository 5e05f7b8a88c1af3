//! Notecard core library - note records, media classification, storage and rendering.
//!
//! This crate contains no I/O. Persistence is reached through [`KeyValueStore`]
//! and display through [`NoteSurface`] and [`ThemeTarget`], so it can be
//! compiled for any target.

mod error;
mod note;
mod media;
mod storage;
mod store;
mod render;
mod html;
mod theme;
mod notebook;

pub use error::{Error, FormField};
pub use note::Note;
pub use media::{classify, resolve_embed, MediaKind};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{NoteStore, NOTES_KEY};
pub use render::{Escaped, MediaView, NoteCard, NoteListRenderer, NoteSurface, EMPTY_MESSAGE};
pub use html::{escape_attr, escape_html, HtmlSurface};
pub use theme::{Headless, Theme, ThemePreference, ThemeTarget, THEME_KEY};
pub use notebook::Notebook;
