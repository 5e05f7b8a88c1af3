use crate::media::{classify, MediaKind};
use crate::{Error, FormField};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TITLE_REQUIRED: &str = "Please enter a title for the note.";
const MEDIA_INVALID: &str = "Please enter a valid image or video URL.";

/// A user-authored note.
///
/// Notes have no stable identifier; a note is addressed by its position in
/// the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Image or video link. Stored as `""` when absent.
    #[serde(
        default,
        serialize_with = "serialize_media",
        deserialize_with = "deserialize_media"
    )]
    pub media: Option<String>,
}

impl Note {
    /// Build a note from raw form input.
    ///
    /// All fields are trimmed. An empty media field means "no media".
    pub fn from_form(title: &str, content: &str, media: &str) -> Result<Self, Error> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid(FormField::Title, TITLE_REQUIRED));
        }

        let media = media.trim();
        let media = if media.is_empty() {
            None
        } else if classify(media) == MediaKind::None {
            return Err(Error::invalid(FormField::Media, MEDIA_INVALID));
        } else {
            Some(media.to_string())
        };

        Ok(Self {
            title: title.to_string(),
            content: content.trim().to_string(),
            media,
        })
    }

    /// Single-line preview of the content, truncated to `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> String {
        let normalized: String = self
            .content
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let trimmed = normalized.trim();

        if trimmed.chars().count() > max_chars {
            let cut: String = trimmed.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            trimmed.to_string()
        }
    }
}

fn serialize_media<S: Serializer>(media: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(media.as_deref().unwrap_or(""))
}

fn deserialize_media<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let media: Option<String> = Option::deserialize(d)?;
    Ok(media.filter(|m| !m.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form_trims_fields() {
        let note = Note::from_form("  Groceries ", " milk\n", "").unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert_eq!(note.media, None);
    }

    #[test]
    fn test_from_form_rejects_blank_title() {
        for title in ["", "   ", "\t\n"] {
            let err = Note::from_form(title, "body", "").unwrap_err();
            assert_eq!(err.field(), Some(FormField::Title));
            assert_eq!(err.to_string(), TITLE_REQUIRED);
        }
    }

    #[test]
    fn test_from_form_rejects_unsupported_media() {
        let err = Note::from_form("Title", "", "https://example.com/page.html").unwrap_err();
        assert_eq!(err.field(), Some(FormField::Media));
        assert_eq!(err.to_string(), MEDIA_INVALID);

        let err = Note::from_form("Title", "", "not a url").unwrap_err();
        assert_eq!(err.field(), Some(FormField::Media));
    }

    #[test]
    fn test_from_form_accepts_media() {
        let note = Note::from_form("Cat", "", " https://example.com/cat.PNG ").unwrap();
        assert_eq!(note.media.as_deref(), Some("https://example.com/cat.PNG"));
    }

    #[test]
    fn test_wire_shape() {
        let note = Note {
            title: "A".to_string(),
            content: "b".to_string(),
            media: None,
        };
        assert_eq!(
            serde_json::to_string(&note).unwrap(),
            r#"{"title":"A","content":"b","media":""}"#
        );
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        let note: Note = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert_eq!(note.content, "");
        assert_eq!(note.media, None);

        let note: Note = serde_json::from_str(r#"{"title":"A","content":"","media":""}"#).unwrap();
        assert_eq!(note.media, None);

        let note: Note = serde_json::from_str(r#"{"title":"A","media":null}"#).unwrap();
        assert_eq!(note.media, None);
    }

    #[test]
    fn test_preview() {
        let note = Note {
            title: "t".to_string(),
            content: "line one\nline two".to_string(),
            media: None,
        };
        assert_eq!(note.preview(100), "line one line two");
        assert_eq!(note.preview(4), "line...");
    }
}
