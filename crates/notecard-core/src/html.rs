//! Markup rendering of the note list.

use crate::render::{MediaView, NoteCard, NoteSurface};
use crate::Theme;
use std::fmt::Write;

/// Escape text for use as element content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double- or single-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;").replace('\'', "&#39;")
}

/// A [`NoteSurface`] that writes HTML into a string.
///
/// The element structure and class names match what the browser surface
/// builds, so the same stylesheet applies to both.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    out: String,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The markup rendered so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Wrap the rendered list in a standalone document.
    pub fn to_page(&self, theme: Theme) -> String {
        let body_class = match theme {
            Theme::Dark => " class=\"dark-theme\"",
            Theme::Light => "",
        };
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Notes</title>\n</head>\n<body{}>\n<section id=\"notes-container\">\n{}</section>\n</body>\n</html>\n",
            body_class, self.out
        )
    }
}

impl NoteSurface for HtmlSurface {
    fn clear(&mut self) {
        self.out.clear();
    }

    fn show_empty(&mut self, message: &str) {
        let _ = writeln!(
            self.out,
            "<p role=\"alert\" class=\"no-content-msg\">{}</p>",
            escape_html(message)
        );
    }

    fn push_card(&mut self, card: &NoteCard) {
        let out = &mut self.out;
        let _ = write!(
            out,
            "<article class=\"note-card\" tabindex=\"0\" aria-label=\"{}\">",
            escape_attr(&card.aria_label())
        );
        let _ = write!(out, "<h3>{}</h3>", card.title.as_str());
        let _ = write!(out, "<p class=\"note-content\">{}</p>", card.content.as_str());

        match &card.media {
            Some(MediaView::Image { src, alt }) => {
                let _ = write!(
                    out,
                    "<img class=\"note-media\" src=\"{}\" alt=\"{}\">",
                    escape_attr(src),
                    escape_attr(alt)
                );
            }
            Some(MediaView::Video { src }) => {
                let _ = write!(
                    out,
                    "<iframe class=\"note-media\" src=\"{}\" frameborder=\"0\" allowfullscreen></iframe>",
                    escape_attr(src)
                );
            }
            None => {}
        }

        let _ = writeln!(
            out,
            "<button class=\"note-delete-btn\" data-index=\"{}\" aria-label=\"{}\">Delete</button></article>",
            card.index,
            escape_attr(&card.delete_label())
        );
    }
}
