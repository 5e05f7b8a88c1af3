//! DOM-backed surfaces for the note list and the theme.

use log::error;
use notecard_core::{MediaView, NoteCard, NoteSurface, Theme, ThemeTarget};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

const DARK_CLASS: &str = "dark-theme";

/// Renders cards into a container element.
pub struct DomSurface {
    document: Document,
    container: Element,
}

impl DomSurface {
    pub fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
        }
    }

    fn element(&self, tag: &str) -> Result<Element, JsValue> {
        self.document.create_element(tag)
    }

    fn build_card(&self, card: &NoteCard) -> Result<Element, JsValue> {
        let article = self.element("article")?;
        article.set_class_name("note-card");
        article.set_attribute("tabindex", "0")?;
        article.set_attribute("aria-label", &card.aria_label())?;

        let title = self.element("h3")?;
        title.set_inner_html(card.title.as_str());
        article.append_child(&title)?;

        let content = self.element("p")?;
        content.set_class_name("note-content");
        content.set_inner_html(card.content.as_str());
        article.append_child(&content)?;

        match &card.media {
            Some(MediaView::Image { src, alt }) => {
                let img = self.element("img")?;
                img.set_class_name("note-media");
                img.set_attribute("src", src)?;
                img.set_attribute("alt", alt)?;
                article.append_child(&img)?;
            }
            Some(MediaView::Video { src }) => {
                let frame = self.element("iframe")?;
                frame.set_class_name("note-media");
                frame.set_attribute("frameborder", "0")?;
                frame.set_attribute("allowfullscreen", "")?;
                frame.set_attribute("src", src)?;
                article.append_child(&frame)?;
            }
            None => {}
        }

        let delete = self.element("button")?;
        delete.set_class_name("note-delete-btn");
        delete.set_attribute("type", "button")?;
        delete.set_attribute("data-index", &card.index.to_string())?;
        delete.set_attribute("aria-label", &card.delete_label())?;
        delete.set_text_content(Some("Delete"));
        article.append_child(&delete)?;

        Ok(article)
    }

    fn try_show_empty(&self, message: &str) -> Result<(), JsValue> {
        let p = self.element("p")?;
        p.set_attribute("role", "alert")?;
        p.set_class_name("no-content-msg");
        p.set_text_content(Some(message));
        self.container.append_child(&p)?;
        Ok(())
    }
}

impl NoteSurface for DomSurface {
    fn clear(&mut self) {
        self.container.set_inner_html("");
    }

    fn show_empty(&mut self, message: &str) {
        if let Err(e) = self.try_show_empty(message) {
            error!("failed to show placeholder: {:?}", e);
        }
    }

    fn push_card(&mut self, card: &NoteCard) {
        let result = self
            .build_card(card)
            .and_then(|el| self.container.append_child(&el).map(|_| ()));
        if let Err(e) = result {
            error!("failed to render note {}: {:?}", card.index, e);
        }
    }
}

/// Switches the page body between light and dark styling.
pub struct BodyTheme {
    body: HtmlElement,
    button: Option<Element>,
}

impl BodyTheme {
    pub fn new(body: HtmlElement, button: Option<Element>) -> Self {
        Self { body, button }
    }
}

impl ThemeTarget for BodyTheme {
    fn apply(&mut self, theme: Theme) {
        let classes = self.body.class_list();
        let result = match theme {
            Theme::Dark => classes.add_1(DARK_CLASS),
            Theme::Light => classes.remove_1(DARK_CLASS),
        };
        if let Err(e) = result {
            error!("failed to apply {} theme: {:?}", theme, e);
        }

        if let Some(button) = &self.button {
            let pressed = if theme == Theme::Dark { "true" } else { "false" };
            let _ = button.set_attribute("aria-pressed", pressed);
        }
    }
}

/// Current value of an `<input>` or `<textarea>` inside the form, or empty.
pub fn field_value(form: &HtmlFormElement, selector: &str) -> String {
    let el = match form.query_selector(selector) {
        Ok(Some(el)) => el,
        _ => return String::new(),
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}
