//! Notecard browser front end.
//!
//! Binds the core notebook and theme preference to `localStorage` and the
//! page's DOM. Build with `wasm-pack build --target web` and load the output
//! from `www/index.html`.

mod console;
mod dom;
mod storage;

use log::{error, info};
use notecard_core::{Error, FormField, Notebook, ThemePreference};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, Window};

pub use dom::{BodyTheme, DomSurface};
pub use storage::LocalStorage;

const TITLE_INPUT: &str = "#note-title";
const CONTENT_INPUT: &str = "#note-content";
const MEDIA_INPUT: &str = "#note-media";

/// Elements the page may provide. Missing ones disable the matching feature.
pub struct PageElements {
    pub theme_button: Option<Element>,
    pub form: Option<HtmlFormElement>,
    pub container: Option<Element>,
}

impl PageElements {
    /// Look up the standard element ids once, at startup.
    pub fn find(document: &Document) -> Self {
        let by_id = |id: &str| document.get_element_by_id(id);
        Self {
            theme_button: by_id("theme-toggle"),
            form: by_id("note-form").and_then(|e| e.dyn_into::<HtmlFormElement>().ok()),
            container: by_id("notes-container"),
        }
    }
}

type PageNotebook = Notebook<LocalStorage, DomSurface>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let storage = LocalStorage::from_window(&window)?;
    let elements = PageElements::find(&document);

    mount(&window, &document, storage, elements)
}

/// Wire theme toggling and, when the page has a note form, the notes list.
pub fn mount(
    window: &Window,
    document: &Document,
    storage: LocalStorage,
    elements: PageElements,
) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    let target = BodyTheme::new(body, elements.theme_button.clone());
    let theme = Rc::new(RefCell::new(ThemePreference::new(storage.clone(), target)));

    theme.borrow_mut().load().map_err(to_js)?;

    if let Some(button) = &elements.theme_button {
        let theme = Rc::clone(&theme);
        listen(button, "click", move |_| {
            if let Err(e) = theme.borrow_mut().toggle() {
                error!("failed to toggle theme: {}", e);
            }
        })?;
    }

    let (form, container) = match (elements.form, elements.container) {
        (Some(form), Some(container)) => (form, container),
        _ => return Ok(()),
    };

    let surface = DomSurface::new(document.clone(), container.clone());
    let notebook: Rc<RefCell<PageNotebook>> = Rc::new(RefCell::new(Notebook::new(storage, surface)));
    notebook.borrow_mut().render().map_err(to_js)?;

    {
        let notebook = Rc::clone(&notebook);
        let window = window.clone();
        let form_el = form.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            on_submit(&window, &form_el, &notebook);
        })?;
    }

    // One delegated listener survives re-renders of the cards.
    {
        let notebook = Rc::clone(&notebook);
        listen(&container, "click", move |event| {
            if let Some(index) = delete_index(&event) {
                if let Err(e) = notebook.borrow_mut().delete(index) {
                    error!("failed to delete note {}: {}", index, e);
                }
            }
        })?;
    }

    info!("notes page mounted");
    Ok(())
}

fn on_submit(window: &Window, form: &HtmlFormElement, notebook: &RefCell<PageNotebook>) {
    let title = dom::field_value(form, TITLE_INPUT);
    let content = dom::field_value(form, CONTENT_INPUT);
    let media = dom::field_value(form, MEDIA_INPUT);

    let result = notebook.borrow_mut().submit(&title, &content, &media);
    match result {
        Ok(()) => form.reset(),
        Err(Error::InvalidInput { field, message }) => {
            let _ = window.alert_with_message(&message);
            let selector = match field {
                FormField::Title => TITLE_INPUT,
                FormField::Media => MEDIA_INPUT,
            };
            if let Ok(Some(input)) = form.query_selector(selector) {
                if let Some(input) = input.dyn_ref::<HtmlElement>() {
                    let _ = input.focus();
                }
            }
        }
        Err(e) => error!("failed to save note: {}", e),
    }
}

/// The index of the delete button an event hit, if any.
fn delete_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(".note-delete-btn").ok()??;
    button.get_attribute("data-index")?.parse().ok()
}

fn listen<F>(target: &web_sys::EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn to_js(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}
