//! Sticky nav scroll state plus active-link highlight.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Window, window};

pub(crate) fn wire(win: &Window, doc: &Document) -> Result<(), JsValue> {
    wire_scroll_state(win, doc)?;
    mark_active_link(win, doc)
}

/// Toggle `scrolled` on `#nav` once the page has moved past the hero fold.
fn wire_scroll_state(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let nav = match doc.get_element_by_id("nav") {
        Some(el) => el,
        None => return Ok(()),
    };
    let closure = Closure::wrap(Box::new(move || {
        if let Some(w) = window() {
            let scrolled = w.scroll_y().unwrap_or(0.0) > 40.0;
            nav.class_list().toggle_with_force("scrolled", scrolled).ok();
        }
    }) as Box<dyn FnMut()>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(true);
    win.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        closure.as_ref().unchecked_ref(),
        &opts,
    )?;
    closure.forget();
    Ok(())
}

/// Mark the nav link whose href matches the current document. The site uses
/// flat page files, so the last path segment (default `index.html`) is the
/// whole identity.
fn mark_active_link(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let path = win.location().pathname().unwrap_or_default();
    let mut current = path.rsplit('/').next().unwrap_or("").to_string();
    if current.is_empty() {
        current = "index.html".to_string();
    }
    super::for_each_element(doc, ".nav-links a:not(.nav-cta)", |link| {
        if link.get_attribute("href").as_deref() == Some(current.as_str()) {
            link.class_list().add_1("active").ok();
        }
    })
}
