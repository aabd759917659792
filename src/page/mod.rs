//! Page behavior wiring: everything except the canvas animator.
//!
//! Each submodule owns one behavior and checks for its own elements, so a
//! page lacking a given block (no FAQ, no stat counters, ...) skips that
//! wiring silently. Listener closures are wired once and forgotten; they live
//! for the page lifetime, matching how the browser holds the elements.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    window,
};

mod countup;
mod cursor;
mod faq;
mod menu;
mod navbar;
mod reveal;

pub(crate) fn wire_page() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    reveal::wire(&doc)?;
    navbar::wire(&win, &doc)?;
    menu::wire(&doc)?;
    faq::wire(&doc)?;
    cursor::wire(&doc)?;
    countup::wire(&doc)?;
    Ok(())
}

/// Run `f` over every element matching `selector`.
pub(crate) fn for_each_element<F>(doc: &Document, selector: &str, mut f: F) -> Result<(), JsValue>
where
    F: FnMut(Element),
{
    let nodes = doc.query_selector_all(selector)?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(el);
        }
    }
    Ok(())
}

/// Build an IntersectionObserver handing intersecting targets to `on_enter`.
/// The callback closure is leaked; observers live for the page lifetime.
pub(crate) fn intersection_observer<F>(
    threshold: f64,
    root_margin: &str,
    mut on_enter: F,
) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(Element, &IntersectionObserver) + 'static,
{
    let cb = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    if entry.is_intersecting() {
                        on_enter(entry.target(), &observer);
                    }
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);
    let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &options)?;
    cb.forget();
    Ok(observer)
}
