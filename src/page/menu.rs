//! Hamburger toggle, mobile menu state, and smooth anchor scrolling.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, ScrollBehavior, ScrollToOptions, window};

/// Fixed-header allowance subtracted from anchor scroll targets.
const HEADER_OFFSET_PX: f64 = 80.0;

pub(crate) fn wire(doc: &Document) -> Result<(), JsValue> {
    wire_hamburger(doc)?;
    wire_anchor_scroll(doc)
}

fn wire_hamburger(doc: &Document) -> Result<(), JsValue> {
    let (hamburger, menu) = match (
        doc.get_element_by_id("hamburger"),
        doc.get_element_by_id("mobileMenu"),
    ) {
        (Some(h), Some(m)) => (h, m),
        _ => return Ok(()),
    };
    let hamburger_cl = hamburger.clone();
    let menu_cl = menu.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        hamburger_cl.class_list().toggle("active").ok();
        menu_cl.class_list().toggle("open").ok();
        // Freeze page scrolling while the menu overlay is up.
        let open = menu_cl.class_list().contains("open");
        set_body_overflow(if open { "hidden" } else { "" });
    }) as Box<dyn FnMut(_)>);
    hamburger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Collapse the mobile menu and restore page scrolling.
pub(crate) fn close_mobile(doc: &Document) {
    if let (Some(hamburger), Some(menu)) = (
        doc.get_element_by_id("hamburger"),
        doc.get_element_by_id("mobileMenu"),
    ) {
        hamburger.class_list().remove_1("active").ok();
        menu.class_list().remove_1("open").ok();
        set_body_overflow("");
    }
}

fn set_body_overflow(value: &str) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        body.style().set_property("overflow", value).ok();
    }
}

/// In-page anchors scroll smoothly to their target, stopping short of the
/// fixed header; plain navigation is left alone when the target is missing.
fn wire_anchor_scroll(doc: &Document) -> Result<(), JsValue> {
    super::for_each_element(doc, "a[href^=\"#\"]", |anchor| {
        let anchor_cl = anchor.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let win = match window() {
                Some(w) => w,
                None => return,
            };
            let doc = match win.document() {
                Some(d) => d,
                None => return,
            };
            let href = match anchor_cl.get_attribute("href") {
                Some(h) => h,
                None => return,
            };
            let target = match doc.query_selector(&href).ok().flatten() {
                Some(t) => t,
                None => return,
            };
            evt.prevent_default();
            close_mobile(&doc);
            let top = target.get_bounding_client_rect().top() + win.scroll_y().unwrap_or(0.0)
                - HEADER_OFFSET_PX;
            let opts = ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&opts);
        }) as Box<dyn FnMut(_)>);
        anchor
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    })
}
