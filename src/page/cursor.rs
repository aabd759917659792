//! Cursor-following glow ring.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement};

/// Anything matching this switches the ring to its "hovering" look.
const INTERACTIVE: &str = "a, button, [role=\"button\"], input, textarea, select, .faq-q";

pub(crate) fn wire(doc: &Document) -> Result<(), JsValue> {
    let glow: HtmlElement = match doc.get_element_by_id("cursorGlow") {
        Some(el) => el.dyn_into()?,
        None => return Ok(()),
    };
    // The ring stays hidden until the first real mouse move, so touch-only
    // visitors never see it. Re-armed when the cursor leaves the document.
    let armed = Rc::new(Cell::new(false));

    let glow_move = glow.clone();
    let armed_move = armed.clone();
    let on_move = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        if !armed_move.get() {
            glow_move.class_list().add_1("active").ok();
            armed_move.set(true);
        }
        let style = glow_move.style();
        style
            .set_property("left", &format!("{}px", evt.client_x()))
            .ok();
        style
            .set_property("top", &format!("{}px", evt.client_y()))
            .ok();
        let over_interactive = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(INTERACTIVE).ok().flatten())
            .is_some();
        glow_move
            .class_list()
            .toggle_with_force("hovering", over_interactive)
            .ok();
    }) as Box<dyn FnMut(_)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(true);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "mousemove",
        on_move.as_ref().unchecked_ref(),
        &opts,
    )?;
    on_move.forget();

    let on_leave = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        glow.class_list().remove_2("active", "hovering").ok();
        armed.set(false);
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
    on_leave.forget();
    Ok(())
}
