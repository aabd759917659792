//! Single-open FAQ accordion.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

pub(crate) fn wire(doc: &Document) -> Result<(), JsValue> {
    super::for_each_element(doc, ".faq-q", |btn| {
        let btn_cl = btn.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let doc = match window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            let item = match btn_cl.closest(".faq-item").ok().flatten() {
                Some(i) => i,
                None => return,
            };
            let was_open = item.class_list().contains("open");

            // Close every open item first; at most one answer stays expanded.
            super::for_each_element(&doc, ".faq-item.open", |open_item| {
                open_item.class_list().remove_1("open").ok();
                if let Some(answer) = answer_of(&open_item) {
                    answer.style().set_property("max-height", "0").ok();
                }
            })
            .ok();

            if !was_open {
                item.class_list().add_1("open").ok();
                if let Some(answer) = answer_of(&item) {
                    // max-height animates the expansion; scrollHeight is the
                    // natural height of the collapsed answer.
                    let full = format!("{}px", answer.scroll_height());
                    answer.style().set_property("max-height", &full).ok();
                }
            }
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    })
}

fn answer_of(item: &Element) -> Option<HtmlElement> {
    item.query_selector(".faq-a")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}
