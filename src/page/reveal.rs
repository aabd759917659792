// Scroll-triggered reveal: each .reveal element gains `visible` the first
// time it enters the viewport, then stops being watched.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

pub(crate) fn wire(doc: &Document) -> Result<(), JsValue> {
    let targets = doc.query_selector_all(".reveal")?;
    if targets.length() == 0 {
        return Ok(());
    }
    // Negative bottom margin so elements reveal slightly before fully entering.
    let observer = super::intersection_observer(0.08, "0px 0px -30px 0px", |el, obs| {
        el.class_list().add_1("visible").ok();
        obs.unobserve(&el);
    })?;
    for i in 0..targets.length() {
        if let Some(el) = targets.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
        }
    }
    Ok(())
}
