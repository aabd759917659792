//! Count-up animation for stat tiles.
//!
//! Elements carrying `data-countup` start counting the first time half of
//! the element is visible, easing from 0 to `data-target` over a fixed
//! duration with an optional `data-suffix` appended (e.g. "%", "+").

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

const DURATION_MS: f64 = 1800.0;

pub(crate) fn wire(doc: &Document) -> Result<(), JsValue> {
    let targets = doc.query_selector_all("[data-countup]")?;
    if targets.length() == 0 {
        return Ok(());
    }
    let observer = super::intersection_observer(0.5, "0px", |el, obs| {
        obs.unobserve(&el);
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            animate(el);
        }
    })?;
    for i in 0..targets.length() {
        if let Some(el) = targets.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
        }
    }
    Ok(())
}

/// Drive one element's count with a self-rescheduling frame callback. The
/// closure chain drops itself once the final value has been rendered.
fn animate(el: HtmlElement) {
    let dataset = el.dataset();
    let target: f64 = match dataset.get("target").and_then(|t| t.parse().ok()) {
        Some(t) => t,
        None => return,
    };
    let suffix = dataset.get("suffix").unwrap_or_default();
    let start = crate::performance_now();

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let progress = ((now - start) / DURATION_MS).min(1.0);
        let current = eased_value(progress, target);
        el.set_text_content(Some(&format!("{current}{suffix}")));
        if progress < 1.0 {
            if let Some(w) = window() {
                let _ =
                    w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        } else {
            let _ = f.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Cubic ease-out over raw progress, rounded to the whole displayed value.
fn eased_value(progress: f64, target: f64) -> i64 {
    let eased = 1.0 - (1.0 - progress).powi(3);
    (eased * target).round() as i64
}
