//! site-fx core crate.
//!
//! All presentational behavior for the marketing pages lives here: the
//! data-stream canvas animator plus the scroll / cursor / menu glue. Every
//! behavior checks for its own page elements and silently skips wiring when a
//! page does not carry them, so one bundle serves every page of the site.

use wasm_bindgen::prelude::*;

mod page;
pub mod stream;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire every page behavior and start the stream animator. Call once after
/// the document has loaded.
#[wasm_bindgen]
pub fn init_page() -> Result<(), JsValue> {
    page::wire_page()?;
    stream::stream_start()?;
    Ok(())
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
