//! Falling-character "data stream" canvas animator.
//!
//! A grid of independent columns drops short glyph trails down the
//! `#dataStream` canvas, one step per display refresh. The columnar state
//! lives in [`ColumnField`] and is pure Rust (no browser types), so the
//! movement, recycling and glyph-selection rules are all testable on the
//! host. Rendering and scheduling wrap that core with web-sys calls.
//!
//! Structural rules:
//! - on resize the whole [`ColumnField`] is rebuilt and swapped as a unit,
//!   never patched in place;
//! - the frame loop has an explicit stop ([`stream_stop`]) that cancels the
//!   pending frame and removes the resize listener;
//! - randomness flows through an injectable seeded [`Lcg`], so a fixed seed
//!   reproduces a field exactly.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window, window};

// --- Configuration -----------------------------------------------------------

/// Tunables for the stream effect. `Default` carries the shipped look.
#[derive(Clone, Copy, Debug)]
pub struct StreamConfig {
    /// Glyph cell height in px; also the vertical spacing inside a trail.
    pub font_size: f64,
    /// Horizontal distance between column origins in px.
    pub col_spacing: f64,
    /// Probability that a column starts active.
    pub active_ratio: f64,
    /// Base fall speed in px per frame.
    pub base_speed: f64,
    /// Upper bound of the uniform per-column speed bonus.
    pub speed_jitter: f64,
    /// Number of glyphs drawn above the head, head included.
    pub trail_len: usize,
    /// Fixed character set the glyph formula indexes into.
    pub glyphs: &'static str,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            col_spacing: 24.0,
            active_ratio: 0.2,
            base_speed: 2.5,
            speed_jitter: 1.5,
            trail_len: 8,
            glyphs: "01001101011010010110",
        }
    }
}

// --- Seeded randomness --------------------------------------------------------

/// Minimal linear congruential generator (Numerical Recipes constants).
/// Deterministic under a fixed seed so field layouts are reproducible in
/// tests; not suitable for anything beyond visual jitter.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: seed };
        // Advance once so small clock seeds do not map to near-zero fractions.
        rng.step_state();
        rng
    }

    fn step_state(&mut self) {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.step_state();
        ((self.state >> 16) & 0xFFFF_FFFF) as f64 / (1u64 << 32) as f64
    }

    /// Uniform index in [0, len).
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

// --- Columnar state -----------------------------------------------------------

/// One vertical lane of the effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    /// Vertical position of the head (bottommost) glyph.
    pub head_y: f64,
    /// Fall speed in px per frame.
    pub speed: f64,
    pub active: bool,
}

/// The whole columnar state for one surface size. Rebuilt from scratch when
/// the surface resizes and swapped in as a unit, never patched in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnField {
    pub width: f64,
    pub height: f64,
    pub cols: Vec<Column>,
}

impl ColumnField {
    /// Lay out a fresh field for the given surface size. Column count derives
    /// from width / spacing; each column activates with `active_ratio`, starts
    /// at a uniform height and gets a jittered speed. Deterministic for a
    /// fixed rng seed.
    pub fn new(width: f64, height: f64, cfg: &StreamConfig, rng: &mut Lcg) -> Self {
        let count = (width / cfg.col_spacing).floor().max(0.0) as usize;
        let mut cols = Vec::with_capacity(count);
        for _ in 0..count {
            let active = rng.chance(cfg.active_ratio);
            let head_y = rng.next_f64() * height;
            let speed = cfg.base_speed + rng.next_f64() * cfg.speed_jitter;
            cols.push(Column { head_y, speed, active });
        }
        Self { width, height, cols }
    }

    pub fn active_count(&self) -> usize {
        self.cols.iter().filter(|c| c.active).count()
    }

    /// Advance one frame: every active column falls by its speed, in index
    /// order. A column whose trail has fully left the bottom edge is
    /// deactivated and parked just above the top, and one uniformly chosen
    /// column (possibly the same index) is activated there with a fresh
    /// speed. A column activated mid-pass by an earlier recycle still falls
    /// this frame when its own index comes up.
    pub fn step(&mut self, cfg: &StreamConfig, rng: &mut Lcg) {
        let count = self.cols.len();
        if count == 0 {
            return;
        }
        let trail_span = cfg.trail_len as f64 * cfg.font_size;
        for i in 0..count {
            if !self.cols[i].active {
                continue;
            }
            self.cols[i].head_y += self.cols[i].speed;
            if self.cols[i].head_y - trail_span > self.height {
                self.cols[i].active = false;
                self.cols[i].head_y = -cfg.font_size;
                let next = rng.index(count);
                self.cols[next].active = true;
                self.cols[next].head_y = -cfg.font_size;
                self.cols[next].speed = cfg.base_speed + rng.next_f64() * cfg.speed_jitter;
            }
        }
    }
}

// --- Glyph + trail presentation rules ----------------------------------------

/// Glyph for trail slot `trail` of column `col` while the head sits at
/// `head_y`. Purely a function of its inputs: the flicker comes from the
/// head position sweeping the index, not from per-glyph random draws.
pub fn glyph_at(cfg: &StreamConfig, col: usize, trail: usize, head_y: f64) -> char {
    let len = cfg.glyphs.len() as i64;
    if len == 0 {
        return ' ';
    }
    let fall_steps = (head_y / cfg.font_size).floor() as i64;
    let idx = (col as i64 * 7 + trail as i64 * 3 + fall_steps).rem_euclid(len);
    cfg.glyphs.as_bytes()[idx as usize] as char
}

/// Shadow and fill for one trail slot.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailStyle {
    pub shadow_color: &'static str,
    pub shadow_blur: f64,
    pub fill: String,
}

/// Three intensity tiers over the trail: the head burns brightest, slots 1-2
/// carry a medium glow, and everything further out fades on the alpha ramp.
pub fn trail_style(trail: usize, trail_len: usize) -> TrailStyle {
    let fade = 1.0 - trail as f64 / trail_len as f64;
    let alpha = fade * 0.7;
    if trail == 0 {
        TrailStyle {
            shadow_color: "rgba(100, 255, 230, 1)",
            shadow_blur: 40.0,
            fill: "rgba(200, 255, 245, 1)".to_string(),
        }
    } else if trail <= 2 {
        TrailStyle {
            shadow_color: "rgba(28, 220, 190, 0.9)",
            shadow_blur: 28.0,
            fill: format!("rgba(120, 255, 235, {})", alpha + 0.2),
        }
    } else {
        TrailStyle {
            shadow_color: "rgba(28, 200, 176, 0.5)",
            shadow_blur: 16.0,
            fill: format!("rgba(60, 220, 200, {})", alpha * 0.8),
        }
    }
}

// --- Canvas wiring ------------------------------------------------------------

struct StreamState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    cfg: StreamConfig,
    field: ColumnField,
    rng: Lcg,
    raf_id: i32,
    running: bool,
}

thread_local! {
    static STREAM: RefCell<Option<StreamState>> = RefCell::new(None);
    static FRAME: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
    static RESIZE: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
}

/// Start the animator on the `#dataStream` canvas. A page without that canvas
/// is a silent no-op; a second call while running is too.
#[wasm_bindgen]
pub fn stream_start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if STREAM.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }
    // The canvas is optional page furniture; no canvas, no animator.
    let canvas: HtmlCanvasElement = match doc.get_element_by_id("dataStream") {
        Some(el) => el.dyn_into()?,
        None => return Ok(()),
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    let width = canvas.offset_width().max(0) as u32;
    let height = canvas.offset_height().max(0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let cfg = StreamConfig::default();
    let mut rng = Lcg::new(seed_from_clock());
    let field = ColumnField::new(width as f64, height as f64, &cfg, &mut rng);

    STREAM.with(|cell| {
        cell.replace(Some(StreamState {
            canvas,
            ctx,
            cfg,
            field,
            rng,
            raf_id: 0,
            running: true,
        }))
    });

    install_resize_listener(&win)?;
    start_frame_loop();
    Ok(())
}

/// Stop the animator: cancel the pending frame, drop the loop closure and
/// detach the resize listener. Safe to call when nothing is running.
#[wasm_bindgen]
pub fn stream_stop() {
    let raf_id = STREAM.with(|cell| cell.borrow_mut().take().map(|s| s.raf_id));
    if let Some(win) = window() {
        if let Some(id) = raf_id {
            let _ = win.cancel_animation_frame(id);
        }
        RESIZE.with(|r| {
            if let Some(cb) = r.borrow_mut().take() {
                let _ = win
                    .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
            }
        });
    }
    FRAME.with(|f| {
        f.borrow_mut().take();
    });
}

fn seed_from_clock() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    // Sub-millisecond clock bits are plenty of entropy for a cosmetic effect.
    (crate::performance_now() * 1000.0) as u64
}

fn install_resize_listener(win: &Window) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(move || {
        STREAM.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                rebuild_surface(state);
            }
        });
    }) as Box<dyn FnMut()>);
    win.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
    RESIZE.with(|r| r.borrow_mut().replace(cb));
    Ok(())
}

/// Resync the backing store with the element's CSS size and swap in a fresh
/// field. The renderer only ever sees the old field or the new one, never a
/// half-rebuilt mix.
fn rebuild_surface(state: &mut StreamState) {
    let width = state.canvas.offset_width().max(0) as u32;
    let height = state.canvas.offset_height().max(0) as u32;
    state.canvas.set_width(width);
    state.canvas.set_height(height);
    state.field = ColumnField::new(width as f64, height as f64, &state.cfg, &mut state.rng);
}

fn start_frame_loop() {
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        let live = STREAM.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.running {
                    render_frame(state);
                    return true;
                }
            }
            false
        });
        if live {
            schedule_frame();
        }
    }) as Box<dyn FnMut(f64)>);
    FRAME.with(|f| f.borrow_mut().replace(cb));
    schedule_frame();
}

fn schedule_frame() {
    let win = match window() {
        Some(w) => w,
        None => return,
    };
    FRAME.with(|f| {
        if let Some(cb) = f.borrow().as_ref() {
            if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                STREAM.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        state.raf_id = id;
                    }
                });
            }
        }
    });
}

fn render_frame(state: &mut StreamState) {
    let ctx = &state.ctx;
    let cfg = &state.cfg;
    let field = &state.field;

    // Full clear each frame, no banding from partial fade.
    ctx.clear_rect(0.0, 0.0, field.width, field.height);
    ctx.set_font(&format!("{}px 'JetBrains Mono', monospace", cfg.font_size));

    let mut buf = [0u8; 4];
    for (i, col) in field.cols.iter().enumerate() {
        if !col.active {
            continue;
        }
        let x = i as f64 * cfg.col_spacing;
        for t in 0..cfg.trail_len {
            let y = col.head_y - t as f64 * cfg.font_size;
            // Cheap cull of glyphs entirely outside the surface.
            if y < -cfg.font_size || y > field.height + cfg.font_size {
                continue;
            }
            let style = trail_style(t, cfg.trail_len);
            ctx.set_shadow_color(style.shadow_color);
            ctx.set_shadow_blur(style.shadow_blur);
            ctx.set_fill_style_str(&style.fill);
            let glyph = glyph_at(cfg, i, t, col.head_y);
            ctx.fill_text(glyph.encode_utf8(&mut buf), x, y).ok();
        }
    }

    // Shadow settings would bleed into any other drawing on this context.
    ctx.set_shadow_color("transparent");
    ctx.set_shadow_blur(0.0);

    state.field.step(&state.cfg, &mut state.rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_is_deterministic_per_seed() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
        let mut c = Lcg::new(43);
        assert_ne!(a.next_f64(), c.next_f64());
    }

    #[test]
    fn lcg_outputs_stay_in_unit_interval() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut rng = Lcg::new(99);
        for _ in 0..1000 {
            assert!(rng.index(20) < 20);
        }
    }

    #[test]
    fn empty_field_steps_without_panicking() {
        let cfg = StreamConfig::default();
        let mut rng = Lcg::new(1);
        let mut field = ColumnField::new(0.0, 100.0, &cfg, &mut rng);
        assert!(field.cols.is_empty());
        field.step(&cfg, &mut rng);
    }

    #[test]
    fn glyph_charset_is_binary_only() {
        let cfg = StreamConfig::default();
        assert!(cfg.glyphs.bytes().all(|b| b == b'0' || b == b'1'));
        assert_eq!(cfg.glyphs.len(), 20);
    }
}
