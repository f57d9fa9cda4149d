//! Canvas2D renderer for the browser
//!
//! Hearts and bombs are drawn procedurally with canvas paths, so the only
//! asset is an optional background image. If that image fails to load the
//! renderer keeps painting a flat backdrop.

use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Frame, ProgressTone, Renderer};
use crate::error::GameError;
use crate::sim::{EntityKind, FallingEntity};

/// Glyphs are authored in a 50x50 box centred on the origin
const GLYPH_SIZE: f64 = 50.0;

const FLAT_BACKDROP: &str = "#f8f8f8";
const PLAY_WASH: &str = "rgba(248, 248, 248, 0.15)";
const PANEL: &str = "rgba(255, 255, 255, 0.75)";

/// Background image that may or may not have arrived
struct Backdrop {
    image: Option<HtmlImageElement>,
    loaded: Rc<Cell<bool>>,
}

impl Backdrop {
    /// Kick off a fire-and-forget image load
    fn load(src: &str) -> Self {
        let loaded = Rc::new(Cell::new(false));
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(_) => {
                log::warn!("Could not create image element, using flat background");
                return Self {
                    image: None,
                    loaded,
                };
            }
        };

        {
            let loaded = loaded.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                log::info!("Background image loaded");
                loaded.set(true);
            });
            image.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        {
            let loaded = loaded.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Background image failed to load, using flat background");
                loaded.set(false);
            });
            image.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        image.set_src(src);

        Self {
            image: Some(image),
            loaded,
        }
    }

    fn ready(&self) -> Option<&HtmlImageElement> {
        self.image.as_ref().filter(|_| self.loaded.get())
    }
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    backdrop: Backdrop,
}

impl CanvasRenderer {
    /// Bind to a canvas. Fails if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, background_src: &str) -> Result<Self, GameError> {
        let missing = || GameError::MissingSurface {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        };
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(missing)?;

        Ok(Self {
            canvas,
            ctx,
            backdrop: Backdrop::load(background_src),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn draw_background(&self, frame: &Frame<'_>) {
        let (w, h) = (frame.field.width as f64, frame.field.height as f64);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, w, h);

        match self.backdrop.ready().filter(|_| frame.in_play()) {
            Some(image) => {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w, h);
                ctx.set_fill_style_str(PLAY_WASH);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            None => {
                ctx.set_fill_style_str(FLAT_BACKDROP);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
        }
    }

    fn draw_entity(&self, entity: &FallingEntity, center: Vec2, rotation: f32, scale: f32) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(center.x as f64, center.y as f64);
        let _ = ctx.rotate(rotation as f64);
        let s = scale as f64 * entity.size as f64 / GLYPH_SIZE;
        let _ = ctx.scale(s, s);
        match entity.kind {
            EntityKind::Heart => self.draw_heart(),
            EntityKind::Bomb => self.draw_bomb(),
        }
        ctx.restore();
    }

    fn draw_heart(&self) {
        let ctx = &self.ctx;
        let size = 18.0;

        ctx.set_fill_style_str("#ff4757");
        ctx.set_shadow_color("rgba(255, 71, 87, 0.4)");
        ctx.set_shadow_blur(8.0);
        ctx.set_shadow_offset_y(3.0);

        ctx.begin_path();
        let _ = ctx.arc(-size / 2.0, -size / 4.0, size / 2.0, PI, 0.0);
        let _ = ctx.arc(size / 2.0, -size / 4.0, size / 2.0, PI, 0.0);
        ctx.line_to(0.0, size);
        ctx.line_to(-size, -size / 4.0);
        ctx.close_path();
        ctx.fill();
        ctx.set_stroke_style_str("#ff2e4d");
        ctx.set_line_width(1.2);
        ctx.stroke();

        // Highlight
        ctx.set_shadow_blur(0.0);
        ctx.set_shadow_offset_y(0.0);
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
        ctx.begin_path();
        let _ = ctx.ellipse(-4.0, -6.0, 4.0, 2.5, 0.0, 0.0, PI * 2.0);
        ctx.fill();
    }

    fn draw_bomb(&self) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str("#2d3436");
        ctx.set_shadow_color("rgba(45, 52, 54, 0.5)");
        ctx.set_shadow_blur(8.0);
        ctx.set_shadow_offset_y(3.0);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, 18.0, 0.0, PI * 2.0);
        ctx.fill();

        ctx.set_shadow_blur(0.0);
        ctx.set_shadow_offset_y(0.0);

        // Fuse and spark
        ctx.set_fill_style_str("#e17055");
        ctx.fill_rect(-2.0, -20.0, 4.0, 15.0);
        ctx.set_fill_style_str("#ff9f43");
        ctx.begin_path();
        let _ = ctx.arc(0.0, -20.0, 6.0, PI, PI * 2.0);
        ctx.fill();

        ctx.set_fill_style_str("#636e72");
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, 5.0, 0.0, PI * 2.0);
        ctx.fill();
    }

    fn draw_particles(&self, frame: &Frame<'_>) {
        let ctx = &self.ctx;
        for p in frame.particles {
            ctx.set_fill_style_str(&format!("#{:06x}", p.color));
            ctx.begin_path();
            let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, PI * 2.0);
            ctx.fill();
        }
    }

    fn draw_hud(&self, frame: &Frame<'_>) {
        let ctx = &self.ctx;
        let (w, h) = (frame.field.width as f64, frame.field.height as f64);

        ctx.set_fill_style_str(PANEL);
        ctx.fill_rect(10.0, 10.0, 150.0, 110.0);

        ctx.set_fill_style_str("#333");
        ctx.set_font("bold 26px Arial");
        let _ = ctx.fill_text(&format!("Score: {}", frame.score), 15.0, 40.0);

        ctx.set_fill_style_str("#666");
        ctx.set_font("16px Arial");
        let _ = ctx.fill_text(&format!("Hearts: {}", frame.hearts_clicked), 15.0, 70.0);
        let _ = ctx.fill_text(&format!("Missed: {}", frame.hearts_missed), 15.0, 95.0);

        // Progress bar
        let bar_w = (w - 30.0).max(0.0);
        ctx.set_fill_style_str(PANEL);
        ctx.fill_rect(15.0, h - 25.0, bar_w, 12.0);
        ctx.set_fill_style_str(match frame.progress_tone() {
            ProgressTone::Complete => "#00b894",
            ProgressTone::Negative => "#d63031",
            ProgressTone::Normal => "#ff4757",
        });
        ctx.fill_rect(15.0, h - 25.0, bar_w * frame.progress as f64, 12.0);
    }
}

impl Renderer for CanvasRenderer {
    fn surface_size(&self) -> Option<Vec2> {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        (w > 0 && h > 0).then(|| Vec2::new(w as f32, h as f32))
    }

    fn render(&mut self, frame: &Frame<'_>) {
        self.draw_background(frame);
        for (entity, center, rotation, scale) in frame.entity_transforms() {
            self.draw_entity(entity, center, rotation, scale);
        }
        self.draw_particles(frame);
        self.draw_hud(frame);
    }
}
