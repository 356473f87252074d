//! 2D canvas backend for the browser

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Paint, Surface};

const FONT_FAMILY: &str = "Arial";

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    /// Wrap `canvas`, fixing its backing store to the logical size
    pub fn new(canvas: &HtmlCanvasElement, width: f32, height: f32) -> Option<Self> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, width, height })
    }

    fn set_fill(&self, paint: Paint) {
        self.ctx.set_fill_style_str(paint.css());
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, paint: Paint) {
        self.set_fill(paint);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_size: f32, paint: Paint) {
        self.set_fill(paint);
        self.ctx.set_font(&format!("{}px {}", font_size, FONT_FAMILY));
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.set_fill(paint);
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }
}
