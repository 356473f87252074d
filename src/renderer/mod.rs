//! Rendering module
//!
//! The game draws through the `Surface` trait: filled rectangles, text and
//! circles. The browser backend maps it onto a 2D canvas context; tests and the
//! native demo record the calls instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod presenter;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use presenter::present;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

/// Logical paints; backends pick the actual colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Playfield fill
    Background,
    /// Overlay and HUD text, entity glyphs
    Ink,
    /// Juice splashes
    Juice,
}

/// Colors for game elements (CSS syntax)
pub mod colors {
    pub const BACKGROUND: &str = "#D2B48C"; // Light brown
    pub const INK: &str = "black";
    pub const JUICE: &str = "red";
}

impl Paint {
    pub fn css(&self) -> &'static str {
        match self {
            Paint::Background => colors::BACKGROUND,
            Paint::Ink => colors::INK,
            Paint::Juice => colors::JUICE,
        }
    }
}

/// Abstract drawing surface with a fixed logical size
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, paint: Paint);
    /// Draw `text` with its baseline-left corner at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, font_size: f32, paint: Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
}
