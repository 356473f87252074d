//! Surface that records draw calls instead of drawing

use glam::Vec2;

use super::{Paint, Surface};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        pos: Vec2,
        size: Vec2,
        paint: Paint,
    },
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        paint: Paint,
    },
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(Vec2, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, paint: Paint) {
        self.calls.push(DrawCall::Rect { pos, size, paint });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_size: f32, paint: Paint) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            font_size,
            paint,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            paint,
        });
    }
}
