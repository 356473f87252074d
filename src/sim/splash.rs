//! Juice splash markers left behind by a slice

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SPLASH_LIFE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Splash {
    pub pos: Vec2,
    /// Frames left before removal
    pub life: i32,
}

impl Splash {
    pub fn new(pos: Vec2) -> Self {
        Self::with_life(pos, SPLASH_LIFE)
    }

    pub fn with_life(pos: Vec2, life: i32) -> Self {
        Self { pos, life }
    }

    pub fn age(&mut self) {
        self.life -= 1;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }
}
