//! Falling entities (fruits and bombs)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ENTITY_RADIUS;

/// Fruit varieties (cosmetic only, all score the same)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Orange, FruitKind::Banana];
}

/// What a falling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Fruit(FruitKind),
    Bomb,
}

impl EntityKind {
    /// Glyph drawn for this entity
    pub fn glyph(&self) -> &'static str {
        match self {
            EntityKind::Fruit(FruitKind::Apple) => "🍎",
            EntityKind::Fruit(FruitKind::Orange) => "🍊",
            EntityKind::Fruit(FruitKind::Banana) => "🍌",
            EntityKind::Bomb => "💣",
        }
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, EntityKind::Bomb)
    }
}

/// A falling circular hit target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Downward speed in units per frame
    pub speed: f32,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, speed: f32) -> Self {
        Self::with_radius(kind, pos, speed, ENTITY_RADIUS)
    }

    pub fn with_radius(kind: EntityKind, pos: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            kind,
            pos,
            radius,
            speed,
        }
    }

    /// Advance one frame
    #[inline]
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }

    /// Strict circle test: a point exactly on the rim misses
    #[inline]
    pub fn is_hit(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }

    /// True once the entity has dropped past the bottom edge
    #[inline]
    pub fn is_below(&self, height: f32) -> bool {
        self.pos.y > height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_at(x: f32, y: f32) -> Entity {
        Entity::new(EntityKind::Fruit(FruitKind::Apple), Vec2::new(x, y), 2.0)
    }

    #[test]
    fn test_hit_inside_radius() {
        let fruit = apple_at(100.0, 100.0);
        assert!(fruit.is_hit(Vec2::new(105.0, 102.0)));
        assert!(fruit.is_hit(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_hit_on_rim_misses() {
        let fruit = apple_at(100.0, 100.0);
        assert!(!fruit.is_hit(Vec2::new(130.0, 100.0)));
        assert!(fruit.is_hit(Vec2::new(129.9, 100.0)));
    }

    #[test]
    fn test_fall_and_below() {
        let mut fruit = apple_at(0.0, 797.0);
        fruit.fall();
        assert_eq!(fruit.pos.y, 799.0);
        assert!(!fruit.is_below(800.0));
        fruit.fall();
        assert!(fruit.is_below(800.0));
    }

    #[test]
    fn test_exactly_at_height_is_not_below() {
        let fruit = apple_at(0.0, 800.0);
        assert!(!fruit.is_below(800.0));
    }

    #[test]
    fn test_hit_respects_custom_radius() {
        let bomb = Entity::with_radius(EntityKind::Bomb, Vec2::new(100.0, 100.0), 2.0, 10.0);
        assert!(bomb.is_hit(Vec2::new(109.0, 100.0)));
        assert!(!bomb.is_hit(Vec2::new(110.0, 100.0)));
    }

    #[test]
    fn test_glyphs_distinguish_bomb() {
        assert!(EntityKind::Bomb.is_bomb());
        assert_eq!(EntityKind::Bomb.glyph(), "💣");
        for kind in FruitKind::ALL {
            assert!(!EntityKind::Fruit(kind).is_bomb());
            assert_ne!(EntityKind::Fruit(kind).glyph(), "💣");
        }
    }
}
