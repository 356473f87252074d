//! Random fruit and bomb spawning

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::{Entity, EntityKind, FruitKind};
use super::state::GameSession;
use crate::consts::PLAYFIELD_WIDTH;
use crate::tuning::Tuning;

/// Position and speed distributions for new entities
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Playfield width entities spawn across
    pub width: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub bomb_chance: f64,
    /// Hit radius given to new entities
    pub radius: f32,
    /// Distance kept clear of the right edge
    pub margin: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH)
    }
}

impl Spawner {
    pub fn new(width: f32) -> Self {
        Self::from_tuning(width, &Tuning::default())
    }

    pub fn from_tuning(width: f32, tuning: &Tuning) -> Self {
        Self {
            width,
            min_speed: tuning.min_speed,
            max_speed: tuning.max_speed,
            bomb_chance: tuning.bomb_chance,
            radius: tuning.entity_radius,
            margin: tuning.spawn_margin,
        }
    }

    fn spawn_x<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let max_x = self.width - self.margin;
        if max_x > 0.0 {
            rng.random_range(0.0..max_x)
        } else {
            0.0
        }
    }

    fn speed<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min_speed..self.max_speed)
    }

    fn roll<R: Rng + ?Sized>(&self, kind: EntityKind, rng: &mut R) -> Entity {
        let x = self.spawn_x(rng);
        let speed = self.speed(rng);
        Entity::with_radius(kind, Vec2::new(x, 0.0), speed, self.radius)
    }

    /// Append one fruit of a random variety at the top edge
    pub fn spawn_fruit<R: Rng + ?Sized>(&self, session: &mut GameSession, rng: &mut R) {
        let fruit = *FruitKind::ALL.choose(rng).unwrap_or(&FruitKind::Apple);
        let entity = self.roll(EntityKind::Fruit(fruit), rng);
        log::debug!("Spawned {:?} at x={:.1} speed={:.2}", fruit, entity.pos.x, entity.speed);
        session.fruits.push(entity);
    }

    /// Append one bomb at the top edge
    pub fn spawn_bomb<R: Rng + ?Sized>(&self, session: &mut GameSession, rng: &mut R) {
        let entity = self.roll(EntityKind::Bomb, rng);
        log::debug!("Spawned bomb at x={:.1} speed={:.2}", entity.pos.x, entity.speed);
        session.bombs.push(entity);
    }

    /// One spawn tick: always a fruit, sometimes a bomb
    pub fn spawn_wave<R: Rng + ?Sized>(&self, session: &mut GameSession, rng: &mut R) {
        self.spawn_fruit(session, rng);
        if rng.random_bool(self.bomb_chance) {
            self.spawn_bomb(session, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_fruit_ranges() {
        let spawner = Spawner::new(500.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut session = GameSession::new();

        for _ in 0..500 {
            spawner.spawn_fruit(&mut session, &mut rng);
        }
        assert_eq!(session.fruits.len(), 500);
        assert!(session.bombs.is_empty());
        for fruit in &session.fruits {
            assert!(fruit.pos.x >= 0.0 && fruit.pos.x < 450.0);
            assert_eq!(fruit.pos.y, 0.0);
            assert!(fruit.speed >= 1.6 && fruit.speed < 4.2);
            assert_eq!(fruit.radius, 30.0);
            assert!(!fruit.kind.is_bomb());
        }
    }

    #[test]
    fn test_spawn_fruit_uses_every_variety() {
        let spawner = Spawner::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut session = GameSession::new();
        for _ in 0..200 {
            spawner.spawn_fruit(&mut session, &mut rng);
        }
        for kind in FruitKind::ALL {
            assert!(session
                .fruits
                .iter()
                .any(|f| f.kind == EntityKind::Fruit(kind)));
        }
    }

    #[test]
    fn test_spawn_bomb_appends_to_bombs() {
        let spawner = Spawner::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut session = GameSession::new();
        spawner.spawn_bomb(&mut session, &mut rng);
        assert_eq!(session.bombs.len(), 1);
        assert!(session.fruits.is_empty());
        assert!(session.bombs[0].kind.is_bomb());
    }

    #[test]
    fn test_spawn_wave_bomb_chance_extremes() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut session = GameSession::new();

        let never = Spawner {
            bomb_chance: 0.0,
            ..Spawner::default()
        };
        for _ in 0..50 {
            never.spawn_wave(&mut session, &mut rng);
        }
        assert_eq!(session.fruits.len(), 50);
        assert!(session.bombs.is_empty());

        let always = Spawner {
            bomb_chance: 1.0,
            ..Spawner::default()
        };
        always.spawn_wave(&mut session, &mut rng);
        assert_eq!(session.fruits.len(), 51);
        assert_eq!(session.bombs.len(), 1);
    }

    #[test]
    fn test_tuned_radius_and_margin() {
        let tuning = Tuning {
            entity_radius: 12.0,
            spawn_margin: 400.0,
            ..Tuning::default()
        };
        let spawner = Spawner::from_tuning(500.0, &tuning);
        let mut rng = Pcg32::seed_from_u64(21);
        let mut session = GameSession::new();
        for _ in 0..100 {
            spawner.spawn_fruit(&mut session, &mut rng);
            spawner.spawn_bomb(&mut session, &mut rng);
        }
        for e in session.fruits.iter().chain(&session.bombs) {
            assert_eq!(e.radius, 12.0);
            assert!(e.pos.x >= 0.0 && e.pos.x < 100.0);
        }
    }

    #[test]
    fn test_narrow_playfield_spawns_at_left_edge() {
        let spawner = Spawner::new(40.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new();
        spawner.spawn_fruit(&mut session, &mut rng);
        assert_eq!(session.fruits[0].pos.x, 0.0);
    }
}
