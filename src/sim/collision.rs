//! Pointer hit resolution
//!
//! Bombs are tested before fruit so a tap overlapping both always loses.

use glam::Vec2;

use super::splash::Splash;
use super::state::{GameEvent, GameSession};

/// Result of resolving one pointer press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Nothing under the pointer (or no pointer coordinate at all)
    Miss,
    /// `count` fruits sliced
    Sliced(u32),
    /// A bomb was hit; the round must end
    Detonated,
}

/// Index of the most recently spawned bomb under `point`
pub fn hit_bomb(session: &GameSession, point: Vec2) -> Option<usize> {
    session.bombs.iter().rposition(|b| b.is_hit(point))
}

/// Resolve a pointer press against the session's entities
///
/// Sliced fruit is removed, scores one point each and leaves a splash lasting
/// `splash_life` frames at the pointer. A bomb hit leaves the session
/// untouched; the caller ends the game.
pub fn resolve_pointer(
    session: &mut GameSession,
    point: Option<Vec2>,
    splash_life: i32,
) -> SliceOutcome {
    let Some(point) = point else {
        return SliceOutcome::Miss;
    };

    if hit_bomb(session, point).is_some() {
        return SliceOutcome::Detonated;
    }

    let mut sliced = 0u32;
    // Newest first
    for i in (0..session.fruits.len()).rev() {
        if session.fruits[i].is_hit(point) {
            let fruit = session.fruits.remove(i);
            log::debug!("Sliced {:?} at ({:.0}, {:.0})", fruit.kind, point.x, point.y);
            session.splashes.push(Splash::with_life(point, splash_life));
            session.score += 1;
            sliced += 1;
        }
    }

    if sliced == 0 {
        SliceOutcome::Miss
    } else {
        session.events.push(GameEvent::Sliced { count: sliced });
        SliceOutcome::Sliced(sliced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPLASH_LIFE;
    use crate::sim::entity::{Entity, EntityKind, FruitKind};

    fn fruit(x: f32, y: f32) -> Entity {
        Entity::new(EntityKind::Fruit(FruitKind::Orange), Vec2::new(x, y), 2.0)
    }

    fn bomb(x: f32, y: f32) -> Entity {
        Entity::new(EntityKind::Bomb, Vec2::new(x, y), 2.0)
    }

    #[test]
    fn test_slice_single_fruit() {
        let mut session = GameSession::new();
        session.fruits.push(fruit(100.0, 100.0));

        let outcome = resolve_pointer(&mut session, Some(Vec2::new(105.0, 102.0)), SPLASH_LIFE);
        assert_eq!(outcome, SliceOutcome::Sliced(1));
        assert!(session.fruits.is_empty());
        assert_eq!(session.score, 1);
        assert_eq!(session.splashes.len(), 1);
        assert_eq!(session.splashes[0].pos, Vec2::new(105.0, 102.0));
        assert_eq!(session.splashes[0].life, 15);
    }

    #[test]
    fn test_bomb_takes_precedence() {
        let mut session = GameSession::new();
        session.bombs.push(bomb(50.0, 50.0));
        session.fruits.push(fruit(50.0, 50.0));

        let outcome = resolve_pointer(&mut session, Some(Vec2::new(50.0, 50.0)), SPLASH_LIFE);
        assert_eq!(outcome, SliceOutcome::Detonated);
        assert_eq!(session.score, 0);
        assert_eq!(session.fruits.len(), 1);
        assert!(session.splashes.is_empty());
    }

    #[test]
    fn test_overlapping_fruits_all_sliced() {
        let mut session = GameSession::new();
        session.fruits.push(fruit(200.0, 200.0));
        session.fruits.push(fruit(400.0, 400.0));
        session.fruits.push(fruit(210.0, 205.0));
        session.fruits.push(fruit(195.0, 190.0));

        let outcome = resolve_pointer(&mut session, Some(Vec2::new(202.0, 200.0)), SPLASH_LIFE);
        assert_eq!(outcome, SliceOutcome::Sliced(3));
        assert_eq!(session.score, 3);
        assert_eq!(session.splashes.len(), 3);
        assert!(session.splashes.iter().all(|s| s.pos == Vec2::new(202.0, 200.0)));
        assert_eq!(session.fruits.len(), 1);
        assert_eq!(session.fruits[0].pos, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_missing_coordinate_is_noop() {
        let mut session = GameSession::new();
        session.fruits.push(fruit(100.0, 100.0));
        session.bombs.push(bomb(100.0, 100.0));

        assert_eq!(resolve_pointer(&mut session, None, SPLASH_LIFE), SliceOutcome::Miss);
        assert_eq!(session.fruits.len(), 1);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_miss_leaves_state() {
        let mut session = GameSession::new();
        session.fruits.push(fruit(100.0, 100.0));
        session.bombs.push(bomb(300.0, 300.0));

        let outcome = resolve_pointer(&mut session, Some(Vec2::new(200.0, 200.0)), SPLASH_LIFE);
        assert_eq!(outcome, SliceOutcome::Miss);
        assert_eq!(session.fruits.len(), 1);
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_splash_life_is_configurable() {
        let mut session = GameSession::new();
        session.fruits.push(fruit(100.0, 100.0));
        resolve_pointer(&mut session, Some(Vec2::new(100.0, 100.0)), 40);
        assert_eq!(session.splashes[0].life, 40);
    }

    #[test]
    fn test_hit_bomb_prefers_newest() {
        let mut session = GameSession::new();
        session.bombs.push(bomb(50.0, 50.0));
        session.bombs.push(bomb(60.0, 50.0));
        assert_eq!(hit_bomb(&session, Vec2::new(55.0, 50.0)), Some(1));
        assert_eq!(hit_bomb(&session, Vec2::new(25.0, 50.0)), Some(0));
        assert_eq!(hit_bomb(&session, Vec2::new(400.0, 50.0)), None);
    }
}
