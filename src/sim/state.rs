//! Game session state
//!
//! One `GameSession` holds everything a play-through mutates: phase, score,
//! misses, the three entity collections and the handles of the timers the
//! current phase owns.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::splash::Splash;
use crate::platform::{Scheduler, TimerHandle, TimerKind};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap
    #[default]
    Start,
    /// 3-2-1 countdown before play
    Countdown,
    /// Active gameplay
    Playing,
    /// Round ended (bomb or too many misses)
    GameOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    BombHit,
    TooManyMisses,
}

/// Notable things that happened, drained by the host for logging/stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    Sliced { count: u32 },
    Missed,
    GameOver(GameOverReason),
}

/// Timer handles owned by the active phase
#[derive(Debug, Clone, Default)]
pub struct ActiveTimers {
    pub countdown: Option<TimerHandle>,
    pub spawn_delay: Option<TimerHandle>,
    pub spawn: Option<TimerHandle>,
    pub frame: Option<TimerHandle>,
}

impl ActiveTimers {
    /// Whether `handle` is the live handle for its kind
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        let slot = match handle.kind {
            TimerKind::Countdown => self.countdown,
            TimerKind::SpawnDelay => self.spawn_delay,
            TimerKind::Spawn => self.spawn,
            TimerKind::Frame => self.frame,
        };
        slot == Some(handle)
    }

    pub fn cancel_countdown(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(h) = self.countdown.take() {
            scheduler.cancel(h);
        }
    }

    /// Cancel the spawn delay, spawn ticker and frame request
    pub fn cancel_play(&mut self, scheduler: &mut dyn Scheduler) {
        for h in [
            self.spawn_delay.take(),
            self.spawn.take(),
            self.frame.take(),
        ]
        .into_iter()
        .flatten()
        {
            scheduler.cancel(h);
        }
    }

    pub fn cancel_all(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_countdown(scheduler);
        self.cancel_play(scheduler);
    }

    pub fn is_empty(&self) -> bool {
        self.countdown.is_none()
            && self.spawn_delay.is_none()
            && self.spawn.is_none()
            && self.frame.is_none()
    }
}

/// Complete mutable state of one play-through
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    pub score: u32,
    pub missed: u32,
    /// Value shown by the countdown overlay
    pub countdown: i32,
    /// Falling fruits in spawn order
    pub fruits: Vec<Entity>,
    /// Falling bombs in spawn order
    pub bombs: Vec<Entity>,
    pub splashes: Vec<Splash>,
    /// Handles are only meaningful to the scheduler that issued them
    #[serde(skip)]
    pub timers: ActiveTimers,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every fruit, bomb and splash
    pub fn clear_entities(&mut self) {
        self.fruits.clear();
        self.bombs.clear();
        self.splashes.clear();
    }

    /// Zero score and misses, drop all entities and undrained events
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.missed = 0;
        self.clear_entities();
        self.events.clear();
    }

    pub fn has_entities(&self) -> bool {
        !(self.fruits.is_empty() && self.bombs.is_empty() && self.splashes.is_empty())
    }

    /// Switch phase and record the change
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use crate::sim::entity::{EntityKind, FruitKind};
    use glam::Vec2;

    #[test]
    fn test_reset_round() {
        let mut session = GameSession::new();
        session.score = 7;
        session.missed = 2;
        session.fruits.push(Entity::new(
            EntityKind::Fruit(FruitKind::Banana),
            Vec2::ZERO,
            2.0,
        ));
        session.splashes.push(Splash::new(Vec2::ZERO));
        session.events.push(GameEvent::Missed);
        assert!(session.has_entities());

        session.reset_round();
        assert_eq!(session.score, 0);
        assert_eq!(session.missed, 0);
        assert!(!session.has_entities());
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_cancel_play_leaves_countdown() {
        let mut sched = ManualScheduler::new();
        let mut timers = ActiveTimers {
            countdown: sched.set_interval(TimerKind::Countdown, 1000),
            spawn: sched.set_interval(TimerKind::Spawn, 1500),
            frame: sched.request_frame(),
            ..Default::default()
        };

        timers.cancel_play(&mut sched);
        assert!(timers.countdown.is_some());
        assert!(timers.spawn.is_none() && timers.frame.is_none());
        assert_eq!(sched.active(TimerKind::Spawn), 0);
        assert!(!sched.has_frame_request());

        timers.cancel_all(&mut sched);
        assert!(timers.is_empty());
        assert_eq!(sched.active(TimerKind::Countdown), 0);
    }

    #[test]
    fn test_stale_handle_is_not_current() {
        let mut sched = ManualScheduler::new();
        let old = sched.set_interval(TimerKind::Spawn, 1500).unwrap();
        let new = sched.set_interval(TimerKind::Spawn, 1500).unwrap();
        let timers = ActiveTimers {
            spawn: Some(new),
            ..Default::default()
        };
        assert!(timers.is_current(new));
        assert!(!timers.is_current(old));
    }

    #[test]
    fn test_snapshot_skips_timers() {
        let mut session = GameSession::new();
        session.score = 3;
        session.phase = GamePhase::Playing;
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("timers"));
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 3);
        assert_eq!(back.phase, GamePhase::Playing);
    }
}
