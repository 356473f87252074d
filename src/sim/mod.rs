//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Timers only through the `Scheduler` trait
//! - Randomness only through a caller-supplied RNG
//! - Collections kept in spawn order

pub mod collision;
pub mod entity;
pub mod spawner;
pub mod splash;
pub mod state;
pub mod tick;

pub use collision::{SliceOutcome, hit_bomb, resolve_pointer};
pub use entity::{Entity, EntityKind, FruitKind};
pub use spawner::Spawner;
pub use splash::Splash;
pub use state::{ActiveTimers, GameEvent, GameOverReason, GamePhase, GameSession};
pub use tick::Redraw;
