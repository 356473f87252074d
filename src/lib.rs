//! Fruit Slice - A tap-to-slice falling fruit arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, phase transitions)
//! - `renderer`: Drawing surface abstraction and screen presenter
//! - `platform`: Timer/frame scheduling abstraction (browser and virtual clock)
//! - `tuning`: Data-driven game balance
//! - `game`: Glue that routes pointer, timer and frame events into the sim

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (canvas units)
    pub const PLAYFIELD_WIDTH: f32 = 500.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Hit radius shared by fruits and bombs
    pub const ENTITY_RADIUS: f32 = 30.0;
    /// Fall speed range in units per frame (max exclusive)
    pub const MIN_FALL_SPEED: f32 = 1.6;
    pub const MAX_FALL_SPEED: f32 = 4.2;
    /// Spawn x is drawn from [0, width - SPAWN_MARGIN)
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Splash lifetime in frames
    pub const SPLASH_LIFE: i32 = 15;
    /// Splash draw radius
    pub const SPLASH_RADIUS: f32 = 10.0;

    /// Missed fruits that end the round
    pub const MISS_LIMIT: u32 = 5;
    /// Chance of a bomb accompanying each spawned fruit
    pub const BOMB_CHANCE: f64 = 0.2;

    /// Countdown shown before play starts
    pub const COUNTDOWN_START: i32 = 3;
    pub const COUNTDOWN_PERIOD_MS: u32 = 1000;
    /// Delay between entering Playing and the first spawn tick
    pub const SPAWN_DELAY_MS: u32 = 500;
    pub const SPAWN_INTERVAL_MS: u32 = 1500;
}
