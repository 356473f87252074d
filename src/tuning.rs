//! Data-driven game balance
//!
//! Defaults mirror `consts`. Overrides come from JSON (native demo file or the
//! web `?tuning=` query parameter); missing fields keep their defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay timing and balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// First value shown by the countdown
    pub countdown_start: i32,
    /// Countdown ticker period (ms)
    pub countdown_period_ms: u32,
    /// Pause between entering Playing and starting the spawn ticker (ms)
    pub spawn_delay_ms: u32,
    /// Spawn ticker period (ms)
    pub spawn_interval_ms: u32,
    /// Probability of a bomb on each spawn tick
    pub bomb_chance: f64,
    /// Missed fruits that end the round
    pub miss_limit: u32,
    /// Fall speed range, units per frame (max exclusive)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Hit radius of fruits and bombs
    pub entity_radius: f32,
    /// Spawn x is drawn from `[0, width - spawn_margin)`
    pub spawn_margin: f32,
    /// Frames a splash stays on screen
    pub splash_life: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            countdown_start: COUNTDOWN_START,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
            spawn_delay_ms: SPAWN_DELAY_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            bomb_chance: BOMB_CHANCE,
            miss_limit: MISS_LIMIT,
            min_speed: MIN_FALL_SPEED,
            max_speed: MAX_FALL_SPEED,
            entity_radius: ENTITY_RADIUS,
            spawn_margin: SPAWN_MARGIN,
            splash_life: SPLASH_LIFE,
        }
    }
}

/// Why a tuning override was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    BombChance(f64),
    MissLimit,
    SpeedRange { min: f32, max: f32 },
    ZeroPeriod(&'static str),
    NegativeCountdown(i32),
    EntityRadius(f32),
    SpawnMargin(f32),
    SplashLife(i32),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid tuning json: {e}"),
            Self::BombChance(p) => write!(f, "bomb_chance {p} is outside [0, 1]"),
            Self::MissLimit => write!(f, "miss_limit must be at least 1"),
            Self::SpeedRange { min, max } => {
                write!(f, "speed range [{min}, {max}) is empty or non-positive")
            }
            Self::ZeroPeriod(field) => write!(f, "{field} must be non-zero"),
            Self::NegativeCountdown(n) => write!(f, "countdown_start {n} is negative"),
            Self::EntityRadius(r) => write!(f, "entity_radius {r} must be positive"),
            Self::SpawnMargin(m) => write!(f, "spawn_margin {m} must be zero or more"),
            Self::SplashLife(n) => write!(f, "splash_life {n} must be at least 1 frame"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(0.0..=1.0).contains(&self.bomb_chance) {
            return Err(TuningError::BombChance(self.bomb_chance));
        }
        if self.miss_limit == 0 {
            return Err(TuningError::MissLimit);
        }
        // Written so NaN fails too
        if !(self.min_speed > 0.0 && self.min_speed < self.max_speed) {
            return Err(TuningError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.countdown_period_ms == 0 {
            return Err(TuningError::ZeroPeriod("countdown_period_ms"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::ZeroPeriod("spawn_interval_ms"));
        }
        if self.countdown_start < 0 {
            return Err(TuningError::NegativeCountdown(self.countdown_start));
        }
        if !(self.entity_radius > 0.0 && self.entity_radius.is_finite()) {
            return Err(TuningError::EntityRadius(self.entity_radius));
        }
        if !(self.spawn_margin >= 0.0 && self.spawn_margin.is_finite()) {
            return Err(TuningError::SpawnMargin(self.spawn_margin));
        }
        if self.splash_life < 1 {
            return Err(TuningError::SplashLife(self.splash_life));
        }
        Ok(())
    }
}
