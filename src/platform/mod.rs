//! Platform abstraction layer
//!
//! Handles browser/native differences for timers and frame callbacks. The sim
//! only sees the `Scheduler` trait; hosts deliver fired handles back through
//! `Game::on_timer`.

pub mod manual;
pub mod registry;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;

use serde::{Deserialize, Serialize};

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// 1 s countdown ticker
    Countdown,
    /// One-shot pause before spawning begins
    SpawnDelay,
    /// 1.5 s spawn ticker
    Spawn,
    /// Display-synchronised frame callback
    Frame,
}

/// Opaque handle to a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub id: u64,
    pub kind: TimerKind,
}

/// Source of cancellable timers and frame callbacks
///
/// Scheduling returns `None` when the platform refused the timer; no callback
/// will ever arrive for it.
pub trait Scheduler {
    /// Fire `kind` every `period_ms` until cancelled
    fn set_interval(&mut self, kind: TimerKind, period_ms: u32) -> Option<TimerHandle>;
    /// Fire `kind` once after `delay_ms`
    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u32) -> Option<TimerHandle>;
    /// Fire once on the next display refresh
    fn request_frame(&mut self) -> Option<TimerHandle>;
    /// Cancel a pending callback; cancelling an already fired one-shot is a no-op
    fn cancel(&mut self, handle: TimerHandle);
}
