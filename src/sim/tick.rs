//! Phase transitions and per-frame simulation
//!
//! Every transition that leaves a timer-owning phase cancels that phase's
//! timers through the scheduler before anything else happens. Timer
//! deliveries are checked against the session's live handles so a callback
//! that slipped through a cancel can never touch a later round. If the
//! scheduler refuses a timer the phase depends on, the round is abandoned
//! and the game returns to Start.

use glam::Vec2;
use rand::Rng;

use super::collision::{SliceOutcome, resolve_pointer};
use super::spawner::Spawner;
use super::state::{GameEvent, GameOverReason, GamePhase, GameSession};
use crate::platform::{Scheduler, TimerHandle, TimerKind};
use crate::tuning::Tuning;

/// What the host should draw after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing visible changed (the next frame will pick it up)
    None,
    /// Phase overlay changed; present the session now
    Overlay,
    /// A Playing frame is due: advance, present, then cull
    Frame,
}

/// Start → Countdown
pub fn begin_countdown(session: &mut GameSession, scheduler: &mut dyn Scheduler, tuning: &Tuning) {
    session.timers.cancel_countdown(scheduler);
    session.countdown = tuning.countdown_start;
    session.set_phase(GamePhase::Countdown);
    session.timers.countdown =
        scheduler.set_interval(TimerKind::Countdown, tuning.countdown_period_ms);
    if session.timers.countdown.is_none() {
        abandon(session, scheduler, TimerKind::Countdown);
    }
}

/// One countdown tick; enters Playing once the value drops below zero
pub fn countdown_tick(session: &mut GameSession, scheduler: &mut dyn Scheduler, tuning: &Tuning) {
    session.countdown -= 1;
    if session.countdown < 0 {
        session.timers.cancel_countdown(scheduler);
        begin_playing(session, scheduler, tuning);
    }
}

/// Countdown → Playing: fresh round, spawning starts after a short delay
pub fn begin_playing(session: &mut GameSession, scheduler: &mut dyn Scheduler, tuning: &Tuning) {
    // A previous round's spawn ticker must never survive into this one
    session.timers.cancel_play(scheduler);
    session.reset_round();
    session.set_phase(GamePhase::Playing);
    session.timers.spawn_delay = scheduler.set_timeout(TimerKind::SpawnDelay, tuning.spawn_delay_ms);
    if session.timers.spawn_delay.is_none() {
        abandon(session, scheduler, TimerKind::SpawnDelay);
    }
}

/// Spawn delay elapsed: start the spawn ticker and the frame loop
pub fn start_spawning(session: &mut GameSession, scheduler: &mut dyn Scheduler, tuning: &Tuning) {
    session.timers.spawn_delay = None;
    if let Some(old) = session.timers.spawn.take() {
        scheduler.cancel(old);
    }
    session.timers.spawn = scheduler.set_interval(TimerKind::Spawn, tuning.spawn_interval_ms);
    if session.timers.spawn.is_none() {
        abandon(session, scheduler, TimerKind::Spawn);
        return;
    }
    if session.timers.frame.is_none() {
        session.timers.frame = scheduler.request_frame();
        if session.timers.frame.is_none() {
            abandon(session, scheduler, TimerKind::Frame);
        }
    }
}

/// Move every entity down and age splashes
pub fn advance(session: &mut GameSession) {
    for fruit in &mut session.fruits {
        fruit.fall();
    }
    for bomb in &mut session.bombs {
        bomb.fall();
    }
    for splash in &mut session.splashes {
        splash.age();
    }
}

/// Drop entities past the bottom edge and expired splashes
///
/// Returns the number of fruits missed this frame; bombs fall away freely.
pub fn cull(session: &mut GameSession, height: f32) -> u32 {
    let before = session.fruits.len();
    session.fruits.retain(|f| !f.is_below(height));
    let missed = (before - session.fruits.len()) as u32;

    session.bombs.retain(|b| !b.is_below(height));
    session.splashes.retain(|s| !s.is_expired());

    if missed > 0 {
        session.missed += missed;
        for _ in 0..missed {
            session.events.push(GameEvent::Missed);
        }
        log::debug!("Missed {} fruit (total {})", missed, session.missed);
    }
    missed
}

/// End-of-frame check: game over on too many misses, else request another frame
pub fn finish_frame(
    session: &mut GameSession,
    scheduler: &mut dyn Scheduler,
    tuning: &Tuning,
) -> GamePhase {
    if session.missed >= tuning.miss_limit {
        end_game(session, scheduler, GameOverReason::TooManyMisses);
    } else {
        session.timers.frame = scheduler.request_frame();
        if session.timers.frame.is_none() {
            abandon(session, scheduler, TimerKind::Frame);
        }
    }
    session.phase
}

/// Playing → GameOver
pub fn end_game(session: &mut GameSession, scheduler: &mut dyn Scheduler, reason: GameOverReason) {
    session.timers.cancel_play(scheduler);
    session.clear_entities();
    session.set_phase(GamePhase::GameOver);
    session.events.push(GameEvent::GameOver(reason));
    log::info!(
        "Game over ({:?}): score {}, missed {}",
        reason,
        session.score,
        session.missed
    );
}

/// GameOver → Start
pub fn reset_to_start(session: &mut GameSession, scheduler: &mut dyn Scheduler) {
    session.timers.cancel_all(scheduler);
    session.reset_round();
    session.countdown = 0;
    session.set_phase(GamePhase::Start);
}

/// A timer the current phase cannot run without was refused
fn abandon(session: &mut GameSession, scheduler: &mut dyn Scheduler, kind: TimerKind) {
    log::error!(
        "{:?} timer could not be scheduled, abandoning {:?}",
        kind,
        session.phase
    );
    reset_to_start(session, scheduler);
}

/// Route a pointer press according to the current phase
pub fn pointer(
    session: &mut GameSession,
    scheduler: &mut dyn Scheduler,
    tuning: &Tuning,
    point: Option<Vec2>,
) -> Redraw {
    match session.phase {
        GamePhase::Start => {
            begin_countdown(session, scheduler, tuning);
            Redraw::Overlay
        }
        GamePhase::Countdown => Redraw::None,
        GamePhase::Playing => match resolve_pointer(session, point, tuning.splash_life) {
            SliceOutcome::Detonated => {
                end_game(session, scheduler, GameOverReason::BombHit);
                Redraw::Overlay
            }
            SliceOutcome::Sliced(_) | SliceOutcome::Miss => Redraw::None,
        },
        GamePhase::GameOver => {
            reset_to_start(session, scheduler);
            Redraw::Overlay
        }
    }
}

/// Apply a fired timer
///
/// Handles that are not the session's live handle for their kind are stale
/// (cancelled, or from an earlier round) and are ignored.
pub fn timer<R: Rng + ?Sized>(
    session: &mut GameSession,
    scheduler: &mut dyn Scheduler,
    tuning: &Tuning,
    spawner: &Spawner,
    rng: &mut R,
    handle: TimerHandle,
) -> Redraw {
    if !session.timers.is_current(handle) {
        log::warn!("Ignoring stale {:?} timer #{}", handle.kind, handle.id);
        return Redraw::None;
    }

    match handle.kind {
        TimerKind::Countdown => {
            countdown_tick(session, scheduler, tuning);
            Redraw::Overlay
        }
        TimerKind::SpawnDelay => {
            start_spawning(session, scheduler, tuning);
            if session.phase == GamePhase::Playing {
                Redraw::None
            } else {
                Redraw::Overlay
            }
        }
        TimerKind::Spawn => {
            spawner.spawn_wave(session, rng);
            Redraw::None
        }
        TimerKind::Frame => {
            session.timers.frame = None;
            if session.phase == GamePhase::Playing {
                Redraw::Frame
            } else {
                Redraw::None
            }
        }
    }
}
