//! Game driver
//!
//! Owns the session, scheduler, RNG and tuning, and turns host callbacks
//! (pointer presses, fired timers, frame callbacks) into sim transitions and
//! draw calls. Platform hosts wrap one `Game` and forward events to it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::platform::{Scheduler, TimerHandle};
use crate::renderer::{Surface, present};
use crate::sim::tick::{self, Redraw};
use crate::sim::{GamePhase, GameSession, Spawner};
use crate::tuning::Tuning;

pub struct Game<S: Scheduler> {
    session: GameSession,
    scheduler: S,
    tuning: Tuning,
    spawner: Spawner,
    rng: Pcg32,
    /// Frames advanced since launch (diagnostics only)
    frames: u64,
}

impl<S: Scheduler> Game<S> {
    pub fn new(seed: u64, scheduler: S, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: GameSession::new(),
            scheduler,
            spawner: Spawner::from_tuning(PLAYFIELD_WIDTH, &tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct session access for hosts and tests that stage scenarios
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Initial render (the start overlay)
    pub fn start(&mut self, surface: &mut dyn Surface) {
        present(&self.session, surface);
    }

    /// A press/click/touch at `point` (surface-local); `None` when the event
    /// carried no coordinates
    pub fn on_pointer(&mut self, point: Option<Vec2>, surface: &mut dyn Surface) {
        let redraw = tick::pointer(&mut self.session, &mut self.scheduler, &self.tuning, point);
        self.redraw(redraw, surface);
    }

    /// A timer or frame callback fired
    pub fn on_timer(&mut self, handle: TimerHandle, surface: &mut dyn Surface) {
        let redraw = tick::timer(
            &mut self.session,
            &mut self.scheduler,
            &self.tuning,
            &self.spawner,
            &mut self.rng,
            handle,
        );
        self.redraw(redraw, surface);
    }

    fn redraw(&mut self, redraw: Redraw, surface: &mut dyn Surface) {
        match redraw {
            Redraw::None => {}
            Redraw::Overlay => present(&self.session, surface),
            Redraw::Frame => self.frame(surface),
        }
    }

    /// One Playing frame: advance, draw, cull, then continue or end
    fn frame(&mut self, surface: &mut dyn Surface) {
        self.frames += 1;
        tick::advance(&mut self.session);
        present(&self.session, surface);
        tick::cull(&mut self.session, PLAYFIELD_HEIGHT);
        let phase = tick::finish_frame(&mut self.session, &mut self.scheduler, &self.tuning);
        if phase != GamePhase::Playing {
            present(&self.session, surface);
        }
    }
}
