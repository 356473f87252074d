//! Virtual clock scheduler
//!
//! Drives the game without a browser: the native demo and the tests advance
//! time explicitly and feed the returned handles to `Game::on_timer`.

use super::{Scheduler, TimerHandle, TimerKind};

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    due_ms: u64,
    /// `Some` for intervals
    period_ms: Option<u64>,
}

#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
    frame: Option<TimerHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn allocate(&mut self, kind: TimerKind) -> TimerHandle {
        self.next_id += 1;
        TimerHandle {
            id: self.next_id,
            kind,
        }
    }

    /// Next timer due at or before `deadline_ms`, rescheduling intervals
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<TimerHandle> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= deadline_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.handle.id))
            .map(|(i, _)| i)?;

        let due_ms = self.pending[idx].due_ms;
        self.now_ms = self.now_ms.max(due_ms);
        let handle = self.pending[idx].handle;
        match self.pending[idx].period_ms {
            Some(period) => self.pending[idx].due_ms += period,
            None => {
                self.pending.remove(idx);
            }
        }
        Some(handle)
    }

    /// Move the clock forward to `deadline_ms` without firing anything
    ///
    /// Callers drain `pop_due` first so timers fire against up-to-date state.
    pub fn advance_to(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }

    /// Take the pending frame request, if any
    pub fn take_frame(&mut self) -> Option<TimerHandle> {
        self.frame.take()
    }

    pub fn has_frame_request(&self) -> bool {
        self.frame.is_some()
    }

    /// Number of live timers of a kind (frames excluded)
    pub fn active(&self, kind: TimerKind) -> usize {
        self.pending
            .iter()
            .filter(|p| p.handle.kind == kind)
            .count()
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&mut self, kind: TimerKind, period_ms: u32) -> Option<TimerHandle> {
        let handle = self.allocate(kind);
        let period = u64::from(period_ms.max(1));
        self.pending.push(Pending {
            handle,
            due_ms: self.now_ms + period,
            period_ms: Some(period),
        });
        Some(handle)
    }

    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u32) -> Option<TimerHandle> {
        let handle = self.allocate(kind);
        self.pending.push(Pending {
            handle,
            due_ms: self.now_ms + u64::from(delay_ms),
            period_ms: None,
        });
        Some(handle)
    }

    fn request_frame(&mut self) -> Option<TimerHandle> {
        let handle = self.allocate(TimerKind::Frame);
        self.frame = Some(handle);
        Some(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
        self.pending.retain(|p| p.handle != handle);
    }
}
