//! Bookkeeping for host timers that own their callback
//!
//! The browser scheduler keeps each callback alive here until the timer is
//! cancelled or, for one-shots, has fired. Either way the callback is handed
//! back to the caller to release.

use std::collections::HashMap;

/// Host-side timer id, tagged with the API that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTimer {
    Interval(i32),
    Timeout(i32),
    Frame(i32),
}

impl HostTimer {
    pub fn is_one_shot(self) -> bool {
        !matches!(self, HostTimer::Interval(_))
    }
}

#[derive(Debug)]
pub struct TimerRegistry<C> {
    entries: HashMap<u64, (HostTimer, C)>,
}

impl<C> Default for TimerRegistry<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<C> TimerRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, timer: HostTimer, callback: C) {
        self.entries.insert(id, (timer, callback));
    }

    /// Timer `id` fired: a one-shot is retired and its callback returned
    pub fn fired(&mut self, id: u64) -> Option<C> {
        match self.entries.get(&id) {
            Some((timer, _)) if timer.is_one_shot() => {
                self.entries.remove(&id).map(|(_, callback)| callback)
            }
            _ => None,
        }
    }

    /// Forget `id`, returning the host timer to clear and the callback to release
    pub fn cancel(&mut self, id: u64) -> Option<(HostTimer, C)> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
