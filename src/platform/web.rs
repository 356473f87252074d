//! Browser scheduler: `setInterval`, `setTimeout` and `requestAnimationFrame`
//!
//! Fired handles are passed to a dispatch callback installed by the host once
//! the game exists. Callback closures are held in a `TimerRegistry` and
//! released on a later task once retired, since the retiring call may come
//! from inside the closure itself.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::registry::{HostTimer, TimerRegistry};
use super::{Scheduler, TimerHandle, TimerKind};

type Dispatch = Rc<dyn Fn(TimerHandle)>;
type Registry = Rc<RefCell<TimerRegistry<Closure<dyn FnMut()>>>>;

#[derive(Default)]
pub struct WebScheduler {
    next_id: u64,
    dispatch: Rc<RefCell<Option<Dispatch>>>,
    registry: Registry,
}

impl WebScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the callback that receives fired handles
    pub fn set_dispatch(&self, dispatch: impl Fn(TimerHandle) + 'static) {
        *self.dispatch.borrow_mut() = Some(Rc::new(dispatch));
    }

    fn allocate(&mut self, kind: TimerKind) -> TimerHandle {
        self.next_id += 1;
        TimerHandle {
            id: self.next_id,
            kind,
        }
    }

    /// Create the callback, hand it to `start`, and register the result
    fn schedule(
        &mut self,
        kind: TimerKind,
        start: impl FnOnce(&Window, &Function) -> Result<HostTimer, JsValue>,
    ) -> Option<TimerHandle> {
        let handle = self.allocate(kind);
        let closure = Closure::<dyn FnMut()>::new(forwarder(
            self.dispatch.clone(),
            self.registry.clone(),
            handle,
        ));

        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule {:?} timer on", kind);
            return None;
        };
        match start(&window, closure.as_ref().unchecked_ref()) {
            Ok(timer) => {
                self.registry.borrow_mut().insert(handle.id, timer, closure);
                Some(handle)
            }
            Err(e) => {
                log::error!("Failed to schedule {:?} timer: {:?}", kind, e);
                None
            }
        }
    }
}

/// Closure body shared by all timers: forward the handle to the game
fn forwarder(
    dispatch: Rc<RefCell<Option<Dispatch>>>,
    registry: Registry,
    handle: TimerHandle,
) -> impl Fn() {
    move || {
        let retired = registry.borrow_mut().fired(handle.id);
        if let Some(own) = retired {
            release_later(own);
        }
        // Clone out of the cell so the game may reschedule while handling
        let target = dispatch.borrow().clone();
        match target {
            Some(f) => f(handle),
            None => log::warn!("{:?} timer fired before dispatch was installed", handle.kind),
        }
    }
}

/// Drop `closure` on a later task
fn release_later(closure: Closure<dyn FnMut()>) {
    match web_sys::window() {
        Some(w) => {
            let release = Closure::once_into_js(move || drop(closure));
            if w.set_timeout_with_callback(release.unchecked_ref()).is_err() {
                log::warn!("Could not schedule timer closure release");
            }
        }
        None => closure.forget(),
    }
}

fn clamp_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

impl Scheduler for WebScheduler {
    fn set_interval(&mut self, kind: TimerKind, period_ms: u32) -> Option<TimerHandle> {
        self.schedule(kind, |w, f| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(f, clamp_ms(period_ms))
                .map(HostTimer::Interval)
        })
    }

    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u32) -> Option<TimerHandle> {
        self.schedule(kind, |w, f| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(f, clamp_ms(delay_ms))
                .map(HostTimer::Timeout)
        })
    }

    fn request_frame(&mut self) -> Option<TimerHandle> {
        self.schedule(TimerKind::Frame, |w, f| {
            w.request_animation_frame(f).map(HostTimer::Frame)
        })
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let entry = self.registry.borrow_mut().cancel(handle.id);
        let Some((timer, closure)) = entry else {
            return;
        };
        if let Some(w) = web_sys::window() {
            match timer {
                HostTimer::Interval(id) => w.clear_interval_with_handle(id),
                HostTimer::Timeout(id) => w.clear_timeout_with_handle(id),
                HostTimer::Frame(id) => {
                    let _ = w.cancel_animation_frame(id);
                }
            }
        }
        // An interval may be cancelling itself from inside its own callback
        release_later(closure);
    }
}
