//! Fruit Slice entry point
//!
//! Handles platform-specific initialization and wires input, timers and the
//! canvas into the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use fruit_slice::consts::*;
    use fruit_slice::platform::TimerHandle;
    use fruit_slice::platform::web::WebScheduler;
    use fruit_slice::renderer::CanvasSurface;
    use fruit_slice::sim::GameEvent;
    use fruit_slice::{Game, Tuning};

    /// Game plus the surface it draws on
    struct Host {
        game: Game<WebScheduler>,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Host {
        /// Map client coordinates to logical playfield units
        fn to_surface(&self, client_x: f64, client_y: f64) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = if rect.width() > 0.0 {
                PLAYFIELD_WIDTH as f64 / rect.width()
            } else {
                1.0
            };
            let sy = if rect.height() > 0.0 {
                PLAYFIELD_HEIGHT as f64 / rect.height()
            } else {
                1.0
            };
            Vec2::new(
                ((client_x - rect.left()) * sx) as f32,
                ((client_y - rect.top()) * sy) as f32,
            )
        }

        fn pointer(&mut self, point: Option<Vec2>) {
            let Host { game, surface, .. } = self;
            game.on_pointer(point, surface);
            self.flush_events();
        }

        fn timer(&mut self, handle: TimerHandle) {
            let Host { game, surface, .. } = self;
            game.on_timer(handle, surface);
            self.flush_events();
        }

        /// The browser has no consumer for events beyond the log
        fn flush_events(&mut self) {
            for event in self.game.session_mut().drain_events() {
                match event {
                    GameEvent::GameOver(reason) => log::info!("Round ended: {:?}", reason),
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    /// Optional `?tuning=<json>` override
    fn load_tuning(window: &web_sys::Window) -> Tuning {
        let search = window.location().search().unwrap_or_default();
        let json = web_sys::UrlSearchParams::new_with_str(&search)
            .ok()
            .and_then(|params| params.get("tuning"));
        match json {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fruit Slice starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let surface = CanvasSurface::new(&canvas, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
            .expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let scheduler = WebScheduler::new();
        let game = Game::new(seed, scheduler, load_tuning(&window));

        let host = Rc::new(RefCell::new(Host {
            game,
            surface,
            canvas: canvas.clone(),
        }));

        // Timers call back into the host; a weak ref avoids a cycle through
        // the scheduler the host owns
        {
            let weak = Rc::downgrade(&host);
            host.borrow().game.scheduler().set_dispatch(move |handle| {
                if let Some(host) = weak.upgrade() {
                    host.borrow_mut().timer(handle);
                }
            });
        }

        setup_input_handlers(&canvas, host.clone());

        {
            let mut h = host.borrow_mut();
            let Host { game, surface, .. } = &mut *h;
            game.start(surface);
        }

        log::info!("Fruit Slice running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        // Mouse press
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host.borrow_mut();
                let point = h.to_surface(event.client_x() as f64, event.client_y() as f64);
                h.pointer(Some(point));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start; an event with no touch points still counts as a tap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress the synthetic mousedown that follows
                event.prevent_default();
                let mut h = host.borrow_mut();
                let point = event
                    .touches()
                    .get(0)
                    .map(|t| h.to_surface(t.client_x() as f64, t.client_y() as f64));
                h.pointer(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Autoplay demo on a virtual clock
    //!
    //! Plays one round with a simple bot that slices the lowest fruit it can
    //! reach without touching a bomb, then reports the outcome.

    use anyhow::Context;
    use glam::Vec2;

    use fruit_slice::platform::ManualScheduler;
    use fruit_slice::renderer::RecordingSurface;
    use fruit_slice::sim::{GameEvent, GamePhase, hit_bomb};
    use fruit_slice::{Game, Tuning};

    /// ~60 Hz display
    const FRAME_MS: u64 = 16;
    /// Bot reaction: one tap every this many frames
    const TAP_EVERY: u64 = 12;
    const MAX_RUN_MS: u64 = 180_000;
    const SEED: u64 = 0x5EED;

    pub fn load_tuning(path: Option<String>) -> anyhow::Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading tuning file {path}"))?;
        Tuning::from_json(&json).with_context(|| format!("parsing tuning file {path}"))
    }

    /// Lowest fruit that can be tapped without also touching a bomb
    fn pick_target(game: &Game<ManualScheduler>) -> Option<Vec2> {
        let session = game.session();
        session
            .fruits
            .iter()
            .filter(|f| hit_bomb(session, f.pos).is_none())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|f| f.pos)
    }

    pub fn run(tuning: Tuning) {
        let mut game = Game::new(SEED, ManualScheduler::new(), tuning);
        let mut surface = RecordingSurface::default();
        game.start(&mut surface);
        game.on_pointer(None, &mut surface);

        let mut now = 0u64;
        let mut sliced = 0u32;
        let mut missed = 0u32;

        while now < MAX_RUN_MS && game.phase() != GamePhase::GameOver {
            now += FRAME_MS;
            while let Some(handle) = game.scheduler_mut().pop_due(now) {
                surface.clear();
                game.on_timer(handle, &mut surface);
            }
            game.scheduler_mut().advance_to(now);

            if let Some(frame) = game.scheduler_mut().take_frame() {
                surface.clear();
                game.on_timer(frame, &mut surface);
            }

            if game.phase() == GamePhase::Playing && game.frames() % TAP_EVERY == 0 {
                if let Some(target) = pick_target(&game) {
                    game.on_pointer(Some(target), &mut surface);
                }
            }

            for event in game.session_mut().drain_events() {
                match event {
                    GameEvent::Sliced { count } => sliced += count,
                    GameEvent::Missed => missed += 1,
                    GameEvent::GameOver(reason) => log::info!("Round ended: {:?}", reason),
                    GameEvent::PhaseChanged(_) => {}
                }
            }
        }

        let session = game.session();
        log::info!(
            "Demo finished after {:.1}s virtual time, {} frames",
            now as f64 / 1000.0,
            game.frames()
        );
        println!(
            "phase={:?} score={} sliced={} missed={}/{} last_draw_calls={}",
            session.phase,
            session.score,
            sliced,
            missed,
            game.tuning().miss_limit,
            surface.calls.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Fruit Slice (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - run with `trunk serve` for web version");

    let tuning = headless::load_tuning(std::env::args().nth(1))?;
    headless::run(tuning);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
