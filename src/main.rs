//! Flappy Arcade entry point
//!
//! Browser: builds the DOM game and drives it from a repeating timer.
//! Native: plays two headless runs with the autopilot and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};

    use flappy_arcade::Settings;
    use flappy_arcade::platform::web::{DomLayout, DomStage};
    use flappy_arcade::sim::{Game, GamePhase, TickOutcome, tick};

    /// Game instance plus its presentation and timer handle
    struct App {
        game: Game,
        stage: DomStage,
        layout: DomLayout,
        /// Active `setInterval` handle
        interval: Option<i32>,
        /// Tick callback, created once and reused for every run
        tick_fn: Option<js_sys::Function>,
    }

    impl App {
        fn start_timer(&mut self) {
            self.stop_timer();
            let Some(tick_fn) = &self.tick_fn else {
                return;
            };
            let Some(window) = web_sys::window() else {
                return;
            };
            let period = self.game.settings.tick_period_ms as i32;
            match window.set_interval_with_callback_and_timeout_and_arguments_0(tick_fn, period) {
                Ok(handle) => self.interval = Some(handle),
                Err(e) => log::error!("Failed to start tick timer: {:?}", e),
            }
        }

        fn stop_timer(&mut self) {
            if let (Some(handle), Some(window)) = (self.interval.take(), web_sys::window()) {
                window.clear_interval_with_handle(handle);
            }
        }

        fn on_tick(&mut self) {
            let outcome = tick(&mut self.game, &self.layout, &mut self.stage);
            if let Some(run) = &self.game.run {
                self.stage.render(run);
            }
            if let TickOutcome::Collided { pair } = outcome {
                log::info!("Crashed into pair {} with score {}", pair, self.game.score());
            }
            if self.game.phase != GamePhase::Playing {
                self.stop_timer();
            }
        }

        fn on_play(&mut self) {
            match self.game.start(&self.layout, &mut self.stage) {
                Ok(()) => self.begin(),
                Err(e) => log::error!("Cannot start: {}", e),
            }
        }

        fn on_restart(&mut self) {
            self.stop_timer();
            match self.game.restart(&self.layout, &mut self.stage) {
                Ok(()) => self.begin(),
                Err(e) => log::error!("Cannot restart: {}", e),
            }
        }

        fn begin(&mut self) {
            if let Some(run) = &self.game.run {
                self.stage.render(run);
            }
            self.start_timer();
        }
    }

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(to_js)?;

        log::info!("Flappy Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let area: HtmlElement = document
            .query_selector("[game]")?
            .ok_or("no [game] element")?
            .dyn_into()?;

        let mut stage = DomStage::new(&document, area)?;
        let layout = stage.layout();

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(Settings::default(), seed).map_err(to_js)?;
        game.present_menu(&mut stage);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            stage,
            layout,
            interval: None,
            tick_fn: None,
        }));

        setup_tick(app.clone());
        setup_buttons(app.clone())?;
        setup_input_handlers(app)?;

        log::info!("Flappy Arcade ready");
        Ok(())
    }

    fn setup_tick(app: Rc<RefCell<App>>) {
        let inner = app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            inner.borrow_mut().on_tick();
        });
        app.borrow_mut().tick_fn = Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Play (menu)
        {
            let inner = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                inner.borrow_mut().on_play();
            });
            app.borrow()
                .stage
                .play_button()
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Restart (during or after a run)
        {
            let inner = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                inner.borrow_mut().on_restart();
            });
            app.borrow()
                .stage
                .restart_button()
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Any key held = climb
        for (event_name, rising) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: KeyboardEvent| {
                app.borrow_mut().game.set_rising(rising);
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serde::Serialize;

    use flappy_arcade::platform::{FixedLayout, RecordingStage};
    use flappy_arcade::sim::{Game, Rect, Run, TickOutcome, tick};
    use flappy_arcade::{GameError, Settings, autopilot};

    /// Runs played per invocation; the restart between them exercises the
    /// high-score fold
    const RUNS: u32 = 2;
    /// Give up on a run after this many ticks (five minutes at 50 Hz)
    const MAX_TICKS: u64 = 5 * 60 * 50;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        run: u32,
        ticks: u64,
        score: i64,
        /// Pair index the avatar hit, if it crashed
        crashed_into: Option<usize>,
        high_score_before: i64,
        /// Avatar box on the last simulated frame
        avatar_box: Option<Rect>,
        /// Full state of the run as it ended
        last_frame: Option<Run>,
    }

    #[derive(Debug, Serialize)]
    struct Report {
        seed: u64,
        runs: Vec<RunSummary>,
        high_score: i64,
    }

    /// Usage: flappy-arcade [settings.json] [seed]
    pub fn run() -> Result<(), GameError> {
        let mut args = std::env::args().skip(1);

        let settings = match args.next() {
            Some(path) => {
                log::info!("Loading settings from {}", path);
                Settings::from_json(&std::fs::read_to_string(&path)?)?
            }
            None => Settings::default(),
        };

        let seed = match args.next().and_then(|s| s.parse().ok()) {
            Some(seed) => seed,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
        };

        let layout = FixedLayout::from_settings(&settings.layout);
        let mut stage = RecordingStage::new();
        let mut game = Game::new(settings, seed)?;
        log::info!("Game initialized with seed: {}", seed);

        game.present_menu(&mut stage);
        let mut runs = Vec::new();

        for index in 1..=RUNS {
            let high_score_before = game.high_score.points();
            if index == 1 {
                game.start(&layout, &mut stage)?;
            } else {
                game.restart(&layout, &mut stage)?;
            }

            let mut crashed_into = None;
            loop {
                if let Some(run) = &game.run {
                    let rising = autopilot::steer(run, &layout);
                    game.set_rising(rising);
                }

                match tick(&mut game, &layout, &mut stage) {
                    TickOutcome::Continue => {}
                    TickOutcome::Collided { pair } => {
                        crashed_into = Some(pair);
                        break;
                    }
                    TickOutcome::Idle => break,
                }

                if game.run.as_ref().is_some_and(|run| run.ticks >= MAX_TICKS) {
                    log::info!("Run {} reached the tick limit", index);
                    game.stop();
                    break;
                }
            }

            runs.push(RunSummary {
                run: index,
                ticks: game.run.as_ref().map_or(0, |run| run.ticks),
                score: game.score(),
                crashed_into,
                high_score_before,
                avatar_box: game.run.as_ref().map(|run| run.avatar_bounds(&layout)),
                last_frame: game.run.clone(),
            });
        }

        let report = Report {
            seed,
            runs,
            high_score: game.high_score.points().max(game.score()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Arcade (native) starting...");
    log::info!("Native mode plays headless autopilot runs - build for wasm32 for the browser version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
