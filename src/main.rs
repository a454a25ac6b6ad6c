//! Duckie Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use duckie_dodge::GameConfig;
    use duckie_dodge::platform::{FixedTimestep, InputProvider, KeyState};
    use duckie_dodge::renderer::{HudLabel, RenderState, scene};
    use duckie_dodge::sim::{GameState, advance_frame};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        timestep: FixedTimestep,
        keys: KeyState,
        last_time: f64,
        /// Last label pushed to the DOM, to skip redundant updates
        last_hud: Option<HudLabel>,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            let timestep = FixedTimestep::new(state.config.tick_seconds());
            Self {
                state,
                render_state: None,
                timestep,
                keys: KeyState::new(),
                last_time: 0.0,
                last_hud: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f64) {
            for _ in 0..self.timestep.advance(dt) {
                let input = self.keys.sample(&self.state);
                advance_frame(&mut self.state, &input);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let end_color = self.state.end_screen_color();
            let frame = scene::build(&self.state, end_color);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame.vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if self.last_hud.as_ref() != Some(&frame.hud) {
                update_hud(&frame.hud);
                self.last_hud = Some(frame.hud);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.timestep.reset();
            self.keys.release_all();
        }
    }

    /// Update the HUD label in the DOM
    /// Size the stage and the canvas's CSS box to the configured screen
    fn fit_stage(document: &web_sys::Document, canvas: &HtmlCanvasElement, config: &GameConfig) {
        let (width, height) = config.css_size();
        let stage = document
            .get_element_by_id("stage")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        for style in stage.iter().map(|el| el.style()).chain([canvas.style()]) {
            let _ = style.set_property("width", &width);
            let _ = style.set_property("height", &height);
        }
    }

    fn update_hud(hud: &HudLabel) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document
            .get_element_by_id("hud-label")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            el.set_text_content(Some(&hud.text));
            let style = el.style();
            let _ = style.set_property("color", &hud.color.to_css());
            let _ = style.set_property("left", &format!("{}px", hud.position.x));
            let _ = style.set_property("top", &format!("{}px", hud.position.y));
        }

        // Restart button only makes sense once the run is over
        if let Some(el) = document.get_element_by_id("restart-btn") {
            let class = if hud.text == scene::GAME_OVER_TEXT {
                ""
            } else {
                "hidden"
            };
            let _ = el.set_attribute("class", class);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Duckie Dodge starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let config = GameConfig::load();
        fit_stage(&document, &canvas, &config);
        let screen_size = (config.screen_width as f32, config.screen_height as f32);

        // Backing store matches the game screen, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (f64::from(config.screen_width) * dpr) as u32;
        let height = (f64::from(config.screen_height) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let state = match GameState::with_config(config, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Invalid config: {e}");
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game::new(state)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, screen_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        // Set up input handlers
        setup_input_handlers(game.clone());

        // Set up restart button
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Duckie Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: movement keys, restart once dead
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.keys.key_down(&key) {
                    // Keep arrows from scrolling the page
                    event.prevent_default();
                } else if !g.state.is_alive() && matches!(key.as_str(), "Enter" | "r" | "R") {
                    let seed = js_sys::Date::now() as u64;
                    g.restart(seed);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events will never arrive for held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::info!("Released held keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                g.timestep.step()
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use duckie_dodge::platform::{Autopilot, FixedTimestep, Idle, InputProvider};
    use duckie_dodge::renderer::scene;
    use duckie_dodge::sim::{GameState, advance_frame};
    use duckie_dodge::{ConfigError, GameConfig};

    /// Headless Duckie Dodge run
    #[derive(Parser, Debug)]
    #[command(version, about)]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Maximum ticks to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Let the demo controller steer instead of holding still
        #[arg(long)]
        autopilot: bool,
        /// Pace ticks at the configured rate instead of running flat out
        #[arg(long)]
        realtime: bool,
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }

    /// Sample, tick, then do the (headless) render pass
    fn step(state: &mut GameState, input: &mut dyn InputProvider) {
        let sample = input.sample(state);
        advance_frame(state, &sample);

        let end_color = state.end_screen_color();
        let frame = scene::build(state, end_color);
        let rate = u64::from(state.config.tick_rate);
        if state.time_ticks % rate == 0 {
            log::info!(
                "t={}s hud={:?} obstacles={} vertices={}",
                state.time_ticks / rate,
                frame.hud.text,
                state.obstacles.len(),
                frame.vertices.len()
            );
        }
    }

    pub fn run(args: Args) -> Result<(), ConfigError> {
        let config = match &args.config {
            Some(path) => GameConfig::from_path(path)?,
            None => GameConfig::load(),
        };
        let seed = args.seed.unwrap_or_else(time_seed);
        let mut state = GameState::with_config(config, seed)?;
        log::info!("New run with seed {} ({} ticks max)", seed, args.ticks);

        let mut input: Box<dyn InputProvider> = if args.autopilot {
            Box::new(Autopilot)
        } else {
            Box::new(Idle)
        };

        if args.realtime {
            let mut timestep = FixedTimestep::new(state.config.tick_seconds());
            let mut last = Instant::now();
            while state.is_alive() && state.time_ticks < args.ticks {
                let now = Instant::now();
                let ticks = timestep.advance(now.duration_since(last).as_secs_f64());
                last = now;
                for _ in 0..ticks {
                    step(&mut state, input.as_mut());
                    if !state.is_alive() || state.time_ticks >= args.ticks {
                        break;
                    }
                }
                // Wait out the rest of this tick
                let wait = timestep.step() * (1.0 - timestep.remainder());
                std::thread::sleep(Duration::from_secs_f64(wait));
            }
        } else {
            while state.is_alive() && state.time_ticks < args.ticks {
                step(&mut state, input.as_mut());
            }
        }

        let outcome = if state.is_alive() { "survived" } else { "hit" };
        log::info!("Run finished after {} ticks", state.time_ticks);
        println!(
            "seed={} ticks={} outcome={} score={:.2} obstacles={}",
            seed,
            state.time_ticks,
            outcome,
            state.score,
            state.obstacles.len()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), duckie_dodge::ConfigError> {
    use clap::Parser;

    env_logger::init();
    log::info!("Duckie Dodge (native, headless) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
