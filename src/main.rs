//! Neon Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use neon_invaders::audio::{Mixer, WebAudio};
    use neon_invaders::platform::{KeyState, SystemClock};
    use neon_invaders::renderer::{Canvas2d, RenderSink};
    use neon_invaders::sim::GamePhase;
    use neon_invaders::{Driver, GameError, Result, Settings};

    /// Game instance holding all state
    struct Game {
        driver: Driver<SystemClock>,
        keys: KeyState,
        audio: WebAudio,
        canvas: Option<Canvas2d>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let audio = WebAudio::new(Mixer::from_settings(&settings));
            Self {
                driver: Driver::new(seed, SystemClock::new(), settings),
                keys: KeyState::new(),
                audio,
                canvas: None,
            }
        }

        fn frame(&mut self) {
            let Game {
                driver,
                keys,
                audio,
                canvas,
            } = self;
            driver.frame(
                keys,
                audio,
                canvas.as_mut().map(|c| c as &mut dyn RenderSink),
            );
        }

        /// Flip mute, apply it to the synth and persist it
        fn toggle_mute(&mut self) {
            let settings = &mut self.driver.settings;
            settings.muted = !settings.muted;
            self.audio.set_mixer(Mixer::from_settings(settings));
            settings.save();
            log::info!("Audio {}", if settings.muted { "muted" } else { "unmuted" });
        }

        /// Pause if a game is running; held keys are dropped either way
        fn auto_pause(&mut self, reason: &str) {
            self.keys.release_all();
            if self.driver.state.pause() {
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.driver.hud();

            let set_text = |selector: &str, text: String| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(&text));
                }
            };
            set_text("#hud-score .hud-value", hud.score.to_string());
            set_text("#hud-lives .hud-value", hud.lives.to_string());
            set_text("#hud-level .hud-value", hud.level.to_string());
            set_text("#hud-fps .hud-value", hud.fps.to_string());

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("hud-fps", self.driver.settings.show_fps);
            show("start-screen", hud.phase == GamePhase::Start);
            show("pause-menu", hud.phase == GamePhase::Paused);
            show("game-over", hud.phase == GamePhase::GameOver);

            if hud.phase == GamePhase::GameOver {
                set_text("#final-score", hud.score.to_string());
                set_text("#final-level", hud.level.to_string());
            }
        }
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Invaders starting...");

        let window = web_sys::window().ok_or(GameError::SurfaceUnavailable { context: "window" })?;
        let document = window
            .document()
            .ok_or(GameError::SurfaceUnavailable { context: "document" })?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Size the backing store for the display, then attach the 2D context
        match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => {
                let dpr = window.device_pixel_ratio();
                canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
                canvas.set_height((canvas.client_height() as f64 * dpr) as u32);
                match Canvas2d::new(&canvas) {
                    Ok(sink) => game.borrow_mut().canvas = Some(sink),
                    Err(e) => log::warn!("{} - running without rendering", e),
                }
            }
            None => log::warn!("No #canvas element - running without rendering"),
        }

        setup_keyboard(&window, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Neon Invaders running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "Enter" => {
                        // First user gesture also unlocks audio
                        g.audio.resume();
                        if g.driver.confirm() {
                            log::info!("New game (level {})", g.driver.state.level);
                        }
                    }
                    "Escape" | "p" | "P" => {
                        g.driver.toggle_pause();
                    }
                    "m" | "M" => g.toggle_mute(),
                    _ => {
                        // Keep arrows and space from scrolling the page
                        if g.keys.key_down(&key) {
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside); keyups will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "neon-invaders")]
#[command(about = "Headless Neon Invaders run driven by an autopilot")]
struct Args {
    /// World RNG seed
    #[arg(default_value_t = 0x5EED)]
    seed: u64,
    /// Frames to simulate at 60 Hz (stops early on game over)
    #[arg(default_value_t = 3600)]
    frames: u32,
    /// Settings JSON file; defaults are used when missing or invalid
    #[arg(long, default_value = "neon_invaders_settings.json")]
    settings: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use neon_invaders::platform::ManualClock;
    use neon_invaders::renderer::DrawList;
    use neon_invaders::sim::GamePhase;
    use neon_invaders::{Driver, Settings, SoundEvent};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let Args {
        seed,
        frames,
        settings,
    } = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Invaders (native) starting...");
    log::info!("Native mode runs headless on autopilot - run with `trunk serve` for web version");

    let settings = Settings::load_or_default(&settings);
    let mut driver = Driver::new(seed, ManualClock::new(0.0), settings);
    let mut sounds: Vec<SoundEvent> = Vec::new();
    let mut list = DrawList::new();

    driver.confirm();
    log::info!("Seed {}, running up to {} frames", seed, frames);

    for frame in 0..frames {
        let mut input = autopilot(&driver.state);
        let phase = driver.frame(&mut input, &mut sounds, Some(&mut list));
        driver.clock().advance(FRAME_MS);

        if phase == GamePhase::GameOver {
            log::info!("Game over after {} frames", frame + 1);
            break;
        }
    }

    let hud = driver.hud();
    let shots = sounds.iter().filter(|s| **s == SoundEvent::Shoot).count();
    let kills = sounds.iter().filter(|s| **s == SoundEvent::Explosion).count();
    log::info!(
        "Final: score {}, lives {}, level {}, phase {} ({} shots, {} explosions, {} draw commands last frame)",
        hud.score,
        hud.lives,
        hud.level,
        hud.phase.as_str(),
        shots,
        kills,
        list.len()
    );
    match serde_json::to_string(&hud) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize HUD: {}", e),
    }
}

/// Steer under the closest enemy column and hold fire
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &neon_invaders::sim::GameState) -> neon_invaders::sim::TickInput {
    let ship = state.player.body.center().x;
    let target = state
        .enemies
        .iter()
        .map(|e| e.body.center().x)
        .min_by(|a, b| (a - ship).abs().total_cmp(&(b - ship).abs()));

    let (left, right) = match target {
        Some(x) if x < ship - 4.0 => (true, false),
        Some(x) if x > ship + 4.0 => (false, true),
        _ => (false, false),
    };

    neon_invaders::sim::TickInput {
        left,
        right,
        shoot: true,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["neon-invaders"]).unwrap();
        assert_eq!(args.seed, 0x5EED);
        assert_eq!(args.frames, 3600);
        assert_eq!(args.settings, std::path::PathBuf::from("neon_invaders_settings.json"));
    }

    #[test]
    fn test_args_positional() {
        let args = Args::try_parse_from(["neon-invaders", "7", "120", "--settings", "x.json"]).unwrap();
        assert_eq!(args.seed, 7);
        assert_eq!(args.frames, 120);
        assert_eq!(args.settings, std::path::PathBuf::from("x.json"));
    }

    #[test]
    fn test_args_reject_bad_numbers() {
        assert!(Args::try_parse_from(["neon-invaders", "notanumber", "5"]).is_err());
        assert!(Args::try_parse_from(["neon-invaders", "1", "-3"]).is_err());
    }
}
