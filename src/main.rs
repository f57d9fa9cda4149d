//! Heart Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use heart_catcher::consts::*;
    use heart_catcher::renderer::CanvasRenderer;
    use heart_catcher::{Game, GameConfig, GameEvent, Preset};

    type SharedGame = Rc<RefCell<Shell>>;

    /// Game plus the bits of the page it drives
    struct Shell {
        game: Game<CanvasRenderer>,
        last_time: f64,
    }

    impl Shell {
        /// Run simulation for one animation frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                self.game.config().tick_dt()
            };
            self.last_time = time;
            self.game.advance(dt);
            self.apply_events();
        }

        /// Reflect session events in the DOM
        fn apply_events(&mut self) {
            loop {
                let events = self.game.drain_events();
                if events.is_empty() {
                    break;
                }
                for event in events {
                    match event {
                        GameEvent::Started => {
                            show_screen("game-screen");
                            set_pause_label(false);
                        }
                        GameEvent::Paused => set_pause_label(true),
                        GameEvent::Resumed => set_pause_label(false),
                        GameEvent::ScoreChanged { .. } => {}
                        GameEvent::Won { score } => {
                            log::info!("Victory with {} points", score);
                            set_text("final-score", &score.to_string());
                        }
                        GameEvent::ShowWinScreen => show_screen("win-screen"),
                        GameEvent::Lost { score } => {
                            if let Some(window) = web_sys::window() {
                                let _ = window.alert_with_message(&format!(
                                    "Game over! Your score dropped to {}.",
                                    score
                                ));
                            }
                            self.game.show_menu();
                        }
                        GameEvent::ShowMenu => show_screen("main-menu"),
                    }
                }
            }
        }

        /// Match the canvas to its container and tell the game
        fn fit_canvas(&mut self) {
            let (width, height) = canvas_size(self.game.renderer().canvas());
            let canvas = self.game.renderer().canvas();
            canvas.set_width(width);
            canvas.set_height(height);
            if let Err(e) = self.game.resize(width as f32, height as f32) {
                log::warn!("Ignoring resize: {}", e);
            }
        }
    }

    fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        match canvas.parent_element() {
            Some(container) => (
                container.client_width().max(0) as u32,
                (container.client_height() as f32 - HUD_STRIP_HEIGHT).max(0.0) as u32,
            ),
            None => (FALLBACK_FIELD_WIDTH as u32, FALLBACK_FIELD_HEIGHT as u32),
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn show_screen(id: &str) {
        let Some(document) = document() else { return };
        for screen in ["main-menu", "game-screen", "win-screen"] {
            if let Some(el) = document.get_element_by_id(screen) {
                let classes = el.class_list();
                let _ = if screen == id {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_pause_label(paused: bool) {
        let Some(btn) = document()
            .and_then(|d| d.get_element_by_id("pause-btn"))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        btn.set_text_content(Some(if paused { "▶️ Resume" } else { "⏸️ Pause" }));
        let _ = btn
            .style()
            .set_property("background-color", if paused { "#00b894" } else { "#6c5ce7" });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Heart Catcher starting...");

        let Some(document) = document() else {
            log::error!("No document, cannot start");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas not found!");
            return;
        };

        let (width, height) = canvas_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let renderer = match CanvasRenderer::new(canvas.clone(), "game-background.jpg") {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Renderer init failed: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(startup_config(), renderer, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Game init failed: {}", e);
                return;
            }
        };
        let shell = Rc::new(RefCell::new(Shell {
            game,
            last_time: 0.0,
        }));

        setup_buttons(shell.clone());
        setup_canvas_input(&canvas, shell.clone());
        setup_resize(shell.clone());

        request_animation_frame(shell);
        log::info!("Heart Catcher ready");
    }

    /// Stored config, with a `?preset=` from the URL applied and remembered
    fn startup_config() -> GameConfig {
        let mut config = GameConfig::load();
        let preset = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|query| Preset::from_query(&query));
        if let Some(preset) = preset {
            log::info!("Using {} preset from URL", preset.as_str());
            config.apply_preset(preset);
            config.save();
        }
        config
    }

    fn on_click(id: &str, shell: SharedGame, action: fn(&mut Shell)) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut s = shell.borrow_mut();
            action(&mut s);
            s.apply_events();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(shell: SharedGame) {
        on_click("start-btn", shell.clone(), |s| s.game.start());
        on_click("pause-btn", shell.clone(), |s| s.game.toggle_pause());
        on_click("menu-btn", shell.clone(), |s| s.game.show_menu());
        on_click("restart-btn", shell, |s| s.game.restart());
    }

    fn setup_canvas_input(canvas: &HtmlCanvasElement, shell: SharedGame) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Client space -> canvas pixel space
            let rect = canvas_clone.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let scale_x = canvas_clone.width() as f64 / rect.width();
            let scale_y = canvas_clone.height() as f64 / rect.height();
            let x = (event.client_x() as f64 - rect.left()) * scale_x;
            let y = (event.client_y() as f64 - rect.top()) * scale_y;

            let mut s = shell.borrow_mut();
            if s.game.handle_tap(x as f32, y as f32).is_some() {
                tap_feedback(&canvas_clone);
            }
            s.apply_events();
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Brief squeeze on a successful tap
    fn tap_feedback(canvas: &HtmlCanvasElement) {
        let _ = canvas.style().set_property("transform", "scale(0.98)");
        let canvas = canvas.clone();
        let closure = Closure::once(move || {
            let _ = canvas.style().set_property("transform", "scale(1)");
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                100,
            );
        }
        closure.forget();
    }

    fn setup_resize(shell: SharedGame) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            shell.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(shell: SharedGame) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(shell: SharedGame, time: f64) {
        shell.borrow_mut().update(time);
        request_animation_frame(shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heart Catcher (native) starting...");
    log::info!("Native mode runs a headless autoplay round - build for wasm32 to play");

    let options = match native::Options::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: heart-catcher [--preset classic|relaxed] [--seed N] [CONFIG.json]");
            std::process::exit(2);
        }
    };

    match native::autoplay(&options) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use heart_catcher::renderer::NullRenderer;
    use heart_catcher::sim::EntityKind;
    use heart_catcher::{Game, GameConfig, GameError, GameEvent, GamePhase, Preset};

    /// Simulated wall-clock frame
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_SECONDS: f32 = 240.0;
    /// Frames between autoplay taps
    const TAP_EVERY: u32 = 20;

    pub struct Options {
        config: GameConfig,
        seed: u64,
    }

    impl Options {
        /// Parse `[--preset NAME] [--seed N] [CONFIG.json]`. A preset is applied on
        /// top of the config file regardless of argument order.
        pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut preset = None;
            let mut path = None;
            let mut seed = 42;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--preset" => {
                        let name = args.next().ok_or("--preset needs a value")?;
                        preset = Some(
                            Preset::from_str(&name)
                                .ok_or_else(|| format!("unknown preset '{}'", name))?,
                        );
                    }
                    "--seed" => {
                        let value = args.next().ok_or("--seed needs a value")?;
                        seed = value
                            .parse()
                            .map_err(|_| format!("bad seed '{}'", value))?;
                    }
                    other => path = Some(std::path::PathBuf::from(other)),
                }
            }

            let mut config = match path {
                Some(path) => GameConfig::load_file(&path).map_err(|e| e.to_string())?,
                None => GameConfig::default(),
            };
            if let Some(preset) = preset {
                config.apply_preset(preset);
            }
            Ok(Self { config, seed })
        }
    }

    /// Play one round headless, tapping the lowest visible heart now and then
    pub fn autoplay(options: &Options) -> Result<String, GameError> {
        let mut game = Game::new(options.config.clone(), NullRenderer::default(), options.seed)?;
        game.start();

        let mut frame = 0u32;
        let mut outcome = None;
        while outcome.is_none() && (frame as f32) * FRAME_DT < MAX_SECONDS {
            game.advance(FRAME_DT);
            frame += 1;

            if frame % TAP_EVERY == 0 {
                let field = game.field();
                let target = game
                    .state()
                    .entities
                    .iter()
                    .filter(|e| e.kind == EntityKind::Heart && field.contains(e.center()))
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|e| e.center());
                if let Some(c) = target {
                    game.handle_tap(c.x, c.y);
                }
            }

            for event in game.drain_events() {
                match event {
                    GameEvent::Won { .. } | GameEvent::Lost { .. } => outcome = Some(game.phase()),
                    GameEvent::ScoreChanged { score } => log::debug!("score {}", score),
                    _ => {}
                }
            }
        }

        let state = game.state();
        let result = match outcome {
            Some(GamePhase::Won) => "won",
            Some(GamePhase::Lost) => "lost",
            _ => "timed out",
        };
        Ok(format!(
            "Round {} after {:.1}s: score {}, hearts {}, missed {}, final speed {:.3}",
            result,
            frame as f32 * FRAME_DT,
            state.score,
            state.hearts_clicked,
            state.hearts_missed,
            state.current_speed
        ))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autoplay_wins_classic_round() {
            let options = Options::from_args(std::iter::empty()).unwrap();
            let summary = autoplay(&options).unwrap();
            assert!(summary.starts_with("Round won"), "{}", summary);
        }

        #[test]
        fn test_args() {
            let args = ["--preset", "relaxed", "--seed", "7"].map(String::from);
            let options = Options::from_args(args.into_iter()).unwrap();
            assert_eq!(options.seed, 7);
            assert_eq!(options.config.target_score, 300);

            let args = ["--seed", "x"].map(String::from);
            assert!(Options::from_args(args.into_iter()).is_err());
            let args = ["--preset"].map(String::from);
            assert!(Options::from_args(args.into_iter()).is_err());
        }

        #[test]
        fn test_preset_applies_over_config_file() {
            let path = std::env::temp_dir().join(format!("heart_catcher_args_{}.json", std::process::id()));
            std::fs::write(&path, r#"{ "target_score": 1000, "bomb_points": -30 }"#).unwrap();
            let path_arg = path.to_string_lossy().into_owned();

            let args = ["--preset".to_string(), "relaxed".to_string(), path_arg.clone()];
            let options = Options::from_args(args.into_iter()).unwrap();
            assert_eq!(options.config.target_score, 300);
            assert_eq!(options.config.bomb_points, -30);

            let options = Options::from_args(std::iter::once(path_arg)).unwrap();
            assert_eq!(options.config.target_score, 1000);

            std::fs::remove_file(&path).unwrap();
        }
    }
}
