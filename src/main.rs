//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use lane_runner::best_score::LocalScoreStore;
    use lane_runner::sim::{Command, ObstacleKind, Swipe, VerticalState};
    use lane_runner::snapshot::SpriteKind;
    use lane_runner::{App, Screen, Tuning};

    /// Game instance holding all state
    struct Game {
        app: App<LocalScoreStore>,
        /// Where the current touch began
        touch_start: Option<Vec2>,
        /// Screen painted last frame
        last_screen: Option<Screen>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                app: App::new(Tuning::load(), seed, LocalScoreStore),
                touch_start: None,
                last_screen: None,
            }
        }

        /// Show the element for the current screen, hide the others
        fn update_screens(&mut self, document: &Document) {
            let screen = self.app.screen();
            if self.last_screen == Some(screen) {
                return;
            }
            self.last_screen = Some(screen);

            for (id, visible, base) in [
                ("start-screen", screen == Screen::Start, "screen"),
                ("game-screen", screen == Screen::Playing, ""),
                ("game-over-screen", screen == Screen::GameOver, "screen"),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = match (visible, base.is_empty()) {
                        (true, _) => base.to_string(),
                        (false, true) => "hidden".to_string(),
                        (false, false) => format!("{} hidden", base),
                    };
                    let _ = el.set_attribute("class", &class);
                }
            }

            set_text(document, "best-score", &self.app.best_score().to_string());

            if screen == Screen::GameOver {
                if let Some(outcome) = self.app.last_outcome() {
                    set_text(document, "final-score", &outcome.score.to_string());
                    set_text(document, "final-coins", &outcome.coins.to_string());
                }
                set_text(document, "final-best", &self.app.best_score().to_string());
                if let Some(el) = document.get_element_by_id("new-best") {
                    let class = if self.app.is_new_high_score() { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
        }

        /// Paint HUD, player and track from the current snapshot
        fn render(&self, document: &Document) {
            if self.app.screen() != Screen::Playing {
                return;
            }
            let snap = self.app.snapshot();

            set_text(document, "hud-score", &snap.score.to_string());
            set_text(document, "hud-coins", &snap.coins.to_string());
            set_text(document, "hud-speed", &format!("{} km/h", snap.speed_kmh));

            if let Some(player) = document.get_element_by_id("player") {
                let class = match snap.vertical {
                    VerticalState::Running => "player",
                    VerticalState::Jumping => "player jumping",
                    VerticalState::Sliding => "player sliding",
                };
                let _ = player.set_attribute("class", class);
                let _ = player.set_attribute(
                    "style",
                    &format!("transform: translateX(calc(-50% + {}px))", snap.player_x),
                );
            }

            if let Some(track) = document.get_element_by_id("track") {
                let mut html = String::new();
                for sprite in &snap.sprites {
                    let class = match sprite.kind {
                        SpriteKind::Obstacle(ObstacleKind::Barrier) => "barrier",
                        SpriteKind::Obstacle(ObstacleKind::Low) => "low",
                        SpriteKind::Obstacle(ObstacleKind::Pit) => "pit",
                        SpriteKind::Coin => "coin",
                    };
                    let _ = write!(
                        html,
                        "<div class=\"sprite {}\" style=\"transform: translateX(calc(-50% + {}px)) translateZ({}px) scale({}); opacity: {}\"></div>",
                        class, sprite.x, sprite.distance, sprite.scale, sprite.opacity
                    );
                }
                track.set_inner_html(&html);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Lane Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match g.app.screen() {
                    Screen::Playing => {
                        if let Some(command) = Command::from_key(&key) {
                            event.prevent_default();
                            g.app.command(command);
                        }
                    }
                    Screen::Start | Screen::GameOver => {
                        if key == "Enter" || key == " " {
                            event.prevent_default();
                            g.app.start();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start: remember the origin of the swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().touch_start =
                        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: classify the swipe
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                let Some(start) = g.touch_start.take() else {
                    return;
                };
                if let Some(touch) = event.changed_touches().get(0) {
                    let end = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    let threshold = g.app.swipe_threshold();
                    if let Some(command) = Swipe::new(start, end).classify(threshold) {
                        g.app.command(command);
                    }
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().app.start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().app.menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let document = web_sys::window().unwrap().document().unwrap();

            g.app.frame(time);
            g.update_screens(&document);
            g.render(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);

    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run driven by a simple autopilot
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use lane_runner::consts::FRAME_MS;
    use lane_runner::sim::{Command, GameEvent, Lane, ObstacleKind, RunState, VerticalState};
    use lane_runner::{App, MemoryScoreStore, Screen, ScoreStore, Tuning};

    /// Obstacles closer than this get a reaction
    const LOOKAHEAD: f32 = 140.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 37_500;

    pub fn run(seed: u64) {
        let store = MemoryScoreStore::new();
        let mut app = App::new(Tuning::default(), seed, store.clone());
        app.set_on_game_over(|score, coins| {
            println!("Game over: score {}, coins {}", score, coins);
        });

        app.start();
        let mut now = 0.0;
        for _ in 0..MAX_FRAMES {
            if let Some(command) = autopilot(app.simulation().state()) {
                app.command(command);
            }
            for event in app.frame(now) {
                if let GameEvent::Crashed { kind, .. } = event {
                    log::info!("Autopilot crashed into {:?}", kind);
                }
            }
            if app.screen() != Screen::Playing {
                break;
            }
            now += FRAME_MS;
        }

        let snap = app.snapshot();
        match snap.to_json() {
            Ok(json) => log::debug!(
                "Final snapshot after {} run(s): {}",
                app.simulation().runs(),
                json
            ),
            Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
        }
        println!(
            "Seed {}: score {}, coins {}, speed {} km/h, best {}",
            seed,
            snap.score,
            snap.coins,
            snap.speed_kmh,
            store.read()
        );
    }

    /// Dodge sideways when a lane is clear, otherwise jump or slide
    fn autopilot(state: &RunState) -> Option<Command> {
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.lane == state.player.lane && o.distance > 0.0 && o.distance < LOOKAHEAD)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))?;

        let lane_clear = |lane: Lane| {
            !state
                .obstacles
                .iter()
                .any(|o| o.lane == lane && o.distance > -20.0 && o.distance < LOOKAHEAD * 1.5)
        };

        let left = state.player.lane.shifted_left();
        let right = state.player.lane.shifted_right();
        if left != state.player.lane && lane_clear(left) {
            return Some(Command::ShiftLeft);
        }
        if right != state.player.lane && lane_clear(right) {
            return Some(Command::ShiftRight);
        }

        if state.player.vertical != VerticalState::Running {
            return None;
        }
        match threat.kind {
            ObstacleKind::Low => Some(Command::Slide),
            ObstacleKind::Barrier | ObstacleKind::Pit => Some(Command::Jump),
        }
    }
}
