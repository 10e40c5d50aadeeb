//! Dodge Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use dodge_dash::assets::GameAssets;
    use dodge_dash::consts::*;
    use dodge_dash::input::{Key, KeySet};
    use dodge_dash::sim::{GamePhase, GameState, tick};
    use dodge_dash::{highscores, render, ScoreBridge};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: KeySet,
        assets: GameAssets,
        bridge: ScoreBridge,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        /// A frame callback is pending; guards against double RAF chains
        raf_active: bool,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, assets: GameAssets, seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                keys: KeySet::default(),
                assets,
                bridge: ScoreBridge::new(),
                ctx,
                last_time: 0.0,
                raf_active: false,
            }
        }

        /// Update score and best-score HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.bridge.best().to_string()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dodge Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Asset loading happens once; the page's loading indicator stays up
        // until every image has either decoded or fallen back
        let assets = GameAssets::load().await;
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(ctx, assets, seed)));

        log::info!("Game initialized with seed: {}", seed);

        setup_key_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        refresh_high_scores(game.clone());

        // First frame: the not-yet-started overlay
        {
            let g = game.borrow();
            render::draw(&g.ctx, &g.state, &g.assets, js_sys::Date::now());
            g.update_hud();
        }

        log::info!("Dodge Dash ready");
    }

    /// Keyboard listeners live for the page lifetime (`Closure::forget`);
    /// unrecognized keys keep their default browser behavior
    fn setup_key_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().keys.press(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().keys.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_session(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_session(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // One button toggles pause/resume depending on the phase
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let resume = {
                    let mut g = game.borrow_mut();
                    match g.state.phase {
                        GamePhase::Running => {
                            g.state.pause();
                            false
                        }
                        GamePhase::Paused => {
                            g.state.resume();
                            true
                        }
                        _ => false,
                    }
                };
                if resume {
                    start_loop(&game);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause when the tab hides or the window loses focus mid-session
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.is_playing() {
                        g.state.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.is_playing() {
                    g.state.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_session(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let seed = js_sys::Date::now() as u64;
            g.state.start(seed);
            g.bridge.session_started();
            log::info!("Session started with seed: {}", seed);
        }
        start_loop(game);
    }

    /// Kick the frame callback chain if one is not already pending
    fn start_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.raf_active {
                return;
            }
            g.raf_active = true;
            g.last_time = 0.0;
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(&game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: &Rc<RefCell<Game>>, time: f64) {
        let (keep_running, submission) = {
            let g = &mut *game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (((time - g.last_time) / 1000.0) as f32).min(0.1)
            } else {
                FRAME_DT
            };
            g.last_time = time;

            tick(&mut g.state, &g.keys, dt);
            render::draw(&g.ctx, &g.state, &g.assets, time);
            g.update_hud();

            let submission = g
                .bridge
                .pending_submission(g.state.score, g.state.is_game_over());

            // The chain stops on pause, game over, or a never-started state;
            // start/resume kick it off again
            let keep = g.state.is_playing();
            g.raf_active = keep;
            (keep, submission)
        };

        if let Some(score) = submission {
            submit_final_score(game.clone(), score);
        }
        if keep_running {
            request_animation_frame(game.clone());
        }
    }

    /// Re-read the table whenever the cache is missing or stale
    fn refresh_high_scores(game: Rc<RefCell<Game>>) {
        if !game.borrow().bridge.needs_fetch() {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(scores) = highscores::fetch_high_scores().await {
                let mut g = game.borrow_mut();
                g.bridge.set_best_from(&scores);
                g.update_hud();
                log::info!("High score table refreshed ({} entries)", scores.len());
            }
        });
    }

    /// Hand the final score to the collaborator, then refresh the cached best
    fn submit_final_score(game: Rc<RefCell<Game>>, score: u64) {
        wasm_bindgen_futures::spawn_local(async move {
            if highscores::submit_score(score).await {
                game.borrow_mut().bridge.invalidate();
                refresh_high_scores(game.clone());
            } else {
                log::warn!("Score submission failed; local score stands at {}", score);
            }
        });
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
    log::info!("Dodge Dash (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a scripted session through the simulation for up to a minute of
/// simulated time and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use dodge_dash::consts::FRAME_DT;
    use dodge_dash::input::{Key, KeySet};
    use dodge_dash::sim::{GameState, tick};

    let seed = 0x5eed;
    let mut state = GameState::new(seed);
    state.start(seed);

    // Hold down-right and ride until something connects
    let mut keys = KeySet::default();
    keys.press(Key::Down);
    keys.press(Key::Right);

    let mut frames = 0u32;
    while state.is_playing() && frames < 60 * 60 {
        tick(&mut state, &keys, FRAME_DT);
        frames += 1;
    }

    log::info!(
        "demo session: {:.1}s simulated, score {}, game over: {}",
        frames as f32 * FRAME_DT,
        state.score,
        state.is_game_over()
    );
}
