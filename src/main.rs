//! Meteor Dodge entry point
//!
//! Handles platform-specific initialization and drives the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use meteor_dodge::FrameClock;
    use meteor_dodge::Tuning;
    use meteor_dodge::consts::*;
    use meteor_dodge::dom::DomPresentation;
    use meteor_dodge::presentation::{self, Presentation, Screen};
    use meteor_dodge::sim::{Command, GameSession, SessionEvent, handle_command, tick};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        clock: FrameClock,
        presentation: DomPresentation,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Meteor Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let tuning_json = document
            .get_element_by_id("game-area")
            .and_then(|el| el.get_attribute("data-tuning"));
        let tuning = Tuning::from_json(tuning_json.as_deref());

        let mut session = GameSession::with_tuning(seed, tuning);
        let (width, height) = viewport_size(&window);
        session.set_viewport(width, height);

        let mut dom = DomPresentation::new(&document);
        dom.show_screen(Screen::Menu);

        let game = Rc::new(RefCell::new(Game {
            session,
            clock: FrameClock::new(),
            presentation: dom,
        }));

        setup_input_handlers(game);

        log::info!("Meteor Dodge ready (seed {seed})");
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::from(DEFAULT_VIEWPORT_WIDTH));
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::from(DEFAULT_VIEWPORT_HEIGHT));
        (width as f32, height as f32)
    }

    /// Apply one command, mirror the results to the page, and spin up a new
    /// frame chain when a run starts.
    fn dispatch(game: &Rc<RefCell<Game>>, command: Command) {
        let started = {
            let g = &mut *game.borrow_mut();
            let events = handle_command(&mut g.session, command);
            for event in &events {
                match event {
                    SessionEvent::Started => g.clock.start(now_ms()),
                    SessionEvent::PauseChanged { paused: true } => g.clock.pause(),
                    SessionEvent::PauseChanged { paused: false } => g.clock.resume(now_ms()),
                    _ => {}
                }
            }
            presentation::apply_events(&g.session, &events, &mut g.presentation);
            // Move commands produce no events but shift the player
            g.presentation.set_player_position(g.session.player_position);
            events.iter().any(|e| matches!(e, SessionEvent::Started))
        };

        if started {
            let epoch = game.borrow().clock.epoch();
            schedule_frame(game.clone(), epoch);
        }
    }

    fn schedule_frame(game: Rc<RefCell<Game>>, epoch: u64) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |timestamp: f64| {
            if on_frame(&game, epoch, timestamp) {
                schedule_frame(game, epoch);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One frame callback. Returns whether the chain should continue.
    fn on_frame(game: &Rc<RefCell<Game>>, epoch: u64, timestamp: f64) -> bool {
        let g = &mut *game.borrow_mut();

        // A restart supersedes this chain
        if epoch != g.clock.epoch() {
            return false;
        }
        let Some(delta_ms) = g.clock.frame(timestamp) else {
            return false;
        };

        let events = tick(&mut g.session, delta_ms as f32);
        let ended = events
            .iter()
            .any(|e| matches!(e, SessionEvent::GameOver { .. }));

        presentation::apply_events(&g.session, &events, &mut g.presentation);
        presentation::sync_frame(&g.session, &mut g.presentation);

        if ended {
            g.clock.stop();
            return false;
        }
        true
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "ArrowLeft" => dispatch(&game, Command::MoveLeft),
                    "ArrowRight" => dispatch(&game, Command::MoveRight),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Buttons
        for (id, command) in [
            ("start-button", Command::Start),
            ("restart-button", Command::Restart),
            ("mute-button", Command::ToggleMute),
            ("pause-button", Command::TogglePause),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    dispatch(&game, command);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            } else {
                log::warn!("no #{id} on page, control disabled");
            }
        }

        // The playfield bottom follows the window
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let window = web_sys::window().expect("no window");
                let (width, height) = viewport_size(&window);
                game.borrow_mut().session.set_viewport(width, height);
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use meteor_dodge::sim::{Command, GamePhase, GameSession, SessionEvent, handle_command, tick};

    env_logger::init();
    log::info!("Meteor Dodge (native) starting...");
    log::info!("The playable build targets wasm32 - this is a headless demo run");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = GameSession::new(seed);
    session.set_viewport(1280.0, 720.0);
    handle_command(&mut session, Command::Start);

    let mut frames: u64 = 0;
    let mut spawned: u32 = 0;
    let mut hits: u32 = 0;
    while session.phase != GamePhase::GameOver && frames < 50_000 {
        // Sweep the player back and forth to guarantee some action
        let command = if frames % 30 < 15 {
            Command::MoveLeft
        } else {
            Command::MoveRight
        };
        handle_command(&mut session, command);

        for event in tick(&mut session, 16.0) {
            match event {
                SessionEvent::ObstacleSpawned { .. } => spawned += 1,
                SessionEvent::Collision { lives_left, .. } => {
                    hits += 1;
                    log::info!("hit at score {}, {lives_left} lives left", session.score);
                }
                _ => {}
            }
        }
        frames += 1;
    }

    println!(
        "headless run (seed {seed}): score {} over {frames} frames, {spawned} obstacles, {hits} hits",
        session.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
