//! Puppet Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use puppet_pop::render::DomRenderer;
    use puppet_pop::sim::{GameState, Phase, TickInput, second_tick, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: DomRenderer,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        /// Advance one frame and sync the DOM
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input.clone();
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.reset_pose = false;

            self.renderer.render(&self.state);
        }

        fn remeasure(&mut self) {
            let (width, height, floor_y, rig_anchor) = self.renderer.measure();
            self.state.world.resize(width, height, floor_y, rig_anchor);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Puppet Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let renderer = DomRenderer::new(&document);
        let (width, height, floor_y, rig_anchor) = renderer.measure();

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed, width, height);
        state.world.resize(width, height, floor_y, rig_anchor);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer,
            input: TickInput::default(),
            last_time: 0.0,
        }));

        setup_keyboard(game.clone());
        setup_resize(game.clone());
        setup_restart_button(game.clone());
        setup_countdown(game.clone());

        request_animation_frame(game);

        log::info!("Puppet Pop running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key press: held flags plus edge-triggered one-shots
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "a" | "arrowleft" => g.input.left = true,
                    "d" | "arrowright" => g.input.right = true,
                    "q" => g.input.arm_left = true,
                    "e" => g.input.arm_right = true,
                    "z" => g.input.leg_left = true,
                    "c" => g.input.leg_right = true,
                    " " | "w" => {
                        g.input.jump = true;
                        event.prevent_default();
                    }
                    "r" => g.input.reset_pose = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key release: held flags only (one-shots expire on their own)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "a" | "arrowleft" => g.input.left = false,
                    "d" | "arrowright" => g.input.right = false,
                    "q" => g.input.arm_left = false,
                    "e" => g.input.arm_right = false,
                    "z" => g.input.leg_left = false,
                    "c" => g.input.leg_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().remeasure();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == Phase::Over {
                    g.state.restart();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("no #restart-btn in page; rounds cannot be restarted");
        }
    }

    /// The countdown runs on its own one-second interval, decoupled from the
    /// frame loop.
    fn setup_countdown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            second_tick(&mut game.borrow_mut().state);
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        );
        closure.forget();
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use puppet_pop::consts::ROUND_SECONDS;
    use puppet_pop::sim::{GameState, Phase, TickInput, second_tick, tick};

    env_logger::init();
    log::info!("Puppet Pop (native) starting...");
    log::info!("Headless smoke run - serve the wasm build for the playable version");

    // One full round at 60 fps with the puppet running right and flailing;
    // sanity-checks the sim end to end without a browser.
    let mut state = GameState::new(0xB411_0075, 1280.0, 800.0);
    let input = TickInput {
        right: true,
        arm_left: true,
        arm_right: true,
        ..Default::default()
    };
    let dt = 1.0 / 60.0;
    for second in 0..ROUND_SECONDS {
        for _ in 0..60 {
            tick(&mut state, &input, dt);
        }
        second_tick(&mut state);
        if second % 10 == 9 {
            log::info!(
                "t+{:2}s score={} balloons={}",
                second + 1,
                state.score,
                state.balloons.len()
            );
        }
    }
    assert_eq!(state.phase, Phase::Over);
    println!("Round over. Final score: {}", state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
