//! Pug Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    use pug_runner::audio::{AudioManager, SoundSink};
    use pug_runner::consts::*;
    use pug_runner::platform::{AssetGate, InputEvent, LocalStore};
    use pug_runner::renderer::CanvasRenderer;
    use pug_runner::sim::SpriteKey;
    use pug_runner::{Driver, Settings, Tuning};

    const BACKGROUND_PATH: &str = "./assets/cloud.png";

    /// Game instance holding all state
    struct Game {
        driver: Driver<LocalStore, AudioManager>,
        renderer: CanvasRenderer,
        gate: AssetGate,
    }

    pub fn run() {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no #gameCanvas")
            .dyn_into()
            .expect("#gameCanvas is not a canvas");
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("2d context unavailable")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load(&LocalStore);
        // Write back so a fresh profile gets an editable settings entry
        settings.save(&LocalStore);
        let tuning = Tuning::preset(settings.variant);
        let mut sound = AudioManager::new();
        sound.set_volume(settings.effective_volume());

        let seed = js_sys::Date::now() as u64;
        let driver = Driver::new(tuning, LocalStore, sound, seed);

        let background = new_image(BACKGROUND_PATH);
        let sprites: HashMap<SpriteKey, HtmlImageElement> = SpriteKey::ALL
            .iter()
            .map(|key| (*key, new_image(key.asset_path())))
            .collect();
        let mut images: Vec<HtmlImageElement> = sprites.values().cloned().collect();
        images.push(background.clone());

        let game = Rc::new(RefCell::new(Game {
            driver,
            renderer: CanvasRenderer::new(ctx, background, sprites),
            gate: AssetGate::new(images.len()),
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Set up input handlers before images settle; the driver ignores
        // input until the gate opens
        setup_input_handlers(game.clone());

        for img in images {
            watch_image(&img, game.clone());
        }
    }

    fn new_image(src: &str) -> HtmlImageElement {
        let img = HtmlImageElement::new().expect("failed to create image");
        img.set_src(src);
        img
    }

    /// Count the image toward the asset gate whether it loads or fails
    fn watch_image(img: &HtmlImageElement, game: Rc<RefCell<Game>>) {
        for (event, failed) in [("load", false), ("error", true)] {
            let game = game.clone();
            let src = img.src();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let opened = {
                    let mut g = game.borrow_mut();
                    let opened = if failed {
                        log::warn!("Asset failed to load: {}", src);
                        g.gate.mark_failed()
                    } else {
                        g.gate.mark_loaded()
                    };
                    if opened {
                        g.driver.assets_ready();
                    }
                    opened
                };
                if opened {
                    request_animation_frame(game.clone());
                }
            });
            let _ = img.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(input) = InputEvent::from_key_code(&event.code()) {
                    event.prevent_default();
                    handle_input(&game, input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press (mouse, touch, pen)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                handle_input(&game, InputEvent::from_pointer_press());
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn handle_input(game: &Rc<RefCell<Game>>, input: InputEvent) {
        let resumed = {
            let mut g = game.borrow_mut();
            g.driver.sound().resume();
            match input {
                InputEvent::Jump => g.driver.jump(),
            }
        };
        if resumed {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = {
            let mut g = game.borrow_mut();
            let Game {
                driver, renderer, ..
            } = &mut *g;
            driver.frame(renderer)
        };
        // Stopped on game over; a restart jump schedules the next frame
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pug Runner (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let mut args = std::env::args().skip(1);
    let variant = args
        .next()
        .and_then(|s| pug_runner::Variant::from_name(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    headless::run(variant, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pug_runner::audio::SoundLog;
    use pug_runner::consts::*;
    use pug_runner::platform::MemoryStore;
    use pug_runner::renderer::RecordingSink;
    use pug_runner::sim::GamePhase;
    use pug_runner::{Driver, Tuning, Variant};

    /// Frames to play before giving up on a run
    const MAX_FRAMES: u64 = 20_000;

    /// Play one run with a simple autopilot that hops to stay mid-screen
    pub fn run(variant: Variant, seed: u64) {
        let mut driver = Driver::new(
            Tuning::preset(variant),
            MemoryStore::new(),
            SoundLog::default(),
            seed,
        );
        let mut sink = RecordingSink::default();
        driver.assets_ready();
        if driver.session().phase == GamePhase::Title {
            driver.jump();
        }

        while driver.is_running() && sink.frames < MAX_FRAMES {
            let body = &driver.session().player.body;
            let next_bottom = body.pos.y + body.size.y + body.velocity + GRAVITY;
            if next_bottom > PLAYFIELD_HEIGHT * 0.7 {
                driver.jump();
            }
            driver.frame(&mut sink);
        }

        let session = driver.session();
        log::info!(
            "Run finished after {} frames: score {}, level {}, high score {}",
            session.frame_counter,
            session.score,
            session.level,
            driver.high_score()
        );
        println!(
            "{} run (seed {}): score {} after {} frames",
            variant.as_str(),
            seed,
            session.score,
            session.frame_counter
        );
    }
}
