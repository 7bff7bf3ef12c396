//! Run and Gun entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use run_and_gun::audio::AudioManager;
    use run_and_gun::consts::*;
    use run_and_gun::input::InputState;
    use run_and_gun::render::{Surface, TextAlign, render_frame};
    use run_and_gun::sim::{GameState, Rect, tick};
    use run_and_gun::{Camera, FixedStepLoop, FrameCallbacks, FrameHook, InitError, Settings};

    const CANVAS_ID: &str = "canvas";

    /// Keys the page should not scroll on
    const CAPTURED_KEYS: &[&str] = &["Space", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

    /// Canvas 2D context as a drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
    }

    impl CanvasSurface {
        fn new(canvas: &HtmlCanvasElement) -> Result<Self, InitError> {
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .ok_or(InitError::NoDrawingContext)?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| InitError::NoDrawingContext)?;
            Ok(Self {
                ctx,
                width: canvas.width() as f32,
                height: canvas.height() as f32,
            })
        }
    }

    impl Surface for CanvasSurface {
        fn viewport(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn clear(&mut self, color: &str) {
            self.ctx.save();
            let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            self.ctx.set_fill_style_str(color);
            self.ctx
                .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
            self.ctx.restore();
        }

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            );
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: &str, align: TextAlign) {
            self.ctx.set_fill_style_str(color);
            self.ctx.set_font(&format!("{size}px monospace"));
            self.ctx.set_text_align(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
                TextAlign::Right => "right",
            });
            let _ = self.ctx.fill_text(text, x as f64, y as f64);
        }

        fn set_translation(&mut self, offset: Vec2) {
            let _ = self
                .ctx
                .set_transform(1.0, 0.0, 0.0, 1.0, offset.x as f64, offset.y as f64);
        }
    }

    /// `requestAnimationFrame` as a frame hook
    struct RafHook {
        window: web_sys::Window,
        runner: Weak<RefCell<Runner>>,
    }

    impl std::fmt::Debug for RafHook {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("RafHook").finish_non_exhaustive()
        }
    }

    impl FrameHook for RafHook {
        type Handle = i32;

        fn request_frame(&mut self) -> i32 {
            let runner = self.runner.clone();
            let closure = Closure::once_into_js(move |time: f64| {
                if let Some(runner) = runner.upgrade() {
                    on_frame(&runner, time);
                }
            });
            match self
                .window
                .request_animation_frame(closure.unchecked_ref())
            {
                Ok(handle) => handle,
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    0
                }
            }
        }

        fn cancel_frame(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// Everything one frame touches
    struct Game {
        state: GameState,
        input: InputState,
        camera: Camera,
        audio: AudioManager,
        settings: Settings,
        surface: CanvasSurface,
    }

    impl FrameCallbacks for Game {
        fn update(&mut self, dt: f32) {
            let input = self.input.snapshot();
            tick(&mut self.state, &input, dt);
            self.input.end_tick();

            let events = self.state.drain_events();
            self.audio.handle_events(&events);
        }

        fn render(&mut self) {
            self.camera
                .follow(&self.state.player.body, self.state.level());
            render_frame(
                &self.state,
                &self.camera,
                &mut self.surface,
                self.settings.show_controls,
            );
        }
    }

    struct Runner {
        frame_loop: FixedStepLoop<RafHook>,
        game: Game,
    }

    fn on_frame(runner: &Rc<RefCell<Runner>>, time_ms: f64) {
        let mut runner = runner.borrow_mut();
        let Runner { frame_loop, game } = &mut *runner;
        frame_loop.frame(time_ms / 1000.0, game);
    }

    fn now_seconds(window: &web_sys::Window) -> f64 {
        window.performance().map_or(0.0, |p| p.now()) / 1000.0
    }

    pub fn run() -> Result<(), InitError> {
        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoWindow)?;

        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| InitError::MissingCanvas(CANVAS_ID.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| InitError::MissingCanvas(CANVAS_ID.to_string()))?;
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);
        let surface = CanvasSurface::new(&canvas)?;

        let settings = Settings::load();
        let state = GameState::with_builtin_levels()?;
        log::info!("Loaded {} levels", state.levels.len());

        let game = Game {
            state,
            input: InputState::new(),
            camera: Camera::new(VIEW_WIDTH, VIEW_HEIGHT),
            audio: AudioManager::new(&settings),
            settings,
            surface,
        };
        let max_substeps = game.settings.max_substeps;

        let runner = Rc::new_cyclic(|weak| {
            let hook = RafHook {
                window: window.clone(),
                runner: weak.clone(),
            };
            let mut frame_loop = FixedStepLoop::new(hook);
            frame_loop.set_max_substeps(max_substeps);
            RefCell::new(Runner { frame_loop, game })
        });

        setup_input_handlers(&window, runner.clone());
        runner.borrow_mut().frame_loop.start(now_seconds(&window));

        // Lives for the rest of the page
        std::mem::forget(runner);
        log::info!("Run and Gun running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, runner: Rc<RefCell<Runner>>) {
        // Key down
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if CAPTURED_KEYS.contains(&code.as_str()) {
                    event.prevent_default();
                }
                let mut r = runner.borrow_mut();
                // Browsers only allow audio after a user gesture
                r.game.audio.resume();
                if code == "KeyM" && !event.repeat() {
                    let game = &mut r.game;
                    game.settings.muted = !game.settings.muted;
                    game.audio.apply_settings(&game.settings);
                    game.settings.save();
                    log::info!("Muted: {}", game.settings.muted);
                }
                r.game.input.key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                runner.borrow_mut().game.input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus drops held keys so the player doesn't run off
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                runner.borrow_mut().game.input.release_all();
                log::debug!("Window blurred, input released");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Run and Gun starting...");

    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), run_and_gun::InitError> {
    env_logger::init();
    log::info!("Run and Gun (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    headless::run_demo(60.0)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use run_and_gun::audio::AudioManager;
    use run_and_gun::render::{Surface, TextAlign, render_frame};
    use run_and_gun::scheduler::ManualFrameHook;
    use run_and_gun::sim::{GameState, Rect, TickInput, tick};
    use run_and_gun::{Camera, FixedStepLoop, FrameCallbacks, InitError, Settings};

    /// Surface that only counts what would be drawn
    #[derive(Default)]
    struct CountingSurface {
        rects: u64,
        texts: u64,
    }

    impl Surface for CountingSurface {
        fn viewport(&self) -> (f32, f32) {
            (run_and_gun::consts::VIEW_WIDTH, run_and_gun::consts::VIEW_HEIGHT)
        }

        fn clear(&mut self, _color: &str) {}

        fn fill_rect(&mut self, _rect: Rect, _color: &str) {
            self.rects += 1;
        }

        fn draw_text(&mut self, _text: &str, _x: f32, _y: f32, _size: f32, _color: &str, _align: TextAlign) {
            self.texts += 1;
        }

        fn set_translation(&mut self, _offset: Vec2) {}
    }

    /// Scripted player: run right, shoot constantly, hop every second
    struct Demo {
        state: GameState,
        camera: Camera,
        audio: AudioManager,
        surface: CountingSurface,
        settings: Settings,
        ticks: u64,
    }

    impl Demo {
        fn scripted_input(&self) -> TickInput {
            TickInput {
                axis_x: 1,
                jump: self.ticks % 60 == 0,
                fire: true,
                // Keep going after a loss
                restart: self.state.phase.is_terminal() && self.ticks % 120 == 0,
                ..Default::default()
            }
        }
    }

    impl FrameCallbacks for Demo {
        fn update(&mut self, dt: f32) {
            let input = self.scripted_input();
            tick(&mut self.state, &input, dt);
            self.ticks += 1;
            let events = self.state.drain_events();
            self.audio.handle_events(&events);
        }

        fn render(&mut self) {
            self.camera.follow(&self.state.player.body, self.state.level());
            render_frame(
                &self.state,
                &self.camera,
                &mut self.surface,
                self.settings.show_controls,
            );
        }
    }

    /// Drive the game for `seconds` of simulated 60 fps frames
    pub fn run_demo(seconds: f64) -> Result<(), InitError> {
        let settings = Settings::load();
        let mut demo = Demo {
            state: GameState::with_builtin_levels()?,
            camera: Camera::default(),
            audio: AudioManager::new(&settings),
            surface: CountingSurface::default(),
            settings,
            ticks: 0,
        };

        let mut frame_loop = FixedStepLoop::new(ManualFrameHook::new());
        frame_loop.set_max_substeps(demo.settings.max_substeps);
        frame_loop.start(0.0);

        let frames = (seconds * 60.0) as u64;
        for frame in 1..=frames {
            frame_loop.frame(frame as f64 / 60.0, &mut demo);
        }
        frame_loop.stop();

        let state = &demo.state;
        log::info!(
            "Demo finished after {} ticks: level {} ({:?}), lives {}, {} enemies left",
            demo.ticks,
            state.level_index + 1,
            state.phase,
            state.player.lives,
            state.enemies.len()
        );
        log::info!(
            "Drew {} rects and {} texts, played {} sounds",
            demo.surface.rects,
            demo.surface.texts,
            demo.audio.played
        );
        Ok(())
    }
}
