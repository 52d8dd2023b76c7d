//! Sphere Field entry point
//!
//! Browser: wires DOM events into the app and runs the animation frame loop.
//! Native: runs the simulation headless and logs a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

    use sphere_field::renderer::{CanvasSurface, render_frame};
    use sphere_field::sim::Bounds;
    use sphere_field::{Action, App, Event, Settings};

    /// Browser-side session
    struct Game {
        app: App,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        /// An animation frame callback is scheduled
        frame_pending: bool,
    }

    impl Game {
        /// Match the canvas backing store to the window and report the size
        fn fit_canvas(&self) -> Bounds {
            let (w, h) = web_sys::window()
                .map(|window| window_size(&window))
                .unwrap_or((800.0, 600.0));
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            Bounds::new(w as f32, h as f32)
        }

        fn render(&mut self) {
            render_frame(&mut self.surface, &self.app);
        }
    }

    fn window_size(window: &web_sys::Window) -> (f64, f64) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w, h)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Sphere Field starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = Settings::load_or_default(canvas.get_attribute("data-settings").as_deref());
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let (w, h) = window_size(&window);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        let bounds = Bounds::new(w as f32, h as f32);

        let game = Rc::new(RefCell::new(Game {
            app: App::new(bounds, settings, seed),
            surface: CanvasSurface::new(&canvas)?,
            canvas: canvas.clone(),
            frame_pending: false,
        }));

        setup_input_handlers(&window, &canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Sphere Field running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Pointer move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let repaint = g.app.handle(Event::PointerMove {
                    x: event.offset_x() as f32,
                    y: event.offset_y() as f32,
                });
                if repaint {
                    g.render();
                }
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer leaves the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.app.handle(Event::PointerLeave) {
                    g.render();
                }
            });
            canvas.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click: pause/resume
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let resume = {
                    let mut g = game.borrow_mut();
                    g.app.handle(Event::Click);
                    if g.app.is_paused() {
                        // Show the paused overlay once
                        g.render();
                        false
                    } else {
                        !g.frame_pending
                    }
                };
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Wheel: speed, or repulsion with shift held
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                if let Some(scroll) =
                    Event::scroll_from(event.delta_x(), event.delta_y(), event.shift_key())
                {
                    let mut g = game.borrow_mut();
                    if g.app.handle(scroll) {
                        g.render();
                    }
                }
            });
            canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    log::debug!("Key action: {:?}", action);
                    let mut g = game.borrow_mut();
                    if g.app.handle(Event::Key(action)) {
                        g.render();
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize: rebuild the world for the new viewport
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::info!("Window resized, re-initialising");
                let mut g = game.borrow_mut();
                let bounds = g.fit_canvas();
                let repaint = g.app.handle(Event::Resize {
                    width: bounds.width,
                    height: bounds.height,
                });
                if repaint {
                    g.render();
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule frames on");
            return;
        };
        game.borrow_mut().frame_pending = true;
        let callback = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(callback);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
            game.borrow_mut().frame_pending = false;
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;
            if g.app.is_paused() {
                false
            } else {
                g.app.frame();
                g.render();
                true
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use sphere_field::sim::Bounds;
    use sphere_field::{App, Event, Settings};

    const HEADLESS_FRAMES: u32 = 600;

    env_logger::init();
    log::info!("Sphere Field (native) starting...");
    log::info!("No native window - run with `trunk serve` for the web version");

    let settings = Settings::load_or_default(std::env::var("SPHERE_FIELD_SETTINGS").ok().as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });
    let bounds = Bounds::new(1280.0, 720.0);
    let mut app = App::new(bounds, settings, seed);

    // Sweep the pointer around the middle of the viewport
    for frame in 0..HEADLESS_FRAMES {
        let t = frame as f32 / 60.0;
        app.handle(Event::PointerMove {
            x: bounds.width / 2.0 + 200.0 * t.cos(),
            y: bounds.height / 2.0 + 150.0 * t.sin(),
        });
        app.frame();
    }

    let bodies = app.world().bodies();
    let count = bodies.len().max(1) as f32;
    let mean_speed = bodies.iter().map(|b| b.vel.length()).sum::<f32>() / count;
    let lit = bodies.iter().filter(|b| b.opacity() > 0.5).count();
    log::info!(
        "{} frames: {} spheres, mean speed {:.2}, {} highlighted",
        HEADLESS_FRAMES,
        bodies.len(),
        mean_speed,
        lit
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
