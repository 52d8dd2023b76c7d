//! Rendering
//!
//! Drawing goes through the [`Surface`] trait so the frame logic can run
//! without a browser. The canvas 2D backend lives in `canvas` (wasm only).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::app::App;
use crate::sim::{Bounds, Colour, Sphere};

/// HUD text position and line height (pixels)
pub const HUD_ORIGIN: Vec2 = Vec2::new(16.0, 24.0);
pub const HUD_LINE_HEIGHT: f32 = 18.0;

/// A 2D drawing target
pub trait Surface {
    /// Fill the whole viewport
    fn clear(&mut self, bounds: Bounds, background: Colour);
    /// Filled circle at `opacity` with a solid outline in the same colour
    fn circle(&mut self, center: Vec2, radius: f32, colour: Colour, opacity: f32);
    /// Left-aligned lines starting at `origin`, one per `HUD_LINE_HEIGHT`
    fn text(&mut self, lines: &[String], origin: Vec2, colour: Colour, alpha: f32);
}

/// Paint one sphere
pub fn draw_sphere<S: Surface + ?Sized>(surface: &mut S, sphere: &Sphere) {
    surface.circle(sphere.pos, sphere.radius(), sphere.colour, sphere.opacity());
}

/// Black or white, whichever reads better on `background`
pub fn contrast(background: Colour) -> Colour {
    let [r, g, b, _] = background.to_rgba(1.0);
    let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    if luma > 0.5 { Colour::BLACK } else { Colour::WHITE }
}

/// Paint a full frame: background, spheres (oldest first), then the HUD
pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, app: &App) {
    let world = app.world();
    let background = app.background();
    surface.clear(world.bounds(), background);

    for sphere in world.bodies() {
        draw_sphere(surface, sphere);
    }

    let alpha = app.hud.alpha();
    if alpha > 0.0 {
        surface.text(&app.hud_lines(), HUD_ORIGIN, contrast(background), alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, Event};
    use crate::settings::Settings;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(Colour),
        Circle { radius: f32, opacity: f32 },
        Text { lines: usize, alpha: f32 },
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _bounds: Bounds, background: Colour) {
            self.ops.push(Op::Clear(background));
        }

        fn circle(&mut self, _center: Vec2, radius: f32, _colour: Colour, opacity: f32) {
            self.ops.push(Op::Circle { radius, opacity });
        }

        fn text(&mut self, lines: &[String], _origin: Vec2, _colour: Colour, alpha: f32) {
            self.ops.push(Op::Text {
                lines: lines.len(),
                alpha,
            });
        }
    }

    fn app(count: usize) -> App {
        App::new(
            Bounds::new(640.0, 480.0),
            Settings {
                initial_spheres: count,
                ..Default::default()
            },
            77,
        )
    }

    #[test]
    fn test_frame_order() {
        let app = app(3);
        let mut surface = Recorder::default();
        render_frame(&mut surface, &app);

        assert_eq!(surface.ops.len(), 5);
        assert_eq!(surface.ops[0], Op::Clear(app.background()));
        for (op, sphere) in surface.ops[1..4].iter().zip(app.world().bodies()) {
            assert_eq!(
                *op,
                Op::Circle {
                    radius: sphere.radius(),
                    opacity: sphere.opacity()
                }
            );
        }
        assert!(matches!(surface.ops[4], Op::Text { alpha, .. } if alpha == 1.0));
    }

    #[test]
    fn test_hidden_hud_is_not_drawn() {
        let mut app = app(1);
        app.handle(Event::Key(Action::ToggleInfo));
        for _ in 0..50 {
            app.frame();
        }
        let mut surface = Recorder::default();
        render_frame(&mut surface, &app);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Text { .. })));
    }

    #[test]
    fn test_contrast() {
        assert_eq!(contrast(Colour(0x11, 0x11, 0x18)), Colour::WHITE);
        assert_eq!(contrast(Colour(0xf4, 0xf1, 0xde)), Colour::BLACK);
    }
}
