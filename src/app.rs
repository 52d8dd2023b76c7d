//! Platform-free driver
//!
//! Turns input events into world mutations and keeps the presentation state
//! (pause, HUD fade, background) that the browser loop reads every frame.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{Bounds, Colour, World};

/// Keyboard actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add a sphere (near the pointer when known)
    Spawn,
    /// Remove the oldest sphere
    DestroyOldest,
    ToggleRepulsion,
    /// Show/hide the info overlay
    ToggleInfo,
    CycleBackground,
}

impl Action {
    /// Map a `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "+" | "=" | "a" | "A" => Some(Action::Spawn),
            "-" | "_" | "d" | "D" | "Delete" | "Backspace" => Some(Action::DestroyOldest),
            "r" | "R" => Some(Action::ToggleRepulsion),
            "i" | "I" => Some(Action::ToggleInfo),
            "b" | "B" => Some(Action::CycleBackground),
            _ => None,
        }
    }
}

/// Discrete input delivered between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Resize { width: f32, height: f32 },
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    Key(Action),
    /// `delta` in notches, positive when scrolling down
    Scroll { delta: f32, modifier: bool },
    /// Pause/resume
    Click,
}

impl Event {
    /// Map raw wheel deltas to a one-notch scroll, or `None` when the wheel
    /// did not move along the axis that matters. Shift+wheel is reported on
    /// the x axis by some browsers, so x is used when y is still.
    pub fn scroll_from(dx: f64, dy: f64, shift: bool) -> Option<Self> {
        let raw = if dy != 0.0 {
            dy
        } else if shift {
            dx
        } else {
            0.0
        };
        if raw == 0.0 || raw.is_nan() {
            return None;
        }
        Some(Event::Scroll {
            delta: raw.signum() as f32,
            modifier: shift,
        })
    }
}

/// Info overlay with a fade in/out
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub visible: bool,
    alpha: f32,
    step: f32,
}

impl Hud {
    pub fn new(visible: bool, step: f32) -> Self {
        Self {
            visible,
            alpha: if visible { 1.0 } else { 0.0 },
            step,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Jump straight to the target alpha
    pub fn settle(&mut self) {
        self.alpha = if self.visible { 1.0 } else { 0.0 };
    }

    /// Move alpha one step toward the target
    pub fn step(&mut self) {
        self.alpha = if self.visible {
            (self.alpha + self.step).min(1.0)
        } else {
            (self.alpha - self.step).max(0.0)
        };
    }
}

/// Session state driven by the frame loop
#[derive(Debug, Clone)]
pub struct App {
    world: World,
    pub hud: Hud,
    background: usize,
    paused: bool,
}

impl App {
    /// Build a populated world for the given viewport
    pub fn new(bounds: Bounds, settings: Settings, seed: u64) -> Self {
        let mut world = World::new(bounds, settings, seed);
        let hud = Hud::new(world.settings().show_info, world.settings().hud_fade_step);
        let count = world.settings().initial_spheres;
        let spawned = world.populate(count);
        log::info!(
            "World {}x{} populated with {} spheres (seed {})",
            bounds.width,
            bounds.height,
            spawned,
            seed
        );
        Self {
            world,
            hud,
            background: 0,
            paused: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn background(&self) -> Colour {
        let backgrounds = &self.world.settings().backgrounds;
        backgrounds[self.background % backgrounds.len()]
    }

    /// Run one frame: tick unless paused, then fade the HUD.
    /// Returns whether the simulation advanced.
    pub fn frame(&mut self) -> bool {
        self.hud.step();
        if self.paused {
            return false;
        }
        self.world.tick();
        true
    }

    /// Apply an input event.
    ///
    /// Returns true while paused: the frame loop is stopped, so the driver
    /// has to repaint itself for the change to show.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Resize { width, height } => {
                let bounds = Bounds::new(width, height);
                self.world.resize(bounds);
                self.world.clear();
                let count = self.world.settings().initial_spheres;
                let spawned = self.world.populate(count);
                log::info!("Resized to {}x{}, repopulated {} spheres", width, height, spawned);
            }
            Event::PointerMove { x, y } => self.world.set_pointer(x, y),
            Event::PointerLeave => self.world.clear_pointer(),
            Event::Key(action) => self.act(action),
            Event::Scroll { delta, modifier } => {
                if modifier {
                    let step = self.world.settings().magnitude_step;
                    let magnitude = self.world.adjust_repulsion_magnitude(-delta * step);
                    log::debug!("Repulsion magnitude: {:.2}", magnitude);
                } else {
                    let step = self.world.settings().multiplier_step;
                    let multiplier = self.world.adjust_velocity_multiplier(-delta * step);
                    log::debug!("Velocity multiplier: {:.2}", multiplier);
                }
            }
            Event::Click => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
        }
        self.paused
    }

    fn act(&mut self, action: Action) {
        match action {
            Action::Spawn => {
                let result = match self.world.pointer.position {
                    Some(at) => self.world.spawn_at(at).map(|_| ()),
                    None => self.world.spawn_random().map(|_| ()),
                };
                if let Err(e) = result {
                    log::warn!("Spawn failed: {}", e);
                }
            }
            Action::DestroyOldest => {
                if self.world.remove_oldest().is_none() {
                    log::debug!("Nothing to remove");
                }
            }
            Action::ToggleRepulsion => {
                let enabled = self.world.toggle_repulsion();
                log::info!("Repulsion {}", if enabled { "on" } else { "off" });
            }
            Action::ToggleInfo => {
                self.hud.toggle();
                // No frames run while paused, so there is nothing to fade with
                if self.paused {
                    self.hud.settle();
                }
            }
            Action::CycleBackground => {
                self.background = (self.background + 1) % self.world.settings().backgrounds.len();
            }
        }
    }

    /// Lines shown in the info overlay
    pub fn hud_lines(&self) -> Vec<String> {
        let world = &self.world;
        let repulsion = world.modifiers.repulsion;
        let mut lines = vec![
            format!("spheres: {}", world.bodies().len()),
            format!("speed: x{:.1}", world.modifiers.velocity_multiplier),
            format!(
                "repulsion: {} ({:.1})",
                if repulsion.enabled { "on" } else { "off" },
                repulsion.magnitude
            ),
            format!("tick: {}", world.time_ticks),
            "[a] spawn  [d] remove  [r] repulsion  [i] info  [b] background".to_string(),
            "scroll: speed  shift+scroll: repulsion  click: pause".to_string(),
        ];
        if self.paused {
            lines.insert(0, "PAUSED".to_string());
        }
        lines
    }

    /// Pointer position, if known
    pub fn pointer(&self) -> Option<Vec2> {
        self.world.pointer.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            initial_spheres: 8,
            ..Default::default()
        }
    }

    fn app() -> App {
        App::new(Bounds::new(800.0, 600.0), settings(), 1234)
    }

    #[test]
    fn test_new_populates() {
        assert_eq!(app().world().bodies().len(), 8);
    }

    #[test]
    fn test_action_from_key() {
        assert_eq!(Action::from_key("a"), Some(Action::Spawn));
        assert_eq!(Action::from_key("+"), Some(Action::Spawn));
        assert_eq!(Action::from_key("d"), Some(Action::DestroyOldest));
        assert_eq!(Action::from_key("R"), Some(Action::ToggleRepulsion));
        assert_eq!(Action::from_key("i"), Some(Action::ToggleInfo));
        assert_eq!(Action::from_key("b"), Some(Action::CycleBackground));
        assert_eq!(Action::from_key("x"), None);
    }

    #[test]
    fn test_spawn_and_destroy_keys() {
        let mut app = app();
        app.handle(Event::Key(Action::Spawn));
        assert_eq!(app.world().bodies().len(), 9);

        let oldest = app.world().bodies()[0].pos;
        app.handle(Event::Key(Action::DestroyOldest));
        assert_eq!(app.world().bodies().len(), 8);
        assert_ne!(app.world().bodies()[0].pos, oldest);
    }

    #[test]
    fn test_destroy_on_empty_world() {
        let mut app = App::new(
            Bounds::new(800.0, 600.0),
            Settings {
                initial_spheres: 0,
                ..Default::default()
            },
            1,
        );
        app.handle(Event::Key(Action::DestroyOldest));
        assert!(app.world().bodies().is_empty());
    }

    #[test]
    fn test_spawn_near_pointer() {
        let mut app = App::new(
            Bounds::new(800.0, 600.0),
            Settings {
                initial_spheres: 0,
                ..Default::default()
            },
            5,
        );
        app.handle(Event::PointerMove { x: 400.0, y: 300.0 });
        app.handle(Event::Key(Action::Spawn));
        let body = &app.world().bodies()[0];
        let spread = app.world().settings().spawn_spread;
        assert!((body.pos - Vec2::new(400.0, 300.0)).abs().max_element() <= spread);
    }

    #[test]
    fn test_click_pauses_and_resumes() {
        let mut app = app();
        assert!(app.frame());
        app.handle(Event::Click);
        assert!(app.is_paused());
        let ticks = app.world().time_ticks;
        assert!(!app.frame());
        assert_eq!(app.world().time_ticks, ticks);
        assert_eq!(app.hud_lines()[0], "PAUSED");

        app.handle(Event::Click);
        assert!(app.frame());
        assert_eq!(app.world().time_ticks, ticks + 1);
    }

    #[test]
    fn test_resize_repopulates() {
        let mut app = app();
        app.handle(Event::Key(Action::Spawn));
        app.handle(Event::Resize {
            width: 1024.0,
            height: 768.0,
        });
        let world = app.world();
        assert_eq!(world.bodies().len(), 8);
        assert_eq!(world.bounds(), Bounds::new(1024.0, 768.0));
        assert_eq!(world.pointer.influence_radius, 768.0 / 12.0 + 75.0);
        for body in world.bodies() {
            assert!(body.pos.x <= 1024.0 - body.radius());
            assert!(body.pos.y <= 768.0 - body.radius());
        }
    }

    #[test]
    fn test_scroll_adjusts_modifiers() {
        let mut app = app();
        let multiplier = app.world().modifiers.velocity_multiplier;
        app.handle(Event::Scroll {
            delta: -1.0,
            modifier: false,
        });
        assert!((app.world().modifiers.velocity_multiplier - (multiplier + 0.1)).abs() < 1e-6);

        let magnitude = app.world().modifiers.repulsion.magnitude;
        app.handle(Event::Scroll {
            delta: 2.0,
            modifier: true,
        });
        assert!((app.world().modifiers.repulsion.magnitude - (magnitude - 0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_repulsion_key() {
        let mut app = app();
        let before = app.world().modifiers.repulsion.enabled;
        app.handle(Event::Key(Action::ToggleRepulsion));
        assert_eq!(app.world().modifiers.repulsion.enabled, !before);
    }

    #[test]
    fn test_hud_fades_out_and_back() {
        let mut app = app();
        assert_eq!(app.hud.alpha(), 1.0);
        app.handle(Event::Key(Action::ToggleInfo));
        for _ in 0..100 {
            app.frame();
        }
        assert_eq!(app.hud.alpha(), 0.0);

        app.handle(Event::Key(Action::ToggleInfo));
        app.frame();
        assert!(app.hud.alpha() > 0.0 && app.hud.alpha() < 1.0);
        for _ in 0..100 {
            app.frame();
        }
        assert_eq!(app.hud.alpha(), 1.0);
    }

    #[test]
    fn test_background_cycle_wraps() {
        let mut app = app();
        let backgrounds = app.world().settings().backgrounds.clone();
        assert_eq!(app.background(), backgrounds[0]);
        for _ in 0..backgrounds.len() {
            app.handle(Event::Key(Action::CycleBackground));
        }
        assert_eq!(app.background(), backgrounds[0]);
        app.handle(Event::Key(Action::CycleBackground));
        assert_eq!(app.background(), backgrounds[1]);
    }

    #[test]
    fn test_scroll_from_wheel_deltas() {
        assert_eq!(
            Event::scroll_from(0.0, -120.0, false),
            Some(Event::Scroll {
                delta: -1.0,
                modifier: false
            })
        );
        assert_eq!(
            Event::scroll_from(0.0, 3.5, true),
            Some(Event::Scroll {
                delta: 1.0,
                modifier: true
            })
        );
        // Shift+wheel reported on the x axis
        assert_eq!(
            Event::scroll_from(-100.0, 0.0, true),
            Some(Event::Scroll {
                delta: -1.0,
                modifier: true
            })
        );
        // Horizontal scroll without shift, or no movement at all
        assert_eq!(Event::scroll_from(50.0, 0.0, false), None);
        assert_eq!(Event::scroll_from(0.0, 0.0, true), None);
        assert_eq!(Event::scroll_from(0.0, -0.0, false), None);
    }

    #[test]
    fn test_shift_wheel_on_x_axis_raises_magnitude() {
        let mut app = app();
        let magnitude = app.world().modifiers.repulsion.magnitude;
        let event = Event::scroll_from(-100.0, 0.0, true).expect("x-axis shift scroll");
        app.handle(event);
        assert!((app.world().modifiers.repulsion.magnitude - (magnitude + 0.1)).abs() < 1e-6);

        assert!(Event::scroll_from(0.0, 0.0, true).is_none());
    }

    #[test]
    fn test_hud_uses_sanitized_fade_step() {
        let mut app = App::new(
            Bounds::new(800.0, 600.0),
            Settings {
                initial_spheres: 0,
                hud_fade_step: 0.0,
                ..Default::default()
            },
            3,
        );
        app.handle(Event::Key(Action::ToggleInfo));
        app.frame();
        assert!(app.hud.alpha() < 1.0);
    }

    #[test]
    fn test_handle_requests_repaint_only_while_paused() {
        let mut app = app();
        assert!(!app.handle(Event::Key(Action::Spawn)));
        assert!(!app.handle(Event::PointerMove { x: 5.0, y: 5.0 }));

        assert!(app.handle(Event::Click));
        let count = app.world().bodies().len();
        assert!(app.handle(Event::Key(Action::DestroyOldest)));
        assert_eq!(app.world().bodies().len(), count - 1);
        assert!(app.handle(Event::PointerMove { x: 6.0, y: 6.0 }));

        assert!(!app.handle(Event::Click));
    }

    #[test]
    fn test_info_toggle_while_paused_settles() {
        let mut app = app();
        app.handle(Event::Click);
        app.handle(Event::Key(Action::ToggleInfo));
        assert_eq!(app.hud.alpha(), 0.0);
        app.handle(Event::Key(Action::ToggleInfo));
        assert_eq!(app.hud.alpha(), 1.0);
    }

    #[test]
    fn test_pointer_leave_clears() {
        let mut app = app();
        app.handle(Event::PointerMove { x: 1.0, y: 2.0 });
        assert_eq!(app.pointer(), Some(Vec2::new(1.0, 2.0)));
        app.handle(Event::PointerLeave);
        assert_eq!(app.pointer(), None);
    }
}
