//! Canvas 2D backend

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{HUD_LINE_HEIGHT, Surface};
use crate::sim::{Bounds, Colour};

const OUTLINE_WIDTH: f64 = 1.5;
const HUD_FONT: &str = "14px monospace";

/// CSS `rgb()` string for a colour
fn css(colour: Colour) -> String {
    format!("rgb({}, {}, {})", colour.0, colour.1, colour.2)
}

/// Draws onto an `HtmlCanvasElement` through its 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, bounds: Bounds, background: Colour) {
        let (w, h) = (bounds.width as f64, bounds.height as f64);
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(&css(background));
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn circle(&mut self, center: Vec2, radius: f32, colour: Colour, opacity: f32) {
        let style = css(colour);
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU) {
            log::error!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_global_alpha(opacity as f64);
        self.ctx.set_fill_style_str(&style);
        self.ctx.fill();

        self.ctx.set_global_alpha(1.0);
        self.ctx.set_line_width(OUTLINE_WIDTH);
        self.ctx.set_stroke_style_str(&style);
        self.ctx.stroke();
    }

    fn text(&mut self, lines: &[String], origin: Vec2, colour: Colour, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_font(HUD_FONT);
        self.ctx.set_fill_style_str(&css(colour));
        for (i, line) in lines.iter().enumerate() {
            let y = origin.y + i as f32 * HUD_LINE_HEIGHT;
            if let Err(e) = self.ctx.fill_text(line, origin.x as f64, y as f64) {
                log::error!("fill_text failed: {:?}", e);
                break;
            }
        }
        self.ctx.set_global_alpha(1.0);
    }
}
