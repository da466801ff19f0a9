//! Canvas2D presenter
//!
//! Clears and repaints the full scene every animation frame: the tower, the
//! in-flight block, the confetti particles and the miss label. Reads the
//! simulation's scene view only; never mutates game state.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::BLOCK_H;
use crate::effects::ConfettiSystem;
use crate::sim::{FlightRole, Scene};

/// Fill color of the block in flight
const FLYING_COLOR: &str = "#3498db";
/// Fill color of the frozen block and the miss label
const CRASHED_COLOR: &str = "#e74c3c";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }

    /// Adopt a new canvas size (CSS pixels)
    pub fn resize(&mut self, w: f32, h: f32) {
        self.size = Vec2::new(w, h);
    }

    /// Paint one frame
    pub fn render(&self, scene: &Scene<'_>, confetti: &ConfettiSystem) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);

        for block in scene.blocks {
            self.fill_block(block.center, block.width, block.color.css());
        }

        if let Some((moving, role)) = scene.moving {
            let color = match role {
                FlightRole::Flying => FLYING_COLOR,
                FlightRole::Crashed => CRASHED_COLOR,
            };
            self.fill_block(moving.center, moving.width, color);
        }

        for p in confetti.particles() {
            self.ctx.save();
            self.ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
            self.ctx.set_fill_style_str(p.color);
            self.ctx.fill_rect(
                (p.pos.x - p.size / 2.0) as f64,
                (p.pos.y - p.size / 2.0) as f64,
                p.size as f64,
                p.size as f64,
            );
            self.ctx.restore();
        }

        if scene.failed {
            self.draw_miss_label();
        }
    }

    fn fill_block(&self, center: Vec2, width: f32, color: &str) {
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.rect(
            (-width / 2.0) as f64,
            (-BLOCK_H / 2.0) as f64,
            width as f64,
            BLOCK_H as f64,
        );
        self.ctx.fill();
        self.ctx.restore();
    }

    fn draw_miss_label(&self) {
        self.ctx.save();
        self.ctx.set_font("bold 2em 'Segoe UI', Arial");
        self.ctx.set_fill_style_str(CRASHED_COLOR);
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(
            "Miss!",
            (self.size.x / 2.0) as f64,
            (self.size.y / 2.0 - 30.0) as f64,
        );
        self.ctx.restore();
    }
}
