//! Canvas 2D sink
//!
//! Draws neon silhouettes with `shadowBlur` halos. The canvas backing
//! store is scaled so the logical 800x600 viewport fills it.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCommand, RenderSink, Shape};
use crate::colors::{self, Color};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::{GameError, Result};
use crate::sim::{EnemyKind, Owner};

pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
    scale: (f64, f64),
}

impl Canvas2d {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(GameError::SurfaceUnavailable {
                context: "2d context",
            })?;
        let scale = (
            canvas.width() as f64 / VIEWPORT_WIDTH as f64,
            canvas.height() as f64 / VIEWPORT_HEIGHT as f64,
        );
        Ok(Self { ctx, scale })
    }

    fn set_color(&self, color: Color, glow: f32) {
        let css = colors::to_css(color);
        self.ctx.set_fill_style_str(&css);
        self.ctx.set_shadow_color(&css);
        self.ctx.set_shadow_blur(glow as f64);
    }

    fn polygon(&self, x: f64, y: f64, w: f64, h: f64, points: &[(f64, f64)]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(x + first.0 * w, y + first.1 * h);
        for (px, py) in rest {
            self.ctx.line_to(x + px * w, y + py * h);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }
}

impl RenderSink for Canvas2d {
    fn begin_frame(&mut self) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(self.scale.0, 0.0, 0.0, self.scale.1, 0.0, 0.0);
        ctx.set_global_alpha(1.0);
        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str(&colors::to_css(colors::BACKGROUND));
        ctx.fill_rect(0.0, 0.0, VIEWPORT_WIDTH as f64, VIEWPORT_HEIGHT as f64);
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        let (x, y) = (cmd.pos.x as f64, cmd.pos.y as f64);
        let (w, h) = (cmd.size.x as f64, cmd.size.y as f64);
        self.set_color(cmd.color, cmd.glow);

        match cmd.shape {
            Shape::Ship => self.polygon(
                x,
                y,
                w,
                h,
                &[(0.5, 0.0), (1.0, 1.0), (0.5, 0.75), (0.0, 1.0)],
            ),
            Shape::Invader(EnemyKind::Elite) => self.polygon(
                x,
                y,
                w,
                h,
                &[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)],
            ),
            Shape::Invader(EnemyKind::Warrior) => self.polygon(
                x,
                y,
                w,
                h,
                &[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)],
            ),
            Shape::Invader(EnemyKind::Grunt) => {
                self.ctx.fill_rect(x + w * 0.1, y + h * 0.2, w * 0.8, h * 0.6);
            }
            Shape::Bolt(Owner::Player) | Shape::Bolt(Owner::Enemy) => {
                self.ctx.fill_rect(x, y, w, h);
            }
            Shape::Capsule => {
                self.ctx.begin_path();
                let _ = self.ctx.arc(
                    x + w / 2.0,
                    y + h / 2.0,
                    w.min(h) / 2.0,
                    0.0,
                    std::f64::consts::TAU,
                );
                self.ctx.fill();
            }
            // Fade comes through the rgba alpha
            Shape::Spark => self.ctx.fill_rect(x, y, w, h),
        }
    }

    fn end_frame(&mut self) {
        self.ctx.set_shadow_blur(0.0);
    }
}
