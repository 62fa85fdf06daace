//! Rendering surface
//!
//! The simulation never draws. After each frame the driver walks the world
//! and sends one `DrawCommand` per entity to a `RenderSink`, in a fixed
//! order so later entities land on top.

use glam::Vec2;

use crate::colors::Color;
use crate::settings::Settings;
use crate::sim::{Body, EnemyKind, GameState, Owner};

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2d;

/// What to draw at a command's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Player ship (triangle with wings)
    Ship,
    /// Grid enemy; each kind has its own silhouette
    Invader(EnemyKind),
    /// Projectile
    Bolt(Owner),
    /// Extra-life capsule
    Capsule,
    /// Particle, drawn with alpha = remaining life
    Spark,
}

/// A single draw request
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Halo blur radius in pixels (0 = none)
    pub glow: f32,
}

impl DrawCommand {
    fn from_body(shape: Shape, body: &Body, glow: f32) -> Self {
        Self {
            shape,
            pos: body.pos,
            size: body.size,
            color: body.color,
            glow,
        }
    }
}

/// Halo strength per shape
pub fn glow_for(shape: Shape) -> f32 {
    match shape {
        Shape::Ship => 15.0,
        Shape::Invader(_) => 10.0,
        Shape::Bolt(_) => 8.0,
        Shape::Capsule => 20.0,
        Shape::Spark => 0.0,
    }
}

/// Consumer of draw requests
pub trait RenderSink {
    /// Called once per frame before any `draw`
    fn begin_frame(&mut self) {}
    fn draw(&mut self, cmd: &DrawCommand);
    fn end_frame(&mut self) {}
}

/// Records every command of the last frame
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.commands.iter().map(|c| c.shape)
    }
}

impl RenderSink for DrawList {
    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        self.commands.push(cmd.clone());
    }
}

/// Emit the whole world: player, enemies, projectiles, powerups, particles
pub fn draw_world(state: &GameState, settings: &Settings, sink: &mut dyn RenderSink) {
    let glow_on = settings.effective_glow();
    let glow = |shape: Shape| if glow_on { glow_for(shape) } else { 0.0 };

    sink.begin_frame();

    sink.draw(&DrawCommand::from_body(
        Shape::Ship,
        &state.player.body,
        glow(Shape::Ship),
    ));

    for enemy in &state.enemies {
        let shape = Shape::Invader(enemy.kind);
        sink.draw(&DrawCommand::from_body(shape, &enemy.body, glow(shape)));
    }

    for shot in &state.projectiles {
        let shape = Shape::Bolt(shot.owner);
        sink.draw(&DrawCommand::from_body(shape, &shot.body, glow(shape)));
    }

    for powerup in &state.powerups {
        sink.draw(&DrawCommand::from_body(
            Shape::Capsule,
            &powerup.body,
            glow(Shape::Capsule),
        ));
    }

    if settings.particles {
        for particle in &state.particles {
            let mut cmd = DrawCommand::from_body(Shape::Spark, &particle.body, 0.0);
            cmd.color[3] *= particle.life.clamp(0.0, 1.0);
            sink.draw(&cmd);
        }
    }

    sink.end_frame();
}
