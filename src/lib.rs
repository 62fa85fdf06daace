//! Neon Invaders - a fixed-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, waves, game phase)
//! - `renderer`: Draw command surface and the browser canvas sink
//! - `audio`: Sound event sink and Web Audio synthesis
//! - `platform`: Input snapshots and time sources
//! - `driver`: Host frame loop tying the pieces together
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, NullAudio, SoundEvent};
pub use driver::{Driver, Hud};
pub use error::{GameError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical viewport (all positions live in this space)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Horizontal speed (pixels per frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the viewport bottom to the ship's top edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 60.0;
    /// Minimum wall-clock time between two shots
    pub const SHOT_COOLDOWN_MS: f64 = 200.0;

    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Projectiles (sign of the speed is the travel direction)
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = -7.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 5.0;
    /// Projectiles are dropped once they leave [-margin, height + margin]
    pub const PROJECTILE_CULL_MARGIN: f32 = 20.0;

    /// Enemy grid
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const WAVE_ROWS: usize = 4;
    pub const WAVE_COLS: usize = 8;
    pub const WAVE_CELL_PITCH: f32 = 50.0;
    pub const WAVE_TOP: f32 = 50.0;
    /// Base horizontal enemy speed, plus this much per point of score
    pub const ENEMY_BASE_SPEED: f32 = 1.5;
    pub const ENEMY_SPEED_PER_POINT: f32 = 0.001;
    /// Left/right margins that trigger a direction flip
    pub const ENEMY_LEFT_EDGE: f32 = 10.0;
    pub const ENEMY_RIGHT_EDGE: f32 = VIEWPORT_WIDTH - 40.0;
    pub const ENEMY_STEP_DOWN: f32 = 20.0;
    /// Per-enemy, per-frame fire chance: base + level * per_level
    pub const ENEMY_FIRE_BASE: f64 = 0.001;
    pub const ENEMY_FIRE_PER_LEVEL: f64 = 0.0002;

    /// Scoring
    pub const WAVE_CLEAR_BONUS: u64 = 1000;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 3.0;

    /// Particles
    pub const PARTICLE_SIZE: f32 = 3.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    pub const PARTICLE_DECAY: f32 = 0.04;
    pub const KILL_BURST: usize = 5;
    pub const HIT_BURST: usize = 10;
    pub const PICKUP_BURST: usize = 8;
}

/// RGBA colors for game elements
pub mod colors {
    pub type Color = [f32; 4];

    pub const PLAYER: Color = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_SHOT: Color = [0.4, 1.0, 1.0, 1.0];
    pub const ENEMY_SHOT: Color = [1.0, 0.2, 0.3, 1.0];
    pub const ENEMY_KIND_1: Color = [1.0, 0.0, 1.0, 1.0]; // Magenta, top row
    pub const ENEMY_KIND_2: Color = [1.0, 0.85, 0.0, 1.0];
    pub const ENEMY_KIND_3: Color = [0.2, 0.6, 1.0, 1.0];
    pub const POWERUP: Color = [0.0, 1.0, 0.3, 1.0];
    pub const BACKGROUND: Color = [0.02, 0.02, 0.06, 1.0];

    /// CSS `rgba(...)` string for canvas style setters
    pub fn to_css(color: Color) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            color[3]
        )
    }
}
