//! Game simulation module
//!
//! All gameplay logic lives here:
//! - One step per animation frame, speeds in pixels per frame
//! - Randomness only through the world's seeded RNG
//! - Wall-clock time only through the `now_ms` argument to `tick`
//! - No rendering or platform dependencies

pub mod entity;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod wave;

pub use entity::{Body, Enemy, EnemyKind, Owner, Particle, Player, Powerup, Projectile};
pub use geometry::{Rect, aabb_overlap};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, enemy_fire_chance, enemy_speed, tick};
pub use wave::{build_new_game, build_wave, next_wave};
