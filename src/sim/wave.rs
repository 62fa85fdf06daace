//! Wave and new-game construction

use glam::Vec2;
use rand::Rng;

use super::entity::{Enemy, EnemyKind, Player};
use super::state::GameState;
use crate::consts::*;

/// Build a fresh enemy grid
///
/// 4 rows x 8 columns on a 50px pitch, centred horizontally, first row at
/// y=50. Exactly one enemy in the top row carries the power-up.
pub fn build_wave<R: Rng>(rng: &mut R) -> Vec<Enemy> {
    let grid_width = WAVE_COLS as f32 * WAVE_CELL_PITCH;
    let left = (VIEWPORT_WIDTH - grid_width) / 2.0 + (WAVE_CELL_PITCH - ENEMY_WIDTH) / 2.0;
    let powerup_col = rng.random_range(0..WAVE_COLS);

    let mut enemies = Vec::with_capacity(WAVE_ROWS * WAVE_COLS);
    for row in 0..WAVE_ROWS {
        for col in 0..WAVE_COLS {
            let pos = Vec2::new(
                left + col as f32 * WAVE_CELL_PITCH,
                WAVE_TOP + row as f32 * WAVE_CELL_PITCH,
            );
            let mut enemy = Enemy::new(pos, EnemyKind::for_row(row));
            enemy.has_powerup = row == 0 && col == powerup_col;
            enemies.push(enemy);
        }
    }
    enemies
}

/// Replace the current grid with a new wave; score and lives carry over
pub fn next_wave(state: &mut GameState) {
    state.enemies = build_wave(&mut state.rng);
    state.direction = 1.0;
}

/// Reset the run: counters, player, transient entities and the first wave
pub fn build_new_game(state: &mut GameState) {
    state.score = 0;
    state.lives = START_LIVES;
    state.level = 1;
    state.projectiles.clear();
    state.particles.clear();
    state.powerups.clear();
    state.player = Player::new();
    next_wave(state);
}
