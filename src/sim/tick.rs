//! Per-frame simulation step
//!
//! One call advances the world by one animation frame. Speeds are in
//! pixels per frame, so the game runs at the display's refresh rate. The
//! only wall-clock dependency is the shot cooldown, which reads the `now_ms`
//! value handed in by the caller.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Owner, Particle, Powerup, Projectile};
use super::state::GameState;
use super::wave;
use crate::audio::{AudioSink, SoundEvent};
use crate::colors;
use crate::consts::*;

/// Input snapshot for a single frame (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

/// Horizontal grid speed; rises with score
pub fn enemy_speed(score: u64) -> f32 {
    ENEMY_BASE_SPEED + score as f32 * ENEMY_SPEED_PER_POINT
}

/// Per-enemy fire chance for one frame; rises with level, not enemy count
pub fn enemy_fire_chance(level: u32) -> f64 {
    (ENEMY_FIRE_BASE + level as f64 * ENEMY_FIRE_PER_LEVEL).min(1.0)
}

/// Advance the game by one frame
///
/// Does nothing unless the game is in the Playing phase.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64, audio: &mut dyn AudioSink) {
    if !state.is_playing() {
        return;
    }

    update_player(state, input, now_ms, audio);
    update_enemies(state, audio);

    // Wave clear: never a win, just the next grid
    if state.enemies.is_empty() {
        state.level += 1;
        state.score += WAVE_CLEAR_BONUS;
        wave::next_wave(state);
        log::info!("Wave cleared, entering level {} (score {})", state.level, state.score);
    }

    let dropped = update_projectiles(state, audio);
    update_powerups(state, audio);
    // Drops start falling next frame
    state.powerups.extend(dropped);

    for particle in &mut state.particles {
        particle.update();
    }

    sweep(state);
}

fn update_player(state: &mut GameState, input: &TickInput, now_ms: f64, audio: &mut dyn AudioSink) {
    let player = &mut state.player;
    player.steer(input.left, input.right);

    if input.shoot && player.can_fire(now_ms) {
        for tip in player.wingtips() {
            state.projectiles.push(Projectile::from_player(tip));
        }
        player.last_shot_ms = Some(now_ms);
        audio.play(SoundEvent::Shoot);
        log::debug!("Player fired at {:.0}ms", now_ms);
    }
}

fn update_enemies(state: &mut GameState, audio: &mut dyn AudioSink) {
    let dx = enemy_speed(state.score) * state.direction;
    let fire_chance = enemy_fire_chance(state.level);
    let player_y = state.player.body.pos.y;

    let mut hit_edge = false;
    let mut reached_player = false;

    for enemy in &mut state.enemies {
        enemy.body.pos.x += dx;
        if enemy.body.pos.x <= ENEMY_LEFT_EDGE || enemy.body.pos.x >= ENEMY_RIGHT_EDGE {
            hit_edge = true;
        }
        if state.rng.random_bool(fire_chance) {
            state.projectiles.push(Projectile::from_enemy(&enemy.body));
        }
        if enemy.body.bottom() >= player_y {
            reached_player = true;
        }
    }

    // Invasion ends the run regardless of remaining lives
    if reached_player {
        log::info!("Enemy reached the player's row");
        state.game_over(audio);
    }

    if hit_edge {
        state.direction = -state.direction;
        for enemy in &mut state.enemies {
            enemy.body.pos.y += ENEMY_STEP_DOWN;
        }
    }
}

/// Move shots and resolve their hits. Returns power-ups dropped this frame.
fn update_projectiles(state: &mut GameState, audio: &mut dyn AudioSink) -> Vec<Powerup> {
    let mut dropped = Vec::new();
    let mut player_killed = false;

    for shot in &mut state.projectiles {
        shot.advance();
        if shot.out_of_bounds() {
            shot.body.mark();
            continue;
        }

        match shot.owner {
            Owner::Player => {
                let target = state
                    .enemies
                    .iter_mut()
                    .find(|enemy| !enemy.body.marked && shot.body.overlaps(&enemy.body));
                if let Some(enemy) = target {
                    shot.body.mark();
                    enemy.body.mark();
                    state.score += enemy.kind.points();
                    audio.play(SoundEvent::Explosion);
                    if enemy.has_powerup {
                        dropped.push(Powerup::new(enemy.body.pos));
                        log::debug!("Power-up dropped at {:?}", enemy.body.pos);
                    }
                    state.particles.extend(Particle::burst(
                        &mut state.rng,
                        enemy.body.center(),
                        enemy.body.color,
                        KILL_BURST,
                    ));
                }
            }
            Owner::Enemy => {
                if shot.body.overlaps(&state.player.body) {
                    shot.body.mark();
                    state.lives = state.lives.saturating_sub(1);
                    audio.play(SoundEvent::Explosion);
                    state.particles.extend(Particle::burst(
                        &mut state.rng,
                        state.player.body.center(),
                        state.player.body.color,
                        HIT_BURST,
                    ));
                    log::debug!("Player hit, {} lives left", state.lives);
                    if state.lives == 0 {
                        player_killed = true;
                    }
                }
            }
        }
    }

    if player_killed {
        state.game_over(audio);
    }
    dropped
}

fn update_powerups(state: &mut GameState, audio: &mut dyn AudioSink) {
    for powerup in &mut state.powerups {
        powerup.advance();
        if powerup.body.overlaps(&state.player.body) {
            powerup.body.mark();
            state.lives = (state.lives + 1).min(MAX_LIVES);
            audio.play(SoundEvent::Powerup);
            state.particles.extend(Particle::burst(
                &mut state.rng,
                powerup.body.center(),
                colors::POWERUP,
                PICKUP_BURST,
            ));
            log::debug!("Power-up collected, lives now {}", state.lives);
        } else if powerup.below_viewport() {
            powerup.body.mark();
        }
    }
}

/// Drop every entity marked this frame
fn sweep(state: &mut GameState) {
    state.enemies.retain(|e| !e.body.marked);
    state.projectiles.retain(|p| !p.body.marked);
    state.powerups.retain(|p| !p.body.marked);
    state.particles.retain(|p| !p.body.marked);
}
