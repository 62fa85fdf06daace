//! Game state and phase transitions
//!
//! `GameState` owns every entity collection plus the run counters. The
//! host holds it by value and passes it into [`tick`](super::tick).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Particle, Player, Powerup, Projectile};
use super::wave;
use crate::audio::{AudioSink, SoundEvent};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the player to start
    #[default]
    Start,
    /// Active gameplay; the only phase in which the simulation runs
    Playing,
    /// Run ended
    GameOver,
    /// Simulation frozen
    Paused,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
            GamePhase::Paused => "paused",
        }
    }
}

/// Complete game world
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// 0..=MAX_LIVES
    pub lives: u8,
    /// Wave number, starting at 1
    pub level: u32,
    /// Horizontal march direction of the grid (+1 right, -1 left)
    pub direction: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    /// Drives enemy fire, particle spread and power-up placement
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh world on the title screen. Entities are created on `start()`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            lives: START_LIVES,
            level: 1,
            direction: 1.0,
            player: Player::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start -> Playing
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        self.enter_playing();
        true
    }

    /// GameOver -> Playing, same as starting from the title screen
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.enter_playing();
        true
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        log::info!("Paused at level {}", self.level);
        true
    }

    /// Paused -> Playing; the world is left untouched
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Fresh entries (title or game over), a dead player, or an empty grid
    /// all rebuild the world before play continues.
    fn enter_playing(&mut self) {
        let fresh = matches!(self.phase, GamePhase::Start | GamePhase::GameOver);
        if fresh || self.lives == 0 || self.enemies.is_empty() {
            wave::build_new_game(self);
            log::info!("New game started (seed {})", self.seed);
        }
        self.phase = GamePhase::Playing;
    }

    /// Playing -> GameOver. Emits the game-over sound only on the transition.
    pub fn game_over(&mut self, audio: &mut dyn AudioSink) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        audio.play(SoundEvent::GameOver);
        log::info!("Game over: score {} at level {}", self.score, self.level);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Total entity count across all collections (player included)
    pub fn entity_count(&self) -> usize {
        1 + self.enemies.len() + self.projectiles.len() + self.powerups.len() + self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_title() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.enemies.is_empty());
        assert!(!state.is_playing());
    }

    #[test]
    fn test_start_builds_world() {
        let mut state = GameState::new(1);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), WAVE_ROWS * WAVE_COLS);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);

        // Starting twice is ignored
        assert!(!state.start());
    }

    #[test]
    fn test_game_over_sound_once() {
        let mut state = GameState::new(1);
        state.start();
        let mut sounds: Vec<SoundEvent> = Vec::new();
        state.game_over(&mut sounds);
        state.game_over(&mut sounds);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(sounds, vec![SoundEvent::GameOver]);
    }

    #[test]
    fn test_restart_reinitializes() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 4200;
        state.level = 3;
        state.lives = 0;
        state.enemies.truncate(3);
        let mut sounds: Vec<SoundEvent> = Vec::new();
        state.game_over(&mut sounds);

        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.enemies.len(), WAVE_ROWS * WAVE_COLS);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = GameState::new(1);
        assert!(!state.restart());
        state.start();
        assert!(!state.restart());
    }

    #[test]
    fn test_pause_resume_keeps_world() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 120;
        state.enemies.truncate(5);

        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 120);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut state = GameState::new(1);
        assert!(!state.pause());
        assert!(!state.resume());
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Start);
    }
}
