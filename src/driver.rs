//! Host frame loop
//!
//! The driver owns the world and the clock. Each animation frame it samples
//! input once, steps the simulation if the game is being played, then
//! draws whatever survived. Menus and HUD read the result through `hud()`.

use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;
use crate::platform::{Clock, InputSource};
use crate::renderer::{self, RenderSink};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Everything the HUD and menus need
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub phase: GamePhase,
    pub fps: u32,
}

pub struct Driver<C: Clock> {
    pub state: GameState,
    pub settings: Settings,
    clock: C,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
    last_phase: GamePhase,
}

impl<C: Clock> Driver<C> {
    pub fn new(seed: u64, clock: C, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed),
            settings,
            clock,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
            last_phase: GamePhase::Start,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start from the title screen or restart after game over
    pub fn confirm(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Start => self.state.start(),
            GamePhase::GameOver => self.state.restart(),
            _ => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Run one animation frame. Returns the phase after the frame.
    ///
    /// `render` is `None` when no drawing surface is available; the
    /// simulation still advances and the frame is simply not drawn.
    pub fn frame(
        &mut self,
        input: &mut dyn InputSource,
        audio: &mut dyn AudioSink,
        render: Option<&mut dyn RenderSink>,
    ) -> GamePhase {
        let now = self.clock.now_ms();
        let snapshot = input.sample();

        if self.state.is_playing() {
            tick(&mut self.state, &snapshot, now, audio);
        }

        match render {
            Some(sink) => renderer::draw_world(&self.state, &self.settings, sink),
            None => log::debug!("No drawing surface, skipping render"),
        }

        self.track_fps(now);

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!("Phase {} -> {}", self.last_phase.as_str(), phase.as_str());
            self.last_phase = phase;
        }
        phase
    }

    fn track_fps(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if self.frames_seen >= FPS_WINDOW {
            // Slot at frame_index is the oldest of the window
            let elapsed = now - self.frame_times[self.frame_index];
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            lives: self.state.lives,
            level: self.state.level,
            phase: self.state.phase,
            fps: self.fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEvent;
    use crate::consts::*;
    use crate::platform::ManualClock;
    use crate::renderer::{DrawList, Shape};
    use crate::sim::{Owner, TickInput};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn driver() -> Driver<ManualClock> {
        Driver::new(42, ManualClock::new(1000.0), Settings::default())
    }

    #[test]
    fn test_title_screen_does_not_simulate() {
        let mut driver = driver();
        let mut input = TickInput {
            shoot: true,
            ..Default::default()
        };
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let mut list = DrawList::new();

        let phase = driver.frame(&mut input, &mut sounds, Some(&mut list));
        assert_eq!(phase, GamePhase::Start);
        assert!(sounds.is_empty());
        // Only the ship exists before the game starts
        assert_eq!(list.shapes().collect::<Vec<_>>(), vec![Shape::Ship]);
    }

    #[test]
    fn test_confirm_starts_and_restarts() {
        let mut driver = driver();
        assert!(driver.confirm());
        assert_eq!(driver.hud().phase, GamePhase::Playing);
        assert!(!driver.confirm());

        let mut sounds: Vec<SoundEvent> = Vec::new();
        driver.state.game_over(&mut sounds);
        assert_eq!(driver.hud().phase, GamePhase::GameOver);
        assert!(driver.confirm());
        assert_eq!(driver.hud().phase, GamePhase::Playing);
        assert_eq!(driver.hud().lives, START_LIVES);
    }

    #[test]
    fn test_held_fire_over_cooldown() {
        let mut driver = driver();
        driver.confirm();
        let mut input = TickInput {
            shoot: true,
            ..Default::default()
        };
        let mut sounds: Vec<SoundEvent> = Vec::new();

        // 14 frames span more than 200ms at 60Hz
        for _ in 0..14 {
            driver.frame(&mut input, &mut sounds, None);
            driver.clock().advance(FRAME_MS);
        }

        let shots = sounds.iter().filter(|s| **s == SoundEvent::Shoot).count();
        assert!(shots >= 2);
        let player_projectiles = driver
            .state
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Player)
            .count();
        assert!(player_projectiles >= 4);
    }

    #[test]
    fn test_missing_surface_still_simulates() {
        let mut driver = driver();
        driver.confirm();
        let mut input = TickInput::default();
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let x = driver.state.enemies[0].body.pos.x;

        driver.frame(&mut input, &mut sounds, None);
        assert_eq!(driver.state.enemies[0].body.pos.x, x + ENEMY_BASE_SPEED);

        // Drawing resumes once a surface comes back
        let mut list = DrawList::new();
        driver.frame(&mut input, &mut sounds, Some(&mut list));
        assert_eq!(list.len(), driver.state.entity_count());
    }

    #[test]
    fn test_paused_freezes_world() {
        let mut driver = driver();
        driver.confirm();
        driver.toggle_pause();
        let mut input = TickInput {
            right: true,
            shoot: true,
            ..Default::default()
        };
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let x = driver.state.player.body.pos.x;

        for _ in 0..10 {
            driver.frame(&mut input, &mut sounds, None);
            driver.clock().advance(FRAME_MS);
        }
        assert_eq!(driver.state.player.body.pos.x, x);
        assert!(sounds.is_empty());

        driver.toggle_pause();
        driver.frame(&mut input, &mut sounds, None);
        assert_eq!(driver.state.player.body.pos.x, x + PLAYER_SPEED);
    }

    #[test]
    fn test_fps_readout() {
        let mut driver = driver();
        let mut input = TickInput::default();
        let mut sounds: Vec<SoundEvent> = Vec::new();

        for _ in 0..(FPS_WINDOW + 5) {
            driver.frame(&mut input, &mut sounds, None);
            driver.clock().advance(FRAME_MS);
        }
        assert_eq!(driver.hud().fps, 60);
    }

    #[test]
    fn test_hud_serializes() {
        let driver = driver();
        let json = serde_json::to_string(&driver.hud()).unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
        assert!(json.contains("\"lives\":3"));
    }
}
