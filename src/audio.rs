//! Sound events and the sinks that play them
//!
//! The simulation only announces *that* something happened. Sinks decide
//! what it sounds like; on the web that's procedurally generated Web Audio,
//! no external files needed.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEvent {
    /// Player fired
    Shoot,
    /// Enemy destroyed or player hit
    Explosion,
    /// Run ended
    GameOver,
    /// Extra life collected
    Powerup,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Shoot => "shoot",
            SoundEvent::Explosion => "explosion",
            SoundEvent::GameOver => "gameover",
            SoundEvent::Powerup => "powerup",
        }
    }
}

/// Fire-and-forget sound output
///
/// Implementations must never fail or block the caller; a sound that can't
/// be played is simply dropped.
pub trait AudioSink {
    fn play(&mut self, event: SoundEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Records events in order
impl AudioSink for Vec<SoundEvent> {
    fn play(&mut self, event: SoundEvent) {
        self.push(event);
    }
}

/// Volume controls shared by real backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mixer {
    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Effective output gain
    pub fn volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Mixer, SoundEvent};
    use crate::error::{GameError, Result};

    /// Web Audio synthesizer
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        mixer: Mixer,
    }

    impl WebAudio {
        pub fn new(mixer: Mixer) -> Self {
            // May fail outside a secure context; the game runs silent then
            let ctx = match Self::create_context() {
                Ok(ctx) => Some(ctx),
                Err(e) => {
                    log::warn!("{} - audio disabled", e);
                    None
                }
            };
            Self { ctx, mixer }
        }

        fn create_context() -> Result<AudioContext> {
            AudioContext::new().map_err(|e| GameError::Audio {
                message: format!("{:?}", e),
            })
        }

        pub fn set_mixer(&mut self, mixer: Mixer) {
            self.mixer = mixer;
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Laser zap - fast downward square sweep
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(110.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Explosion - sawtooth rumble plus a short crackle
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(100.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.1, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                    .ok();
                osc.frequency().set_value_at_time(1500.0, t).ok();
                osc.frequency().set_value_at_time(400.0, t + 0.03).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }

        /// Extra life - rising ding
        fn play_powerup(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, event: SoundEvent) {
            let vol = self.mixer.volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match event {
                SoundEvent::Shoot => self.play_shoot(ctx, vol),
                SoundEvent::Explosion => self.play_explosion(ctx, vol),
                SoundEvent::Powerup => self.play_powerup(ctx, vol),
                SoundEvent::GameOver => self.play_game_over(ctx, vol),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_records_in_order() {
        let mut log: Vec<SoundEvent> = Vec::new();
        log.play(SoundEvent::Shoot);
        log.play(SoundEvent::Explosion);
        assert_eq!(log, vec![SoundEvent::Shoot, SoundEvent::Explosion]);
    }

    #[test]
    fn test_null_audio_accepts_everything() {
        let mut sink = NullAudio;
        for event in [
            SoundEvent::Shoot,
            SoundEvent::Explosion,
            SoundEvent::GameOver,
            SoundEvent::Powerup,
        ] {
            sink.play(event);
        }
    }

    #[test]
    fn test_event_names() {
        assert_eq!(SoundEvent::GameOver.as_str(), "gameover");
        assert_eq!(SoundEvent::Powerup.as_str(), "powerup");
    }

    #[test]
    fn test_mixer_volume() {
        let mut settings = crate::Settings::default();
        settings.master_volume = 0.5;
        settings.sfx_volume = 0.5;
        let mixer = Mixer::from_settings(&settings);
        assert_eq!(mixer.volume(), 0.25);

        settings.muted = true;
        assert_eq!(Mixer::from_settings(&settings).volume(), 0.0);

        settings.muted = false;
        settings.master_volume = 3.0;
        settings.sfx_volume = 1.0;
        assert_eq!(Mixer::from_settings(&settings).volume(), 1.0);
    }
}
